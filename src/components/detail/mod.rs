// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Playlist detail view.
//!
//! Shows one playlist: its editable title and description and its ordered
//! track rows. The view is addressed by playlist id; the backing data is
//! re-fetched on entry and after every store change, so the rows always
//! reflect the persisted state.

mod event;
mod render;

pub(crate) use event::DetailInput;

use ratatui::widgets::TableState;
use tui_input::Input;

use crate::model::{Playlist, Track};

/// Which input, if any, currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailMode {
    Normal,
    AddTrack,
    EditTitle,
    EditDescription,
}

pub(crate) struct DetailView {
    current_id: Option<i64>,
    pub(crate) playlist: Option<Playlist>,
    pub(crate) tracks: Vec<Track>,
    pub(crate) table_state: TableState,
    pub(crate) mode: DetailMode,
    pub(crate) track_input: Input,
    pub(crate) title_input: Input,
    pub(crate) description_input: Input,
}

impl DetailView {
    pub(crate) fn new() -> Self {
        Self {
            current_id: None,
            playlist: None,
            tracks: vec![],
            table_state: TableState::new(),
            mode: DetailMode::Normal,
            track_input: Input::default(),
            title_input: Input::default(),
            description_input: Input::default(),
        }
    }

    /// Points the view at a playlist; data arrives with the next load.
    pub(crate) fn open(&mut self, id: i64) {
        self.current_id = Some(id);
        self.playlist = None;
        self.tracks.clear();
        self.table_state = TableState::new();
        self.mode = DetailMode::Normal;
        self.track_input.reset();
    }

    /// The playlist this view is addressed to, independent of whether its
    /// data has arrived yet.
    pub(crate) fn current_id(&self) -> Option<i64> {
        self.current_id
    }

    /// Replaces the backing data, keeping the selection in bounds.
    pub(crate) fn set_playlist(&mut self, playlist: Playlist, tracks: Vec<Track>) {
        self.playlist = Some(playlist);
        self.tracks = tracks;

        if self.tracks.is_empty() {
            self.table_state.select(None);
        } else {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(i.min(self.tracks.len() - 1)));
        }
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.table_state
            .selected()
            .filter(|&i| i < self.tracks.len())
    }

    pub(crate) fn selected_track(&self) -> Option<&Track> {
        self.selected_index().and_then(|i| self.tracks.get(i))
    }

    pub(crate) fn goto_next(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub(crate) fn goto_previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub(crate) fn begin_add_track(&mut self) {
        self.track_input.reset();
        self.mode = DetailMode::AddTrack;
    }

    /// Enters edit mode with the inputs preloaded from the current data.
    pub(crate) fn begin_edit(&mut self) {
        let Some(playlist) = &self.playlist else {
            return;
        };

        self.title_input = Input::new(playlist.title.clone());
        self.description_input =
            Input::new(playlist.description.clone().unwrap_or_default());
        self.mode = DetailMode::EditTitle;
    }

    /// True while any input owns the keyboard.
    pub(crate) fn editing(&self) -> bool {
        self.mode != DetailMode::Normal
    }
}
