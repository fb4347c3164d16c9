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

//! Playlist list view.
//!
//! This is the application's default view: the collection of curated
//! playlists, with an inline input for creating a new one. Deleting and
//! undoing are routed through the main key handler; this component manages
//! the backing rows, the selection, and the add-playlist input state.

mod event;
mod render;

use ratatui::widgets::TableState;
use tui_input::Input;

use crate::model::Playlist;

pub(crate) struct PlaylistsView {
    pub(crate) playlists: Vec<Playlist>,
    pub(crate) table_state: TableState,
    pub(crate) input: Input,
    pub(crate) input_active: bool,
}

impl PlaylistsView {
    pub(crate) fn new() -> Self {
        Self {
            playlists: vec![],
            table_state: TableState::new(),
            input: Input::default(),
            input_active: false,
        }
    }

    /// Replaces the backing rows, keeping the selection in bounds.
    pub(crate) fn set_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;

        if self.playlists.is_empty() {
            self.table_state.select(None);
        } else {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(i.min(self.playlists.len() - 1)));
        }
    }

    pub(crate) fn selected(&self) -> Option<&Playlist> {
        self.table_state
            .selected()
            .and_then(|i| self.playlists.get(i))
    }

    pub(crate) fn goto_next(&mut self) {
        let len = self.playlists.len();
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
        let len = self.playlists.len();
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

    pub(crate) fn begin_add(&mut self) {
        self.input_active = true;
    }
}
