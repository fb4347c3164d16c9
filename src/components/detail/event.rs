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

//! Keyboard handling for the detail view inputs.
//!
//! Covers the add-track URL input and the title/description edit inputs.
//! Submissions are returned to the main key handler as [`DetailInput`]
//! values; this module never talks to the command channel itself.

use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::components::{DetailMode, DetailView};

/// A completed input interaction.
#[derive(Debug)]
pub(crate) enum DetailInput {
    /// The user submitted a track URL to resolve and add.
    AddTrack(String),
    /// The user saved the title/description edits.
    SaveEdits {
        title: String,
        description: Option<String>,
    },
}

impl DetailView {
    /// Routes a key event to whichever input currently owns the keyboard.
    ///
    /// Escape abandons the interaction without side effects. The add-track
    /// input is cleared on submission whether or not the URL turns out to
    /// resolve; Tab flips between the title and description inputs while
    /// editing.
    pub(crate) fn handle_input_event(&mut self, event: &Event) -> Option<DetailInput> {
        let Event::Key(key) = event else {
            return None;
        };

        match self.mode {
            DetailMode::Normal => None,

            DetailMode::AddTrack => match key.code {
                KeyCode::Esc => {
                    self.track_input.reset();
                    self.mode = DetailMode::Normal;
                    None
                }
                KeyCode::Enter => {
                    let url = self.track_input.value().trim().to_string();
                    self.track_input.reset();
                    self.mode = DetailMode::Normal;
                    if url.is_empty() {
                        None
                    } else {
                        Some(DetailInput::AddTrack(url))
                    }
                }
                _ => {
                    self.track_input.handle_event(event);
                    None
                }
            },

            DetailMode::EditTitle | DetailMode::EditDescription => match key.code {
                KeyCode::Esc => {
                    self.mode = DetailMode::Normal;
                    None
                }
                KeyCode::Tab => {
                    self.mode = if self.mode == DetailMode::EditTitle {
                        DetailMode::EditDescription
                    } else {
                        DetailMode::EditTitle
                    };
                    None
                }
                KeyCode::Enter => {
                    let title = self.title_input.value().trim().to_string();
                    let description = self.description_input.value().trim().to_string();
                    self.mode = DetailMode::Normal;
                    Some(DetailInput::SaveEdits {
                        title,
                        description: (!description.is_empty()).then_some(description),
                    })
                }
                _ => {
                    match self.mode {
                        DetailMode::EditTitle => self.title_input.handle_event(event),
                        _ => self.description_input.handle_event(event),
                    };
                    None
                }
            },
        }
    }
}
