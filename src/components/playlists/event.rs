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

//! Keyboard handling for the add-playlist input.

use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::components::PlaylistsView;

impl PlaylistsView {
    /// Routes a key event to the add-playlist input.
    ///
    /// Returns the submitted title when the user presses Enter on a
    /// non-empty input; Escape abandons the input. An empty submission is
    /// ignored and the input stays active.
    pub(crate) fn handle_input_event(&mut self, event: &Event) -> Option<String> {
        let Event::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc => {
                self.input.reset();
                self.input_active = false;
                None
            }
            KeyCode::Enter => {
                let title = self.input.value().trim().to_string();
                if title.is_empty() {
                    return None;
                }
                self.input.reset();
                self.input_active = false;
                Some(title)
            }
            _ => {
                self.input.handle_event(event);
                None
            }
        }
    }
}
