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

//! Confirmation popup for destructive actions.
//!
//! Holds the command to dispatch if the user confirms, so the key handler
//! only has to decide yes or no.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{actions::commands::AppCommand, theme::Theme};

pub(crate) struct Confirm {
    prompt: String,
    command: AppCommand,
}

impl Confirm {
    pub(crate) fn new(prompt: impl Into<String>, command: AppCommand) -> Self {
        Self {
            prompt: prompt.into(),
            command,
        }
    }

    /// Consumes the popup, yielding the confirmed command.
    pub(crate) fn into_command(self) -> AppCommand {
        self.command
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let width = (self.prompt.len() as u16 + 6).max(30).min(area.width);

        let [popup] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::uniform(1));

        let lines: Vec<Line> = vec![
            self.prompt.as_str().into(),
            "y / n".bold().fg(theme.accent_colour).into(),
        ];
        let text = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);

        f.render_widget(Clear, popup);
        f.render_widget(text, popup);
    }
}
