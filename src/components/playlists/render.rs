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

//! UI rendering logic for the playlist list view.
//!
//! The header shows the playlist count and the current undo depth, so the
//! undo affordance is always visible where the destructive controls live.

use std::fmt::Write;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{components::PlaylistsView, theme::Theme};

impl PlaylistsView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, history_depth: usize, theme: &Theme) {
        let input_height = if self.input_active { 1 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(input_height),
            ])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .padding(Padding::horizontal(1));

        let mut header_text = format!("Playlists | {}", self.playlists.len());
        if history_depth > 0 {
            let _ = write!(header_text, " | undo \u{00D7}{}", history_depth);
        }

        let header = Paragraph::new(header_text).block(header_block);
        f.render_widget(header, chunks[0]);

        self.draw_table(f, chunks[1], theme);

        if self.input_active {
            self.draw_input(f, chunks[2], theme);
        }
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rows = self.playlists.iter().map(|playlist| {
            let description = playlist.description.as_deref().unwrap_or("");

            Row::new(vec![
                Cell::from(
                    Line::from(playlist.title.as_str())
                        .style(Style::default().fg(theme.table_title_fg)),
                ),
                Cell::from(
                    Line::from(format!("{}", playlist.track_count))
                        .style(Style::default().fg(theme.table_count_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(
                    Line::from(description).style(Style::default().fg(theme.table_detail_fg)),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Length(6),
                Constraint::Percentage(60),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from("Title"),
                Cell::from(Line::from("Tracks").alignment(Alignment::Right)),
                Cell::from("Description"),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let label = "New playlist: ";

        let line = Line::from(vec![
            ratatui::text::Span::styled(label, Style::default().fg(theme.accent_colour)),
            ratatui::text::Span::raw(self.input.value()),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let cursor_x = area.x + label.len() as u16 + self.input.cursor() as u16;
        f.set_cursor_position((cursor_x, area.y));
    }
}
