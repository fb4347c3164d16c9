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

//! UI rendering logic for the playlist detail view.
//!
//! Each track row carries a play/pause indicator derived from the playback
//! state, so exactly one row shows as active at any time and all of them
//! revert when playback goes idle.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::{DetailMode, DetailView},
    playback::PlaybackState,
    render::icons::{ICON_PAUSE, ICON_PLAY},
    theme::Theme,
    util,
};

impl DetailView {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        playback: &PlaybackState,
        theme: &Theme,
    ) {
        let input_height = if self.mode == DetailMode::AddTrack { 1 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(input_height),
            ])
            .split(area);

        self.draw_header(f, chunks[0], theme);
        self.draw_table(f, chunks[1], playback, theme);

        if self.mode == DetailMode::AddTrack {
            self.draw_track_input(f, chunks[2], theme);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        match self.mode {
            DetailMode::EditTitle | DetailMode::EditDescription => {
                self.draw_edit_line(
                    f,
                    lines[0],
                    "Title: ",
                    &self.title_input,
                    self.mode == DetailMode::EditTitle,
                    theme,
                );
                self.draw_edit_line(
                    f,
                    lines[1],
                    "Description: ",
                    &self.description_input,
                    self.mode == DetailMode::EditDescription,
                    theme,
                );
            }
            _ => {
                let title = self
                    .playlist
                    .as_ref()
                    .map_or("Loading...", |p| p.title.as_str());
                let description = self
                    .playlist
                    .as_ref()
                    .and_then(|p| p.description.as_deref())
                    .unwrap_or("");

                f.render_widget(
                    Paragraph::new(title).style(Style::default().bold().fg(theme.accent_colour)),
                    lines[0],
                );
                f.render_widget(
                    Paragraph::new(description)
                        .style(Style::default().fg(theme.table_detail_fg)),
                    lines[1],
                );
            }
        }
    }

    fn draw_edit_line(
        &self,
        f: &mut Frame,
        area: Rect,
        label: &str,
        input: &tui_input::Input,
        focused: bool,
        theme: &Theme,
    ) {
        let label_style = if focused {
            Style::default().bold().fg(theme.accent_colour)
        } else {
            Style::default().fg(theme.table_detail_fg)
        };

        let line = Line::from(vec![
            Span::styled(label.to_string(), label_style),
            Span::raw(input.value().to_string()),
        ]);
        f.render_widget(Paragraph::new(line), area);

        if focused {
            let cursor_x = area.x + label.len() as u16 + input.cursor() as u16;
            f.set_cursor_position((cursor_x, area.y));
        }
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, playback: &PlaybackState, theme: &Theme) {
        let active = playback.active();

        let rows = self.tracks.iter().enumerate().map(|(i, track)| {
            let indicator = match active {
                Some(a) if a.index == i => {
                    let icon = if a.paused { ICON_PAUSE } else { ICON_PLAY };
                    Line::from(icon).style(Style::default().fg(theme.accent_colour))
                }
                _ => Line::from(""),
            };

            let duration: u64 = track.duration.try_into().unwrap_or(0);
            let time = util::format::format_time(duration);

            Row::new(vec![
                Cell::from(indicator),
                Cell::from(
                    Line::from(format!("{:02}", i + 1))
                        .style(Style::default().fg(theme.table_position_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(
                    Line::from(track.title.as_str())
                        .style(Style::default().fg(theme.table_title_fg)),
                ),
                Cell::from(
                    Line::from(track.username.as_str())
                        .style(Style::default().fg(theme.table_username_fg)),
                ),
                Cell::from(
                    Line::from(time)
                        .style(Style::default().fg(theme.table_time_fg))
                        .alignment(Alignment::Right),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Percentage(50),
                Constraint::Percentage(30),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from("Title"),
                Cell::from("Uploader"),
                Cell::from(Line::from("Time").alignment(Alignment::Right)),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_track_input(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let label = "Add track url: ";

        let line = Line::from(vec![
            Span::styled(label, Style::default().fg(theme.accent_colour)),
            Span::raw(self.track_input.value()),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let cursor_x = area.x + label.len() as u16 + self.track_input.cursor() as u16;
        f.set_cursor_position((cursor_x, area.y));
    }
}
