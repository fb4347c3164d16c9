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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event to provide a reactive user interface.

pub(crate) mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    widgets::Paragraph,
};

use crate::{App, MainView, render::player::draw_player};

/// Renders the user interface to the terminal frame.
///
/// The screen is partitioned into the current main view, the player bar, and
/// a one-line footer. The footer carries either the pending alert or the key
/// hints for the current view; a pending confirmation popup is drawn last so
/// it overlays everything else.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, player, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

    match app.main_view {
        MainView::Playlists => {
            app.playlists_view
                .draw(f, outer[0], app.history_depth, &app.theme)
        }
        MainView::Detail => app.detail_view.draw(f, outer[0], &app.playback, &app.theme),
    };

    draw_player(f, outer[1], app);

    draw_footer(f, outer[2], app);

    if let Some(confirm) = &app.confirm {
        confirm.draw(f, area, &app.theme);
    }
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer = match &app.alert {
        Some(alert) => {
            Paragraph::new(format!(" {}", alert)).style(Style::default().bold().fg(app.theme.alert_fg))
        }
        None => {
            let hints = match app.main_view {
                MainView::Playlists => " j/k move | enter open | a add | d delete | u undo | q quit",
                MainView::Detail => {
                    " enter play | space pause | a add url | e edit | d remove | u undo | esc back"
                }
            };
            Paragraph::new(hints).style(Style::default().fg(app.theme.border_colour))
        }
    };

    f.render_widget(footer, area);
}
