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

//! Render the streaming player bar.
//!
//! Shows the now-playing track, elapsed/total/remaining time, the volume
//! level, and the stream position. The now-playing line is derived from the
//! playback state and the open playlist's tracks, so it clears as soon as
//! playback goes idle.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util,
};

// MPV allows amplification above 100%.
const MAX_VOLUME: f64 = 130.0;

/// Renders the player bar including track info, timings, and gauges.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    draw_track_info(f, chunks[0], app);
    draw_volume(f, chunks[1], app);
    draw_position(f, chunks[2], app);
}

fn draw_track_info(f: &mut Frame, area: Rect, app: &App) {
    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let now_playing = app
        .playback
        .active()
        .and_then(|active| app.detail_view.tracks.get(active.index));

    let Some(track) = now_playing else {
        return;
    };

    let icon = match app.player_state {
        PlayerState::Playing => ICON_PLAY,
        PlayerState::Paused => ICON_PAUSE,
        PlayerState::Stopped => ICON_STOP,
    };

    let track_line = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().bold()).fg(Color::White),
        Span::styled(&track.title, Style::default().bold()).fg(app.theme.accent_colour),
        Span::raw(" by "),
        Span::styled(&track.username, Style::default().bold()).fg(app.theme.accent_colour),
    ]);
    f.render_widget(Paragraph::new(track_line), info_chunks[0]);

    let duration = app.player_duration.unwrap_or(0);
    let time = app.player_time.unwrap_or(0);
    let remaining = duration.saturating_sub(time);

    let time_line = Line::from(vec![
        Span::styled(util::format::format_time(time), Style::default().bold())
            .fg(app.theme.accent_colour),
        Span::raw(" / "),
        Span::styled(util::format::format_time(duration), Style::default().bold())
            .fg(app.theme.accent_colour),
        Span::raw(" (-"),
        Span::styled(util::format::format_time(remaining), Style::default().bold())
            .fg(app.theme.accent_colour),
        Span::raw(")"),
    ]);

    f.render_widget(
        Paragraph::new(time_line).alignment(Alignment::Right),
        info_chunks[1],
    );
}

fn draw_volume(f: &mut Frame, area: Rect, app: &App) {
    let volume_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(21),
            Constraint::Length(5),
        ])
        .split(area);

    let volume = app.volume.unwrap_or(0);
    let vol_ratio = (volume as f64 / MAX_VOLUME).clamp(0.0, 1.0);

    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(vol_ratio)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_chunks[1]);

    let volume_label = Paragraph::new(format!(" {}%", volume))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, volume_chunks[2]);
}

fn draw_position(f: &mut Frame, area: Rect, app: &App) {
    let position = app.player_position.unwrap_or(0.0).clamp(0.0, 1.0);

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, area);
}
