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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), background worker updates
//! (database, resolver, audio player), and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state
//!    and triggers commands to the background workers. Views never mutate the
//!    store directly; a mutation round-trips through the command worker and
//!    comes back as [`AppEvent::StoreChanged`], at which point the current
//!    view re-fetches its backing data. Undo uses the same path, so a view
//!    showing data that an undo just rewrote refreshes like any other change.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    actions::commands::AppCommand,
    components::{Confirm, DetailInput},
    model::{Playlist, Track},
    playback::PlaybackChange,
    player::PlayerState,
    render::draw,
};

const FINE_VOLUME_DELTA: i32 = 1;
const VOLUME_DELTA: i32 = 5;

const FINE_SEEK_DELTA: i32 = 5;
const SEEK_DELTA: i32 = 20;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    PlaylistsLoaded(Vec<Playlist>),
    PlaylistLoaded {
        playlist: Playlist,
        tracks: Vec<Track>,
    },
    /// The addressed playlist no longer exists in the store.
    PlaylistGone(i64),

    /// The store was mutated; the current view should re-fetch.
    StoreChanged,
    HistoryChanged(usize),

    PlayerStateChanged(PlayerState),
    DurationChanged(u64),
    TimeChanged(f64),
    VolumeChanged(u32),
    TrackFinished,

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => return Err(anyhow!(message)),

            AppEvent::Key(key) => process_key_event(app, key)?,

            AppEvent::PlaylistsLoaded(playlists) => app.playlists_view.set_playlists(playlists),

            AppEvent::PlaylistLoaded { playlist, tracks } => {
                // A load racing a navigation away must not clobber the view.
                if app.detail_view.current_id() == Some(playlist.id) {
                    app.detail_view.set_playlist(playlist, tracks);
                    let change = app.playback.resync(&app.detail_view.tracks);
                    apply_playback_change(app, change)?;
                }
            }

            AppEvent::PlaylistGone(id) => {
                if app.main_view == MainView::Detail && app.detail_view.current_id() == Some(id) {
                    let change = app.playback.stop();
                    apply_playback_change(app, change)?;
                    app.main_view = MainView::Playlists;
                    app.alert = Some("Playlist no longer exists".to_string());
                    app.command_tx.send(AppCommand::FetchPlaylists)?;
                }
            }

            AppEvent::StoreChanged => match app.main_view {
                MainView::Playlists => app.command_tx.send(AppCommand::FetchPlaylists)?,
                MainView::Detail => {
                    if let Some(id) = app.detail_view.current_id() {
                        app.command_tx.send(AppCommand::FetchPlaylist(id))?;
                    }
                }
            },

            AppEvent::HistoryChanged(depth) => app.history_depth = depth,

            // Player state
            AppEvent::PlayerStateChanged(state) => {
                app.player_state = state;
                match state {
                    PlayerState::Playing => app.playback.set_paused(false),
                    PlayerState::Paused => app.playback.set_paused(true),
                    PlayerState::Stopped => {}
                }
            }
            AppEvent::DurationChanged(dur) => app.player_duration = Some(dur),
            AppEvent::VolumeChanged(vol) => app.volume = Some(vol),
            AppEvent::TimeChanged(seconds) => {
                app.player_time = Some(seconds as u64);
                if let Some(duration) = app.player_duration {
                    app.player_position = if duration > 0 {
                        Some(seconds / duration as f64)
                    } else {
                        None
                    };
                }
            }
            AppEvent::TrackFinished => {
                app.player_time = app.player_duration;
                let change = app.playback.finished(&app.detail_view.tracks);
                apply_playback_change(app, change)?;
            }

            AppEvent::Error(message) => app.alert = Some(message),

            AppEvent::Tick => {}
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to application actions and playback commands.
///
/// Input is consumed in priority order: a visible alert swallows the key that
/// dismisses it, then an open confirmation popup, then whichever text input
/// owns the keyboard, and only then the per-view key bindings.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.alert.take().is_some() {
        return Ok(());
    }

    if let Some(confirm) = app.confirm.take() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.command_tx.send(confirm.into_command())?;
            }
            _ => {}
        }
        return Ok(());
    }

    let event = Event::Key(key);

    if app.main_view == MainView::Playlists && app.playlists_view.input_active {
        if let Some(title) = app.playlists_view.handle_input_event(&event) {
            app.command_tx.send(AppCommand::CreatePlaylist { title })?;
        }
        return Ok(());
    }

    if app.main_view == MainView::Detail && app.detail_view.editing() {
        if let Some(input) = app.detail_view.handle_input_event(&event) {
            let Some(playlist_id) = app.detail_view.current_id() else {
                return Ok(());
            };
            match input {
                DetailInput::AddTrack(url) => {
                    app.command_tx.send(AppCommand::AddTrack { playlist_id, url })?;
                }
                DetailInput::SaveEdits { title, description } => {
                    if title.is_empty() {
                        app.alert = Some("Playlist title cannot be empty".to_string());
                    } else {
                        app.command_tx.send(AppCommand::EditPlaylist {
                            id: playlist_id,
                            title,
                            description,
                        })?;
                    }
                }
            }
        }
        return Ok(());
    }

    match app.main_view {
        MainView::Playlists => process_playlists_key_event(app, key),
        MainView::Detail => process_detail_key_event(app, key),
    }
}

fn process_playlists_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('j') | KeyCode::Down => app.playlists_view.goto_next(),
        KeyCode::Char('k') | KeyCode::Up => app.playlists_view.goto_previous(),

        KeyCode::Enter => {
            if let Some(playlist) = app.playlists_view.selected() {
                let id = playlist.id;
                app.main_view = MainView::Detail;
                app.detail_view.open(id);
                app.command_tx.send(AppCommand::FetchPlaylist(id))?;
            }
        }

        KeyCode::Char('a') => app.playlists_view.begin_add(),

        KeyCode::Char('d') => {
            if let Some(playlist) = app.playlists_view.selected() {
                app.confirm = Some(Confirm::new(
                    format!("Delete playlist \"{}\"?", playlist.title),
                    AppCommand::DeletePlaylist { id: playlist.id },
                ));
            }
        }

        KeyCode::Char('u') => app.command_tx.send(AppCommand::Undo)?,

        _ => {}
    }

    Ok(())
}

fn process_detail_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        // Leaving the playlist ends its playback session.
        KeyCode::Esc | KeyCode::Char('b') => {
            let change = app.playback.stop();
            apply_playback_change(app, change)?;
            app.main_view = MainView::Playlists;
            app.command_tx.send(AppCommand::FetchPlaylists)?;
        }

        KeyCode::Char('j') | KeyCode::Down => app.detail_view.goto_next(),
        KeyCode::Char('k') | KeyCode::Up => app.detail_view.goto_previous(),

        KeyCode::Enter => {
            if let Some(index) = app.detail_view.selected_index() {
                let change = app.playback.select(&app.detail_view.tracks, index);
                apply_playback_change(app, change)?;
            }
        }

        KeyCode::Char('a') => app.detail_view.begin_add_track(),
        KeyCode::Char('e') => app.detail_view.begin_edit(),

        KeyCode::Char('d') => {
            if let Some(track) = app.detail_view.selected_track() {
                app.confirm = Some(Confirm::new(
                    format!("Remove track \"{}\"?", track.title),
                    AppCommand::DeleteTrack { id: track.id },
                ));
            }
        }

        KeyCode::Char('u') => app.command_tx.send(AppCommand::Undo)?,

        // Playback controls
        KeyCode::Char(' ') => {
            if app.playback.active().is_some() {
                app.audio_player.toggle_pause()?;
            }
        }
        KeyCode::Char(',') => app.audio_player.seek(-FINE_SEEK_DELTA)?,
        KeyCode::Char('.') => app.audio_player.seek(FINE_SEEK_DELTA)?,
        KeyCode::Char('<') => app.audio_player.seek(-SEEK_DELTA)?,
        KeyCode::Char('>') => app.audio_player.seek(SEEK_DELTA)?,
        KeyCode::Char('-') => app.audio_player.adjust_volume(-FINE_VOLUME_DELTA)?,
        KeyCode::Char('=') => app.audio_player.adjust_volume(FINE_VOLUME_DELTA)?,
        KeyCode::Char('_') => app.audio_player.adjust_volume(-VOLUME_DELTA)?,
        KeyCode::Char('+') => app.audio_player.adjust_volume(VOLUME_DELTA)?,
        KeyCode::Char('m') => app.audio_player.toggle_mute()?,

        _ => {}
    }

    Ok(())
}

/// Applies a playback transition's side effect to the audio player.
///
/// Track URLs are synthesized from the stored track reference at the moment
/// playback starts, so they are never persisted.
fn apply_playback_change(app: &mut App, change: PlaybackChange) -> Result<()> {
    match change {
        PlaybackChange::Start { index } => {
            if let Some(track) = app.detail_view.tracks.get(index) {
                let url = app.config.stream_url(track.track_ref);
                app.audio_player.play_url(&url)?;
            }
        }
        PlaybackChange::TogglePause => app.audio_player.toggle_pause()?,
        PlaybackChange::Stop => {
            app.audio_player.stop()?;
            app.player_duration = None;
            app.player_time = None;
            app.player_position = None;
        }
        PlaybackChange::None => {}
    }

    Ok(())
}
