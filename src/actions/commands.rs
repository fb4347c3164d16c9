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

//! Asynchronous application command processing.
//!
//! This module implements the command pattern used to offload database
//! mutations and network resolution from the main UI thread. It provides a
//! dedicated worker loop that owns the SQLite connection, the action-history
//! stack, and the track resolver, translates [`AppCommand`] requests into
//! operations against them, and broadcasts the results back to the
//! application via [`AppEvent`]s.
//!
//! Commands are self-contained: an `AddTrack` carries its own playlist id
//! and URL, so a resolution completing after the user has moved on cannot be
//! applied to the wrong playlist. Any error aborts the command and surfaces
//! as [`AppEvent::Error`] rather than being assumed to have succeeded.

use anyhow::Result;
use rusqlite::Connection;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    actions::events::AppEvent,
    config::AppConfig,
    db,
    history::{HistoryAction, HistoryStack},
    resolver::TrackResolver,
};

#[derive(Debug)]
pub(crate) enum AppCommand {
    FetchPlaylists,
    FetchPlaylist(i64),

    CreatePlaylist { title: String },
    DeletePlaylist { id: i64 },
    EditPlaylist {
        id: i64,
        title: String,
        description: Option<String>,
    },

    AddTrack { playlist_id: i64, url: String },
    DeleteTrack { id: i64 },

    Undo,

    ExitApplication,
}

/// Spawns a background thread to process application commands.
///
/// The worker thread initializes its own database connection, an empty
/// history stack, and the track resolver, then enters a blocking loop
/// listening for incoming [`AppCommand`]s.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `command_rx` - The receiving end of the command channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_command_worker(
    config: &AppConfig,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let conn = db::init_db(&config.database_file).expect("Failed to initialise database");
        let mut history = HistoryStack::new();
        let resolver = TrackResolver::new(&config);

        while let Ok(request) = command_rx.recv() {
            if let Err(e) = handle_command(&conn, &mut history, &resolver, request, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Orchestrates the execution of a single command.
///
/// Mutating commands run through the history stack so their inverse is
/// recorded before any change notification goes out; each then broadcasts
/// the new history depth and a store-changed event so the current view
/// re-fetches its backing data.
fn handle_command(
    conn: &Connection,
    history: &mut HistoryStack,
    resolver: &TrackResolver,
    command: AppCommand,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    match command {
        AppCommand::FetchPlaylists => {
            let playlists = db::fetch_playlists(conn)?;
            event_tx.send(AppEvent::PlaylistsLoaded(playlists))?;
        }
        AppCommand::FetchPlaylist(id) => match db::fetch_playlist(conn, id)? {
            Some(playlist) => {
                let tracks = db::fetch_tracks(conn, id)?;
                event_tx.send(AppEvent::PlaylistLoaded { playlist, tracks })?;
            }
            None => {
                event_tx.send(AppEvent::PlaylistGone(id))?;
            }
        },

        AppCommand::CreatePlaylist { title } => {
            history.record(conn, HistoryAction::CreatePlaylist { title })?;
            event_tx.send(AppEvent::HistoryChanged(history.depth()))?;
            event_tx.send(AppEvent::StoreChanged)?;
        }
        AppCommand::DeletePlaylist { id } => {
            history.record(conn, HistoryAction::DeletePlaylist { id })?;
            event_tx.send(AppEvent::HistoryChanged(history.depth()))?;
            event_tx.send(AppEvent::PlaylistGone(id))?;
            event_tx.send(AppEvent::StoreChanged)?;
        }
        AppCommand::EditPlaylist {
            id,
            title,
            description,
        } => {
            history.record(
                conn,
                HistoryAction::EditPlaylist {
                    id,
                    title,
                    description,
                },
            )?;
            event_tx.send(AppEvent::HistoryChanged(history.depth()))?;
            event_tx.send(AppEvent::StoreChanged)?;
        }

        AppCommand::AddTrack { playlist_id, url } => match resolver.resolve(&url) {
            Ok(track) => {
                history.record(conn, HistoryAction::CreateTrack { playlist_id, track })?;
                event_tx.send(AppEvent::HistoryChanged(history.depth()))?;
                event_tx.send(AppEvent::StoreChanged)?;
            }
            // Rejected and malformed responses share the alert path and
            // cause no state change.
            Err(e) => {
                event_tx.send(AppEvent::Error(e.to_string()))?;
            }
        },
        AppCommand::DeleteTrack { id } => {
            history.record(conn, HistoryAction::DeleteTrack { id })?;
            event_tx.send(AppEvent::HistoryChanged(history.depth()))?;
            event_tx.send(AppEvent::StoreChanged)?;
        }

        AppCommand::Undo => {
            if history.undo(conn)? {
                event_tx.send(AppEvent::HistoryChanged(history.depth()))?;
                event_tx.send(AppEvent::StoreChanged)?;
            }
        }

        AppCommand::ExitApplication => {
            event_tx.send(AppEvent::ExitApplication)?;
        }
    }

    Ok(())
}
