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

//! Reversible action history.
//!
//! This module records the user's editing and destructive actions as tagged
//! commands and undoes them in strict reverse order. Each recorded action
//! executes immediately against the database and captures the snapshot its
//! inverse needs, so every stack entry is self-contained.
//!
//! The stack is an explicit value owned by the command worker; it is handed
//! to command handling rather than living in any global state. Only the most
//! recent entry is reversible per pop; repeated undo unwinds entries one at a
//! time until the stack is exhausted.
//!
//! Undo applies captured snapshots naively: undoing a deletion restores the
//! row exactly as it was captured, discarding any edits made between capture
//! and deletion, and undoing a creation deletes the row as it currently
//! exists.

use anyhow::Result;
use rusqlite::Connection;

use crate::{
    db,
    model::{NewTrack, Playlist, Track},
};

/// A user action to be executed and recorded for undo.
#[derive(Debug)]
pub(crate) enum HistoryAction {
    CreatePlaylist { title: String },
    DeletePlaylist { id: i64 },
    EditPlaylist {
        id: i64,
        title: String,
        description: Option<String>,
    },
    CreateTrack { playlist_id: i64, track: NewTrack },
    DeleteTrack { id: i64 },
}

/// A recorded entry: the inverse of an executed action, holding the captured
/// result of the forward action as its input.
#[derive(Debug)]
enum HistoryEntry {
    CreatedPlaylist { playlist: Playlist },
    DeletedPlaylist {
        playlist: Playlist,
        tracks: Vec<Track>,
    },
    EditedPlaylist {
        id: i64,
        title: String,
        description: Option<String>,
    },
    CreatedTrack { track: Track },
    DeletedTrack { track: Track },
}

/// A last-in-first-out log of reversible user actions.
#[derive(Debug, Default)]
pub(crate) struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Current depth, used purely for the UI affordance.
    pub(crate) fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Executes `action` against the database and pushes its inverse.
    ///
    /// The entry is on the stack before any change notification goes out, so
    /// observers reacting to the action already see the updated depth.
    ///
    /// # Errors
    ///
    /// Errors from the forward action propagate to the caller; a failed
    /// action is not pushed. The stack is not transactionally protected
    /// against partial failures.
    pub(crate) fn record(&mut self, conn: &Connection, action: HistoryAction) -> Result<()> {
        let entry = match action {
            HistoryAction::CreatePlaylist { title } => {
                let playlist = db::create_playlist(conn, &title, None)?;
                HistoryEntry::CreatedPlaylist { playlist }
            }
            HistoryAction::DeletePlaylist { id } => {
                let (playlist, tracks) = db::delete_playlist(conn, id)?;
                HistoryEntry::DeletedPlaylist { playlist, tracks }
            }
            HistoryAction::EditPlaylist {
                id,
                title,
                description,
            } => {
                let before = db::fetch_playlist(conn, id)?
                    .ok_or_else(|| anyhow::anyhow!("No playlist with id {} to edit", id))?;
                db::save_playlist(conn, id, &title, description.as_deref())?;
                HistoryEntry::EditedPlaylist {
                    id,
                    title: before.title,
                    description: before.description,
                }
            }
            HistoryAction::CreateTrack { playlist_id, track } => {
                let track = db::create_track(conn, playlist_id, &track)?;
                HistoryEntry::CreatedTrack { track }
            }
            HistoryAction::DeleteTrack { id } => {
                let track = db::delete_track(conn, id)?;
                HistoryEntry::DeletedTrack { track }
            }
        };

        self.entries.push(entry);

        Ok(())
    }

    /// Pops the most recent entry and applies its inverse.
    ///
    /// Returns `false` without touching anything when the stack is empty.
    ///
    /// # Errors
    ///
    /// Errors from the inverse action propagate to the caller; the entry
    /// stays popped.
    pub(crate) fn undo(&mut self, conn: &Connection) -> Result<bool> {
        let Some(entry) = self.entries.pop() else {
            return Ok(false);
        };

        match entry {
            HistoryEntry::CreatedPlaylist { playlist } => {
                db::delete_playlist(conn, playlist.id)?;
            }
            HistoryEntry::DeletedPlaylist { playlist, tracks } => {
                db::insert_playlist(conn, &playlist)?;
                for track in &tracks {
                    db::insert_track(conn, track)?;
                }
            }
            HistoryEntry::EditedPlaylist {
                id,
                title,
                description,
            } => {
                db::save_playlist(conn, id, &title, description.as_deref())?;
            }
            HistoryEntry::CreatedTrack { track } => {
                db::delete_track(conn, track.id)?;
            }
            HistoryEntry::DeletedTrack { track } => {
                db::insert_track(conn, &track)?;
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track(n: i64) -> NewTrack {
        NewTrack {
            track_ref: 1000 + n,
            user_ref: 42,
            title: format!("Track {}", n),
            username: "uploader".to_string(),
            duration: 180,
        }
    }

    fn state(conn: &Connection) -> (Vec<Playlist>, Vec<Vec<Track>>) {
        let playlists = db::fetch_playlists(conn).unwrap();
        let tracks = playlists
            .iter()
            .map(|p| db::fetch_tracks(conn, p.id).unwrap())
            .collect();
        (playlists, tracks)
    }

    #[test]
    fn undo_on_empty_stack_is_a_silent_noop() {
        let conn = db::init_test_db().unwrap();
        let mut history = HistoryStack::new();

        assert!(!history.undo(&conn).unwrap());
        assert_eq!(history.depth(), 0);
    }

    #[test]
    fn depth_tracks_records_minus_undos() {
        let conn = db::init_test_db().unwrap();
        let mut history = HistoryStack::new();

        for i in 0..4 {
            history
                .record(
                    &conn,
                    HistoryAction::CreatePlaylist {
                        title: format!("Playlist {}", i),
                    },
                )
                .unwrap();
        }
        assert_eq!(history.depth(), 4);

        history.undo(&conn).unwrap();
        history.undo(&conn).unwrap();
        assert_eq!(history.depth(), 2);
    }

    #[test]
    fn record_then_undo_round_trips_database_state() {
        let conn = db::init_test_db().unwrap();
        let mut history = HistoryStack::new();

        // Seed a playlist outside the recorded sequence.
        let playlist = db::create_playlist(&conn, "Keep", None).unwrap();
        let track = db::create_track(&conn, playlist.id, &sample_track(0)).unwrap();
        let before = state(&conn);

        history
            .record(
                &conn,
                HistoryAction::CreateTrack {
                    playlist_id: playlist.id,
                    track: sample_track(1),
                },
            )
            .unwrap();
        history
            .record(
                &conn,
                HistoryAction::EditPlaylist {
                    id: playlist.id,
                    title: "Renamed".to_string(),
                    description: Some("late night".to_string()),
                },
            )
            .unwrap();
        history
            .record(&conn, HistoryAction::DeleteTrack { id: track.id })
            .unwrap();
        history
            .record(&conn, HistoryAction::DeletePlaylist { id: playlist.id })
            .unwrap();

        assert_eq!(history.depth(), 4);

        while history.undo(&conn).unwrap() {}

        assert_eq!(history.depth(), 0);
        assert_eq!(state(&conn), before);
    }

    #[test]
    fn undo_of_deletion_restores_the_captured_snapshot() {
        let conn = db::init_test_db().unwrap();
        let mut history = HistoryStack::new();

        let playlist = db::create_playlist(&conn, "Mix", None).unwrap();
        let track = db::create_track(&conn, playlist.id, &sample_track(7)).unwrap();

        history
            .record(&conn, HistoryAction::DeletePlaylist { id: playlist.id })
            .unwrap();
        assert!(db::fetch_playlist(&conn, playlist.id).unwrap().is_none());

        assert!(history.undo(&conn).unwrap());
        let restored = db::fetch_playlist(&conn, playlist.id).unwrap().unwrap();
        assert_eq!(restored.title, "Mix");
        assert_eq!(db::fetch_tracks(&conn, playlist.id).unwrap(), vec![track]);
    }

    #[test]
    fn failed_forward_action_is_not_pushed() {
        let conn = db::init_test_db().unwrap();
        let mut history = HistoryStack::new();

        assert!(history
            .record(&conn, HistoryAction::DeletePlaylist { id: 999 })
            .is_err());
        assert_eq!(history.depth(), 0);
    }
}
