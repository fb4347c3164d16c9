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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation and the playlist and track operations. It uses cached
//! statements to optimize frequently executed queries.
//!
//! # Tables
//!
//! * `playlists` - Named, user-curated playlists.
//! * `tracks` - Remote track references with display metadata, ordered within
//!   their playlist by a `position` column.
//!
//! Deletion operations return a snapshot of the removed rows so that the
//! caller can record an inverse action for undo.

mod model;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::model::{DEFAULT_PLAYLIST_TITLE, NewTrack, Playlist, Track};

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL` and increases the cache size.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Arguments
///
/// * `path` - The file system path to the SQLite database file.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(&conn)?;

    Ok(conn)
}

/// Opens an in-memory database with the full schema, for tests.
#[cfg(test)]
pub(crate) fn init_test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Create the database schema.
///
/// This function creates the `playlists` and `tracks` tables if they do not
/// already exist.
///
/// It also sets up:
///
/// * **Foreign Key Constraints**: Automated cleanup via `ON DELETE CASCADE`.
/// * **Performance Indices**: An index on the track foreign key to optimize
///   playlist loads.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS playlists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            playlist_id INTEGER NOT NULL,
            track_ref INTEGER NOT NULL,
            user_ref INTEGER NOT NULL,
            title TEXT NOT NULL,
            username TEXT NOT NULL,
            duration INTEGER NOT NULL,
            position INTEGER NOT NULL,
            FOREIGN KEY (playlist_id) REFERENCES playlists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_playlist_id ON tracks (playlist_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Creates a new playlist and returns the stored row.
///
/// A blank title falls back to the default playlist title, matching the
/// behaviour of playlist creation from an empty input.
pub(crate) fn create_playlist(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
) -> Result<Playlist> {
    let title = if title.trim().is_empty() {
        DEFAULT_PLAYLIST_TITLE
    } else {
        title.trim()
    };

    let mut stmt =
        conn.prepare_cached("INSERT INTO playlists (title, description) VALUES (?1, ?2)")?;
    stmt.execute(params![title, description])?;

    Ok(Playlist {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        description: description.map(str::to_string),
        track_count: 0,
    })
}

/// Re-inserts a previously deleted playlist under its original id.
///
/// Used when undoing a playlist deletion; the associated tracks are restored
/// separately via [`insert_track`].
pub(crate) fn insert_playlist(conn: &Connection, playlist: &Playlist) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO playlists (id, title, description) VALUES (?1, ?2, ?3)")?;
    stmt.execute(params![playlist.id, playlist.title, playlist.description])?;

    Ok(())
}

/// Fetches all playlists with their track counts, ordered by title.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if there is a type mismatch
/// when mapping the database rows to the [`Playlist`] struct.
pub(crate) fn fetch_playlists(conn: &Connection) -> Result<Vec<Playlist>> {
    let sql = "
        SELECT pl.id, pl.title, pl.description, COUNT(tr.id)
        FROM playlists pl
        LEFT JOIN tracks tr ON tr.playlist_id = pl.id
        GROUP BY pl.id
        ORDER BY pl.title, pl.id
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    let results = stmt
        .query_map([], Playlist::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Fetches a single playlist by id, or `None` if it no longer exists.
///
/// A playlist can disappear between a view requesting it and the query
/// running, for example when the creation that produced it is undone, so
/// absence is not an error here.
pub(crate) fn fetch_playlist(conn: &Connection, id: i64) -> Result<Option<Playlist>> {
    let sql = "
        SELECT pl.id, pl.title, pl.description, COUNT(tr.id)
        FROM playlists pl
        LEFT JOIN tracks tr ON tr.playlist_id = pl.id
        WHERE pl.id = ?
        GROUP BY pl.id
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    let result = stmt.query_row([id], Playlist::from_row).optional()?;

    Ok(result)
}

/// Updates a playlist's title and description.
pub(crate) fn save_playlist(
    conn: &Connection,
    id: i64,
    title: &str,
    description: Option<&str>,
) -> Result<()> {
    let mut stmt =
        conn.prepare_cached("UPDATE playlists SET title = ?2, description = ?3 WHERE id = ?1")?;
    stmt.execute(params![id, title, description])?;

    Ok(())
}

/// Deletes a playlist and returns a snapshot of it and its tracks.
///
/// The tracks are removed by the `ON DELETE CASCADE` constraint; the snapshot
/// is captured first so the whole playlist can be restored by an undo.
///
/// # Errors
///
/// Returns an error if the playlist does not exist or if any query fails.
pub(crate) fn delete_playlist(conn: &Connection, id: i64) -> Result<(Playlist, Vec<Track>)> {
    let playlist = fetch_playlist(conn, id)?
        .with_context(|| format!("No playlist with id {} to delete", id))?;
    let tracks = fetch_tracks(conn, id)?;

    let mut stmt = conn.prepare_cached("DELETE FROM playlists WHERE id = ?")?;
    stmt.execute([id])?;

    Ok((playlist, tracks))
}

/// Appends a resolved track to the end of a playlist and returns the stored
/// row.
pub(crate) fn create_track(
    conn: &Connection,
    playlist_id: i64,
    track: &NewTrack,
) -> Result<Track> {
    let position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM tracks WHERE playlist_id = ?",
        [playlist_id],
        |r| r.get(0),
    )?;

    let sql = "
        INSERT INTO tracks (playlist_id, track_ref, user_ref, title, username, duration, position)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![
        playlist_id,
        track.track_ref,
        track.user_ref,
        track.title,
        track.username,
        track.duration,
        position,
    ])?;

    Ok(Track {
        id: conn.last_insert_rowid(),
        playlist_id,
        track_ref: track.track_ref,
        user_ref: track.user_ref,
        title: track.title.clone(),
        username: track.username.clone(),
        duration: track.duration,
        position,
    })
}

/// Re-inserts a previously deleted track under its original id and position.
pub(crate) fn insert_track(conn: &Connection, track: &Track) -> Result<()> {
    let sql = "
        INSERT INTO tracks (id, playlist_id, track_ref, user_ref, title, username, duration, position)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![
        track.id,
        track.playlist_id,
        track.track_ref,
        track.user_ref,
        track.title,
        track.username,
        track.duration,
        track.position,
    ])?;

    Ok(())
}

/// Fetches all tracks in a playlist, in playback order.
pub(crate) fn fetch_tracks(conn: &Connection, playlist_id: i64) -> Result<Vec<Track>> {
    let sql = "
        SELECT id, playlist_id, track_ref, user_ref, title, username, duration, position
        FROM tracks
        WHERE playlist_id = ?
        ORDER BY position, id
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    let results = stmt
        .query_map([playlist_id], Track::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Deletes a track and returns a snapshot of the removed row.
///
/// # Errors
///
/// Returns an error if the track does not exist or if any query fails.
pub(crate) fn delete_track(conn: &Connection, id: i64) -> Result<Track> {
    let sql = "
        SELECT id, playlist_id, track_ref, user_ref, title, username, duration, position
        FROM tracks
        WHERE id = ?
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    let track = stmt
        .query_row([id], Track::from_row)
        .optional()?
        .with_context(|| format!("No track with id {} to delete", id))?;

    let mut stmt = conn.prepare_cached("DELETE FROM tracks WHERE id = ?")?;
    stmt.execute([id])?;

    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> NewTrack {
        NewTrack {
            track_ref: 13158665,
            user_ref: 3699101,
            title: "Munching at Tiannas house".to_string(),
            username: "Evil-needle".to_string(),
            duration: 208,
        }
    }

    #[test]
    fn blank_playlist_title_falls_back_to_default() {
        let conn = init_test_db().unwrap();

        let playlist = create_playlist(&conn, "   ", None).unwrap();
        assert_eq!(playlist.title, DEFAULT_PLAYLIST_TITLE);

        let playlist = create_playlist(&conn, "Morning", None).unwrap();
        assert_eq!(playlist.title, "Morning");
    }

    #[test]
    fn tracks_are_appended_in_order() {
        let conn = init_test_db().unwrap();
        let playlist = create_playlist(&conn, "Mix", None).unwrap();

        let a = create_track(&conn, playlist.id, &sample_track()).unwrap();
        let b = create_track(&conn, playlist.id, &sample_track()).unwrap();
        assert!(a.position < b.position);

        let tracks = fetch_tracks(&conn, playlist.id).unwrap();
        assert_eq!(tracks, vec![a, b]);
    }

    #[test]
    fn delete_playlist_returns_snapshot_and_cascades() {
        let conn = init_test_db().unwrap();
        let playlist = create_playlist(&conn, "Mix", None).unwrap();
        let track = create_track(&conn, playlist.id, &sample_track()).unwrap();

        let (snapshot, tracks) = delete_playlist(&conn, playlist.id).unwrap();
        assert_eq!(snapshot.id, playlist.id);
        assert_eq!(tracks, vec![track]);

        assert!(fetch_playlist(&conn, playlist.id).unwrap().is_none());
        assert!(fetch_tracks(&conn, playlist.id).unwrap().is_empty());
    }

    #[test]
    fn reinserted_rows_keep_their_ids() {
        let conn = init_test_db().unwrap();
        let playlist = create_playlist(&conn, "Mix", None).unwrap();
        let track = create_track(&conn, playlist.id, &sample_track()).unwrap();

        let (snapshot, tracks) = delete_playlist(&conn, playlist.id).unwrap();
        insert_playlist(&conn, &snapshot).unwrap();
        for t in &tracks {
            insert_track(&conn, t).unwrap();
        }

        assert_eq!(fetch_tracks(&conn, playlist.id).unwrap(), vec![track]);
    }
}
