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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application: the curated
//! playlists and the externally hosted tracks they contain, mirroring the
//! underlying data schema used for curation and playback.

/// Title assigned to a playlist created without one.
pub(crate) const DEFAULT_PLAYLIST_TITLE: &str = "Untitled";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Playlist {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) track_count: i64,
}

/// A reference to an audio item hosted on the remote streaming service, plus
/// the display metadata captured when it was resolved.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Track {
    pub(crate) id: i64,
    pub(crate) playlist_id: i64,
    /// The remote service's track identifier, used to derive the stream URL.
    pub(crate) track_ref: i64,
    /// The remote service's identifier for the track's owner.
    pub(crate) user_ref: i64,
    pub(crate) title: String,
    pub(crate) username: String,
    /// Track length in seconds, as reported by the resolve endpoint.
    pub(crate) duration: i64,
    pub(crate) position: i64,
}

/// Attributes for a track about to be added to a playlist, produced by the
/// track resolver with defaults applied for any field the remote service
/// omitted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTrack {
    pub(crate) track_ref: i64,
    pub(crate) user_ref: i64,
    pub(crate) title: String,
    pub(crate) username: String,
    pub(crate) duration: i64,
}
