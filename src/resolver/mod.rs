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

//! Track URL resolution against the remote streaming service.
//!
//! This module turns a user-supplied track URL into the attributes needed to
//! store a [`NewTrack`], by calling the service's resolve endpoint and
//! validating the returned descriptor. Requests run on the command worker
//! thread with a blocking HTTP client; the UI thread never waits on them.
//!
//! A descriptor is only accepted when its `kind` is `"track"`; anything else
//! (a playlist URL, a user page, malformed JSON) is rejected with a
//! [`ResolveError`] that surfaces to the user as an alert and causes no state
//! change.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::{config::AppConfig, model::NewTrack};

const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// The wire shape returned by the resolve endpoint.
///
/// Every field other than `kind` and `id` is optional; defaults are applied
/// when the service omits them.
#[derive(Debug, Deserialize)]
pub(crate) struct TrackDescriptor {
    pub(crate) kind: String,
    pub(crate) id: i64,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) user_id: Option<i64>,
    /// Duration in milliseconds, as the service reports it.
    #[serde(default)]
    pub(crate) duration: Option<i64>,
    #[serde(default)]
    pub(crate) user: Option<UserDescriptor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDescriptor {
    #[serde(default)]
    pub(crate) username: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum ResolveError {
    #[error("Failed to contact the resolve endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The resolve endpoint returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("The provided url is not a valid track")]
    NotATrack,
}

/// Resolves user-supplied track URLs against the remote service.
pub(crate) struct TrackResolver {
    client: reqwest::blocking::Client,
    api_url: String,
    client_id: String,
}

impl TrackResolver {
    pub(crate) fn new(config: &AppConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(RESOLVE_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url: config.api_url.clone(),
            client_id: config.client_id.clone(),
        }
    }

    /// Resolves a user-supplied URL to the attributes of a new track.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the request fails, the response is not
    /// valid JSON, or the descriptor is not a track.
    pub(crate) fn resolve(&self, url: &str) -> Result<NewTrack, ResolveError> {
        let response = self
            .client
            .get(format!("{}/resolve", self.api_url))
            .query(&[("url", url), ("client_id", &self.client_id)])
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        let descriptor: TrackDescriptor = serde_json::from_str(&body)?;

        Self::accept(descriptor)
    }

    /// Validates a descriptor and applies defaults for missing fields.
    fn accept(descriptor: TrackDescriptor) -> Result<NewTrack, ResolveError> {
        if descriptor.kind != "track" {
            return Err(ResolveError::NotATrack);
        }

        Ok(NewTrack {
            track_ref: descriptor.id,
            user_ref: descriptor.user_id.unwrap_or(0),
            title: descriptor.title.unwrap_or_default(),
            username: descriptor
                .user
                .and_then(|user| user.username)
                .unwrap_or_default(),
            duration: descriptor.duration.unwrap_or(0) / 1000,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_descriptor_is_accepted_with_defaults() {
        let json = r#"{
            "kind": "track",
            "id": 13158665,
            "title": "Munching at Tiannas house",
            "user_id": 3699101,
            "duration": 208094,
            "user": { "username": "Evil-needle" }
        }"#;

        let descriptor: TrackDescriptor = serde_json::from_str(json).unwrap();
        let track = TrackResolver::accept(descriptor).unwrap();

        assert_eq!(track.track_ref, 13158665);
        assert_eq!(track.user_ref, 3699101);
        assert_eq!(track.title, "Munching at Tiannas house");
        assert_eq!(track.username, "Evil-needle");
        assert_eq!(track.duration, 208);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{ "kind": "track", "id": 7 }"#;

        let descriptor: TrackDescriptor = serde_json::from_str(json).unwrap();
        let track = TrackResolver::accept(descriptor).unwrap();

        assert_eq!(track.track_ref, 7);
        assert_eq!(track.user_ref, 0);
        assert!(track.title.is_empty());
        assert!(track.username.is_empty());
        assert_eq!(track.duration, 0);
    }

    #[test]
    fn non_track_descriptor_is_rejected() {
        let json = r#"{ "kind": "playlist", "id": 9, "title": "Not a track" }"#;

        let descriptor: TrackDescriptor = serde_json::from_str(json).unwrap();
        assert!(matches!(
            TrackResolver::accept(descriptor),
            Err(ResolveError::NotATrack)
        ));
    }

    #[test]
    fn malformed_body_is_a_resolve_error() {
        let result: Result<TrackDescriptor, _> = serde_json::from_str("not json");
        assert!(ResolveError::from(result.unwrap_err())
            .to_string()
            .contains("malformed"));
    }
}
