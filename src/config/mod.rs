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

//! Application configuration.
//!
//! This module manages the application configuration file.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "cuelist";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Base URL of the remote streaming service API.
    pub api_url: String,
    /// API key passed on resolve and stream requests.
    pub client_id: String,
    /// Path to the local SQLite database file.
    pub database_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_url: "https://api.soundcloud.com".to_string(),
            client_id: String::new(),
            database_file: "cuelist.db".to_string(),
        }
    }
}

impl AppConfig {
    /// The URL the player streams a stored track from.
    pub(crate) fn stream_url(&self, track_ref: i64) -> String {
        format!(
            "{}/tracks/{}/stream?client_id={}",
            self.api_url, track_ref, self.client_id
        )
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_targets_the_track_ref() {
        let config = AppConfig {
            api_url: "https://api.example.com".to_string(),
            client_id: "abc123".to_string(),
            ..AppConfig::default()
        };

        assert_eq!(
            config.stream_url(13158665),
            "https://api.example.com/tracks/13158665/stream?client_id=abc123"
        );
    }
}
