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

//! Sequential playback state.
//!
//! This module models which track of the open playlist is currently loaded
//! as an explicit state machine, instead of scattering index and session
//! fields across the view layer. At most one track is loaded at a time; the
//! active index and the live stream session are either both present or both
//! absent, which this type encodes as a single [`Option`].
//!
//! Transitions return a [`PlaybackChange`] describing the side effect the
//! caller must apply to the audio player, keeping the state machine itself
//! free of I/O and directly testable. The "now playing" row indicator is
//! derived solely from this state, so exactly one row can ever show as
//! active, and resetting to idle clears every indicator at once.

use crate::model::Track;

/// The track currently loaded for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ActiveTrack {
    /// Index of the track within the open playlist's ordered track list.
    pub(crate) index: usize,
    /// Row id of the track, stable across list refetches.
    pub(crate) track_id: i64,
    pub(crate) paused: bool,
}

/// The side effect a transition requires of the audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlaybackChange {
    /// Load and start the track at this index, replacing any active session.
    Start { index: usize },
    /// The active track was reselected; toggle its pause state.
    TogglePause,
    /// Clear the active session and return to idle.
    Stop,
    /// Nothing to do.
    None,
}

#[derive(Debug, Default)]
pub(crate) struct PlaybackState {
    active: Option<ActiveTrack>,
}

impl PlaybackState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn active(&self) -> Option<&ActiveTrack> {
        self.active.as_ref()
    }

    /// The user selected the track at `index`.
    ///
    /// Reselecting the active track toggles between playing and paused
    /// without changing the index; selecting any other track replaces the
    /// active session and starts the new one.
    pub(crate) fn select(&mut self, tracks: &[Track], index: usize) -> PlaybackChange {
        let Some(track) = tracks.get(index) else {
            return PlaybackChange::None;
        };

        match self.active.as_mut() {
            Some(active) if active.index == index => {
                active.paused = !active.paused;
                PlaybackChange::TogglePause
            }
            _ => {
                self.active = Some(ActiveTrack {
                    index,
                    track_id: track.id,
                    paused: false,
                });
                PlaybackChange::Start { index }
            }
        }
    }

    /// The active track reached its natural end.
    ///
    /// Advances to the next track when one exists within the playlist
    /// bounds, otherwise resets to idle.
    pub(crate) fn finished(&mut self, tracks: &[Track]) -> PlaybackChange {
        let Some(active) = self.active else {
            return PlaybackChange::None;
        };

        let next = active.index + 1;
        match tracks.get(next) {
            Some(track) => {
                self.active = Some(ActiveTrack {
                    index: next,
                    track_id: track.id,
                    paused: false,
                });
                PlaybackChange::Start { index: next }
            }
            None => {
                self.active = None;
                PlaybackChange::Stop
            }
        }
    }

    /// Force-stop and reset to idle.
    ///
    /// Used when the active track or its playlist is deleted, and when the
    /// detail view is left. Returns [`PlaybackChange::None`] when already
    /// idle.
    pub(crate) fn stop(&mut self) -> PlaybackChange {
        match self.active.take() {
            Some(_) => PlaybackChange::Stop,
            None => PlaybackChange::None,
        }
    }

    /// Reconciles the state with a freshly fetched track list.
    ///
    /// Deleting tracks above the active one shifts its index; deleting the
    /// active track itself force-stops playback rather than leaving a
    /// dangling session.
    pub(crate) fn resync(&mut self, tracks: &[Track]) -> PlaybackChange {
        let Some(active) = self.active.as_mut() else {
            return PlaybackChange::None;
        };

        match tracks.iter().position(|t| t.id == active.track_id) {
            Some(index) => {
                active.index = index;
                PlaybackChange::None
            }
            None => {
                self.active = None;
                PlaybackChange::Stop
            }
        }
    }

    /// Synchronizes the paused flag with the player's reported state.
    pub(crate) fn set_paused(&mut self, paused: bool) {
        if let Some(active) = self.active.as_mut() {
            active.paused = paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                id: 100 + i as i64,
                playlist_id: 1,
                track_ref: 9000 + i as i64,
                user_ref: 1,
                title: format!("Track {}", i),
                username: "uploader".to_string(),
                duration: 60,
                position: i as i64 + 1,
            })
            .collect()
    }

    fn active_index(state: &PlaybackState) -> Option<usize> {
        state.active().map(|a| a.index)
    }

    #[test]
    fn completion_plays_tracks_in_order_then_goes_idle() {
        let tracks = tracks(3);
        let mut state = PlaybackState::new();

        assert_eq!(state.select(&tracks, 0), PlaybackChange::Start { index: 0 });

        let mut order = vec![0];
        loop {
            match state.finished(&tracks) {
                PlaybackChange::Start { index } => order.push(index),
                PlaybackChange::Stop => break,
                change => panic!("unexpected change {:?}", change),
            }
        }

        assert_eq!(order, vec![0, 1, 2]);
        assert!(state.active().is_none());
        assert_eq!(state.finished(&tracks), PlaybackChange::None);
    }

    #[test]
    fn indicator_follows_the_active_track() {
        let tracks = tracks(3);
        let mut state = PlaybackState::new();

        state.select(&tracks, 0);
        assert_eq!(active_index(&state), Some(0));

        state.finished(&tracks);
        assert_eq!(active_index(&state), Some(1));

        state.finished(&tracks);
        state.finished(&tracks);
        assert_eq!(active_index(&state), None);
    }

    #[test]
    fn reselecting_the_active_track_toggles_pause() {
        let tracks = tracks(2);
        let mut state = PlaybackState::new();

        state.select(&tracks, 1);
        assert!(!state.active().unwrap().paused);

        assert_eq!(state.select(&tracks, 1), PlaybackChange::TogglePause);
        assert!(state.active().unwrap().paused);
        assert_eq!(active_index(&state), Some(1));

        assert_eq!(state.select(&tracks, 1), PlaybackChange::TogglePause);
        assert!(!state.active().unwrap().paused);
    }

    #[test]
    fn selecting_a_different_track_replaces_the_active_one() {
        let tracks = tracks(3);
        let mut state = PlaybackState::new();

        state.select(&tracks, 0);
        assert_eq!(state.select(&tracks, 2), PlaybackChange::Start { index: 2 });
        assert_eq!(active_index(&state), Some(2));
        assert!(!state.active().unwrap().paused);
    }

    #[test]
    fn selecting_out_of_bounds_does_nothing() {
        let tracks = tracks(1);
        let mut state = PlaybackState::new();

        assert_eq!(state.select(&tracks, 5), PlaybackChange::None);
        assert!(state.active().is_none());
    }

    #[test]
    fn deleting_the_active_track_force_stops() {
        let all = tracks(3);
        let mut state = PlaybackState::new();

        state.select(&all, 1);

        let mut remaining = all.clone();
        remaining.remove(1);
        assert_eq!(state.resync(&remaining), PlaybackChange::Stop);
        assert!(state.active().is_none());
    }

    #[test]
    fn deleting_an_earlier_track_shifts_the_active_index() {
        let all = tracks(3);
        let mut state = PlaybackState::new();

        state.select(&all, 2);

        let mut remaining = all.clone();
        remaining.remove(0);
        assert_eq!(state.resync(&remaining), PlaybackChange::None);
        assert_eq!(active_index(&state), Some(1));
        assert_eq!(state.active().unwrap().track_id, all[2].id);
    }

    #[test]
    fn stop_is_idempotent() {
        let tracks = tracks(1);
        let mut state = PlaybackState::new();

        state.select(&tracks, 0);
        assert_eq!(state.stop(), PlaybackChange::Stop);
        assert_eq!(state.stop(), PlaybackChange::None);
    }
}
