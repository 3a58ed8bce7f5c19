//! Touch tracking for a single container.
//!
//! The tracker only knows whether a gesture is live and turns touch samples
//! into damped distances. Status, haptics and visuals belong to the
//! [`SessionController`](crate::SessionController).

use crate::damping::damp;
use crate::session::Session;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackerPhase {
    /// Waiting for a touch-start at the top of the container.
    #[default]
    Idle,
    /// Finger down, moves are converted to distances.
    Tracking,
    /// Finger lifted, the release protocol has not finished yet.
    Releasing,
}

#[derive(Debug)]
pub struct GestureTracker {
    phase: TrackerPhase,
    threshold: f32,
}

impl GestureTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: TrackerPhase::Idle,
            threshold,
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        self.phase == TrackerPhase::Tracking
    }

    pub fn is_releasing(&self) -> bool {
        self.phase == TrackerPhase::Releasing
    }

    /// Starts tracking when the container sits exactly at its top and no
    /// earlier release is still running. Otherwise nothing is recorded.
    pub fn touch_start(&mut self, session: &mut Session, y: f32, scroll_offset: f32) -> bool {
        if self.phase != TrackerPhase::Idle || scroll_offset != 0.0 {
            return false;
        }
        session.begin(y);
        self.phase = TrackerPhase::Tracking;
        true
    }

    /// Returns the damped distance for a downward move, or `None` when the
    /// gesture is inactive or the finger is at or above its start point.
    pub fn touch_move(&self, session: &Session, y: f32) -> Option<f32> {
        if self.phase != TrackerPhase::Tracking {
            return None;
        }
        let delta_y = y - session.start_y();
        if delta_y <= 0.0 {
            return None;
        }
        Some(damp(delta_y, self.threshold))
    }

    /// Stops accepting moves. Returns false when there was nothing to release.
    pub fn begin_release(&mut self) -> bool {
        if self.phase != TrackerPhase::Tracking {
            return false;
        }
        self.phase = TrackerPhase::Releasing;
        true
    }

    pub fn finish_release(&mut self) {
        self.phase = TrackerPhase::Idle;
    }
}
