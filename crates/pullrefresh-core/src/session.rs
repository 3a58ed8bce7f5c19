use crate::status::PullStatus;

/// Live state of one pull gesture.
///
/// `distance` is never negative and is always `0.0` while the status is
/// [`PullStatus::Idle`]. The haptic flag is only cleared by [`Session::reset`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Session {
    status: PullStatus,
    distance: f32,
    start_y: f32,
    haptic_fired: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PullStatus {
        self.status
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn haptic_fired(&self) -> bool {
        self.haptic_fired
    }

    pub(crate) fn begin(&mut self, start_y: f32) {
        self.start_y = start_y;
    }

    /// Records a new damped distance and returns true when the haptic cue
    /// should fire for it.
    pub(crate) fn pull_to(&mut self, distance: f32, threshold: f32) -> bool {
        debug_assert!(self.status != PullStatus::Loading);
        self.status = PullStatus::Pulling;
        self.distance = distance.max(0.0);
        if !self.haptic_fired && self.distance >= threshold {
            self.haptic_fired = true;
            return true;
        }
        false
    }

    pub(crate) fn start_loading(&mut self) {
        debug_assert_eq!(self.status, PullStatus::Pulling);
        self.status = PullStatus::Loading;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
