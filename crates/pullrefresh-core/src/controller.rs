//! Session state, haptic gating and the visual side of the release protocol.

use crate::config::PullRefreshConfig;
use crate::host::{
    Haptics, IndicatorPlacement, IndicatorRender, IndicatorSurface, ScrollContainer, Transition,
};
use crate::session::Session;
use crate::status::PullStatus;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// What the release protocol has to do after the finger lifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// Released short of the threshold; reset right away.
    Skip,
    /// Released at or past the threshold; the refresh action must run.
    Refresh,
}

/// Owns the session record and performs every host write for it.
///
/// The session lives in a `Cell` and all methods take `&self`, so host
/// callbacks run without any borrow held and may read the widget back.
pub struct SessionController {
    session: Cell<Session>,
    threshold: f32,
    haptic_duration: Duration,
    settle_transition: Duration,
    container: Rc<dyn ScrollContainer>,
    indicator: Box<dyn IndicatorSurface>,
    render: Option<Rc<dyn IndicatorRender>>,
    haptics: Option<Rc<dyn Haptics>>,
}

impl SessionController {
    pub fn new(
        config: &PullRefreshConfig,
        container: Rc<dyn ScrollContainer>,
        render: Option<Rc<dyn IndicatorRender>>,
        haptics: Option<Rc<dyn Haptics>>,
    ) -> Self {
        let placement = IndicatorPlacement {
            top: container.top() - config.indicator_offset,
        };
        let indicator = container.create_indicator(placement);
        indicator.set_visible(false);
        indicator.set_content("");

        Self {
            session: Cell::new(Session::new()),
            threshold: config.threshold,
            haptic_duration: config.haptic_duration,
            settle_transition: config.settle_transition,
            container,
            indicator,
            render,
            haptics,
        }
    }

    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub(crate) fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.session.get();
        let result = f(&mut session);
        self.session.set(session);
        result
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub(crate) fn container(&self) -> &dyn ScrollContainer {
        self.container.as_ref()
    }

    /// Applies a new distance from a touch move.
    ///
    /// Runs for every move, independent of frame batching. The first pull of
    /// a session shows the indicator right away, and the haptic cue fires on
    /// the exact move that first reaches the threshold.
    pub fn update_distance(&self, distance: f32) {
        let first_pull = self.session.get().status().is_idle();
        let threshold = self.threshold;
        let fire_haptic = self.with_session(|session| session.pull_to(distance, threshold));

        if first_pull {
            self.container.set_transition(Transition::Immediate);
            self.indicator.set_transition(Transition::Immediate);
            self.indicator.set_visible(true);
        }
        if fire_haptic {
            log::debug!("pull reached threshold {threshold} at distance {distance}");
            if let Some(haptics) = &self.haptics {
                haptics.pulse(self.haptic_duration);
            }
        }
    }

    /// Writes the batched visual state for one frame.
    pub fn apply_frame(&self, distance: f32) {
        log::trace!("apply pull frame at {distance}");
        self.translate(distance);
        self.emit(self.session.get().status(), distance);
    }

    /// First, synchronous half of the release protocol.
    ///
    /// Switches to the settle transition and, when the pull went far enough,
    /// pins the content at the threshold in the loading state.
    pub fn begin_release(&self) -> ReleaseDecision {
        let settle = Transition::Animated(self.settle_transition);
        self.indicator.set_transition(settle);
        self.container.set_transition(settle);

        if self.session.get().distance() < self.threshold {
            return ReleaseDecision::Skip;
        }
        self.with_session(Session::start_loading);
        self.emit(PullStatus::Loading, 0.0);
        self.translate(self.threshold);
        ReleaseDecision::Refresh
    }

    /// Restores the idle state. Runs after every release, refreshed or not.
    pub fn reset(&self) {
        self.session.set(Session::default());
        self.container.set_translation(0.0);
        self.container.set_clip_bottom(0.0);
        self.indicator.set_translation(0.0);
        self.indicator.set_visible(false);
        self.emit(PullStatus::Idle, 0.0);
    }

    fn translate(&self, distance: f32) {
        self.container.set_translation(distance);
        self.container.set_clip_bottom(distance);
        self.indicator.set_translation(distance);
    }

    fn emit(&self, status: PullStatus, distance: f32) {
        let content = self
            .render
            .as_ref()
            .map(|render| render.render(status, distance))
            .unwrap_or_default();
        self.indicator.set_content(&content);
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session.get())
            .field("threshold", &self.threshold)
            .field("has_render", &self.render.is_some())
            .field("has_haptics", &self.haptics.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
