//! The pull-to-refresh widget for one scroll container.
//!
//! `PullRefresh` wires a [`GestureTracker`] and a [`SessionController`] to the
//! host. Touch events come in through [`PullRefresh::handle_touch`]; visual
//! writes are deferred to the host's next frame, while status and haptic
//! decisions are made synchronously on every move.
//!
//! ```ignore
//! let pull = PullRefresh::builder()
//!     .container(surface)
//!     .frames(runtime.clone())
//!     .spawner(runtime.clone())
//!     .on_refresh(|| async { reload_feed().await })
//!     .indicator_render(|status, _distance| status.to_string())
//!     .build()?;
//!
//! pull.handle_touch(&TouchEvent::start(120.0));
//! ```

use crate::config::PullRefreshConfig;
use crate::controller::{ReleaseDecision, SessionController};
use crate::error::ConfigError;
use crate::frame::FrameBatcher;
use crate::host::{
    FrameScheduler, Haptics, IndicatorRender, RefreshAction, RefreshFuture, ScrollContainer,
    UiSpawner,
};
use crate::input::{TouchEvent, TouchPhase, TouchResponse};
use crate::release::{RefreshTask, Release, ReleaseOutcome};
use crate::session::Session;
use crate::status::PullStatus;
use crate::tracker::GestureTracker;
use std::cell::RefCell;
use std::rc::Rc;

struct GestureState {
    tracker: GestureTracker,
    batcher: FrameBatcher,
}

/// Tracker borrows are short and never span a host call. All host writes go
/// through the controller, whose session is a `Cell`.
struct PullRefreshShared {
    gesture: RefCell<GestureState>,
    controller: SessionController,
}

impl PullRefreshShared {
    fn flush_frame(&self) {
        let pending = self.gesture.borrow_mut().batcher.take();
        if let Some(distance) = pending {
            self.controller.apply_frame(distance);
        }
    }
}

/// Cheap-to-clone handle to a pull-to-refresh widget.
#[derive(Clone)]
pub struct PullRefresh {
    shared: Rc<PullRefreshShared>,
    on_refresh: Option<Rc<dyn RefreshAction>>,
    frames: Rc<dyn FrameScheduler>,
    spawner: Rc<dyn UiSpawner>,
}

impl PullRefresh {
    pub fn builder() -> PullRefreshBuilder {
        PullRefreshBuilder::new()
    }

    pub fn status(&self) -> PullStatus {
        self.shared.controller.session().status()
    }

    pub fn distance(&self) -> f32 {
        self.shared.controller.session().distance()
    }

    pub fn threshold(&self) -> f32 {
        self.shared.controller.threshold()
    }

    pub fn haptic_fired(&self) -> bool {
        self.shared.controller.session().haptic_fired()
    }

    pub fn session(&self) -> Session {
        self.shared.controller.session()
    }

    pub fn is_tracking(&self) -> bool {
        self.shared.gesture.borrow().tracker.is_tracking()
    }

    /// True from the moment the finger lifts until the reset has run.
    pub fn is_releasing(&self) -> bool {
        self.shared.gesture.borrow().tracker.is_releasing()
    }

    /// Dispatches a touch event. Release tasks are handed to the spawner.
    pub fn handle_touch(&self, event: &TouchEvent) -> TouchResponse {
        match event.phase {
            TouchPhase::Start => self.touch_start(event.y),
            TouchPhase::Move => self.touch_move(event),
            TouchPhase::End | TouchPhase::Cancel => match self.release() {
                Release::Ignored => TouchResponse::IGNORED,
                Release::Reset(_) => TouchResponse::handled(),
                Release::Refreshing(task) => {
                    self.spawner.spawn_local(Box::pin(async move {
                        task.await;
                    }));
                    TouchResponse::handled()
                }
            },
        }
    }

    fn touch_start(&self, y: f32) -> TouchResponse {
        let controller = &self.shared.controller;
        let scroll_offset = controller.container().scroll_offset();
        let accepted = {
            let mut gesture = self.shared.gesture.borrow_mut();
            controller.with_session(|session| gesture.tracker.touch_start(session, y, scroll_offset))
        };
        if !accepted {
            log::trace!(
                "touch start ignored (scroll offset {scroll_offset}, releasing {})",
                self.is_releasing()
            );
            return TouchResponse::IGNORED;
        }
        log::debug!("pull gesture started at y={y}");
        TouchResponse::handled()
    }

    fn touch_move(&self, event: &TouchEvent) -> TouchResponse {
        let session = self.shared.controller.session();
        let distance = self.shared.gesture.borrow().tracker.touch_move(&session, event.y);
        let Some(distance) = distance else {
            return TouchResponse::IGNORED;
        };
        let default_prevented = event.prevent_default();
        log::trace!("pull moved to y={} distance={distance}", event.y);
        self.shared.controller.update_distance(distance);

        // A host callback may have released the gesture in the meantime.
        let needs_frame = {
            let mut gesture = self.shared.gesture.borrow_mut();
            gesture.tracker.is_tracking() && gesture.batcher.submit(distance)
        };
        if needs_frame {
            self.request_frame();
        }
        TouchResponse {
            handled: true,
            default_prevented,
        }
    }

    fn request_frame(&self) {
        let weak = Rc::downgrade(&self.shared);
        self.frames.request_frame(Box::new(move |_frame_time_nanos| {
            if let Some(shared) = weak.upgrade() {
                shared.flush_frame();
            }
        }));
    }

    /// Runs the release protocol.
    ///
    /// The session stops accepting moves before anything else happens and new
    /// touch-starts stay rejected until the reset has run. A release at or past
    /// the threshold returns a [`RefreshTask`] that must be polled to completion.
    pub fn release(&self) -> Release {
        {
            let mut gesture = self.shared.gesture.borrow_mut();
            if !gesture.tracker.begin_release() {
                return Release::Ignored;
            }
            gesture.batcher.discard();
        }

        match self.shared.controller.begin_release() {
            ReleaseDecision::Skip => {
                log::debug!("pull released below threshold");
                self.finish_release();
                Release::Reset(ReleaseOutcome::Skipped)
            }
            ReleaseDecision::Refresh => {
                log::debug!("pull released past threshold; refreshing");
                let refresh = self.start_refresh();
                Release::Refreshing(RefreshTask::new(self.clone(), refresh))
            }
        }
    }

    fn start_refresh(&self) -> RefreshFuture {
        match &self.on_refresh {
            Some(action) => action.refresh(),
            None => Box::pin(async { Ok(()) }),
        }
    }

    pub(crate) fn finish_release(&self) {
        self.shared.controller.reset();
        self.shared.gesture.borrow_mut().tracker.finish_release();
        log::debug!("pull session reset to idle");
    }
}

impl std::fmt::Debug for PullRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("PullRefresh");
        if let Ok(gesture) = self.shared.gesture.try_borrow() {
            debug.field("phase", &gesture.tracker.phase());
        }
        debug.field("controller", &self.shared.controller).finish()
    }
}

/// Builder for [`PullRefresh`]. `container`, `frames` and `spawner` are required.
#[derive(Default)]
pub struct PullRefreshBuilder {
    config: PullRefreshConfig,
    container: Option<Rc<dyn ScrollContainer>>,
    on_refresh: Option<Rc<dyn RefreshAction>>,
    render: Option<Rc<dyn IndicatorRender>>,
    haptics: Option<Rc<dyn Haptics>>,
    frames: Option<Rc<dyn FrameScheduler>>,
    spawner: Option<Rc<dyn UiSpawner>>,
}

impl PullRefreshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: PullRefreshConfig) -> Self {
        self.config = config;
        self
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn container(mut self, container: impl ScrollContainer + 'static) -> Self {
        self.container = Some(Rc::new(container));
        self
    }

    pub fn on_refresh(mut self, action: impl RefreshAction + 'static) -> Self {
        self.on_refresh = Some(Rc::new(action));
        self
    }

    pub fn indicator_render(mut self, render: impl IndicatorRender + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Some(Rc::new(haptics));
        self
    }

    pub fn frames(mut self, frames: impl FrameScheduler + 'static) -> Self {
        self.frames = Some(Rc::new(frames));
        self
    }

    pub fn spawner(mut self, spawner: impl UiSpawner + 'static) -> Self {
        self.spawner = Some(Rc::new(spawner));
        self
    }

    /// Validates the configuration and attaches the widget to its container.
    pub fn build(self) -> Result<PullRefresh, ConfigError> {
        self.config.validate()?;
        let container = self.container.ok_or(ConfigError::MissingContainer)?;
        let frames = self.frames.ok_or(ConfigError::MissingFrameScheduler)?;
        let spawner = self.spawner.ok_or(ConfigError::MissingSpawner)?;

        let controller = SessionController::new(&self.config, container, self.render, self.haptics);
        log::debug!(
            "pull-to-refresh attached with threshold {}",
            self.config.threshold
        );

        Ok(PullRefresh {
            shared: Rc::new(PullRefreshShared {
                gesture: RefCell::new(GestureState {
                    tracker: GestureTracker::new(self.config.threshold),
                    batcher: FrameBatcher::new(),
                }),
                controller,
            }),
            on_refresh: self.on_refresh,
            frames,
            spawner,
        })
    }
}

#[cfg(test)]
#[path = "tests/pull_refresh_tests.rs"]
mod tests;
