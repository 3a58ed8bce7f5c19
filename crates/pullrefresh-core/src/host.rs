//! Host abstraction traits.
//!
//! The widget never touches a concrete UI toolkit. Scroll position, visual
//! writes, haptics, frame scheduling and task execution are all delegated to
//! the host through these traits, so the same state machine can sit behind a
//! DOM element, a native view or a test double.

use crate::error::RefreshError;
use crate::status::PullStatus;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Future returned by a refresh action.
pub type RefreshFuture = Pin<Box<dyn Future<Output = Result<(), RefreshError>> + 'static>>;

/// Future spawned on the host's UI executor.
pub type LocalTask = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// How a visual write should be animated by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Follow the finger without easing.
    Immediate,
    /// Ease to the new value over the given duration.
    Animated(Duration),
}

/// Where the indicator surface should be placed when it is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorPlacement {
    /// Top edge of the indicator in the container's parent coordinates.
    pub top: f32,
}

/// The scrollable surface the gesture is attached to.
pub trait ScrollContainer {
    /// Current vertical scroll offset. Pulls only start at exactly `0.0`.
    fn scroll_offset(&self) -> f32;

    /// Top edge of the container, used to place the indicator above it.
    fn top(&self) -> f32 {
        0.0
    }

    fn set_translation(&self, dy: f32);

    /// Clips `inset` pixels off the bottom so translated content does not
    /// overflow the parent.
    fn set_clip_bottom(&self, inset: f32);

    fn set_transition(&self, transition: Transition);

    /// Creates the indicator surface next to the container.
    fn create_indicator(&self, placement: IndicatorPlacement) -> Box<dyn IndicatorSurface>;
}

/// The status indicator created by the container host.
pub trait IndicatorSurface {
    fn set_translation(&self, dy: f32);

    fn set_visible(&self, visible: bool);

    fn set_content(&self, content: &str);

    fn set_transition(&self, transition: Transition);
}

/// Device haptic feedback.
pub trait Haptics {
    fn pulse(&self, duration: Duration);
}

/// Requests a one-shot callback on the next rendered frame.
///
/// The callback receives the frame time in nanoseconds. Hosts should run every
/// callback they accept. One that is dropped unrun leaves the current drag
/// without visual updates until the finger lifts.
pub trait FrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(u64) + 'static>);
}

/// Runs futures on the host's UI thread.
pub trait UiSpawner {
    fn spawn_local(&self, task: LocalTask);
}

/// Caller-supplied asynchronous refresh.
pub trait RefreshAction {
    fn refresh(&self) -> RefreshFuture;
}

impl<F, Fut> RefreshAction for F
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<(), RefreshError>> + 'static,
{
    fn refresh(&self) -> RefreshFuture {
        Box::pin(self())
    }
}

/// Produces the indicator's content for a status and distance.
pub trait IndicatorRender {
    fn render(&self, status: PullStatus, distance: f32) -> String;
}

impl<F> IndicatorRender for F
where
    F: Fn(PullStatus, f32) -> String,
{
    fn render(&self, status: PullStatus, distance: f32) -> String {
        self(status, distance)
    }
}
