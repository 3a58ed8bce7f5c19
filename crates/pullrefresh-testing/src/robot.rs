//! Robot-style driver for pull-to-refresh tests.
//!
//! The robot owns a [`StdRuntime`], a [`RecordingSurface`], haptics and a
//! [`ManualRefresh`], and wires them into a real [`PullRefresh`]. Tests speak
//! in gestures (`touch_down`, `drag_to`, `lift`) and frames instead of raw
//! host plumbing.
//!
//! # Example
//!
//! ```
//! use pullrefresh_testing::PullRobot;
//!
//! let mut robot = PullRobot::new();
//! robot.touch_down(100.0);
//! robot.drag_to(200.0);
//! robot.advance_frame();
//! robot.lift();
//!
//! assert_eq!(robot.refresh().invocations(), 1);
//! robot.refresh().complete();
//! robot.wait_for_idle();
//! ```

use crate::recording::{RecordingHaptics, RecordingSurface};
use crate::refresh::ManualRefresh;
use pullrefresh_core::{
    IndicatorRender, PullRefresh, PullRefreshConfig, PullStatus, TouchEvent, TouchResponse,
};
use pullrefresh_runtime_std::StdRuntime;

/// Nominal 60Hz frame interval.
pub const FRAME_NANOS: u64 = 16_666_667;

pub struct PullRobot {
    runtime: StdRuntime,
    surface: RecordingSurface,
    haptics: RecordingHaptics,
    refresh: ManualRefresh,
    widget: PullRefresh,
    frame_time: u64,
    last_y: f32,
}

impl PullRobot {
    /// Robot with the default configuration and a `status:distance` renderer.
    pub fn new() -> Self {
        Self::with_config(PullRefreshConfig::default())
    }

    pub fn with_config(config: PullRefreshConfig) -> Self {
        Self::build(config, RecordingSurface::new(), |status: PullStatus, distance: f32| {
            format!("{status}:{distance}")
        })
    }

    pub fn with_render(
        config: PullRefreshConfig,
        render: impl IndicatorRender + 'static,
    ) -> Self {
        Self::build(config, RecordingSurface::new(), render)
    }

    pub fn with_surface(config: PullRefreshConfig, surface: RecordingSurface) -> Self {
        Self::build(config, surface, |status: PullStatus, distance: f32| {
            format!("{status}:{distance}")
        })
    }

    fn build(
        config: PullRefreshConfig,
        surface: RecordingSurface,
        render: impl IndicatorRender + 'static,
    ) -> Self {
        let runtime = StdRuntime::new();
        let haptics = RecordingHaptics::new();
        let refresh = ManualRefresh::new();
        let widget = PullRefresh::builder()
            .config(config)
            .container(surface.clone())
            .frames(runtime.clone())
            .spawner(runtime.clone())
            .haptics(haptics.clone())
            .on_refresh(refresh.clone())
            .indicator_render(render)
            .build()
            .expect("robot configuration must be valid");

        Self {
            runtime,
            surface,
            haptics,
            refresh,
            widget,
            frame_time: 0,
            last_y: 0.0,
        }
    }

    pub fn widget(&self) -> &PullRefresh {
        &self.widget
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    pub fn haptics(&self) -> &RecordingHaptics {
        &self.haptics
    }

    pub fn refresh(&self) -> &ManualRefresh {
        &self.refresh
    }

    pub fn runtime(&self) -> &StdRuntime {
        &self.runtime
    }

    pub fn status(&self) -> PullStatus {
        self.widget.status()
    }

    pub fn distance(&self) -> f32 {
        self.widget.distance()
    }

    pub fn dispatch(&mut self, event: &TouchEvent) -> TouchResponse {
        self.last_y = event.y;
        self.widget.handle_touch(event)
    }

    pub fn touch_down(&mut self, y: f32) -> TouchResponse {
        self.dispatch(&TouchEvent::start(y))
    }

    pub fn drag_to(&mut self, y: f32) -> TouchResponse {
        self.dispatch(&TouchEvent::moved(y))
    }

    /// Drags through every point without running frames in between.
    pub fn drag_through(&mut self, points: &[f32]) {
        for &y in points {
            self.drag_to(y);
        }
    }

    /// Lifts the finger at its last position and lets spawned tasks start.
    pub fn lift(&mut self) -> TouchResponse {
        let response = self.dispatch(&TouchEvent::end(self.last_y));
        self.runtime.poll_tasks();
        response
    }

    pub fn cancel(&mut self) -> TouchResponse {
        let response = self.dispatch(&TouchEvent::cancel(self.last_y));
        self.runtime.poll_tasks();
        response
    }

    /// Runs one host frame: woken tasks, then frame callbacks.
    pub fn advance_frame(&mut self) {
        self.frame_time += FRAME_NANOS;
        self.runtime.run_frame(self.frame_time);
    }

    /// Pumps frames until nothing is scheduled or only a pending refresh remains.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..10 {
            self.advance_frame();
            if self.runtime.is_idle() {
                break;
            }
        }
    }

    /// Full gesture: touch at `from`, drag to `to`, render a frame, lift.
    pub fn pull(&mut self, from: f32, to: f32) {
        self.touch_down(from);
        self.drag_to(to);
        self.advance_frame();
        self.lift();
    }
}

impl Default for PullRobot {
    fn default() -> Self {
        Self::new()
    }
}
