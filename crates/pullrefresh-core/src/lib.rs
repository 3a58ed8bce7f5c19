//! Gesture interpretation and session state machine for pull-to-refresh.
//!
//! A vertical touch drag at the top of a scroll container is turned into a
//! damped pull distance. Past the threshold a single haptic pulse fires, and
//! releasing there runs an asynchronous refresh before the container settles
//! back to idle. Everything the widget draws or schedules goes through the
//! host traits in [`host`].

pub mod config;
pub mod controller;
pub mod damping;
pub mod error;
pub mod frame;
pub mod host;
pub mod input;
pub mod pull_refresh;
pub mod release;
pub mod session;
pub mod status;
pub mod tracker;

pub use config::{PullRefreshConfig, DEFAULT_THRESHOLD};
pub use controller::{ReleaseDecision, SessionController};
pub use damping::{damp, PULL_RESISTANCE};
pub use error::{ConfigError, RefreshError};
pub use frame::FrameBatcher;
pub use host::{
    FrameScheduler, Haptics, IndicatorPlacement, IndicatorRender, IndicatorSurface, LocalTask,
    RefreshAction, RefreshFuture, ScrollContainer, Transition, UiSpawner,
};
pub use input::{TouchEvent, TouchPhase, TouchResponse};
pub use pull_refresh::{PullRefresh, PullRefreshBuilder};
pub use release::{RefreshTask, Release, ReleaseOutcome};
pub use session::Session;
pub use status::PullStatus;
pub use tracker::{GestureTracker, TrackerPhase};

pub mod prelude {
    pub use crate::host::{
        FrameScheduler, Haptics, IndicatorRender, IndicatorSurface, RefreshAction,
        ScrollContainer, UiSpawner,
    };
    pub use crate::{
        PullRefresh, PullRefreshConfig, PullStatus, RefreshError, Release, ReleaseOutcome,
        TouchEvent, TouchPhase,
    };
}
