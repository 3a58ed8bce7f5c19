//! Testing utilities and harness for pullrefresh

pub mod recording;
pub mod refresh;
pub mod robot;
pub mod robot_assertions;

pub use recording::{RecordingHaptics, RecordingSurface, SurfaceOp, SurfaceTarget};
pub use refresh::ManualRefresh;
pub use robot::PullRobot;
pub use robot_assertions::{assert_approx_eq, assert_settled_idle};

pub mod prelude {
    pub use crate::recording::*;
    pub use crate::refresh::ManualRefresh;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
