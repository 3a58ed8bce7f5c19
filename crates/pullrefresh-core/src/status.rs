use std::fmt;

/// Visible state of a pull-to-refresh session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PullStatus {
    #[default]
    Idle,
    Pulling,
    Loading,
}

impl PullStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PullStatus::Idle => "idle",
            PullStatus::Pulling => "pulling",
            PullStatus::Loading => "loading",
        }
    }

    pub fn is_idle(self) -> bool {
        self == PullStatus::Idle
    }
}

impl fmt::Display for PullStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
