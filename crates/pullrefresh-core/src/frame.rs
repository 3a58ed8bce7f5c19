/// Coalesces distance updates into at most one visual apply per frame.
///
/// Only the latest distance survives until the frame callback runs.
#[derive(Debug, Default)]
pub struct FrameBatcher {
    pending: Option<f32>,
    requested: bool,
}

impl FrameBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `distance` for the next frame. Returns true when no frame
    /// callback is outstanding yet and the caller must request one.
    pub fn submit(&mut self, distance: f32) -> bool {
        self.pending = Some(distance);
        if self.requested {
            return false;
        }
        self.requested = true;
        true
    }

    /// Called from the frame callback.
    pub fn take(&mut self) -> Option<f32> {
        self.requested = false;
        self.pending.take()
    }

    /// Drops the pending update and re-arms frame requests.
    ///
    /// An outstanding callback will find nothing. The next submit requests a
    /// fresh frame even if the host dropped the earlier callback unrun.
    pub fn discard(&mut self) {
        self.pending = None;
        self.requested = false;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
