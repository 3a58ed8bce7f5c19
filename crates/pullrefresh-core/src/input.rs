use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Single-finger vertical touch sample delivered by the host.
///
/// Only the vertical coordinate takes part in the gesture. A cancelable event
/// lets the widget suppress the host's native scroll/bounce handling; the
/// flag is shared via `Rc<Cell>` so copies observe the same decision.
#[derive(Clone, Debug)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub y: f32,
    pub cancelable: bool,
    default_prevented: Rc<Cell<bool>>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, y: f32) -> Self {
        Self {
            phase,
            y,
            cancelable: true,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn start(y: f32) -> Self {
        Self::new(TouchPhase::Start, y)
    }

    pub fn moved(y: f32) -> Self {
        Self::new(TouchPhase::Move, y)
    }

    pub fn end(y: f32) -> Self {
        Self::new(TouchPhase::End, y)
    }

    pub fn cancel(y: f32) -> Self {
        Self::new(TouchPhase::Cancel, y)
    }

    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Suppresses the host's default handling. Ignored for non-cancelable events.
    pub fn prevent_default(&self) -> bool {
        if self.cancelable {
            self.default_prevented.set(true);
        }
        self.default_prevented.get()
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// What the widget did with a touch event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchResponse {
    /// The event drove the gesture state machine.
    pub handled: bool,
    /// Native scroll/bounce was suppressed for this event.
    pub default_prevented: bool,
}

impl TouchResponse {
    pub const IGNORED: Self = Self {
        handled: false,
        default_prevented: false,
    };

    pub fn handled() -> Self {
        Self {
            handled: true,
            default_prevented: false,
        }
    }
}
