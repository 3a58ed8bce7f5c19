//! Host doubles that record every write the widget makes.

use pullrefresh_core::{
    Haptics, IndicatorPlacement, IndicatorSurface, ScrollContainer, Transition,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceTarget {
    Container,
    Indicator,
}

/// One write made by the widget, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Translate(SurfaceTarget, f32),
    ClipBottom(f32),
    Transition(SurfaceTarget, Transition),
    Visible(bool),
    Content(String),
    IndicatorCreated(IndicatorPlacement),
}

#[derive(Debug, Default)]
struct SurfaceState {
    container_translation: f32,
    clip_bottom: f32,
    container_transition: Option<Transition>,
    indicator_translation: f32,
    indicator_transition: Option<Transition>,
    indicator_visible: bool,
    indicator_content: String,
    placement: Option<IndicatorPlacement>,
    ops: Vec<SurfaceOp>,
}

/// Scroll container whose indicator shares the same log.
///
/// Clones share state, so a test can keep one handle and give another to
/// the widget.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    scroll_offset: Rc<Cell<f32>>,
    top: f32,
    state: Rc<RefCell<SurfaceState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top(mut self, top: f32) -> Self {
        self.top = top;
        self
    }

    pub fn set_scroll_offset(&self, offset: f32) {
        self.scroll_offset.set(offset);
    }

    pub fn container_translation(&self) -> f32 {
        self.state.borrow().container_translation
    }

    pub fn clip_bottom(&self) -> f32 {
        self.state.borrow().clip_bottom
    }

    pub fn container_transition(&self) -> Option<Transition> {
        self.state.borrow().container_transition
    }

    pub fn indicator_translation(&self) -> f32 {
        self.state.borrow().indicator_translation
    }

    pub fn indicator_transition(&self) -> Option<Transition> {
        self.state.borrow().indicator_transition
    }

    pub fn indicator_visible(&self) -> bool {
        self.state.borrow().indicator_visible
    }

    pub fn indicator_content(&self) -> String {
        self.state.borrow().indicator_content.clone()
    }

    pub fn indicator_placement(&self) -> Option<IndicatorPlacement> {
        self.state.borrow().placement
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.state.borrow().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.state.borrow_mut().ops.clear();
    }

    /// Every indicator content written so far, in order.
    pub fn contents(&self) -> Vec<String> {
        self.state
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Content(content) => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    /// Container translations written so far, in order.
    pub fn container_translations(&self) -> Vec<f32> {
        self.state
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Translate(SurfaceTarget::Container, dy) => Some(*dy),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: SurfaceOp) {
        self.state.borrow_mut().ops.push(op);
    }
}

impl ScrollContainer for RecordingSurface {
    fn scroll_offset(&self) -> f32 {
        self.scroll_offset.get()
    }

    fn top(&self) -> f32 {
        self.top
    }

    fn set_translation(&self, dy: f32) {
        self.state.borrow_mut().container_translation = dy;
        self.record(SurfaceOp::Translate(SurfaceTarget::Container, dy));
    }

    fn set_clip_bottom(&self, inset: f32) {
        self.state.borrow_mut().clip_bottom = inset;
        self.record(SurfaceOp::ClipBottom(inset));
    }

    fn set_transition(&self, transition: Transition) {
        self.state.borrow_mut().container_transition = Some(transition);
        self.record(SurfaceOp::Transition(SurfaceTarget::Container, transition));
    }

    fn create_indicator(&self, placement: IndicatorPlacement) -> Box<dyn IndicatorSurface> {
        self.state.borrow_mut().placement = Some(placement);
        self.record(SurfaceOp::IndicatorCreated(placement));
        Box::new(RecordingIndicator {
            surface: self.clone(),
        })
    }
}

struct RecordingIndicator {
    surface: RecordingSurface,
}

impl IndicatorSurface for RecordingIndicator {
    fn set_translation(&self, dy: f32) {
        self.surface.state.borrow_mut().indicator_translation = dy;
        self.surface
            .record(SurfaceOp::Translate(SurfaceTarget::Indicator, dy));
    }

    fn set_visible(&self, visible: bool) {
        self.surface.state.borrow_mut().indicator_visible = visible;
        self.surface.record(SurfaceOp::Visible(visible));
    }

    fn set_content(&self, content: &str) {
        self.surface.state.borrow_mut().indicator_content = content.to_string();
        self.surface.record(SurfaceOp::Content(content.to_string()));
    }

    fn set_transition(&self, transition: Transition) {
        self.surface.state.borrow_mut().indicator_transition = Some(transition);
        self.surface
            .record(SurfaceOp::Transition(SurfaceTarget::Indicator, transition));
    }
}

/// Counts haptic pulses.
#[derive(Clone, Debug, Default)]
pub struct RecordingHaptics {
    pulses: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse_count(&self) -> usize {
        self.pulses.borrow().len()
    }

    pub fn pulses(&self) -> Vec<Duration> {
        self.pulses.borrow().clone()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&self, duration: Duration) {
        self.pulses.borrow_mut().push(duration);
    }
}
