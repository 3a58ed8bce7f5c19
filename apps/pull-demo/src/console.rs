//! Host surfaces that print every visual write instead of drawing it.

use pullrefresh_core::{Haptics, IndicatorPlacement, IndicatorSurface, ScrollContainer, Transition};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct ConsoleContainer {
    scroll_offset: Rc<Cell<f32>>,
    translation: Rc<Cell<f32>>,
}

impl ConsoleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_to(&self, offset: f32) {
        self.scroll_offset.set(offset);
        println!("  [container] scrolled to {offset}");
    }

    pub fn translation(&self) -> f32 {
        self.translation.get()
    }
}

impl ScrollContainer for ConsoleContainer {
    fn scroll_offset(&self) -> f32 {
        self.scroll_offset.get()
    }

    fn top(&self) -> f32 {
        48.0
    }

    fn set_translation(&self, dy: f32) {
        self.translation.set(dy);
        println!("  [container] translateY({dy:.1})");
    }

    fn set_clip_bottom(&self, inset: f32) {
        println!("  [container] clip bottom {inset:.1}");
    }

    fn set_transition(&self, transition: Transition) {
        println!("  [container] transition {}", describe(transition));
    }

    fn create_indicator(&self, placement: IndicatorPlacement) -> Box<dyn IndicatorSurface> {
        println!("  [indicator] created at top {:.1}", placement.top);
        Box::new(ConsoleIndicator)
    }
}

struct ConsoleIndicator;

impl IndicatorSurface for ConsoleIndicator {
    fn set_translation(&self, dy: f32) {
        println!("  [indicator] translateY({dy:.1})");
    }

    fn set_visible(&self, visible: bool) {
        println!("  [indicator] {}", if visible { "shown" } else { "hidden" });
    }

    fn set_content(&self, content: &str) {
        println!("  [indicator] \"{content}\"");
    }

    fn set_transition(&self, transition: Transition) {
        println!("  [indicator] transition {}", describe(transition));
    }
}

pub struct ConsoleHaptics;

impl Haptics for ConsoleHaptics {
    fn pulse(&self, duration: Duration) {
        println!("  [haptics] vibrate {}ms", duration.as_millis());
    }
}

fn describe(transition: Transition) -> String {
    match transition {
        Transition::Immediate => "none".to_string(),
        Transition::Animated(duration) => format!("{}ms", duration.as_millis()),
    }
}
