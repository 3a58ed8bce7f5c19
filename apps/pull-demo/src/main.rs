mod console;

use anyhow::{ensure, Context};
use console::{ConsoleContainer, ConsoleHaptics};
use pullrefresh_core::{PullRefresh, PullStatus, RefreshError, TouchEvent, DEFAULT_THRESHOLD};
use pullrefresh_runtime_std::StdRuntime;
use std::cell::Cell;
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;
const REFRESH_FRAMES: usize = 30;

struct Demo {
    runtime: StdRuntime,
    container: ConsoleContainer,
    widget: PullRefresh,
    fail_next: Rc<Cell<bool>>,
    frame_time: u64,
}

impl Demo {
    fn new() -> anyhow::Result<Self> {
        let runtime = StdRuntime::new();
        let container = ConsoleContainer::new();
        let fail_next = Rc::new(Cell::new(false));
        let clock = runtime.frame_clock();
        let fail = Rc::clone(&fail_next);

        let widget = PullRefresh::builder()
            .container(container.clone())
            .frames(runtime.clone())
            .spawner(runtime.clone())
            .haptics(ConsoleHaptics)
            .indicator_render(|status: PullStatus, distance: f32| match status {
                PullStatus::Idle => String::new(),
                PullStatus::Pulling if distance >= DEFAULT_THRESHOLD => {
                    "Release to refresh".to_string()
                }
                PullStatus::Pulling => "Pull to refresh".to_string(),
                PullStatus::Loading => "Loading...".to_string(),
            })
            .on_refresh(move || {
                let clock = clock.clone();
                let fail = fail.replace(false);
                async move {
                    for _ in 0..REFRESH_FRAMES {
                        clock.next_frame().await;
                    }
                    if fail {
                        Err(RefreshError::new("feed endpoint returned 503"))
                    } else {
                        Ok(())
                    }
                }
            })
            .build()
            .context("pull-to-refresh configuration")?;

        Ok(Self {
            runtime,
            container,
            widget,
            fail_next,
            frame_time: 0,
        })
    }

    fn frame(&mut self) {
        self.frame_time += FRAME_NANOS;
        self.runtime.run_frame(self.frame_time);
    }

    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while !self.runtime.is_idle() && frames < REFRESH_FRAMES * 2 {
            self.frame();
            frames += 1;
        }
        frames
    }

    fn gesture(&mut self, from: f32, to: f32, steps: usize) {
        self.widget.handle_touch(&TouchEvent::start(from));
        let step = (to - from) / steps as f32;
        for i in 1..=steps {
            self.widget
                .handle_touch(&TouchEvent::moved(from + step * i as f32));
            if i % 2 == 0 {
                self.frame();
            }
        }
        self.frame();
        self.widget.handle_touch(&TouchEvent::end(to));
        self.runtime.poll_tasks();
    }

    fn scenario(&mut self, title: &str, run: impl FnOnce(&mut Self)) -> anyhow::Result<()> {
        println!();
        println!("--- {title} ---");
        log::info!("scenario: {title}");
        run(self);
        let frames = self.settle();
        log::debug!("{title} settled in {frames} frames");
        println!(
            "  settled after {frames} frames: status={}, distance={}",
            self.widget.status(),
            self.widget.distance()
        );
        ensure!(
            self.widget.status().is_idle(),
            "{title}: widget did not return to idle"
        );
        ensure!(
            self.container.translation() == 0.0,
            "{title}: container left translated"
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_millis()
        .init();

    println!("=== Pull-to-refresh demo ===");
    println!("Threshold {DEFAULT_THRESHOLD}px, refresh takes {REFRESH_FRAMES} frames");

    let mut demo = Demo::new()?;

    demo.scenario("short pull snaps back", |demo| {
        demo.gesture(100.0, 140.0, 4)
    })?;
    demo.scenario("full pull refreshes", |demo| demo.gesture(100.0, 260.0, 8))?;
    demo.scenario("failing refresh still resets", |demo| {
        demo.fail_next.set(true);
        demo.gesture(100.0, 220.0, 6)
    })?;
    demo.scenario("scrolled list ignores the pull", |demo| {
        demo.container.scroll_to(120.0);
        demo.gesture(100.0, 260.0, 4);
        demo.container.scroll_to(0.0);
    })?;

    println!();
    println!("All scenarios settled.");
    Ok(())
}
