use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pullrefresh_core::{
    damp, FrameScheduler, IndicatorPlacement, IndicatorSurface, LocalTask, PullRefresh,
    PullStatus, ScrollContainer, TouchEvent, Transition, UiSpawner,
};
use std::cell::RefCell;
use std::rc::Rc;

const MOVES_PER_GESTURE: &[usize] = &[16, 128];

#[derive(Clone, Default)]
struct BenchHost {
    frames: Rc<RefCell<Vec<Box<dyn FnOnce(u64)>>>>,
}

struct BenchIndicator;

impl IndicatorSurface for BenchIndicator {
    fn set_translation(&self, dy: f32) {
        black_box(dy);
    }

    fn set_visible(&self, visible: bool) {
        black_box(visible);
    }

    fn set_content(&self, content: &str) {
        black_box(content);
    }

    fn set_transition(&self, _transition: Transition) {}
}

impl ScrollContainer for BenchHost {
    fn scroll_offset(&self) -> f32 {
        0.0
    }

    fn set_translation(&self, dy: f32) {
        black_box(dy);
    }

    fn set_clip_bottom(&self, inset: f32) {
        black_box(inset);
    }

    fn set_transition(&self, _transition: Transition) {}

    fn create_indicator(&self, _placement: IndicatorPlacement) -> Box<dyn IndicatorSurface> {
        Box::new(BenchIndicator)
    }
}

impl FrameScheduler for BenchHost {
    fn request_frame(&self, callback: Box<dyn FnOnce(u64) + 'static>) {
        self.frames.borrow_mut().push(callback);
    }
}

impl UiSpawner for BenchHost {
    fn spawn_local(&self, task: LocalTask) {
        drop(task);
    }
}

impl BenchHost {
    fn run_frame(&self) {
        let callbacks: Vec<_> = self.frames.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback(0);
        }
    }
}

fn bench_damping(c: &mut Criterion) {
    c.bench_function("damp", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for delta in 0..240 {
                total += damp(black_box(delta as f32), 60.0);
            }
            total
        })
    });
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("pull_gesture");
    for &moves in MOVES_PER_GESTURE {
        group.bench_with_input(BenchmarkId::from_parameter(moves), &moves, |b, &moves| {
            let host = BenchHost::default();
            let pull = PullRefresh::builder()
                .container(host.clone())
                .frames(host.clone())
                .spawner(host.clone())
                .indicator_render(|status: PullStatus, distance: f32| {
                    format!("{status} {distance:.0}")
                })
                .build()
                .expect("bench widget");

            b.iter(|| {
                pull.handle_touch(&TouchEvent::start(0.0));
                for step in 0..moves {
                    pull.handle_touch(&TouchEvent::moved(step as f32 * 0.4));
                    if step % 4 == 0 {
                        host.run_frame();
                    }
                }
                pull.handle_touch(&TouchEvent::end(0.0));
                host.run_frame();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_damping, bench_gesture);
criterion_main!(benches);
