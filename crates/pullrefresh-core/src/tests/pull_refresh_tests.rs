use super::*;
use crate::host::{IndicatorPlacement, IndicatorSurface, LocalTask, Transition};
use std::cell::{Cell, OnceCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Clone, Default)]
struct Host {
    scroll_offset: Rc<Cell<f32>>,
    translation: Rc<Cell<f32>>,
    frames: Rc<RefCell<Vec<Box<dyn FnOnce(u64)>>>>,
    tasks: Rc<RefCell<Vec<LocalTask>>>,
}

struct NullIndicator;

impl IndicatorSurface for NullIndicator {
    fn set_translation(&self, _dy: f32) {}
    fn set_visible(&self, _visible: bool) {}
    fn set_content(&self, _content: &str) {}
    fn set_transition(&self, _transition: Transition) {}
}

impl ScrollContainer for Host {
    fn scroll_offset(&self) -> f32 {
        self.scroll_offset.get()
    }

    fn set_translation(&self, dy: f32) {
        self.translation.set(dy);
    }

    fn set_clip_bottom(&self, _inset: f32) {}

    fn set_transition(&self, _transition: Transition) {}

    fn create_indicator(&self, _placement: IndicatorPlacement) -> Box<dyn IndicatorSurface> {
        Box::new(NullIndicator)
    }
}

impl FrameScheduler for Host {
    fn request_frame(&self, callback: Box<dyn FnOnce(u64) + 'static>) {
        self.frames.borrow_mut().push(callback);
    }
}

impl UiSpawner for Host {
    fn spawn_local(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}

impl Host {
    fn run_frame(&self) -> usize {
        let callbacks: Vec<_> = self.frames.borrow_mut().drain(..).collect();
        let count = callbacks.len();
        for callback in callbacks {
            callback(16_000_000);
        }
        count
    }

    fn poll_tasks(&self) {
        let waker = futures_task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        for mut task in tasks {
            if task.as_mut().poll(&mut cx).is_pending() {
                self.tasks.borrow_mut().push(task);
            }
        }
    }
}

fn widget(host: &Host) -> PullRefresh {
    PullRefresh::builder()
        .container(host.clone())
        .frames(host.clone())
        .spawner(host.clone())
        .build()
        .expect("widget builds")
}

#[test]
fn build_requires_container_and_runtime() {
    let host = Host::default();

    let err = PullRefresh::builder()
        .frames(host.clone())
        .spawner(host.clone())
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingContainer);

    let err = PullRefresh::builder()
        .container(host.clone())
        .spawner(host.clone())
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingFrameScheduler);

    let err = PullRefresh::builder()
        .container(host.clone())
        .frames(host.clone())
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingSpawner);

    let err = PullRefresh::builder()
        .container(host.clone())
        .frames(host.clone())
        .spawner(host.clone())
        .threshold(0.0)
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::InvalidThreshold(0.0));
}

#[test]
fn touch_start_rejected_when_scrolled() {
    let host = Host::default();
    host.scroll_offset.set(3.0);
    let pull = widget(&host);

    let response = pull.handle_touch(&TouchEvent::start(100.0));

    assert_eq!(response, TouchResponse::IGNORED);
    assert!(!pull.is_tracking());
    let moved = TouchEvent::moved(200.0);
    assert!(!pull.handle_touch(&moved).handled);
    assert!(!moved.is_default_prevented());
    assert_eq!(pull.distance(), 0.0);
}

#[test]
fn upward_move_keeps_native_behaviour() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(100.0));

    let up = TouchEvent::moved(95.0);
    assert!(!pull.handle_touch(&up).handled);
    assert!(!up.is_default_prevented());
    assert_eq!(pull.distance(), 0.0);
    assert_eq!(pull.status(), PullStatus::Idle);

    let down = TouchEvent::moved(140.0);
    let response = pull.handle_touch(&down);
    assert!(response.handled && response.default_prevented);
    assert!(down.is_default_prevented());
    assert_eq!(pull.distance(), 40.0);
    assert_eq!(pull.status(), PullStatus::Pulling);
}

#[test]
fn non_cancelable_move_still_updates_distance() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));

    let response = pull.handle_touch(&TouchEvent::moved(30.0).with_cancelable(false));

    assert!(response.handled);
    assert!(!response.default_prevented);
    assert_eq!(pull.distance(), 30.0);
}

#[test]
fn moves_within_a_frame_coalesce() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));

    for y in [10.0, 20.0, 35.0] {
        pull.handle_touch(&TouchEvent::moved(y));
    }

    assert_eq!(host.translation.get(), 0.0);
    assert_eq!(host.run_frame(), 1);
    assert_eq!(host.translation.get(), 35.0);
}

#[test]
fn release_below_threshold_resets_synchronously() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(59.0));

    let release = pull.release();

    assert!(matches!(release, Release::Reset(ReleaseOutcome::Skipped)));
    assert_eq!(pull.status(), PullStatus::Idle);
    assert_eq!(pull.distance(), 0.0);
    assert!(!pull.is_releasing());
    assert!(host.tasks.borrow().is_empty());
}

#[test]
fn pending_frame_discarded_on_release() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(20.0));

    pull.handle_touch(&TouchEvent::end(20.0));
    host.run_frame();

    assert_eq!(host.translation.get(), 0.0);
}

#[test]
fn duplicate_end_is_ignored() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(100.0));

    assert!(pull.handle_touch(&TouchEvent::end(100.0)).handled);
    assert_eq!(
        pull.handle_touch(&TouchEvent::cancel(100.0)),
        TouchResponse::IGNORED
    );
    assert_eq!(host.tasks.borrow().len(), 1);
}

#[test]
fn refresh_without_action_completes_on_first_poll() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(60.0));
    pull.handle_touch(&TouchEvent::end(60.0));

    assert_eq!(pull.status(), PullStatus::Loading);
    assert!(pull.is_releasing());

    host.poll_tasks();

    assert_eq!(pull.status(), PullStatus::Idle);
    assert!(!pull.is_releasing());
    assert!(host.tasks.borrow().is_empty());
}

#[test]
fn dropped_refresh_task_still_resets() {
    let host = Host::default();
    let pull = PullRefresh::builder()
        .container(host.clone())
        .frames(host.clone())
        .spawner(host.clone())
        .on_refresh(|| std::future::pending::<Result<(), crate::RefreshError>>())
        .build()
        .expect("widget builds");
    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(90.0));

    let Release::Refreshing(mut task) = pull.release() else {
        panic!("release past threshold should refresh");
    };
    let waker = futures_task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert!(matches!(Pin::new(&mut task).poll(&mut cx), Poll::Pending));
    assert_eq!(pull.status(), PullStatus::Loading);

    drop(task);

    assert_eq!(pull.status(), PullStatus::Idle);
    assert!(pull.handle_touch(&TouchEvent::start(0.0)).handled);
}

struct ReadBackHaptics {
    widget: Rc<OnceCell<PullRefresh>>,
    fired_flag: Rc<Cell<Option<bool>>>,
}

impl Haptics for ReadBackHaptics {
    fn pulse(&self, _duration: std::time::Duration) {
        let fired = self.widget.get().map(PullRefresh::haptic_fired);
        self.fired_flag.set(fired);
    }
}

#[test]
fn host_callbacks_may_read_the_widget() {
    let host = Host::default();
    let slot: Rc<OnceCell<PullRefresh>> = Rc::new(OnceCell::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let fired_flag = Rc::new(Cell::new(None));

    let render_slot = Rc::clone(&slot);
    let render_seen = Rc::clone(&seen);
    let pull = PullRefresh::builder()
        .container(host.clone())
        .frames(host.clone())
        .spawner(host.clone())
        .haptics(ReadBackHaptics {
            widget: Rc::clone(&slot),
            fired_flag: Rc::clone(&fired_flag),
        })
        .indicator_render(move |status: PullStatus, _distance: f32| {
            if let Some(pull) = render_slot.get() {
                render_seen
                    .borrow_mut()
                    .push((pull.status(), pull.threshold(), status));
            }
            status.to_string()
        })
        .build()
        .expect("widget builds");
    assert!(slot.set(pull.clone()).is_ok());

    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(90.0));
    host.run_frame();
    pull.handle_touch(&TouchEvent::end(90.0));
    host.poll_tasks();

    assert_eq!(fired_flag.get(), Some(true));
    assert_eq!(
        *seen.borrow(),
        vec![
            (PullStatus::Pulling, 60.0, PullStatus::Pulling),
            (PullStatus::Loading, 60.0, PullStatus::Loading),
            (PullStatus::Idle, 60.0, PullStatus::Idle),
        ]
    );
    assert_eq!(pull.status(), PullStatus::Idle);
}

#[test]
fn dropped_frame_callback_does_not_stall_later_sessions() {
    let host = Host::default();
    let pull = widget(&host);
    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(20.0));
    // The host throws the callback away without running it.
    host.frames.borrow_mut().clear();
    pull.handle_touch(&TouchEvent::moved(30.0));
    assert!(host.frames.borrow().is_empty());
    pull.handle_touch(&TouchEvent::end(30.0));

    pull.handle_touch(&TouchEvent::start(0.0));
    pull.handle_touch(&TouchEvent::moved(25.0));

    assert_eq!(host.run_frame(), 1);
    assert_eq!(host.translation.get(), 25.0);
}
