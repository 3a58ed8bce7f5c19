use super::*;
use std::cell::RefCell;

#[test]
fn frame_callbacks_run_once_per_drain() {
    let runtime = StdRuntime::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let recorder = Rc::clone(&seen);
    runtime.register_frame_callback(move |time| recorder.borrow_mut().push(time));
    assert!(runtime.take_frame_request(), "registering should request a frame");

    runtime.drain_frame_callbacks(16);
    runtime.drain_frame_callbacks(32);

    assert_eq!(*seen.borrow(), vec![16]);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = StdRuntime::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let nested_runtime = runtime.clone();
    let recorder = Rc::clone(&seen);
    runtime.register_frame_callback(move |time| {
        recorder.borrow_mut().push(time);
        let recorder = Rc::clone(&recorder);
        nested_runtime.register_frame_callback(move |time| recorder.borrow_mut().push(time));
    });

    runtime.drain_frame_callbacks(1);
    assert_eq!(*seen.borrow(), vec![1]);
    runtime.drain_frame_callbacks(2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn cancelled_registration_never_runs() {
    let runtime = StdRuntime::new();
    let clock = runtime.frame_clock();
    let ran = Rc::new(Cell::new(false));

    let flag = Rc::clone(&ran);
    let registration = clock.with_frame_millis(move |_| flag.set(true));
    registration.cancel();
    runtime.drain_frame_callbacks(16_000_000);

    assert!(!ran.get());
}

#[test]
fn task_awaiting_frames_completes_after_drains() {
    let runtime = StdRuntime::new();
    let clock = runtime.frame_clock();
    let frames = Rc::new(RefCell::new(Vec::new()));

    let recorder = Rc::clone(&frames);
    runtime.spawn_ui(Box::pin(async move {
        for _ in 0..2 {
            let time = clock.next_frame().await;
            recorder.borrow_mut().push(time);
        }
    }));

    assert!(!runtime.poll_tasks());
    runtime.drain_frame_callbacks(10);
    assert!(!runtime.poll_tasks());
    runtime.drain_frame_callbacks(20);
    assert!(runtime.poll_tasks());

    assert_eq!(*frames.borrow(), vec![10, 20]);
    assert!(runtime.is_idle());
}

#[test]
fn run_frame_polls_woken_tasks() {
    let runtime = StdRuntime::new();
    let done = Rc::new(Cell::new(false));

    let flag = Rc::clone(&done);
    runtime.spawn_local(Box::pin(async move { flag.set(true) }));
    runtime.run_frame(0);

    assert!(done.get());
    assert!(!runtime.has_pending_tasks());
}

#[test]
fn cancel_task_drops_future() {
    let runtime = StdRuntime::new();
    let id = runtime.spawn_ui(Box::pin(std::future::pending()));

    runtime.cancel_task(id);

    assert!(!runtime.has_pending_tasks());
}
