use std::time::{Duration, Instant};

use adcq_core::schedule::{SchedulerState, UpdateScheduler};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn starts_idle_and_never_fires_unprompted() {
    let t0 = Instant::now();
    let mut s = UpdateScheduler::default();
    assert_eq!(s.interval(), ms(50));
    assert_eq!(s.state(), SchedulerState::Idle);
    assert!(s.poll(t0 + ms(1_000)).is_none());
}

#[test]
fn single_event_fires_after_interval() {
    let t0 = Instant::now();
    let mut s = UpdateScheduler::default();
    let deadline = s.notify(t0);
    assert_eq!(deadline, t0 + ms(50));
    assert_eq!(s.state(), SchedulerState::Pending { deadline });

    assert!(s.poll(t0 + ms(49)).is_none());
    let fired = s.poll(t0 + ms(50)).expect("deadline reached");
    assert_eq!(fired.coalesced, 1);
    assert_eq!(s.state(), SchedulerState::Idle);
    assert!(s.poll(t0 + ms(200)).is_none());
}

#[test]
fn burst_collapses_to_one_fire_after_last_event() {
    let t0 = Instant::now();
    let mut s = UpdateScheduler::default();

    // Keystrokes 20 ms apart: each one pushes the deadline out again.
    for i in 0..5 {
        s.notify(t0 + ms(20 * i));
        assert!(s.poll(t0 + ms(20 * i + 10)).is_none());
    }
    assert_eq!(s.deadline(), Some(t0 + ms(80 + 50)));
    assert!(s.poll(t0 + ms(129)).is_none());

    let fired = s.poll(t0 + ms(130)).unwrap();
    assert_eq!(fired.coalesced, 5);
    assert!(s.poll(t0 + ms(500)).is_none());
}

#[test]
fn cancel_drops_pending_deadline() {
    let t0 = Instant::now();
    let mut s = UpdateScheduler::new(ms(10));
    s.notify(t0);
    s.cancel();
    assert!(!s.is_pending());
    assert!(s.poll(t0 + ms(100)).is_none());

    // A later event starts a fresh count.
    s.notify(t0 + ms(200));
    assert_eq!(s.poll(t0 + ms(210)).unwrap().coalesced, 1);
}
