//! Button edge → debounce → binary event, for both capture modes.

use crate::mock_hw::{MockInput, RecordingSink, SimClock, shared};

use escalator::app::ports::Clock;
use escalator::config::CoordinatorConfig;
use escalator::drivers::button::EdgeLatch;
use escalator::sync::Shared;
use escalator::tasks::capture::{LatchCapture, PollingCapture};

// ── Interrupt latch ───────────────────────────────────────────

fn press(
    latch: &EdgeLatch,
    cap: &mut LatchCapture,
    shared: &Shared<RecordingSink>,
    at_ms: u32,
) -> bool {
    latch.on_falling_edge(at_ms);
    let accepted = cap.poll(latch, shared);
    shared.button.try_take();
    accepted
}

#[test]
fn presses_inside_window_yield_one_event() {
    let config = CoordinatorConfig::vehicle();
    let latch = EdgeLatch::new();
    let shared = shared(&config);
    let mut cap = LatchCapture::new(&config);

    let accepted: Vec<bool> = [1000, 1010]
        .into_iter()
        .map(|t| press(&latch, &mut cap, &shared, t))
        .collect();
    assert_eq!(accepted, vec![true, false]);
}

#[test]
fn presses_outside_window_yield_two_events() {
    let config = CoordinatorConfig::vehicle();
    let latch = EdgeLatch::new();
    let shared = shared(&config);
    let mut cap = LatchCapture::new(&config);

    let accepted: Vec<bool> = [1000, 1060]
        .into_iter()
        .map(|t| press(&latch, &mut cap, &shared, t))
        .collect();
    assert_eq!(accepted, vec![true, true]);
}

#[test]
fn bounce_burst_between_polls_counts_once() {
    let config = CoordinatorConfig::vehicle();
    let latch = EdgeLatch::new();
    let shared = shared(&config);
    let mut cap = LatchCapture::new(&config);

    for t in [500, 501, 503, 507] {
        latch.on_falling_edge(t);
    }
    assert!(cap.poll(&latch, &shared));
    assert!(!cap.poll(&latch, &shared));
    assert!(shared.button.try_take());
    assert!(!shared.button.try_take());
}

#[test]
fn unconsumed_presses_coalesce() {
    let config = CoordinatorConfig::vehicle();
    let latch = EdgeLatch::new();
    let shared = shared(&config);
    let mut cap = LatchCapture::new(&config);

    latch.on_falling_edge(0);
    assert!(cap.poll(&latch, &shared));
    latch.on_falling_edge(100);
    assert!(cap.poll(&latch, &shared), "accepted, merged into the pending event");

    assert!(shared.button.try_take());
    assert!(!shared.button.is_pending(), "binary: at most one pending");
}

// ── Level polling ─────────────────────────────────────────────

/// Poll `levels` once each, `period_ms` apart on a clock starting at
/// `start_ms`.  Returns the clock readings of accepted presses.
fn poll_from(start_ms: u32, levels: &[bool], period_ms: u32) -> Vec<u32> {
    let config = CoordinatorConfig::patient();
    let shared = shared(&config);
    let mut cap = PollingCapture::new(&config);
    let mut input = MockInput::new(levels);
    let clock = SimClock::starting_at(start_ms);

    let mut accepted = Vec::new();
    for _ in levels {
        let now = clock.now_ms();
        if cap.poll(&mut input, now, &shared) {
            accepted.push(now);
            shared.button.try_take();
        }
        clock.delay_ms(period_ms);
    }
    accepted
}

fn poll_all(levels: &[bool], period_ms: u32) -> Vec<u32> {
    poll_from(0, levels, period_ms)
}

#[test]
fn polling_detects_falling_edges_only() {
    // HIGH, LOW (edge), LOW (held), HIGH (release), HIGH.
    let accepted = poll_all(&[true, false, false, true, true], 100);
    assert_eq!(accepted, vec![100]);
}

#[test]
fn polling_debounces_chatter() {
    // Edges at 10 ms and 30 ms: the second is inside 50 ms.
    let accepted = poll_all(&[true, false, true, false, true, true, true, false], 10);
    assert_eq!(accepted, vec![10, 70]);
}

#[test]
fn debounce_holds_across_clock_wrap() {
    let start = u32::MAX - 14;
    // Edges at start+10 and start+30 (wrapped), then start+70.
    let accepted = poll_from(start, &[true, false, true, false, true, true, true, false], 10);
    assert_eq!(
        accepted,
        vec![start.wrapping_add(10), start.wrapping_add(70)],
        "chatter across the wrap must still be rejected"
    );
}
