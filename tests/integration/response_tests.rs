//! Button event → urgent response, and its interaction with escalation
//! reporting.

use std::cell::RefCell;

use crate::mock_hw::{MockOutput, RecordingSink, SimClock, count, reports, shared};

use escalator::app::ports::Clock;
use escalator::app::report::Report;
use escalator::config::CoordinatorConfig;
use escalator::sync::Shared;
use escalator::tasks::aggregator::{Aggregator, CycleOutcome};
use escalator::tasks::handler::EscalationHandler;
use escalator::tasks::sampler::Sampler;

/// Clock that runs one aggregator cycle inside every delay, the way the
/// lower-priority aggregator gets the CPU while the handler sleeps.
struct PreemptingClock<'a> {
    inner: SimClock,
    shared: &'a Shared<RecordingSink>,
    aggregator: RefCell<Aggregator>,
    seen: RefCell<Vec<(bool, CycleOutcome)>>,
}

impl Clock for PreemptingClock<'_> {
    fn now_ms(&self) -> u32 {
        self.inner.now_ms()
    }

    fn delay_ms(&self, ms: u32) {
        let mut out = MockOutput::new();
        let outcome = self
            .aggregator
            .borrow_mut()
            .cycle(self.shared, &mut out, &self.inner);
        self.seen
            .borrow_mut()
            .push((self.shared.is_suppressed(), outcome));
        self.inner.delay_ms(ms);
    }
}

fn escalate(shared: &Shared<RecordingSink>, sampler: &mut Sampler, times: usize) {
    for _ in 0..times {
        sampler.cycle(2500, shared);
        sampler.cycle(2000, shared);
    }
}

// ── Dedicated handler ─────────────────────────────────────────

#[test]
fn dedicated_response_sequence_is_bounded() {
    let config = CoordinatorConfig::vehicle();
    let shared = shared(&config);
    let handler = EscalationHandler::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    handler.respond(&shared, &mut out, &clock);

    let events: Vec<Report> = reports(&shared);
    assert_eq!(
        events,
        (1..=5).map(|repeat| Report::Event { repeat }).collect::<Vec<_>>()
    );
    assert_eq!(out.history(config.pins.response), vec![true, false]);
    assert_eq!(clock.now_ms(), config.response_budget_ms());
    assert!(!shared.is_suppressed(), "window closes with the response");
}

#[test]
fn escalations_are_held_back_during_response() {
    let config = CoordinatorConfig::vehicle();
    let shared = shared(&config);
    let mut sampler = Sampler::new(&config);
    let handler = EscalationHandler::new(&config);
    let mut out = MockOutput::new();

    escalate(&shared, &mut sampler, 3);
    let statuses = count(&shared, |r| matches!(r, Report::Status { .. }));

    let clock = PreemptingClock {
        inner: SimClock::new(),
        shared: &shared,
        aggregator: RefCell::new(Aggregator::new(&config)),
        seen: RefCell::new(Vec::new()),
    };
    handler.respond(&shared, &mut out, &clock);

    let seen = clock.seen.into_inner();
    assert_eq!(seen.len(), 6, "five gaps and one hold");
    for (suppressed, outcome) in &seen {
        assert!(*suppressed);
        assert_eq!(*outcome, CycleOutcome::Suppressed);
    }
    assert_eq!(count(&shared, |r| matches!(r, Report::Escalation { .. })), 0);
    assert_eq!(shared.escalations.pending(), 3, "no permit lost");
    assert_eq!(shared.counter.get(), 3);

    // Window closed: the backlog drains in full.
    let mut aggregator = Aggregator::new(&config);
    let inner = SimClock::new();
    while aggregator.cycle(&shared, &mut out, &inner) != CycleOutcome::Idle {}
    assert_eq!(count(&shared, |r| matches!(r, Report::Escalation { .. })), 3);
    assert_eq!(count(&shared, |r| matches!(r, Report::Status { .. })), statuses);
}

#[test]
fn event_lines_precede_held_back_escalations() {
    let config = CoordinatorConfig::vehicle();
    let shared = shared(&config);
    let mut sampler = Sampler::new(&config);
    let handler = EscalationHandler::new(&config);
    let mut aggregator = Aggregator::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    sampler.cycle(2500, &shared);
    {
        let _window = shared.suppress();
        assert_eq!(aggregator.cycle(&shared, &mut out, &clock), CycleOutcome::Suppressed);
    }
    handler.respond(&shared, &mut out, &clock);
    aggregator.cycle(&shared, &mut out, &clock);

    let lines = reports(&shared);
    let last_event = lines
        .iter()
        .rposition(|r| matches!(r, Report::Event { .. }))
        .unwrap();
    let first_escalation = lines
        .iter()
        .position(|r| matches!(r, Report::Escalation { .. }))
        .unwrap();
    assert!(last_event < first_escalation);
}

// ── Inline handling ───────────────────────────────────────────

#[test]
fn inline_mode_responds_from_aggregator() {
    let config = CoordinatorConfig::patient();
    let shared = shared(&config);
    let mut aggregator = Aggregator::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    assert!(shared.button.raise());
    assert_eq!(aggregator.cycle(&shared, &mut out, &clock), CycleOutcome::Responded);

    assert_eq!(
        reports(&shared),
        (1..=3).map(|repeat| Report::Event { repeat }).collect::<Vec<_>>()
    );
    assert_eq!(out.history(config.pins.response), vec![true, false]);
    assert_eq!(clock.now_ms(), 3 * 100 + 1000);
    assert!(!shared.button.is_pending());
}

#[test]
fn inline_mode_reports_escalations_after_response() {
    let config = CoordinatorConfig::patient();
    let shared = shared(&config);
    let mut sampler = Sampler::new(&config);
    let mut aggregator = Aggregator::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    sampler.cycle(3100, &shared);
    shared.button.raise();

    assert_eq!(aggregator.cycle(&shared, &mut out, &clock), CycleOutcome::Responded);
    assert_eq!(shared.escalations.pending(), 1);
    assert_eq!(
        aggregator.cycle(&shared, &mut out, &clock),
        CycleOutcome::Reported {
            level: 0,
            critical: false,
            payload: Some(155),
        }
    );
}

#[test]
fn dedicated_aggregator_ignores_button() {
    let config = CoordinatorConfig::vehicle();
    let shared = shared(&config);
    let mut aggregator = Aggregator::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    shared.button.raise();
    assert_eq!(aggregator.cycle(&shared, &mut out, &clock), CycleOutcome::Idle);
    assert!(shared.button.is_pending(), "left for the handler task");
}
