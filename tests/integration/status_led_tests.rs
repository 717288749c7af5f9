//! Heartbeat and alert indicator outputs.

use crate::mock_hw::{MockOutput, SimClock, shared};

use escalator::app::ports::Clock;
use escalator::config::CoordinatorConfig;
use escalator::tasks::heartbeat::Heartbeat;
use escalator::tasks::indicator::AlertIndicator;
use escalator::tasks::sampler::Sampler;

#[test]
fn heartbeat_alternates() {
    let config = CoordinatorConfig::vehicle();
    let mut heartbeat = Heartbeat::new(&config);
    let mut out = MockOutput::new();

    for _ in 0..4 {
        heartbeat.toggle(&mut out);
    }
    assert_eq!(out.history(config.pins.heartbeat), vec![true, false, true, false]);
}

#[test]
fn indicator_blinks_during_excursion() {
    let config = CoordinatorConfig::vehicle();
    let shared = shared(&config);
    let mut sampler = Sampler::new(&config);
    let indicator = AlertIndicator::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    assert!(!indicator.step(&shared, &mut out, &clock));
    assert_eq!(clock.now_ms(), config.indicator_idle_ms);

    sampler.cycle(2500, &shared);
    assert!(indicator.step(&shared, &mut out, &clock));
    assert_eq!(out.history(config.pins.alert), vec![false, true, false]);

    sampler.cycle(2000, &shared);
    assert!(!indicator.step(&shared, &mut out, &clock));
    assert!(!out.level(config.pins.alert));
}

#[test]
fn indicator_dark_while_response_runs() {
    let config = CoordinatorConfig::vehicle();
    let shared = shared(&config);
    let mut sampler = Sampler::new(&config);
    let indicator = AlertIndicator::new(&config);
    let mut out = MockOutput::new();
    let clock = SimClock::new();

    sampler.cycle(2500, &shared);
    let _window = shared.suppress();
    assert!(!indicator.step(&shared, &mut out, &clock));
    assert_eq!(out.history(config.pins.alert), vec![false]);
}
