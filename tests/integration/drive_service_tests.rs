//! Integration tests for the SamplePort → DriveService → CommandPort loop.

use fuzzydrive::adapters::json_lines::{JsonLinesSink, JsonLinesSource};
use fuzzydrive::app::events::AppEvent;
use fuzzydrive::app::service::DriveService;
use fuzzydrive::{ControllerConfig, FuzzyOutputs};

use super::mock_ports::{MockActuators, MockFeed, RecordingSink, sample, speed_ramp};

fn make_service() -> DriveService {
    DriveService::new(&ControllerConfig::default()).unwrap()
}

#[test]
fn run_brackets_ticks_with_start_and_stop() {
    let mut svc = make_service();
    let mut feed = MockFeed::new(speed_ramp(0.0, 30.0, 10));
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::new();

    let ticks = svc.run(&mut feed, &mut hw, &mut sink);

    assert_eq!(ticks, 10);
    assert_eq!(hw.commands.len(), 10);
    match sink.events.first() {
        Some(AppEvent::Started { status }) => assert!(status.contains("Loaded successfully")),
        other => panic!("expected Started, got {other:?}"),
    }
    assert!(matches!(sink.events.last(), Some(AppEvent::Stopped { ticks: 10 })));
}

#[test]
fn empty_feed_emits_no_commands() {
    let mut svc = make_service();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::new();

    assert_eq!(svc.run(&mut MockFeed::new([]), &mut hw, &mut sink), 0);
    assert!(hw.commands.is_empty());
    assert_eq!(svc.controller().outputs(), FuzzyOutputs::INITIAL);
}

#[test]
fn accelerating_run_shifts_up_through_every_gear() {
    let mut svc = make_service();
    let mut feed = MockFeed::new(speed_ramp(0.0, 100.0, 101));
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::new();

    svc.run(&mut feed, &mut hw, &mut sink);

    let gears = hw.gears();
    assert!(gears.windows(2).all(|w| w[0] <= w[1]), "gears went down: {gears:?}");
    assert_eq!(gears.last(), Some(&6));
    assert_eq!(
        sink.gear_changes(),
        vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6)]
    );
    assert_eq!(svc.gear_changes(), 6);
}

#[test]
fn speed_jitter_at_band_edge_does_not_flap() {
    let mut svc = make_service();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::new();

    // Climb into medium gear, then jitter across the medium/fast edge.
    for s in speed_ramp(0.0, 58.0, 59) {
        svc.tick(&s, &mut hw, &mut sink);
    }
    assert_eq!(hw.last().map(|c| c.gear), Some(4));

    let before = sink.gear_changes().len();
    for speed in [61.0, 59.0, 61.0, 59.0, 61.0, 59.0] {
        svc.tick(&sample(speed, 0.0), &mut hw, &mut sink);
    }
    let jitter: Vec<_> = sink.gear_changes().split_off(before);
    assert_eq!(jitter, vec![(4, 5)]);
    assert_eq!(hw.last().map(|c| c.gear), Some(5));
}

#[test]
fn telemetry_is_periodic() {
    let config = ControllerConfig {
        telemetry_interval_ticks: 5,
        ..ControllerConfig::default()
    };
    let mut svc = DriveService::new(&config).unwrap();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::new();

    svc.run(&mut MockFeed::new(speed_ramp(20.0, 40.0, 23)), &mut hw, &mut sink);

    assert_eq!(sink.telemetry_count(), 4);
    let t = svc.build_telemetry();
    assert_eq!(t.tick, 23);
    assert_eq!(t.metrics.ticks, 23);
    assert_eq!(t.outputs, *hw.last().unwrap());
}

#[test]
fn json_lines_round_trip_through_service() {
    let input = concat!(
        r#"{"speed":90,"acceleration":10,"path":0,"next_path":0,"stability":0.1}"#,
        "\n",
        "garbage\n",
        r#"{"speed":70,"acceleration":5,"path":0.45,"next_path":0,"stability":0.1}"#,
        "\n",
    );
    let mut source = JsonLinesSource::new(input.as_bytes());
    let mut out = JsonLinesSink::new(Vec::new());
    let mut sink = RecordingSink::new();

    let ticks = make_service().run(&mut source, &mut out, &mut sink);
    assert_eq!(ticks, 2);
    assert_eq!(source.skipped(), 1);

    let text = String::from_utf8(out.into_inner()).unwrap();
    let outputs: Vec<FuzzyOutputs> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].gear, 6);
    assert!(outputs[1].steer > 0.3);
    // Speed dropped 20 since the last change, so the downshift is accepted.
    assert_eq!(outputs[1].gear, 5);
}
