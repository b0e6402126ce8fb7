//! Assertion helpers for progress events.

use ac_protocol::Event;
use tokio::sync::mpsc;

/// Drain every event already sent on `rx`.
#[allow(dead_code)]
pub fn drain_events(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Assert the shape of a pipeline run's events: one start, then a started
/// and a settled event per step, then exactly one terminal event.
#[allow(dead_code)]
pub fn assert_event_sequence(events: &[Event], steps_run: usize) {
    assert!(
        matches!(events.first(), Some(Event::PipelineStarted { .. })),
        "First event should be PipelineStarted, got: {:?}",
        events.first()
    );

    for step in 0..steps_run {
        let started = &events[1 + step * 2];
        let settled = &events[2 + step * 2];
        assert!(
            matches!(started, Event::StepStarted { step_index, .. } if *step_index == step),
            "Expected StepStarted for step {step}, got: {started:?}"
        );
        assert!(
            matches!(
                settled,
                Event::StepCompleted { step_index, .. } | Event::StepFailed { step_index, .. }
                    if *step_index == step
            ),
            "Expected StepCompleted or StepFailed for step {step}, got: {settled:?}"
        );
    }

    assert_eq!(events.len(), 2 + steps_run * 2, "unexpected events: {events:?}");
    assert!(
        events.last().is_some_and(Event::is_terminal),
        "Last event should be terminal, got: {:?}",
        events.last()
    );
}

/// All events of one run share the same run id.
#[allow(dead_code)]
pub fn assert_single_run_id(events: &[Event]) {
    let run_ids: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::PipelineStarted { run_id, .. }
            | Event::StepStarted { run_id, .. }
            | Event::StepCompleted { run_id, .. }
            | Event::StepFailed { run_id, .. }
            | Event::PipelineCompleted { run_id }
            | Event::PipelineFailed { run_id, .. } => Some(*run_id),
            Event::ComparisonBranchSettled { .. } => None,
        })
        .collect();

    assert!(!run_ids.is_empty());
    assert!(run_ids.windows(2).all(|pair| pair[0] == pair[1]));
}
