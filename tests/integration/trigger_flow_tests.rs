//! End-to-end trigger path: button gestures on the simulated board
//! through debounce to phase release, consumption and re-enable.

use luxphase::app::events::AppEvent;
use luxphase::app::ports::{DebounceTimerPort, LinePort};
use luxphase::phase::{serve_one, serve_pending, ListeningPhase};
use luxphase::trigger::coordinator::{Capture, TriggerCoordinator, Validation};
use luxphase::trigger::debounce::{DebounceParams, MaskPolicy};
use luxphase::trigger::{InterruptMask, Line, Phase};

use crate::mock_hw::{MockPin, RecordingSink, Rig, SimBoard, VirtualDelay};

#[test]
fn listen_held_80ms_releases_listen_only() {
    let mut rig = Rig::new();
    rig.tap(Line::Listen, 80);

    let stats = rig.coord.stats();
    assert_eq!(stats.released(Phase::Listening), 1);
    assert_eq!(stats.released(Phase::Reading), 0);
    assert!(rig.coord.is_trigger_pending(Phase::Listening));
    assert!(!rig.coord.is_trigger_pending(Phase::Reading));
    assert_eq!(rig.validations, vec![Validation::Released(Phase::Listening)]);
}

#[test]
fn read_held_30ms_releases_nothing() {
    let mut rig = Rig::new();
    rig.tap(Line::Read, 30);

    let stats = rig.coord.stats();
    assert_eq!(stats.total_releases(), 0);
    assert_eq!(stats.spurious_edges, 1);
    assert_eq!(rig.validations, vec![Validation::Spurious(Line::Read)]);
    // A spurious edge hands the lines straight back.
    assert_eq!(rig.coord.mask(), InterruptMask::UNMASKED);
}

#[test]
fn timer_fires_exactly_at_window_end() {
    let mut rig = Rig::new();
    rig.press(Line::Read);
    rig.advance(49);
    assert!(rig.validations.is_empty());
    assert_eq!(rig.coord.pending(), Some(Line::Read));
    rig.advance(1);
    assert_eq!(rig.validations, vec![Validation::Released(Phase::Reading)]);
    assert!(!rig.board.timer_pending());
}

#[test]
fn contact_bounce_yields_one_release() {
    let mut rig = Rig::new();
    // Chatter for ~12 ms, then a solid hold.
    for _ in 0..4 {
        rig.press(Line::Read);
        rig.advance(2);
        rig.release(Line::Read);
        rig.advance(1);
    }
    rig.press(Line::Read);
    rig.advance(100);

    assert_eq!(rig.captures[0], Capture::Armed);
    assert!(rig.captures[1..].iter().all(|c| *c == Capture::Dropped));
    assert_eq!(rig.board.arms, 1);
    assert_eq!(rig.coord.stats().released(Phase::Reading), 1);
}

#[test]
fn other_line_during_window_is_dropped() {
    let mut rig = Rig::new();
    rig.press(Line::Listen);
    rig.advance(10);
    assert_eq!(rig.press(Line::Read), Capture::Dropped);
    rig.advance(60);

    // Listen was first and still held.
    let stats = rig.coord.stats();
    assert_eq!(stats.released(Phase::Listening), 1);
    assert_eq!(stats.released(Phase::Reading), 0);
    assert_eq!(stats.edges_dropped, 1);
}

#[test]
fn presses_while_phase_pending_are_dropped_until_reenable() {
    let mut rig = Rig::new();
    rig.tap(Line::Read, 80);
    assert_eq!(rig.coord.mask(), InterruptMask::MASKED);

    // Listen pressed while the reading phase owns the device.
    rig.tap(Line::Listen, 200);
    assert!(!rig.coord.is_trigger_pending(Phase::Listening));
    assert_eq!(rig.coord.stats().edges_dropped, 1);

    let mut body = ListeningPhase::new(MockPin::default(), VirtualDelay::default(), 10);
    // Wrong phase: nothing to serve.
    assert!(serve_pending(&rig.coord, &mut body, &mut rig.board, &mut RecordingSink::default()).is_none());

    assert!(rig.coord.try_consume_trigger(Phase::Reading));
    assert!(rig.coord.reenable(&mut rig.board));

    rig.tap(Line::Listen, 80);
    assert!(rig.coord.is_trigger_pending(Phase::Listening));
}

#[test]
fn listening_cycle_reenables_exactly_once() {
    let mut rig = Rig::new();
    rig.tap(Line::Listen, 80);

    let mut body = ListeningPhase::new(MockPin::default(), VirtualDelay::default(), 5000);
    let mut sink = RecordingSink::default();
    let summary = serve_pending(&rig.coord, &mut body, &mut rig.board, &mut sink)
        .expect("listen trigger was pending");

    assert_eq!(summary.phase, Phase::Listening);
    assert_eq!(body.indicator().levels, vec![true, false]);
    assert_eq!(rig.coord.mask(), InterruptMask::UNMASKED);
    assert_eq!(rig.board.unmask_writes(), 1);
    assert_eq!(rig.coord.stats().unmask_transitions, 1);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::PhaseStarted(Phase::Listening),
            AppEvent::CycleComplete(summary),
            AppEvent::InterruptsReenabled,
        ]
    );

    // Trigger consumed: a second serve finds nothing.
    assert!(serve_pending(&rig.coord, &mut body, &mut rig.board, &mut sink).is_none());
}

#[test]
fn release_policy_unmasks_before_phase_runs() {
    let mut rig = Rig::with_params(DebounceParams {
        delay_ms: 50,
        policy: MaskPolicy::ReleaseAtExpiry,
    });
    rig.tap(Line::Listen, 80);
    assert_eq!(rig.coord.mask(), InterruptMask::UNMASKED);

    // Buttons stay live while the listen trigger waits.
    rig.tap(Line::Read, 80);
    assert!(rig.coord.is_trigger_pending(Phase::Listening));
    assert!(rig.coord.is_trigger_pending(Phase::Reading));

    // Phase-side re-enable is then a no-op transition.
    assert!(!rig.coord.reenable(&mut rig.board));
    assert_eq!(rig.coord.stats().unmask_transitions, 2);
}

#[test]
fn phase_task_wakes_on_another_thread() {
    let coord = TriggerCoordinator::new();
    let mut lines = SimBoard::new();

    std::thread::scope(|s| {
        let task = s.spawn(|| {
            let mut body = ListeningPhase::new(MockPin::default(), VirtualDelay::default(), 1);
            let mut task_lines = SimBoard::new();
            let mut sink = RecordingSink::default();
            serve_one(&coord, &mut body, &mut task_lines, &mut sink);
            task_lines.unmask_writes()
        });

        coord.capture_edge(Line::Listen, &mut lines);
        // Report the line as still held at expiry.
        struct Held<'a>(&'a mut SimBoard);
        impl LinePort for Held<'_> {
            fn is_asserted(&mut self, _line: Line) -> bool {
                true
            }
            fn apply_mask(&mut self, mask: InterruptMask) {
                self.0.apply_mask(mask);
            }
        }
        impl DebounceTimerPort for Held<'_> {
            fn arm(&mut self, delay_ms: u32) {
                self.0.arm(delay_ms);
            }
            fn stop(&mut self) {
                self.0.stop();
            }
        }
        assert_eq!(
            coord.validate_and_trigger(&mut Held(&mut lines)),
            Validation::Released(Phase::Listening)
        );

        assert_eq!(task.join().unwrap(), 1);
    });

    assert_eq!(coord.mask(), InterruptMask::UNMASKED);
    assert_eq!(coord.stats().consumed[Phase::Listening.index()], 1);
}
