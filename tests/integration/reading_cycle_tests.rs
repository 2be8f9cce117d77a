//! Reading phase against the scripted I²C bus: sampling, fault skipping,
//! indicator timing and the re-enable that closes the cycle.

use luxphase::app::events::AppEvent;
use luxphase::error::BusError;
use luxphase::phase::reading::ReadingTiming;
use luxphase::phase::{serve_pending, PhaseBody, ReadingPhase};
use luxphase::sensors::max44009::{LuxSensor, REG_LUX_HIGH};
use luxphase::sensors::MAX_SAMPLES;
use luxphase::trigger::{InterruptMask, Line, Phase};

use crate::mock_hw::{MockI2c, MockPin, RecordingSink, Rig, VirtualDelay};

const ADDR: u8 = 0x4A;

fn phase_with(bus: MockI2c) -> ReadingPhase<MockI2c, MockPin, VirtualDelay> {
    ReadingPhase::new(
        LuxSensor::new(bus, ADDR),
        MockPin::default(),
        VirtualDelay::default(),
        ReadingTiming::default(),
    )
}

#[test]
fn full_cycle_stores_twenty_samples_in_order() {
    let mut bus = MockI2c::new();
    for i in 0..MAX_SAMPLES as u8 {
        // exponent 4, mantissa i + 1 → (i + 1) × 16 × 0.045
        bus.reply(0x40, i + 1);
    }
    let mut phase = phase_with(bus);
    let mut sink = RecordingSink::default();

    let summary = phase.run_cycle(&mut sink);
    assert_eq!(summary.recorded, MAX_SAMPLES);
    assert_eq!(summary.faults, 0);
    for i in 0..MAX_SAMPLES {
        let counts = (i as u32 + 1) << 4;
        assert_eq!(phase.reading().get(i), Some(counts * 45 / 1000));
    }
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Sample { .. })),
        MAX_SAMPLES
    );
}

#[test]
fn every_transaction_addresses_the_lux_register() {
    let mut sensor = LuxSensor::new(MockI2c::new(), ADDR);
    sensor.read_sample().unwrap();
    sensor.read_sample().unwrap();
    let bus = sensor.release();
    assert_eq!(
        bus.transactions,
        vec![(ADDR, vec![REG_LUX_HIGH]), (ADDR, vec![REG_LUX_HIGH])]
    );
}

#[test]
fn three_faults_leave_prior_values_in_place() {
    // First cycle fills every slot with 22 lux.
    let mut bus = MockI2c::new();
    for _ in 0..MAX_SAMPLES {
        bus.reply(0x1F, 0xFF);
    }
    // Second cycle: faults at 4, 11, 19; everything else reads 0x10/0x0A.
    for i in 0..MAX_SAMPLES {
        if [4, 11, 19].contains(&i) {
            bus.nack();
        } else {
            bus.reply(0x10, 0xAA);
        }
    }
    let mut phase = phase_with(bus);
    phase.run_cycle(&mut RecordingSink::default());
    assert!(phase.reading().as_slice().iter().all(|&v| v == 22));

    let mut sink = RecordingSink::default();
    let summary = phase.run_cycle(&mut sink);

    assert_eq!(summary.recorded, 17);
    assert_eq!(summary.faults, 3);
    // 0x10/0xAA: exponent 1, mantissa 0xAA = 170 → 340 × 0.045 = 15.3
    for i in 0..MAX_SAMPLES {
        let expected = if [4, 11, 19].contains(&i) { 22 } else { 15 };
        assert_eq!(phase.reading().get(i), Some(expected), "index {i}");
    }
    let faults: Vec<usize> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::BusFault { index, error } => {
                assert_eq!(*error, BusError::Nack);
                Some(*index)
            }
            _ => None,
        })
        .collect();
    assert_eq!(faults, vec![4, 11, 19]);
}

#[test]
fn indicator_blinks_each_iteration_with_split_interval() {
    let mut phase = ReadingPhase::new(
        LuxSensor::new(MockI2c::new(), ADDR),
        MockPin::default(),
        VirtualDelay::default(),
        ReadingTiming {
            samples: 3,
            indicator_on_ms: 250,
            indicator_off_ms: 750,
        },
    );
    phase.run_cycle(&mut RecordingSink::default());

    assert_eq!(
        phase.indicator().levels,
        vec![true, false, true, false, true, false]
    );
    assert_eq!(phase.delay().elapsed_ns, 3 * 1_000 * 1_000_000);
}

#[test]
fn read_button_to_reenabled_mask() {
    let mut rig = Rig::new();
    rig.tap(Line::Read, 80);
    assert_eq!(rig.coord.mask(), InterruptMask::MASKED);

    let mut bus = MockI2c::new();
    bus.nack();
    let mut phase = phase_with(bus);
    let mut sink = RecordingSink::default();

    // A press during the pending window never reaches the dispatcher.
    rig.tap(Line::Read, 80);
    assert_eq!(rig.coord.stats().edges_dropped, 1);

    let summary = serve_pending(&rig.coord, &mut phase, &mut rig.board, &mut sink)
        .expect("read trigger was pending");
    assert_eq!(summary.phase, Phase::Reading);
    assert_eq!(summary.faults, 1);
    assert_eq!(summary.recorded, MAX_SAMPLES - 1);

    assert_eq!(rig.coord.mask(), InterruptMask::UNMASKED);
    assert_eq!(rig.board.unmask_writes(), 1);
    assert_eq!(rig.coord.stats().unmask_transitions, 1);
    assert_eq!(sink.events.first(), Some(&AppEvent::PhaseStarted(Phase::Reading)));
    assert_eq!(sink.events.last(), Some(&AppEvent::InterruptsReenabled));
}
