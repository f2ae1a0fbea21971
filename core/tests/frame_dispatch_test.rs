mod common;

use common::TestBus;
use gatekeeper_core::mcu::beastie::{Bearing, LifeStage};
use gatekeeper_core::mcu::map::*;
use gatekeeper_core::mcu::{ControllerId, Mcu, TickOutcome};

fn place_beastie(bus: &mut TestBus, index: usize, stage: LifeStage, y: u8, x: u8) {
    let rec = beastie_record(index);
    bus.poke(rec, stage as u8);
    bus.poke(rec + 1, y);
    bus.poke(rec + 2, x);
}

fn player(bus: &mut TestBus, p: usize, live: bool, y: u8, x: u8) {
    let cells = PLAYERS[p];
    bus.poke(cells.liveness, live as u8);
    bus.poke(cells.y, y);
    bus.poke(cells.x, x);
}

// =================================================================
// Interrupt gate
// =================================================================

#[test]
fn test_one_interrupt_per_frame_once_host_is_ready() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();

    mcu.tick(&mut bus);
    assert_eq!(bus.latch.take_irq_edges(), 0);

    bus.poke(IRQ_READY, IRQ_READY_MARKER);
    for _ in 0..5 {
        assert_eq!(mcu.tick(&mut bus), TickOutcome::Completed);
    }
    assert_eq!(bus.latch.take_irq_edges(), 5);
    assert!(!bus.latch.irq_line());
    assert_eq!(mcu.stats().interrupts, 5);
}

// =================================================================
// Input relay and credits
// =================================================================

#[test]
fn test_inputs_are_mirrored_every_frame() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.cabinet = 0x21;
    bus.poke(BANK_P1, 0x0C);
    bus.poke(BANK_DIP_B, 0x03);
    mcu.tick(&mut bus);
    assert_eq!(bus.peek(CABINET_MIRROR), 0x21);
    assert_eq!(bus.peek(BANK_MIRRORS), 0x0C);
    assert_eq!(bus.peek(BANK_MIRRORS + 3), 0x03);
}

#[test]
fn test_two_coin_pricing_through_the_dispatcher() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.poke(BANK_DIP_A, 0x02);

    for edge in 1..=2 {
        bus.poke(BANK_P1, 0x80);
        mcu.tick(&mut bus);
        bus.poke(BANK_P1, 0x00);
        mcu.tick(&mut bus);
        let expected = if edge == 2 { 1 } else { 0 };
        assert_eq!(bus.peek(PHONY_CREDITS), expected, "after edge {edge}");
    }
    assert_eq!(mcu.state().credits.partial(0), 0);
    assert_eq!(bus.peek(CREDITS_CHANGED), 1);
}

#[test]
fn test_host_lockout_command_wins() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.poke(PHONY_CREDITS, 9);
    bus.poke(LOCKOUT_COMMAND, LOCKOUT_CMD_DISENGAGE);
    mcu.tick(&mut bus);
    assert!(!bus.latch.lockout_engaged());
    assert_eq!(bus.latch.lockout_changes(), 2);

    bus.poke(LOCKOUT_COMMAND, 0);
    mcu.tick(&mut bus);
    assert!(bus.latch.lockout_engaged());
}

// =================================================================
// Beastie relay
// =================================================================

#[test]
fn test_collision_defect_end_to_end() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    player(&mut bus, 0, true, 100, 100);
    place_beastie(&mut bus, 0, LifeStage::Roaming, 104, 20);
    place_beastie(&mut bus, 1, LifeStage::Bubbled, 220, 103);
    for i in 2..BEASTIE_COUNT {
        place_beastie(&mut bus, i, LifeStage::Shown, 10, 10);
    }

    // Previous frame: beasties 2..6 far away, beastie 1 not yet live.
    bus.poke(beastie_record(1), LifeStage::Gone as u8);
    mcu.tick(&mut bus);
    let before: Vec<u8> = (2..BEASTIE_COUNT)
        .map(|i| bus.peek(PLAYERS[0].beastie_output(i).vertical_distance))
        .collect();
    assert_eq!(before, vec![90; BEASTIE_COUNT - 2]);
    assert_eq!(bus.peek(PLAYERS[0].kill_request), 0);

    // Now move them and bring beastie 1 to life.
    for i in 2..BEASTIE_COUNT {
        place_beastie(&mut bus, i, LifeStage::Shown, 60, 60);
    }
    bus.poke(beastie_record(1), LifeStage::Bubbled as u8);
    mcu.tick(&mut bus);

    assert_eq!(bus.peek(PLAYERS[0].kill_request), KILL_REQUESTED);
    assert_eq!(bus.peek(PLAYERS[0].kill_cause), 1);
    for i in 2..BEASTIE_COUNT {
        let out = PLAYERS[0].beastie_output(i);
        assert_eq!(bus.peek(out.vertical_distance), 90, "beastie {i} refreshed");
    }
}

#[test]
fn test_boundary_distances() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    player(&mut bus, 1, true, 5, 200);
    place_beastie(&mut bus, 0, LifeStage::Roaming, 13, 10);
    mcu.tick(&mut bus);
    let out = PLAYERS[1].beastie_output(0);
    assert_eq!(bus.peek(out.vertical_code), Bearing::AboveOrRight as u8);
    assert_eq!(bus.peek(out.vertical_distance), 8);
    assert_eq!(mcu.state().beasties[1].y_overlaps, 0);

    place_beastie(&mut bus, 0, LifeStage::Roaming, 12, 10);
    mcu.tick(&mut bus);
    assert_eq!(bus.peek(out.vertical_distance), 7);
    assert_eq!(mcu.state().beasties[1].y_overlaps, 1);
}

// =================================================================
// Controllers, timers, translators, reset
// =================================================================

#[test]
fn test_level_controller_feeds_mischief() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.poke(MISCHIEF_ENABLE, MISCHIEF_ENABLE_MARKER);
    for _ in 0..MISCHIEF_LEVEL {
        bus.poke(LEVEL_CTL.command, 0x02);
        mcu.tick(&mut bus);
        assert_eq!(bus.peek(LEVEL_CTL.command), 0);
    }
    assert_eq!(bus.peek(LEVEL_CTL.output), MISCHIEF_LEVEL);
    assert_eq!(bus.peek(PHONY_CREDITS), MISCHIEF_CREDITS);
    // Forty-two phony credits also hold the coin lockout on next frame.
    mcu.tick(&mut bus);
    assert!(bus.latch.lockout_engaged());
}

#[test]
fn test_tampered_controller_output_poisons() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.poke(IRQ_READY, IRQ_READY_MARKER);
    bus.poke(CREDIT_CTL_B.command, 0x08);
    mcu.tick(&mut bus);
    assert_eq!(bus.peek(CREDIT_CTL_B.output), 9);

    bus.poke(DIAG_GATE, DIAG_GATE_MARKER);
    assert_eq!(mcu.tick(&mut bus), TickOutcome::Completed);

    bus.poke(CREDIT_CTL_B.output, 8);
    assert_eq!(mcu.tick(&mut bus), TickOutcome::Poisoned(ControllerId::CreditB));
    bus.latch.take_irq_edges();
    assert_eq!(mcu.tick(&mut bus), TickOutcome::Halted);
    assert_eq!(bus.latch.take_irq_edges(), 0);
}

#[test]
fn test_clock_creepers_extend_and_translator_in_one_frame() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.poke(CLOCK_ACTIVE, 1);
    bus.poke(CLOCK_COUNT_LO, 1);
    bus.poke(CREEPER_SELECTORS + 1, 40);
    let t = TRANSLATORS[1];
    bus.poke(t.table, 3);
    bus.poke(t.index, 57);
    bus.poke(t.offset, 0x20);
    bus.poke(t.status, TRANSLATOR_ARMED);

    mcu.tick(&mut bus);
    assert_eq!(bus.peek(CLOCK_ACTIVE), 0);
    assert_eq!(bus.peek(CLOCK_COMPLETE), 1);
    assert_eq!(bus.peek(EXTEND_SELECTOR), 1);
    assert_eq!(bus.peek(t.output_base + 0x20), 0x57);
    assert_eq!(bus.peek(t.status), TRANSLATOR_DONE);

    mcu.tick(&mut bus);
    assert_eq!(bus.peek(CREEPER_OUTPUTS + 1), 4);
}

#[test]
fn test_warm_reset_rezeroes_core_state() {
    let mut bus = TestBus::new();
    let mut mcu = Mcu::new();
    bus.poke(BANK_DIP_A, 0x03);
    bus.poke(BANK_P1, 0x80);
    mcu.tick(&mut bus);
    bus.poke(BANK_P1, 0x00);
    mcu.tick(&mut bus);
    assert_eq!(mcu.state().credits.partial(0), 1);

    bus.poke(RESET_COMMAND, WARM_RESET_MARKER);
    mcu.tick(&mut bus);
    bus.poke(RESET_COMMAND, 0);
    assert_eq!(mcu.state().credits.partial(0), 0);
    assert_eq!(mcu.state().creepers[0].selector, 0);
    assert_eq!(mcu.stats().warm_resets, 1);
}
