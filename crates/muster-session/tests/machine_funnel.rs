#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::sync::Arc;

use muster_core::{
    ActivityMetadata, DifficultyBand, Objective, Participant, RoleCatalog, RoleId,
    SelectionSnapshot,
};
use muster_session::{
    CompositionChoice, EventKind, InboundEvent, SessionMachine, SessionPhase, Step,
};

const INITIATOR: &str = "user-1";

fn machine() -> SessionMachine {
    let catalog = Arc::new(RoleCatalog::keystone(3).expect("stock catalog is valid"));
    SessionMachine::new(
        "session-1",
        Participant::new(INITIATOR, "Keyrunner"),
        ActivityMetadata::new("Ara-Kara", Objective::Time),
        DifficultyBand::new(2, 10).expect("band is valid"),
        catalog,
    )
}

fn event(kind: EventKind) -> InboundEvent {
    InboundEvent::new(INITIATOR, kind)
}

fn roles(ids: &[&str]) -> BTreeSet<RoleId> {
    ids.iter().map(|id| RoleId::from(*id)).collect()
}

fn expect_render(step: Step) -> (String, SelectionSnapshot) {
    match step {
        Step::Render { prompt, snapshot } => (prompt, snapshot),
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn confirm_walks_missing_fields_in_priority_order() {
    let mut machine = machine();

    let (prompt, _) = expect_render(machine.handle(&event(EventKind::Confirm)));
    assert!(prompt.contains("Please select a difficulty."));

    machine.handle(&event(EventKind::Difficulty(5)));
    let (prompt, _) = expect_render(machine.handle(&event(EventKind::Confirm)));
    assert!(prompt.contains("Please select your role."));

    machine.handle(&event(EventKind::OwnRole(RoleId::from("Tank"))));
    let (prompt, _) = expect_render(machine.handle(&event(EventKind::Confirm)));
    assert!(prompt.contains("Please select required roles."));

    machine.handle(&event(EventKind::Composition(CompositionChoice::Roles(
        roles(&["Healer"]),
    ))));
    let step = machine.handle(&event(EventKind::Confirm));
    assert!(matches!(step, Step::Confirmed(_)));
    assert_eq!(machine.phase(), SessionPhase::Confirmed);
}

#[test]
fn priority_is_fixed_regardless_of_input_order() {
    let mut machine = machine();

    // Requirements and a (role-less) composition arrive first; difficulty is
    // still the first thing the initiator is asked for.
    machine.handle(&event(EventKind::Requirements(BTreeSet::new())));
    machine.handle(&event(EventKind::OwnRole(RoleId::from("Healer"))));
    machine.handle(&event(EventKind::Composition(CompositionChoice::Roles(
        roles(&["Tank"]),
    ))));

    let (prompt, _) = expect_render(machine.handle(&event(EventKind::Confirm)));
    assert!(prompt.contains("Please select a difficulty."));
    assert_eq!(machine.phase(), SessionPhase::Open);
}

#[test]
fn role_change_invalidates_previous_composition() {
    let mut machine = machine();
    machine.handle(&event(EventKind::Difficulty(4)));
    machine.handle(&event(EventKind::OwnRole(RoleId::from("Tank"))));
    machine.handle(&event(EventKind::Composition(CompositionChoice::Roles(
        roles(&["Healer", "DPS1"]),
    ))));

    machine.handle(&event(EventKind::OwnRole(RoleId::from("Healer"))));

    let (prompt, snapshot) = expect_render(machine.handle(&event(EventKind::Confirm)));
    assert!(prompt.contains("Please select required roles."));
    assert_eq!(snapshot.needed_roles, None);
    assert_eq!(snapshot.own_role, Some(RoleId::from("Healer")));
}

#[test]
fn composition_sentinel_is_a_no_op() {
    let mut machine = machine();
    let step = machine.handle(&event(EventKind::Composition(
        CompositionChoice::NoneSelected,
    )));
    assert_eq!(step, Step::Ignored);
    assert_eq!(machine.selection().needed_roles(), None);
}

#[test]
fn non_initiator_events_are_dropped() {
    let mut machine = machine();
    let step = machine.handle(&InboundEvent::new("someone-else", EventKind::Difficulty(5)));
    assert_eq!(step, Step::Ignored);
    assert_eq!(machine.selection().difficulty(), None);

    let step = machine.handle(&InboundEvent::new("someone-else", EventKind::Cancel));
    assert_eq!(step, Step::Ignored);
    assert_eq!(machine.phase(), SessionPhase::Open);
}

#[test]
fn out_of_band_difficulty_renders_a_corrective_notice() {
    let mut machine = machine();
    let (prompt, snapshot) = expect_render(machine.handle(&event(EventKind::Difficulty(11))));
    assert!(prompt.contains("outside the allowed band"));
    assert_eq!(snapshot.difficulty, None);
    assert_eq!(machine.phase(), SessionPhase::Open);
}

#[test]
fn unknown_role_renders_a_corrective_notice() {
    let mut machine = machine();
    let (prompt, snapshot) = expect_render(machine.handle(&event(EventKind::OwnRole(
        RoleId::from("Bard"),
    ))));
    assert!(prompt.contains("unknown role"));
    assert_eq!(snapshot.own_role, None);
}

#[test]
fn cancelled_session_ignores_everything_after() {
    let mut machine = machine();
    assert_eq!(machine.handle(&event(EventKind::Cancel)), Step::Cancelled);
    assert_eq!(machine.phase(), SessionPhase::Cancelled);

    assert_eq!(machine.handle(&event(EventKind::Confirm)), Step::Ignored);
    assert_eq!(machine.handle(&event(EventKind::Difficulty(5))), Step::Ignored);
    assert!(!machine.timeout(), "timer lost the race; no transition");
    assert_eq!(machine.phase(), SessionPhase::Cancelled);
}

#[test]
fn timeout_closes_only_an_open_session() {
    let mut machine = machine();
    assert!(machine.timeout());
    assert_eq!(machine.phase(), SessionPhase::TimedOut);
    assert!(!machine.timeout());
}

#[test]
fn full_funnel_produces_the_expected_roster() {
    let mut machine = machine();
    machine.handle(&event(EventKind::Difficulty(7)));
    machine.handle(&event(EventKind::OwnRole(RoleId::from("Tank"))));
    machine.handle(&event(EventKind::Composition(CompositionChoice::Roles(
        roles(&["Healer"]),
    ))));

    let Step::Confirmed(allocation) = machine.handle(&event(EventKind::Confirm)) else {
        panic!("expected confirmation");
    };

    let slots = allocation.roster.slots();
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].occupant_id, INITIATOR);
    assert!(!slots[0].is_placeholder);
    assert!(slots.iter().all(|slot| slot.role != RoleId::from("Healer")));
    let suffixes: Vec<_> = allocation
        .roster
        .placeholders()
        .map(|slot| slot.occupant_id.clone())
        .collect();
    assert_eq!(suffixes, vec!["Filled0", "Filled1", "Filled2"]);
}

#[test]
fn repeated_selection_events_are_idempotent() {
    let mut machine = machine();
    machine.handle(&event(EventKind::Difficulty(5)));
    machine.handle(&event(EventKind::OwnRole(RoleId::from("DPS1"))));
    machine.handle(&event(EventKind::Composition(CompositionChoice::Roles(
        roles(&["Tank", "Healer"]),
    ))));
    let first = machine.selection().snapshot();

    machine.handle(&event(EventKind::Difficulty(5)));
    machine.handle(&event(EventKind::OwnRole(RoleId::from("DPS1"))));
    machine.handle(&event(EventKind::Composition(CompositionChoice::Roles(
        roles(&["Tank", "Healer"]),
    ))));
    assert_eq!(machine.selection().snapshot(), first);
}
