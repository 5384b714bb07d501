use crate::local_space::LocalSpaceMemory;
use crate::spas::{SensoryFrame, SpatialSystem};
use enaction_core::{ActId, ActRepository, BundleRegistry, Motion, PlaceType, Position, PrimitiveSpec};

struct Scene {
    acts: ActRepository,
    bundles: BundleRegistry,
    memory: LocalSpaceMemory,
    see_red: ActId,
    touch_rough: ActId,
    turn: ActId,
}

/// Two interactions that both concern the cell ahead.
fn scene(clock: i64) -> Scene {
    let ahead = Position::new(1.0, 0.0, 0.0);
    let mut acts = ActRepository::new();
    acts.add_primitive(PrimitiveSpec::new("see_red", 0, 0).with_start_position(ahead))
        .unwrap();
    acts.add_primitive(PrimitiveSpec::new("touch_rough", 0, 0).with_start_position(ahead))
        .unwrap();
    acts.add_primitive(PrimitiveSpec::new("^", -3, -3).with_motion(Motion::rotate(1.57)))
        .unwrap();
    let see_red = acts.find_act("(see_red)").unwrap();
    let touch_rough = acts.find_act("(touch_rough)").unwrap();
    let turn = acts.find_act("(^)").unwrap();
    let mut memory = LocalSpaceMemory::default();
    for _ in 0..clock {
        memory.tick();
    }
    Scene {
        acts,
        bundles: BundleRegistry::default(),
        memory,
        see_red,
        touch_rough,
        turn,
    }
}

fn evoke(memory: &mut LocalSpaceMemory, act: ActId, position: Position) {
    let id = memory.add_place(None, position, PlaceType::EvokePhenomenon);
    memory.get_mut(id).unwrap().act = Some(act);
}

fn copresence_places(memory: &LocalSpaceMemory) -> Vec<(enaction_core::PlaceId, i64)> {
    memory
        .places()
        .iter()
        .filter(|p| p.place_type == PlaceType::Copresence)
        .map(|p| (p.id, p.update_count))
        .collect()
}

#[test]
fn test_see_red_touch_rough_makes_one_object() {
    let mut s = scene(5);
    let ahead = Position::new(1.0, 0.0, 0.0);
    evoke(&mut s.memory, s.see_red, ahead);
    evoke(&mut s.memory, s.touch_rough, ahead);

    let outcome = s.memory.copresence(&s.acts, &mut s.bundles);

    assert_eq!(s.bundles.len(), 1);
    let bundle = s.bundles.iter().next().unwrap();
    assert!(bundle.contains(s.see_red));
    assert!(bundle.contains(s.touch_rough));
    let places = copresence_places(&s.memory);
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].1, 5);
    assert_eq!(outcome.created, vec![places[0].0]);
}

#[test]
fn test_copresence_is_idempotent_across_ticks() {
    let mut s = scene(5);
    let ahead = Position::new(1.0, 0.0, 0.0);
    evoke(&mut s.memory, s.see_red, ahead);
    evoke(&mut s.memory, s.touch_rough, ahead);
    s.memory.copresence(&s.acts, &mut s.bundles);
    let first = copresence_places(&s.memory);

    s.memory.tick();
    let evoked: Vec<_> = s
        .memory
        .places()
        .iter()
        .filter(|p| p.place_type == PlaceType::EvokePhenomenon)
        .map(|p| p.id)
        .collect();
    for id in evoked {
        s.memory.refresh(id);
    }
    let outcome = s.memory.copresence(&s.acts, &mut s.bundles);

    let second = copresence_places(&s.memory);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].0, first[0].0);
    assert_eq!(second[0].1, 6);
    assert!(outcome.created.is_empty());
    assert_eq!(outcome.refreshed, vec![first[0].0]);
    assert_eq!(s.bundles.len(), 1);
}

#[test]
fn test_distinct_cells_are_not_bundled() {
    let mut s = scene(3);
    evoke(&mut s.memory, s.see_red, Position::new(1.0, 0.0, 0.0));
    evoke(&mut s.memory, s.touch_rough, Position::new(0.0, 1.0, 0.0));
    s.memory.copresence(&s.acts, &mut s.bundles);
    assert!(s.bundles.is_empty());
    assert!(copresence_places(&s.memory).is_empty());
}

#[test]
fn test_unlocated_acts_are_ignored() {
    let mut s = scene(3);
    evoke(&mut s.memory, s.see_red, Position::zeros());
    evoke(&mut s.memory, s.turn, Position::zeros());
    s.memory.copresence(&s.acts, &mut s.bundles);
    assert!(s.bundles.is_empty());
    assert!(copresence_places(&s.memory).is_empty());
}

#[test]
fn test_previous_tick_evocation_pairs() {
    let mut s = scene(3);
    let ahead = Position::new(1.0, 0.0, 0.0);
    evoke(&mut s.memory, s.see_red, ahead);
    s.memory.tick();
    evoke(&mut s.memory, s.touch_rough, ahead);
    s.memory.copresence(&s.acts, &mut s.bundles);
    assert_eq!(s.bundles.len(), 1);
}

#[test]
fn test_stale_evocations_do_not_pair() {
    let mut s = scene(3);
    let ahead = Position::new(1.0, 0.0, 0.0);
    evoke(&mut s.memory, s.see_red, ahead);
    s.memory.tick();
    s.memory.tick();
    evoke(&mut s.memory, s.touch_rough, ahead);
    s.memory.copresence(&s.acts, &mut s.bundles);
    assert!(s.bundles.is_empty());
}

#[test]
fn test_known_object_is_simulated_from_copresence() {
    let mut s = scene(5);
    let ahead = Position::new(1.0, 0.0, 0.0);
    evoke(&mut s.memory, s.see_red, ahead);
    evoke(&mut s.memory, s.touch_rough, ahead);
    s.memory.copresence(&s.acts, &mut s.bundles);

    // The primitive starts where the object was met, so the bundle affords it
    assert!(s.memory.run_simulation(s.touch_rough, false, &s.acts, &s.bundles));
    let failure = s.acts.alternate(s.touch_rough).unwrap();
    assert!(!s.memory.run_simulation(failure, true, &s.acts, &s.bundles));
}

#[test]
fn test_moving_and_turning_never_make_an_object() {
    let ahead = Position::new(1.0, 0.0, 0.0);
    let mut acts = ActRepository::new();
    acts.add_primitive(
        PrimitiveSpec::new(">", 5, -10)
            .with_motion(Motion::translate(1.0, 0.0))
            .with_start_position(ahead)
            .with_one_place(false),
    )
    .unwrap();
    acts.add_primitive(PrimitiveSpec::new("^", -3, -3).with_motion(Motion::rotate(1.57)))
        .unwrap();
    acts.add_primitive(PrimitiveSpec::new("v", -3, -3).with_motion(Motion::rotate(-1.57)))
        .unwrap();
    let sequence = ["(>)", "(^)", "(>)", "(v)", "(^)"].map(|l| acts.find_act(l).unwrap());

    let mut bundles = BundleRegistry::default();
    let mut system = SpatialSystem::default();
    for act in sequence.iter().cycle().take(10) {
        let observation = system.step(Some(*act), &SensoryFrame::default(), &acts, &mut bundles);
        assert_eq!(observation.focus, None);
    }
    assert!(bundles.is_empty());
    assert!(copresence_places(system.memory()).is_empty());
}

#[test]
fn test_located_acts_in_one_cell_make_an_object() {
    let mut s = scene(0);
    let mut system = SpatialSystem::default();
    system.step(Some(s.see_red), &SensoryFrame::default(), &s.acts, &mut s.bundles);
    system.step(Some(s.turn), &SensoryFrame::default(), &s.acts, &mut s.bundles);
    assert!(s.bundles.is_empty());

    // Facing the same cell again after turning back
    let mut system = SpatialSystem::default();
    system.step(Some(s.see_red), &SensoryFrame::default(), &s.acts, &mut s.bundles);
    let observation = system.step(Some(s.touch_rough), &SensoryFrame::default(), &s.acts, &mut s.bundles);
    assert_eq!(s.bundles.len(), 1);
    assert!(s.bundles.iter().next().unwrap().contains(s.see_red));
    assert_eq!(copresence_places(system.memory()).len(), 1);
    assert_eq!(observation.place_type, Some(PlaceType::Copresence));
}
