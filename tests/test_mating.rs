mod common;

use std::collections::HashSet;

use assemblage::{
    collection::Collection,
    error::GeneticError,
    evolution::{Mating, MatingConfig},
    naming::ArtifactNamer,
    operators::{MatingOperator, OperatorSpec},
    rng::RandomNumberGenerator,
    selection::{Fittest, Purpose, Selection, SelectionGroup, Selector},
    Candidate,
};
use common::{block, linker, size_score, Cage, Scripted, Topology};

fn runner(target: usize) -> Mating<Cage> {
    let config = MatingConfig::new(OperatorSpec::new("component_exchange"), target).unwrap();
    Mating::new(
        config,
        ArtifactNamer::new("/work", "mol"),
        RandomNumberGenerator::from_seed(42),
    )
}

/// Positions 0..4 mate successfully with each other; position 4 holds only
/// building blocks, so any pairing with it as the donor has no counterpart.
fn population() -> Collection<Cage> {
    Collection::from_members([
        Cage::new(vec![block("A"), linker("a")], Topology::FourPlusSix, "p0.mol"),
        Cage::new(vec![block("B"), linker("b")], Topology::FourPlusSix, "p1.mol"),
        Cage::new(vec![block("C"), linker("c")], Topology::FourPlusSix, "p2.mol"),
        Cage::new(vec![block("D"), linker("d")], Topology::FourPlusSix, "p3.mol"),
        Cage::new(vec![block("X"), block("Y")], Topology::FourPlusSix, "p4.mol"),
    ])
}

fn names(collection: &Collection<Cage>) -> Vec<String> {
    collection.iter().map(Cage::file_name).collect()
}

#[test]
fn test_stops_at_quota_counting_failed_attempts() {
    let population = population();
    // Attempts 1 and 3 fail, 2, 4 and 5 would succeed.
    let selector = Scripted::pairs(&[(0, 4), (0, 1), (1, 4), (2, 3), (0, 2)]);
    let mut mating = runner(2);

    let outcome = mating.run(&population, &selector).unwrap();

    assert_eq!(outcome.successes, 2);
    assert_eq!(outcome.attempts, 4);
    assert_eq!(outcome.failures, 2);
    assert_eq!(outcome.faults, 0);
    assert!(outcome.quota_met());
    assert_eq!(mating.calls(), 4);
    assert_eq!(
        names(&outcome.offspring),
        vec![
            "mating_2_topology_0_offspring_1.mol",
            "mating_2_topology_0_offspring_2.mol",
            "mating_4_topology_0_offspring_1.mol",
            "mating_4_topology_0_offspring_2.mol",
        ]
    );
}

#[test]
fn test_exhausted_selection_is_not_an_error() {
    let population = population();
    let selector = Scripted::pairs(&[(0, 1), (2, 3), (1, 2)]);
    let mut mating = runner(10);

    let outcome = mating.run(&population, &selector).unwrap();

    assert_eq!(outcome.successes, 3);
    assert_eq!(outcome.attempts, 3);
    assert!(!outcome.quota_met());
    assert_eq!(outcome.offspring.len(), 6);
}

#[test]
fn test_fan_out_over_distinct_topologies() {
    let population = Collection::from_members([
        Cage::new(vec![block("A"), linker("a")], Topology::FourPlusSix, "p0.mol"),
        Cage::new(vec![block("B"), linker("b")], Topology::EightPlusTwelve, "p1.mol"),
    ]);
    let mut mating = runner(1);

    let outcome = mating
        .run(&population, &Scripted::pairs(&[(0, 1)]))
        .unwrap();

    // Two distinct topologies, two pairings each.
    assert_eq!(outcome.offspring.len(), 4);
    let labels: HashSet<String> = names(&outcome.offspring).into_iter().collect();
    let expected: HashSet<String> = [
        "mating_1_topology_0_offspring_1.mol",
        "mating_1_topology_0_offspring_2.mol",
        "mating_1_topology_1_offspring_1.mol",
        "mating_1_topology_1_offspring_2.mol",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(labels, expected);

    let first = &outcome.offspring[0];
    assert_eq!(first.units, vec![block("A"), linker("b")]);
    assert_eq!(first.topology, Topology::FourPlusSix);
    let second = &outcome.offspring[1];
    assert_eq!(second.units, vec![linker("a"), block("B")]);
    assert_eq!(outcome.offspring[2].topology, Topology::EightPlusTwelve);
}

#[test]
fn test_offspring_equal_to_parents_are_removed() {
    let mut population = population();
    // An existing member already combines A with b.
    population.add(Cage::new(
        vec![linker("b"), block("A")],
        Topology::FourPlusSix,
        "existing.mol",
    ));
    let mut mating = runner(1);

    let outcome = mating
        .run(&population, &Scripted::pairs(&[(0, 1)]))
        .unwrap();

    assert_eq!(outcome.successes, 1);
    assert_eq!(outcome.duplicates_removed, 1);
    assert_eq!(
        names(&outcome.offspring),
        vec!["mating_1_topology_0_offspring_2.mol"]
    );
    for child in &outcome.offspring {
        assert!(!population.contains_fingerprint(&child.fingerprint()));
    }
}

#[test]
fn test_counter_continues_across_generations() {
    let population = population();
    let selector = Fittest::new(size_score);
    let mut mating = runner(2);
    let mut seen = HashSet::new();

    for _ in 0..3 {
        let before = mating.calls();
        let outcome = mating.run(&population, &selector).unwrap();
        assert_eq!(mating.calls(), before + outcome.attempts as u64);
        for child in outcome.offspring.iter() {
            assert!(seen.insert(child.artifact_path().to_path_buf()));
        }
    }
    assert!(mating.calls() >= 6);
}

#[test]
fn test_zero_quota_performs_no_attempts() {
    let population = population();
    let mut mating = runner(0);

    let outcome = mating
        .run(&population, &Scripted::pairs(&[(0, 1)]))
        .unwrap();

    assert_eq!(outcome.attempts, 0);
    assert!(outcome.offspring.is_empty());
    assert_eq!(mating.calls(), 0);
}

#[test]
fn test_parents_missing_second_component_fail_the_attempt() {
    let population = Collection::from_members([
        Cage::new(vec![block("A")], Topology::FourPlusSix, "lonely.mol"),
        Cage::new(vec![block("B"), linker("b")], Topology::FourPlusSix, "p1.mol"),
        Cage::new(vec![block("C"), linker("c")], Topology::FourPlusSix, "p2.mol"),
    ]);
    let mut mating = runner(1);

    let outcome = mating
        .run(&population, &Scripted::pairs(&[(0, 1), (1, 2)]))
        .unwrap();

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.failures, 1);
    assert_eq!(outcome.successes, 1);
}

#[derive(Debug)]
struct Singles;

impl Selector<Cage> for Singles {
    fn select<'a>(
        &self,
        population: &'a Collection<Cage>,
        _purpose: Purpose,
        _rng: &mut RandomNumberGenerator,
    ) -> assemblage::Result<Selection<'a, Cage>> {
        Ok(Box::new(population.iter().map(SelectionGroup::Single)))
    }
}

#[test]
fn test_group_of_wrong_size_is_fatal() {
    let population = population();
    let mut mating = runner(1);

    let result = mating.run(&population, &Singles);

    assert!(matches!(result, Err(GeneticError::Selection(_))));
    assert_eq!(mating.calls(), 0);
}

#[test]
fn test_unknown_mating_operator() {
    let result = MatingConfig::<Cage>::new(OperatorSpec::new("bb_lk_swap"), 1);
    match result {
        Err(GeneticError::UnknownOperator { purpose, name }) => {
            assert_eq!(purpose, "mating");
            assert_eq!(name, "bb_lk_swap");
        }
        other => panic!("Expected UnknownOperator, got {:?}", other),
    }
}

#[test]
fn test_typed_config() {
    let config = MatingConfig::<Cage>::from_operator(MatingOperator::ComponentExchange, 3);
    assert_eq!(config.spec().name, "component_exchange");
    assert_eq!(config.target_count(), 3);
    assert_eq!(config.calls(), 0);
}
