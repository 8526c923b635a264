//! Property-based tests for the search engine.
//!
//! - Visit conservation at the root
//! - Reward alternation between the two sides
//! - Determinism for a fixed seed

use std::collections::HashMap;

use drafter_core::{Game, Side};
use drafter_mcts::{
    ConstantOracle, LocalStatistics, Mcts, MctsConfig, NodeId, SearchRoot, SearchTree,
    TranspositionTable,
};
use drafter_pickban::{DraftRules, HeroId, Position};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Small draft formats that keep playouts short.
fn arb_rules() -> impl Strategy<Value = DraftRules> {
    prop_oneof![
        Just(("p1,p1", 1usize, 3u16)),
        Just(("b1,b1,p1,p1", 1, 5)),
        Just(("b1,p1,p1,p1,p1", 2, 6)),
        Just(("p1,b1,p1,p1,b1,p1", 2, 8)),
        Just(("b2,b2,p1,p2,p1", 2, 12)),
    ]
    .prop_flat_map(|(schedule, team, heroes)| {
        prop_oneof![Just(Side::Radiant), Just(Side::Dire)].prop_map(move |first| {
            DraftRules::new((0..heroes).map(HeroId), schedule.parse().unwrap(), team, first)
                .unwrap()
        })
    })
}

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn arb_iterations() -> impl Strategy<Value = u32> {
    1u32..150
}

fn arb_probability() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

fn search_local(
    game: &DraftRules,
    iterations: u32,
    p: f64,
    seed: u64,
) -> SearchTree<DraftRules, f64> {
    let mut mcts = Mcts::new(
        MctsConfig::with_iterations(iterations),
        ConstantOracle(p),
        ChaCha8Rng::seed_from_u64(seed),
    );
    mcts.search_local(game, SearchRoot::Initial(game.initial_state()))
        .unwrap()
        .tree
}

/// Every node reachable from the root, in breadth-first order.
fn all_nodes<T>(tree: &SearchTree<DraftRules, T>) -> Vec<NodeId> {
    let mut out = vec![NodeId::ROOT];
    let mut i = 0;
    while i < out.len() {
        out.extend(tree.children(out[i]).iter().copied());
        i += 1;
    }
    out
}

// =============================================================================
// Visit conservation
// =============================================================================

proptest! {
    /// Root visits equal the iteration count and the sum of its children's.
    #[test]
    fn prop_root_visits_conserved(
        game in arb_rules(),
        iterations in arb_iterations(),
        seed in arb_seed(),
    ) {
        let tree = search_local(&game, iterations, 0.5, seed);
        let children: u32 = tree
            .children(NodeId::ROOT)
            .iter()
            .map(|&c| tree.get(c).visit_count())
            .sum();
        prop_assert_eq!(tree.root().visit_count(), iterations);
        prop_assert_eq!(children, iterations);
    }

    /// A node is visited at least as often as all of its children together.
    #[test]
    fn prop_node_visits_cover_children(
        game in arb_rules(),
        iterations in arb_iterations(),
        seed in arb_seed(),
    ) {
        let tree = search_local(&game, iterations, 0.5, seed);
        for id in all_nodes(&tree) {
            let node = tree.get(id);
            let children: u32 = node.children().iter().map(|&c| tree.get(c).visit_count()).sum();
            prop_assert!(node.visit_count() >= children);
            prop_assert!(node.visit_count() >= 1);
        }
    }
}

// =============================================================================
// Reward alternation
// =============================================================================

proptest! {
    /// With a constant oracle every node's mean is the oracle value seen by
    /// the side that moved into it.
    #[test]
    fn prop_backup_alternates_between_sides(
        game in arb_rules(),
        iterations in arb_iterations(),
        p in arb_probability(),
        seed in arb_seed(),
    ) {
        let tree = search_local(&game, iterations, p, seed);
        for id in all_nodes(&tree) {
            let state = tree.get(id).state();
            let expected = match game.last_mover(state) {
                Side::Radiant => p,
                Side::Dire => 1.0 - p,
            };
            let mean = tree.mean_reward(&game, &LocalStatistics, id).unwrap();
            prop_assert!(
                (mean - expected).abs() < 1e-9,
                "node {} mean {} expected {}", id, mean, expected
            );
        }
    }

    /// Same seed, same tree shape and same answer.
    #[test]
    fn prop_search_is_deterministic(
        game in arb_rules(),
        iterations in arb_iterations(),
        seed in arb_seed(),
    ) {
        let run = || {
            let mut mcts = Mcts::new(
                MctsConfig::with_iterations(iterations),
                ConstantOracle(0.3),
                ChaCha8Rng::seed_from_u64(seed),
            );
            mcts.search_local(&game, SearchRoot::Initial(game.initial_state())).unwrap()
        };
        let first = run();
        let second = run();
        prop_assert_eq!(first.best_action(), second.best_action());
        prop_assert_eq!(first.tree.len(), second.tree.len());
        prop_assert_eq!(first.tree.stats(), second.tree.stats());
    }
}

// =============================================================================
// Shared statistics
// =============================================================================

proptest! {
    /// Each table entry holds exactly the visits of the nodes sharing its key.
    #[test]
    fn prop_table_sums_node_visits(
        game in arb_rules(),
        iterations in arb_iterations(),
        seed in arb_seed(),
    ) {
        let mut table = TranspositionTable::new();
        let mut mcts = Mcts::new(
            MctsConfig::with_iterations(iterations),
            ConstantOracle(0.5),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let result = mcts
            .search_transpositions(&game, SearchRoot::Initial(game.initial_state()), &mut table)
            .unwrap();

        let mut per_key: HashMap<&Position, u32> = HashMap::new();
        for id in all_nodes(&result.tree) {
            let node = result.tree.get(id);
            *per_key.entry(game.position_key(node.state())).or_default() += node.visit_count();
        }
        prop_assert_eq!(per_key.len(), table.len());
        for (key, visits) in per_key {
            prop_assert_eq!(table.get(key).unwrap().visit_count, visits);
        }
    }
}
