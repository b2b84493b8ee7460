//! Property tests for the graph store's construction invariants.

use edamame_core::GraphError;
use edamame_graph::Graph;
use proptest::prelude::*;

fn named(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(format!("n{i}")).unwrap();
    }
    g
}

proptest! {
    #[test]
    fn add_edge_is_symmetric(
        n in 2usize..30,
        pairs in prop::collection::vec((0usize..30, 0usize..30), 0..60),
    ) {
        let mut g = named(n);
        for (a, b) in pairs {
            let (a, b) = (a % n, b % n);
            if a == b {
                continue;
            }
            let (na, nb) = (format!("n{a}"), format!("n{b}"));
            g.add_edge(&na, &nb).unwrap();
            prop_assert!(g.contains_edge(&na, &nb));
            prop_assert!(g.contains_edge(&nb, &na));
        }
        let degree_sum: usize = (0..n)
            .map(|i| g.adjacency().degree(edamame_core::NodeId(i as u32)))
            .sum();
        prop_assert_eq!(degree_sum, 2 * g.edge_count());
    }

    #[test]
    fn duplicate_node_leaves_count_unchanged(n in 1usize..30, pick in 0usize..30) {
        let mut g = named(n);
        let name = format!("n{}", pick % n);
        prop_assert_eq!(
            g.add_node(name.clone()),
            Err(GraphError::DuplicateNode { name })
        );
        prop_assert_eq!(g.node_count(), n);
    }

    #[test]
    fn unknown_node_leaves_adjacency_unchanged(n in 1usize..20, pick in 0usize..20) {
        let mut g = named(n);
        if n >= 2 {
            g.add_edge("n0", &format!("n{}", n - 1)).unwrap();
        }
        let before: Vec<(String, String)> = g
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        let present = format!("n{}", pick % n);
        prop_assert!(g.add_edge(&present, "ghost").is_err());
        prop_assert!(g.add_edge("ghost", &present).is_err());
        let after: Vec<(String, String)> = g
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        prop_assert_eq!(before, after);
    }
}
