use augflow::{
    AugmentingPath, FlowNetwork, FordFulkerson, MaxFlow, MinCut, ResidualGraph, Step, Strategy,
};
use proptest::prelude::*;
use proptest::strategy::Strategy as _;

fn six_nodes() -> FlowNetwork<i64> {
    let mut net = FlowNetwork::new();
    for (u, v, c) in [
        (1, 2, 8),
        (1, 3, 6),
        (2, 4, 6),
        (3, 4, 10),
        (3, 5, 12),
        (4, 5, 3),
        (4, 6, 4),
        (5, 6, 6),
    ] {
        net.add_edge(u, v, c).unwrap();
    }
    net
}

fn build(n: u32, edges: &[(u32, u32, i64)]) -> FlowNetwork<i64> {
    let mut net = FlowNetwork::new();
    net.add_node(1).unwrap();
    net.add_node(n).unwrap();
    for &(u, v, c) in edges {
        if u != v && net.edge(u, v).is_none() {
            net.add_edge(u, v, c).unwrap();
        }
    }
    net
}

fn network() -> impl proptest::strategy::Strategy<Value = FlowNetwork<i64>> {
    (2u32..8).prop_flat_map(|n| {
        prop::collection::vec((1..=n, 1..=n, 0i64..20), 0..24)
            .prop_map(move |edges| build(n, &edges))
    })
}

#[test]
fn regression_network_has_max_flow_ten() {
    for s in Strategy::ALL {
        let mut net = six_nodes();
        let summary = FordFulkerson::new(s).run(&mut net, 1, 6).unwrap();
        assert_eq!(summary.value, 10, "{s}");
        assert_eq!(net.total_outflow(1), Ok(10), "{s}");
        assert_eq!(net.total_inflow(6), Ok(10), "{s}");
    }
}

#[test]
fn min_cut_matches_max_flow() {
    let mut net = six_nodes();
    FordFulkerson::new(Strategy::BreadthFirst)
        .run(&mut net, 1, 6)
        .unwrap();

    let cut = MinCut::from_network(&net, 1).unwrap();
    assert_eq!(cut.capacity(), 10);
    assert!(cut.source_side().contains(&1));
    assert!(!cut.source_side().contains(&6));
    assert!(cut
        .edges()
        .iter()
        .all(|&(u, v)| net.edge(u, v).map(|e| e.flow() == e.capacity()) == Some(true)));
}

#[test]
fn depth_first_still_terminates_on_the_classic_bad_case() {
    // two wide routes joined by a unit edge; naive choices alternate across it
    let mut net = FlowNetwork::<i64>::new();
    net.add_edge(1, 2, 1_000).unwrap();
    net.add_edge(1, 3, 1_000).unwrap();
    net.add_edge(2, 3, 1).unwrap();
    net.add_edge(2, 4, 1_000).unwrap();
    net.add_edge(3, 4, 1_000).unwrap();

    let dfs = FordFulkerson::new(Strategy::DepthFirst)
        .run(&mut net.clone(), 1, 4)
        .unwrap();
    let bfs = FordFulkerson::new(Strategy::BreadthFirst)
        .run(&mut net, 1, 4)
        .unwrap();
    assert_eq!(dfs.value, 2_000);
    assert_eq!(bfs.value, 2_000);
    assert_eq!(bfs.iterations, 2);
}

#[test]
fn driver_stops_exactly_when_no_path_remains() {
    let mut net = six_nodes();
    let mut ff = FordFulkerson::new(Strategy::ShortestResidual);
    loop {
        let reachable = ResidualGraph::build(&net).has_path(1, 6);
        match ff.step(&mut net, 1, 6).unwrap() {
            Step::Augmented(_) => assert!(reachable),
            Step::Done => {
                assert!(!reachable);
                break;
            }
        }
    }
    assert!(ff.check(&net, 1, 6).is_ok());
}

proptest! {
    #[test]
    fn strategies_agree_on_the_value(net in network()) {
        let target = net.largest_node_id().unwrap();
        let values = Strategy::ALL.map(|s| {
            let mut net = net.clone();
            let mut ff = FordFulkerson::new(s);
            let summary = ff.run(&mut net, 1, target).unwrap();
            prop_assert!(ff.check(&net, 1, target).is_ok());
            prop_assert_eq!(
                MinCut::from_network(&net, 1).unwrap().capacity(),
                summary.value
            );
            Ok(summary.value)
        });
        let first = values[0].clone()?;
        for v in values {
            prop_assert_eq!(v?, first);
        }
    }

    #[test]
    fn every_iteration_respects_capacities(net in network()) {
        let target = net.largest_node_id().unwrap();
        let mut net = net;
        let mut ff = FordFulkerson::new(Strategy::DepthFirst);
        while let Step::Augmented(aug) = ff.step(&mut net, 1, target).unwrap() {
            prop_assert!(aug.bottleneck() > 0);
            prop_assert!(net.edges().all(|e| 0 <= e.flow() && e.flow() <= e.capacity()));
        }
        prop_assert_eq!(
            net.value(1).unwrap(),
            net.total_inflow(target).unwrap() - net.total_outflow(target).unwrap()
        );
    }

    #[test]
    fn found_paths_are_simple_and_backed(net in network()) {
        let target = net.largest_node_id().unwrap();
        let r = ResidualGraph::build(&net);
        for s in Strategy::ALL {
            if let Some(path) = s.find_path(&r, 1, target) {
                prop_assert_eq!(path[0], 1);
                prop_assert_eq!(*path.last().unwrap(), target);
                let mut seen = path.clone();
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), path.len());
                prop_assert!(r.bottleneck_of(&path).is_ok());
            } else {
                prop_assert!(!r.has_path(1, target));
            }
        }
    }
}
