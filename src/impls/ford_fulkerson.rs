use core::marker::PhantomData;

use serde::Serialize;

use crate::algo::AugmentingPath;
use crate::capacity::Capacity;
use crate::error::{Error, Result};
use crate::network::FlowNetwork;
use crate::node::NodeId;
use crate::residual::{Augmentation, ResidualGraph};
use crate::MaxFlow;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverState {
    #[default]
    Running,
    Done,
}

/// Outcome of a single driver iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<C> {
    Augmented(Augmentation<C>),
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlowSummary<C> {
    /// Net flow leaving the source.
    pub value: C,
    /// Number of augmenting paths applied.
    pub iterations: usize,
    pub last_augmentation: Option<Augmentation<C>>,
}

/// Ford-Fulkerson driven by an augmenting path finder `P`.
///
/// Every iteration rebuilds the residual graph from the whole network, asks `P` for a
/// path and pushes the path's bottleneck along it. The loop stops as soon as `P` finds
/// no path, at which point the flow is maximum.
#[derive(Clone, Debug)]
pub struct FordFulkerson<P, C> {
    finder: P,
    state: DriverState,
    _phantom: PhantomData<C>,
}

impl<P: Default, C> Default for FordFulkerson<P, C> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P, C> FordFulkerson<P, C> {
    pub fn new(finder: P) -> Self {
        Self {
            finder,
            state: DriverState::Running,
            _phantom: Default::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn finder(&self) -> &P {
        &self.finder
    }
}

fn check_terminals<C: Capacity>(
    network: &FlowNetwork<C>,
    source: NodeId,
    target: NodeId,
) -> Result<()> {
    if source == target {
        return Err(Error::SourceIsTarget(source));
    }
    match [source, target].into_iter().find(|id| !network.contains(*id)) {
        Some(id) => Err(Error::UnknownNode(id)),
        None => Ok(()),
    }
}

impl<P, C> FordFulkerson<P, C>
where
    P: AugmentingPath,
    C: Capacity,
{
    /// Performs one iteration: build the residual graph, find a path and apply it.
    pub fn step(
        &mut self,
        network: &mut FlowNetwork<C>,
        source: NodeId,
        target: NodeId,
    ) -> Result<Step<C>> {
        check_terminals(network, source, target)?;
        self.advance(network, source, target, &mut |_, _| {})
    }

    fn advance<F>(
        &mut self,
        network: &mut FlowNetwork<C>,
        source: NodeId,
        target: NodeId,
        observer: &mut F,
    ) -> Result<Step<C>>
    where
        F: FnMut(&ResidualGraph<C>, &Augmentation<C>),
    {
        let residual = ResidualGraph::build(network);
        let Some(path) = self.finder.find_path(&residual, source, target) else {
            self.state = DriverState::Done;
            return Ok(Step::Done);
        };

        let augmentation = residual.augmentation(path)?;
        observer(&residual, &augmentation);
        network.add_flow(augmentation.path(), augmentation.bottleneck())?;
        self.state = DriverState::Running;
        Ok(Step::Augmented(augmentation))
    }

    /// Runs to completion, handing every residual graph and the augmentation chosen on it
    /// to `observer` before the flow is applied.
    pub fn run_with<F>(
        &mut self,
        network: &mut FlowNetwork<C>,
        source: NodeId,
        target: NodeId,
        mut observer: F,
    ) -> Result<FlowSummary<C>>
    where
        F: FnMut(&ResidualGraph<C>, &Augmentation<C>),
    {
        check_terminals(network, source, target)?;
        self.state = DriverState::Running;

        let mut iterations = 0;
        let mut last_augmentation = None;
        while let Step::Augmented(augmentation) =
            self.advance(network, source, target, &mut observer)?
        {
            iterations += 1;
            log::debug!(
                "iteration {iterations}: pushed {} along {:?}",
                augmentation.bottleneck(),
                augmentation.path()
            );
            last_augmentation = Some(augmentation);
        }

        let value = network.value(source)?;
        log::info!("max flow {source} -> {target} = {value} after {iterations} augmentations");

        Ok(FlowSummary {
            value,
            iterations,
            last_augmentation,
        })
    }

    /// Runs between the smallest and the largest node id.
    pub fn run_default(&mut self, network: &mut FlowNetwork<C>) -> Result<FlowSummary<C>> {
        let (source, target) = network.terminals().ok_or(Error::EmptyNetwork)?;
        self.run(network, source, target)
    }
}

impl<P, C> MaxFlow for FordFulkerson<P, C>
where
    P: AugmentingPath,
    C: Capacity,
{
    type Capacity = C;
    type Network = FlowNetwork<C>;
    type Summary = FlowSummary<C>;
    type Error = Error;

    fn run(
        &mut self,
        network: &mut Self::Network,
        source: NodeId,
        target: NodeId,
    ) -> Result<Self::Summary> {
        self.run_with(network, source, target, |_, _| {})
    }

    fn check(&self, network: &Self::Network, source: NodeId, target: NodeId) -> Result<()> {
        check_terminals(network, source, target)?;

        if let Some(e) = network
            .edges()
            .find(|e| e.flow().is_negative() || e.flow() > e.capacity())
        {
            return Err(Error::CapacityViolated {
                from: e.from(),
                to: e.to(),
            });
        }

        // inner nodes pass on everything they receive
        for id in network
            .node_ids()
            .filter(|id| *id != source && *id != target)
        {
            if network.total_inflow(id)? != network.total_outflow(id)? {
                return Err(Error::ConservationViolated(id));
            }
        }

        let delivered = network.total_inflow(target)?;
        let returned = network.total_outflow(target)?;
        if delivered < returned || delivered - returned != network.value(source)? {
            return Err(Error::ConservationViolated(target));
        }

        if ResidualGraph::build(network).has_path(source, target) {
            return Err(Error::ResidualPathRemains { source, target });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::tests::{assert_valid_path, six_nodes};
    use crate::algo::{BreadthFirst, DepthFirst, ShortestResidual, Strategy, WidestPath};

    #[test]
    fn six_nodes_reach_ten_with_every_strategy() {
        for s in Strategy::ALL {
            let mut net = six_nodes();
            let mut ff = FordFulkerson::new(s);
            let summary = ff.run(&mut net, 1, 6).unwrap();
            assert_eq!(summary.value, 10, "{s}");
            assert_eq!(net.total_inflow(6), Ok(10), "{s}");
            assert_eq!(ff.state(), DriverState::Done);
            assert!(ff.check(&net, 1, 6).is_ok(), "{s}");
        }
    }

    fn value_with<P: AugmentingPath>(finder: P) -> i32 {
        let mut net = six_nodes();
        FordFulkerson::new(finder).run(&mut net, 1, 6).unwrap().value
    }

    #[test]
    fn strategies_are_usable_as_plain_types() {
        assert_eq!(value_with(BreadthFirst), 10);
        assert_eq!(value_with(DepthFirst), 10);
        assert_eq!(value_with(ShortestResidual), 10);
        assert_eq!(value_with(WidestPath), 10);
    }

    #[test]
    fn capacity_holds_after_every_step() {
        let mut net = six_nodes();
        let mut ff = FordFulkerson::new(Strategy::DepthFirst);
        let mut steps = 0;
        while let Step::Augmented(aug) = ff.step(&mut net, 1, 6).unwrap() {
            steps += 1;
            assert!(aug.bottleneck() > 0);
            assert!(net
                .edges()
                .all(|e| 0 <= e.flow() && e.flow() <= e.capacity()));
        }
        assert!(steps > 0);
        assert_eq!(net.value(1), Ok(10));
    }

    #[test]
    fn observer_sees_every_augmentation() {
        let mut net = six_nodes();
        let mut seen = Vec::new();
        let summary = FordFulkerson::new(Strategy::WidestPath)
            .run_with(&mut net, 1, 6, |r, aug| {
                assert_valid_path(r, aug.path(), 1, 6);
                seen.push(aug.bottleneck());
            })
            .unwrap();
        assert_eq!(seen.len(), summary.iterations);
        assert_eq!(seen.iter().sum::<i32>(), 10);
        assert_eq!(
            summary.last_augmentation.map(|a| a.bottleneck()),
            seen.last().copied()
        );
    }

    #[test]
    fn rerunning_a_finished_network_changes_nothing() {
        let mut net = six_nodes();
        let mut ff = FordFulkerson::new(Strategy::BreadthFirst);
        ff.run(&mut net, 1, 6).unwrap();
        let before = net.edges().cloned().collect::<Vec<_>>();

        let again = ff.run(&mut net, 1, 6).unwrap();
        assert_eq!(again.iterations, 0);
        assert_eq!(again.value, 10);
        assert_eq!(net.edges().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn default_terminals_are_smallest_and_largest_id() {
        let mut net = six_nodes();
        let summary = FordFulkerson::new(Strategy::ShortestResidual)
            .run_default(&mut net)
            .unwrap();
        assert_eq!(summary.value, 10);

        let mut empty = FlowNetwork::<i32>::new();
        assert_eq!(
            FordFulkerson::new(Strategy::BreadthFirst).run_default(&mut empty),
            Err(Error::EmptyNetwork)
        );
    }

    #[test]
    fn rejects_bad_terminals() {
        let mut net = six_nodes();
        let mut ff = FordFulkerson::new(Strategy::BreadthFirst);
        assert_eq!(ff.run(&mut net, 3, 3), Err(Error::SourceIsTarget(3)));
        assert_eq!(ff.run(&mut net, 1, 9), Err(Error::UnknownNode(9)));
    }

    #[test]
    fn check_reports_violations() {
        let ff = FordFulkerson::<_, i32>::new(Strategy::BreadthFirst);

        let net = six_nodes();
        assert_eq!(
            ff.check(&net, 1, 6),
            Err(Error::ResidualPathRemains { source: 1, target: 6 })
        );

        let mut net = FlowNetwork::new();
        net.add_edge_with_flow(1, 2, 5, 5).unwrap();
        net.add_edge_with_flow(2, 3, 5, 4).unwrap();
        assert_eq!(ff.check(&net, 1, 3), Err(Error::ConservationViolated(2)));
    }

    #[test]
    fn value_beyond_the_capacity_type_is_an_error() {
        let mut net = FlowNetwork::<u32>::new();
        for (u, v) in [(1, 2), (1, 3), (2, 4), (3, 4)] {
            net.add_edge(u, v, u32::MAX).unwrap();
        }
        let mut ff = FordFulkerson::new(Strategy::BreadthFirst);
        assert_eq!(ff.run(&mut net, 1, 4), Err(Error::ArithmeticOverflow));
        // both routes were still saturated
        assert!(net.edges().all(|e| e.flow() == u32::MAX));
        assert_eq!(ff.check(&net, 1, 4), Err(Error::ArithmeticOverflow));
    }

    #[test]
    fn backward_edges_reroute_flow() {
        // the first path 1-2-3-4 has to be partly undone to reach the optimum of 2
        let mut net = FlowNetwork::new();
        net.add_edge(1, 2, 1).unwrap();
        net.add_edge(1, 3, 1).unwrap();
        net.add_edge(2, 3, 1).unwrap();
        net.add_edge(2, 4, 1).unwrap();
        net.add_edge(3, 4, 1).unwrap();
        net.add_flow(&[1, 2, 3, 4], 1).unwrap();

        let mut ff = FordFulkerson::new(Strategy::BreadthFirst);
        let summary = ff.run(&mut net, 1, 4).unwrap();
        assert_eq!(summary.value, 2);
        assert_eq!(net.edge(2, 3).unwrap().flow(), 0);
        assert!(ff.check(&net, 1, 4).is_ok());
    }
}
