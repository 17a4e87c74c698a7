//! Priority-queue searches over residual weights.

use alloc::collections::{BTreeMap, BinaryHeap};
use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::algo::{searchable, trace_back, AugmentingPath};
use crate::capacity::Capacity;
use crate::node::NodeId;
use crate::residual::ResidualGraph;

/// Dijkstra's algorithm with each residual weight taken as an additive cost.
///
/// This picks the path whose residual capacities have the smallest sum, so it tends to
/// avoid wide edges. Sums that overflow `C` saturate at `C::max_value()`. Ties are
/// broken by heap order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestResidual;

impl AugmentingPath for ShortestResidual {
    fn find_path<C: Capacity>(
        &self,
        residual: &ResidualGraph<C>,
        source: NodeId,
        target: NodeId,
    ) -> Option<Vec<NodeId>> {
        if !searchable(residual, source, target) {
            return None;
        }

        let mut dist = BTreeMap::from([(source, C::zero())]);
        let mut prev = BTreeMap::new();
        let mut heap = BinaryHeap::from([Reverse((C::zero(), source))]);

        while let Some(Reverse((d, u))) = heap.pop() {
            if u == target {
                break;
            }
            // stale entry
            if dist.get(&u).map_or(false, |best| d > *best) {
                continue;
            }
            for e in residual.out_edges(u) {
                let alt = d.checked_add(&e.weight).unwrap_or_else(C::max_value);
                if dist.get(&e.to).map_or(true, |cur| alt < *cur) {
                    dist.insert(e.to, alt);
                    prev.insert(e.to, u);
                    heap.push(Reverse((alt, e.to)));
                }
            }
        }

        prev.contains_key(&target)
            .then(|| trace_back(&prev, source, target))
    }
}

/// Widest path: maximises the smallest residual weight along the path.
///
/// Each node is keyed by the best bottleneck found so far to reach it, and the source
/// starts with an unbounded one. The returned path therefore carries the largest
/// possible augmentation of any single path.
#[derive(Clone, Copy, Debug, Default)]
pub struct WidestPath;

impl AugmentingPath for WidestPath {
    fn find_path<C: Capacity>(
        &self,
        residual: &ResidualGraph<C>,
        source: NodeId,
        target: NodeId,
    ) -> Option<Vec<NodeId>> {
        if !searchable(residual, source, target) {
            return None;
        }

        let mut best = BTreeMap::from([(source, C::max_value())]);
        let mut prev = BTreeMap::new();
        let mut heap = BinaryHeap::from([(C::max_value(), source)]);

        while let Some((width, u)) = heap.pop() {
            if u == target {
                break;
            }
            if best.get(&u).map_or(false, |cur| width < *cur) {
                continue;
            }
            for e in residual.out_edges(u) {
                if e.weight <= C::zero() {
                    continue;
                }
                let w = width.min(e.weight);
                if best.get(&e.to).map_or(true, |cur| w > *cur) {
                    best.insert(e.to, w);
                    prev.insert(e.to, u);
                    heap.push((w, e.to));
                }
            }
        }

        prev.contains_key(&target)
            .then(|| trace_back(&prev, source, target))
    }
}
