//! A* over a [`Graph`](crate::graph::Graph) and the Paths it produces.

mod a_star;
pub use self::a_star::a_star_search;

mod path;
pub use self::path::{Iter, Path};

use crate::Cost;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// An entry of the search frontier: the estimated total cost, a sequence number and the index of
/// the search node. Ordered so that a `BinaryHeap` pops the lowest cost first, and among equal
/// costs the entry that was pushed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub estimate: OrderedFloat<Cost>,
    pub sequence: u64,
    pub node: usize,
}
impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for FrontierEntry {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.estimate
            .cmp(&self.estimate)
            .then_with(|| rhs.sequence.cmp(&self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(estimate: Cost, sequence: u64) -> FrontierEntry {
        FrontierEntry {
            estimate: OrderedFloat(estimate),
            sequence,
            node: sequence as usize,
        }
    }

    #[test]
    fn pops_cheapest_then_oldest() {
        let mut frontier = BinaryHeap::new();
        frontier.push(entry(5.0, 0));
        frontier.push(entry(2.0, 1));
        frontier.push(entry(5.0, 2));
        frontier.push(entry(2.0, 3));

        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }
}
