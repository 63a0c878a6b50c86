//! Finds every cell a unit can reach with a limited movement budget.
//!
//! Costs are paid when entering a cell, based on the kind of terrain it is made of.
//! Movement can only leave a tile through the edges its connectivity allows.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{trace, warn};

use crate::entities::Tile;
use crate::geometry::HexPos;
use crate::layers::{Layer, LinearScan, ReverseIndex};
use crate::manifest::MovementCosts;

/// A reachable cell, and the minimal cost of getting there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReachableCell {
    /// Where the cell is
    pub coord: HexPos,
    /// The cheapest total cost of moving there from the origin
    pub cost: f32,
}

/// The result of [`reachable`]: every cell within budget, with its minimal cost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reachable {
    /// The cell the search started from, if it was on the terrain
    origin: Option<HexPos>,
    /// The cheapest known cost of reaching each cell
    costs: HashMap<HexPos, f32>,
    /// The cell that each cell was last reached from
    previous: HashMap<HexPos, HexPos>,
}

impl Reachable {
    /// The cell the search started from, or `None` if the origin was not on the terrain.
    #[must_use]
    pub fn origin(&self) -> Option<HexPos> {
        self.origin
    }

    /// The minimal cost of reaching `coord`, if it can be reached.
    #[must_use]
    pub fn cost(&self, coord: HexPos) -> Option<f32> {
        self.costs.get(&coord).copied()
    }

    /// Can `coord` be reached within budget?
    #[must_use]
    pub fn contains(&self, coord: HexPos) -> bool {
        self.costs.contains_key(&coord)
    }

    /// The number of reachable cells, including the origin.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Is nothing reachable, not even the origin?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Iterates over every reachable cell and its cost, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ReachableCell> + '_ {
        self.costs
            .iter()
            .map(|(coord, cost)| ReachableCell {
                coord: *coord,
                cost: *cost,
            })
    }

    /// Iterates over every reachable cell, in arbitrary order.
    pub fn coordinates(&self) -> impl Iterator<Item = HexPos> + '_ {
        self.costs.keys().copied()
    }

    /// The cheapest route from the origin to `destination`, including both ends.
    ///
    /// Returns `None` if `destination` is not reachable.
    #[must_use]
    pub fn path_to(&self, destination: HexPos) -> Option<Vec<HexPos>> {
        let origin = self.origin?;
        if !self.contains(destination) {
            return None;
        }

        let mut path = vec![destination];
        let mut current = destination;
        while current != origin {
            // Each step strictly precedes the last, so this is only hit on corrupted state.
            if path.len() > self.costs.len() {
                return None;
            }

            current = *self.previous.get(&current)?;
            path.push(current);
        }

        path.reverse();
        Some(path)
    }

    /// Converts this result into a layer, for display code that consumes layer notifications.
    #[must_use]
    pub fn into_layer(self) -> Layer<ReachableCell, LinearScan> {
        let mut layer = Layer::new();
        for (coord, cost) in self.costs {
            layer.try_add(coord, ReachableCell { coord, cost });
        }
        layer
    }
}

/// Computes every cell reachable from `origin` whose total entry cost is at most `budget`.
///
/// The origin itself is always reachable at cost zero, as long as it is on the terrain.
/// Terrain that is missing from `costs`, or marked impassable, can never be entered.
///
/// This is a relaxation over a first-in first-out queue:
/// cells are re-queued whenever a cheaper route to them is found.
pub fn reachable<I: ReverseIndex<Tile>>(
    origin: HexPos,
    terrain: &Layer<Tile, I>,
    costs: &MovementCosts,
    budget: f32,
) -> Reachable {
    let mut result = Reachable::default();

    // NaN never compares greater, so it would bound nothing.
    let budget = if budget.is_nan() {
        warn!("Reachability budget is NaN, treating it as zero");
        0.
    } else {
        budget
    };

    if !terrain.contains(origin) {
        trace!("Reachability origin {origin} is not on the terrain");
        return result;
    }

    result.origin = Some(origin);
    result.costs.insert(origin, 0.);

    let mut queue = VecDeque::from([origin]);
    let mut n_visits: usize = 0;

    while let Some(current) = queue.pop_front() {
        n_visits += 1;

        let (Some(tile), Some(&current_cost)) = (terrain.get(current), result.costs.get(&current))
        else {
            continue;
        };

        for direction in tile.connections.iter() {
            let neighbor = current.neighbor(direction);
            let Some(neighbor_tile) = terrain.get(neighbor) else {
                continue;
            };

            let candidate = current_cost + costs.cost(neighbor_tile.terrain());
            if !candidate.is_finite() || candidate > budget {
                continue;
            }

            let improves = result
                .costs
                .get(&neighbor)
                .map_or(true, |&known| candidate < known);

            if improves {
                result.costs.insert(neighbor, candidate);
                result.previous.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    trace!(
        "Found {} cells reachable from {origin} with budget {budget} after {n_visits} visits",
        result.len()
    );

    result
}
