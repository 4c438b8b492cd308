//! A* movement search over the hex map
//!
//! Nodes live in a per-search arena and point at their parent by index.
//! The open list is stably sorted on `cost + distance` before every
//! selection, so ties resolve in insertion order, which follows the
//! neighbor-table order of the map. Results are fully deterministic.
//!
//! When the destination cannot be reached the search still reports the
//! closed cell nearest to it, so callers can move partway.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::map::Map;
use crate::movement::{is_movable, Features};
use crate::point::Point;
use crate::rules::TerrainRules;
use crate::units::UnitId;

// ============================================================================
// TYPES
// ============================================================================

/// Index of a node in the search arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Search node. Exists only for the duration of one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub point: Point,
    /// Accumulated step cost from the source
    pub cost: i32,
    /// Hex distance to the destination
    pub distance: i32,
    /// Parent node (None for the source)
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn cost_distance(&self) -> i32 {
        self.cost + self.distance
    }
}

/// Result of a search
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Source to destination inclusive; empty when unreachable
    pub points: Vec<Point>,
    /// Nearest cell to the destination that the search reached
    pub closest: Point,
}

impl Path {
    fn unreachable(closest: Point) -> Self {
        Self {
            points: Vec::new(),
            closest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points, endpoints included
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Number of steps taken
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Movement cost of walking the path (the source is free)
    pub fn cost(&self, map: &Map, features: &Features) -> i32 {
        self.points
            .iter()
            .skip(1)
            .filter_map(|&p| map.tile(p))
            .map(|tile| features.step_cost(tile))
            .sum()
    }
}

// ============================================================================
// PATHFINDER
// ============================================================================

/// Configured search. Holds only borrowed rules and feature flags, so it
/// is cheap to build per request.
#[derive(Clone, Copy, Debug)]
pub struct Pathfinder<'a> {
    rules: &'a TerrainRules,
    features: Features,
}

impl<'a> Pathfinder<'a> {
    pub fn new(rules: &'a TerrainRules) -> Self {
        Self {
            rules,
            features: Features::default(),
        }
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Find a least-cost path for `stack` from `src` to `dst`.
    ///
    /// Off-map endpoints or an empty map give an empty path with
    /// `closest == src`.
    pub fn find_path(&self, map: &Map, src: Point, dst: Point, stack: &[UnitId]) -> Path {
        if map.is_empty() || !map.is_valid(src) || !map.is_valid(dst) {
            tracing::debug!("Path request {} -> {} outside {}x{} map", src, dst, map.width(), map.height());
            return Path::unreachable(src);
        }

        let mut min_distance = map.distance(src, dst);
        let mut closest = src;
        let mut search = Search::new(src, min_distance);

        tracing::debug!("Searching {} -> {} for stack of {}", src, dst, stack.len());

        while let Some(current) = search.pop_best() {
            let node = search.nodes[current.0];

            if node.point == dst {
                let points = retrace(&search.nodes, current);
                tracing::debug!(
                    "Found path {} -> {}: {} steps, cost {}, {} cells closed",
                    src,
                    dst,
                    points.len() - 1,
                    node.cost,
                    search.closed.len()
                );
                return Path {
                    points,
                    closest: dst,
                };
            }

            search.closed.insert(node.point);
            debug_assert!(search.closed.len() <= map.len(), "closed more cells than the map holds");

            if node.distance < min_distance {
                min_distance = node.distance;
                closest = node.point;
            }

            for neighbor in map.neighbors(node.point) {
                if search.closed.contains(&neighbor)
                    || !is_movable(map, self.rules, neighbor, stack, &self.features)
                {
                    continue;
                }

                search.offer(Node {
                    point: neighbor,
                    cost: node.cost + self.features.step_cost(&map[neighbor]),
                    distance: map.distance(neighbor, dst),
                    parent: Some(current),
                });
            }
        }

        tracing::debug!(
            "No path {} -> {}; closest {} at distance {}",
            src,
            dst,
            closest,
            min_distance
        );

        Path::unreachable(closest)
    }
}

/// Working set of one search
struct Search {
    nodes: Vec<Node>,
    open: Vec<NodeId>,
    closed: FxHashSet<Point>,
}

impl Search {
    fn new(src: Point, distance: i32) -> Self {
        let root = Node {
            point: src,
            cost: 0,
            distance,
            parent: None,
        };
        Self {
            nodes: vec![root],
            open: vec![NodeId(0)],
            closed: FxHashSet::default(),
        }
    }

    /// Remove and return the open node with the lowest total
    fn pop_best(&mut self) -> Option<NodeId> {
        if self.open.is_empty() {
            return None;
        }
        // Stable: equal totals keep insertion order
        let nodes = &self.nodes;
        self.open.sort_by_key(|id| nodes[id.0].cost_distance());
        Some(self.open.remove(0))
    }

    /// Add a candidate, or let it replace an open entry that is no better
    fn offer(&mut self, candidate: Node) {
        let existing = self
            .open
            .iter()
            .position(|id| self.nodes[id.0].point == candidate.point);

        match existing {
            Some(pos) => {
                // Open nodes have no children yet, so overwriting in place is safe
                let id = self.open[pos];
                if self.nodes[id.0].cost_distance() >= candidate.cost_distance() {
                    tracing::trace!("Improved {} to cost {}", candidate.point, candidate.cost);
                    self.nodes[id.0] = candidate;
                }
            }
            None => {
                self.nodes.push(candidate);
                self.open.push(NodeId(self.nodes.len() - 1));
            }
        }
    }
}

/// Walk parent links back to the source and return source-first order
fn retrace(nodes: &[Node], last: NodeId) -> Vec<Point> {
    let mut points = Vec::new();
    let mut cursor = Some(last);
    while let Some(id) = cursor {
        let node = &nodes[id.0];
        points.push(node.point);
        cursor = node.parent;
    }
    points.reverse();
    points
}

/// Search with default features
pub fn find_path(map: &Map, rules: &TerrainRules, src: Point, dst: Point, stack: &[UnitId]) -> Path {
    Pathfinder::new(rules).find_path(map, src, dst, stack)
}
