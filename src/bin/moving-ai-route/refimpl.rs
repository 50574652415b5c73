use movingai::{Coords2D, Map2D, MovingAiMap};

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, PartialEq)]
struct QueueEntry {
    cost: f64,
    tile: Coords2D,
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on purpose to make the max-heap into a min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .expect("Invalid float")
            .then_with(|| self.tile.cmp(&other.tile))
    }
}

fn step_cost(a: Coords2D, b: Coords2D) -> f64 {
    if a.0 != b.0 && a.1 != b.1 {
        std::f64::consts::SQRT_2
    } else {
        1.0
    }
}

/// Reference shortest-path cost over the raw map, no heuristic involved.
/// Used to tell engine bugs apart from stale scenario data when a cost check
/// fails.
pub fn shortest_path_cost(map: &MovingAiMap, start: Coords2D, goal: Coords2D) -> Option<f64> {
    let mut best: HashMap<Coords2D, f64> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(start, 0.0);
    queue.push(QueueEntry {
        cost: 0.0,
        tile: start,
    });

    while let Some(QueueEntry { cost, tile }) = queue.pop() {
        if tile == goal {
            return Some(cost);
        }
        if cost > best.get(&tile).copied().unwrap_or(f64::INFINITY) {
            continue;
        }
        for neighbor in map.neighbors(tile) {
            let next = cost + step_cost(tile, neighbor);
            if next < best.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                best.insert(neighbor, next);
                queue.push(QueueEntry {
                    cost: next,
                    tile: neighbor,
                });
            }
        }
    }
    None
}
