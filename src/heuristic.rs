use crate::{Heuristic, Weight};

/// A vertex positioned on a rectilinear coordinate system.
pub trait CartesianVertex {
    fn x(&self) -> Weight;
    fn y(&self) -> Weight;
}

impl CartesianVertex for (Weight, Weight) {
    fn x(&self) -> Weight {
        self.0
    }

    fn y(&self) -> Weight {
        self.1
    }
}

/// Taxicab (Manhattan) estimate, for movement along grid axes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Taxicab;

impl<V: CartesianVertex> Heuristic<V> for Taxicab {
    fn estimate(&self, from: &V, to: &V) -> Weight {
        (from.x() - to.x()).abs() + (from.y() - to.y()).abs()
    }
}

/// Taxicab variant for grids that allow diagonal movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagonal;

impl<V: CartesianVertex> Heuristic<V> for Diagonal {
    fn estimate(&self, from: &V, to: &V) -> Weight {
        (from.x() - to.x()).abs().max((from.y() - to.y()).abs())
    }
}

/// Straight-line estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl<V: CartesianVertex> Heuristic<V> for Euclidean {
    fn estimate(&self, from: &V, to: &V) -> Weight {
        ((from.x() - to.x()).powi(2) + (from.y() - to.y()).powi(2)).sqrt()
    }
}

/// Adds a small cross-product term to another estimate, preferring vertices
/// colinear with the straight line to the goal when many paths cost the
/// same. The increment must stay small enough to keep the wrapped estimate
/// admissible; that is on the caller.
#[derive(Debug, Clone, Copy)]
pub struct Tiebreaker<H> {
    incr: Weight,
    inner: H,
}

impl<H> Tiebreaker<H> {
    pub fn new(incr: Weight, inner: H) -> Self {
        Self { incr, inner }
    }
}

impl<V: CartesianVertex, H: Heuristic<V>> Heuristic<V> for Tiebreaker<H> {
    fn estimate(&self, from: &V, to: &V) -> Weight {
        let h = self.inner.estimate(from, to);
        h + self.incr * (from.x() * to.y() - to.x() * from.y()).abs()
    }
}
