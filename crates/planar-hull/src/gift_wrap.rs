//! Gift wrapping (Jarvis march) with monotone candidate pruning.
//!
//! Purpose
//! - Walk the hull boundary counter-clockwise from the leftmost-lowest point,
//!   choosing at each vertex the candidate with every other point on its left.
//! - Independent of the selection/bridge machinery; used on its own and as a
//!   cross-check for the divide-and-conquer path.
//!
//! Rules
//! - Orientation is exact. A collinear candidate replaces the current best only
//!   when it is farther away, so only the far end of a collinear run is kept.
//! - After committing vertex `v`, every remaining candidate not strictly left
//!   of `start → v` is retired for good; later hull vertices all lie strictly
//!   left of that chord. This bounds the work to O(n·h).
//! - The start point is always re-offered as a candidate; the walk ends when a
//!   scan selects it again.
//!
//! Code cross-refs: `types::orientation`, `types::HullShape`

use nalgebra::Vector2;

use crate::types::{orientation, Chain, HullShape, Orientation};

/// Stepwise Jarvis march; one `step` examines one candidate.
#[derive(Clone, Debug)]
pub struct GiftWrapper {
    start: Vector2<f64>,
    current: Vector2<f64>,
    best: Vector2<f64>,
    active: Vec<Vector2<f64>>,
    pruned: Vec<Vector2<f64>>,
    hull: Vec<Vector2<f64>>,
    cursor: usize,
    total: usize,
    done: bool,
}

impl GiftWrapper {
    /// Panics on an empty point set.
    pub fn new(points: &[Vector2<f64>]) -> Self {
        let start = match Chain::Lower.xmin(points) {
            Some(p) => p,
            None => panic!("gift wrap: empty point set"),
        };
        let mut seen_start = false;
        let active: Vec<Vector2<f64>> = points
            .iter()
            .copied()
            .filter(|&p| {
                // drop the start itself once; it is re-offered on every scan
                if p == start && !seen_start {
                    seen_start = true;
                    false
                } else {
                    true
                }
            })
            .collect();
        let done = active.is_empty();
        Self {
            start,
            current: start,
            best: start,
            active,
            pruned: Vec::new(),
            hull: vec![start],
            cursor: 0,
            total: points.len(),
            done,
        }
    }

    /// Examine one candidate, or commit the scan's winner once all are seen.
    /// Returns whether work remains.
    pub fn step(&mut self) -> bool {
        if self.done {
            return false;
        }
        if let Some(&p) = self.active.get(self.cursor) {
            self.cursor += 1;
            if self.improves(p) {
                self.best = p;
            }
            return true;
        }
        self.commit();
        !self.done
    }

    /// Run to completion and classify the boundary.
    pub fn finish(mut self) -> HullShape {
        while self.step() {}
        HullShape::from_cycle(self.hull)
    }

    /// Vertices committed so far, in CCW order from the start.
    #[inline]
    pub fn hull(&self) -> &[Vector2<f64>] {
        &self.hull
    }

    /// Points retired by pruning (never hull vertices).
    #[inline]
    pub fn pruned(&self) -> &[Vector2<f64>] {
        &self.pruned
    }

    /// Candidates still eligible.
    #[inline]
    pub fn remaining(&self) -> &[Vector2<f64>] {
        &self.active
    }

    #[inline]
    pub fn current(&self) -> Vector2<f64> {
        self.current
    }

    /// Best next vertex of the scan in progress.
    #[inline]
    pub fn best(&self) -> Vector2<f64> {
        self.best
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn improves(&self, p: Vector2<f64>) -> bool {
        if self.best == self.current {
            return p != self.current;
        }
        match orientation(self.current, self.best, p) {
            Orientation::Clockwise => true,
            Orientation::Collinear => {
                (p - self.current).norm_squared() > (self.best - self.current).norm_squared()
            }
            Orientation::CounterClockwise => false,
        }
    }

    fn commit(&mut self) {
        let next = self.best;
        if next == self.start || next == self.current {
            self.done = true;
            tracing::debug!(vertices = self.hull.len(), "gift wrap closed");
            return;
        }
        assert!(
            self.hull.len() < self.total,
            "gift wrap: more hull vertices than input points"
        );
        self.hull.push(next);
        self.current = next;
        tracing::trace!(vertex = ?next, remaining = self.active.len(), "hull vertex");

        let start = self.start;
        let (keep, retire): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|&p| orientation(start, next, p) == Orientation::CounterClockwise);
        self.active = keep;
        self.pruned
            .extend(retire.into_iter().filter(|&p| p != next));
        self.best = start;
        self.cursor = 0;
    }
}

/// Ordered CCW hull boundary (first vertex not repeated).
pub fn wrap(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    gift_wrap(points).vertices()
}

/// Gift-wrap hull as a classified shape.
pub fn gift_wrap(points: &[Vector2<f64>]) -> HullShape {
    GiftWrapper::new(points).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn square_excludes_interior_point() {
        let pts = vec![
            vector![2.0, 2.0],
            vector![4.0, 4.0],
            vector![0.0, 4.0],
            vector![0.0, 0.0],
            vector![4.0, 0.0],
        ];
        assert_eq!(
            wrap(&pts),
            vec![
                vector![0.0, 0.0],
                vector![4.0, 0.0],
                vector![4.0, 4.0],
                vector![0.0, 4.0],
            ]
        );
    }

    #[test]
    fn triangle_keeps_all_three() {
        let pts = vec![vector![0.0, 0.0], vector![3.0, 1.0], vector![1.0, 4.0]];
        let shape = gift_wrap(&pts);
        assert_eq!(shape.vertices().len(), 3);
        assert!(shape.area() > 0.0);
    }

    #[test]
    fn collinear_keeps_extremes_only() {
        let pts = vec![
            vector![1.0, 1.0],
            vector![0.0, 0.0],
            vector![3.0, 3.0],
            vector![2.0, 2.0],
        ];
        assert_eq!(
            gift_wrap(&pts),
            HullShape::Segment(vector![0.0, 0.0], vector![3.0, 3.0])
        );
        let three = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
        assert_eq!(
            gift_wrap(&three),
            HullShape::Segment(vector![0.0, 0.0], vector![2.0, 2.0])
        );
    }

    #[test]
    fn collinear_points_on_edges_are_skipped() {
        // Midpoints on every side of a square.
        let mut pts = Vec::new();
        for x in 0..=2 {
            for y in 0..=2 {
                pts.push(vector![x as f64 * 2.0, y as f64 * 2.0]);
            }
        }
        assert_eq!(gift_wrap(&pts).vertices().len(), 4);
    }

    #[test]
    fn single_point_and_pair() {
        let p = vector![5.0, 5.0];
        assert_eq!(gift_wrap(&[p]), HullShape::Point(p));
        let q = vector![5.0, 1.0];
        assert_eq!(gift_wrap(&[p, q]), HullShape::Segment(q, p));
    }

    #[test]
    fn stepping_exposes_progress() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![4.0, 4.0],
            vector![0.0, 4.0],
            vector![2.0, 2.0],
            vector![1.0, 1.0],
        ];
        let mut gw = GiftWrapper::new(&pts);
        assert_eq!(gw.current(), vector![0.0, 0.0]);
        let mut ticks = 0;
        while gw.step() {
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(gw.is_done());
        assert_eq!(gw.hull().len(), 4);
        // interior points end up retired, never committed
        for p in gw.pruned() {
            assert!(!gw.hull().contains(p));
        }
        assert!(gw.remaining().len() + gw.pruned().len() <= pts.len());
        assert_eq!(gw.finish().vertices().len(), 4);
    }

    #[test]
    fn wrap_is_idempotent() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![5.0, -1.0],
            vector![9.0, 2.0],
            vector![6.0, 7.0],
            vector![1.0, 5.0],
            vector![4.0, 3.0],
            vector![3.0, 1.0],
        ];
        let once = wrap(&pts);
        assert_eq!(wrap(&once), once);
    }

    #[test]
    #[should_panic]
    fn empty_input_panics() {
        let _ = GiftWrapper::new(&[]);
    }
}
