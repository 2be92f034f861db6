//! Divide-and-conquer hull assembly over an explicit worklist.
//!
//! Purpose
//! - Build the upper or lower hull chain as a set of edges by repeatedly
//!   splitting at the median x and asking `bridge::find_bridge` for the edge
//!   over the split. Pending sub-problems sit in a FIFO queue instead of the
//!   call stack, so a driver can run one sub-problem per tick.
//!
//! Invariants
//! - Every point of a sub-problem's working set lies on or beyond (above for
//!   the upper chain) the line through its bounds; the filter runs before each
//!   split.
//! - Sub-problems with `left.x >= right.x` are discarded on pop.
//! - An edge is emitted only if it straddles its split; a failing edge is
//!   dropped with a warning and its sub-problem is not refined further.
//! - Child bounds lie strictly inside the parent's x-range, so the worklist
//!   drains after finitely many steps.
//!
//! Code cross-refs: `bridge::find_bridge`, `select::median_by_x`, `types::Chain`

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::bridge::find_bridge;
use crate::error::HullError;
use crate::select::median_by_x;
use crate::types::{Chain, Edge, HullShape};

/// Pending unit of work: a point subset and the bounds the bridge must lie within.
#[derive(Clone, Debug)]
pub struct SubProblem {
    pub points: Vec<Vector2<f64>>,
    pub left: Vector2<f64>,
    pub right: Vector2<f64>,
}

/// Finished chain: extremes plus the unordered edge set between them.
#[derive(Clone, Debug)]
pub struct ChainEdges {
    pub chain: Chain,
    pub xmin: Vector2<f64>,
    pub xmax: Vector2<f64>,
    pub edges: Vec<Edge>,
}

impl ChainEdges {
    /// Chain vertices from `xmin` to `xmax` in increasing x.
    ///
    /// Fails with `BrokenChain` if the edges do not link the two extremes.
    pub fn path(&self) -> Result<Vec<Vector2<f64>>, HullError> {
        let broken = HullError::BrokenChain { chain: self.chain };
        let mut sorted = self.edges.clone();
        sorted.sort_by(|a, b| a.left.x.total_cmp(&b.left.x));
        let mut out = Vec::with_capacity(sorted.len() + 1);
        let mut cur = self.xmin;
        out.push(cur);
        for e in sorted {
            if e.left != cur {
                return Err(broken);
            }
            cur = e.right;
            out.push(cur);
        }
        if cur != self.xmax {
            return Err(broken);
        }
        Ok(out)
    }
}

/// Stepwise builder for one chain.
#[derive(Clone, Debug)]
pub struct HullAssembler {
    chain: Chain,
    xmin: Vector2<f64>,
    xmax: Vector2<f64>,
    worklist: VecDeque<SubProblem>,
    edges: Vec<Edge>,
    split: Option<Vector2<f64>>,
    processed: usize,
}

impl HullAssembler {
    /// Seed the worklist with `(points, xmin, xmax)`.
    ///
    /// Panics on an empty point set.
    pub fn new(points: &[Vector2<f64>], chain: Chain) -> Self {
        let (xmin, xmax) = match (chain.xmin(points), chain.xmax(points)) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => panic!("assemble: {chain} chain of an empty point set"),
        };
        let mut worklist = VecDeque::new();
        worklist.push_back(SubProblem {
            points: points.to_vec(),
            left: xmin,
            right: xmax,
        });
        Self {
            chain,
            xmin,
            xmax,
            worklist,
            edges: Vec::new(),
            split: None,
            processed: 0,
        }
    }

    #[inline]
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Sub-problems still queued.
    #[inline]
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Edges emitted so far.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Median point of the most recent split (for display).
    #[inline]
    pub fn current_split(&self) -> Option<Vector2<f64>> {
        self.split
    }

    /// Sub-problems popped so far.
    #[inline]
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Pop and solve one sub-problem. Returns whether work remains.
    pub fn step(&mut self) -> bool {
        if let Some(sp) = self.worklist.pop_front() {
            self.processed += 1;
            self.solve(sp);
        }
        !self.worklist.is_empty()
    }

    /// Drain the worklist.
    pub fn finish(mut self) -> ChainEdges {
        while self.step() {}
        tracing::debug!(
            chain = %self.chain,
            edges = self.edges.len(),
            processed = self.processed,
            "chain assembled"
        );
        ChainEdges {
            chain: self.chain,
            xmin: self.xmin,
            xmax: self.xmax,
            edges: self.edges,
        }
    }

    fn solve(&mut self, sp: SubProblem) {
        let SubProblem {
            points,
            left,
            right,
        } = sp;
        if left.x >= right.x {
            return;
        }
        let chain = self.chain;
        let valid: Vec<Vector2<f64>> = points
            .into_iter()
            .filter(|&p| chain.keeps(left, right, p))
            .collect();
        if valid.len() <= 1 {
            return;
        }

        let mut median = if valid.len() == 2 {
            Edge::ordered(valid[0], valid[1]).left
        } else {
            median_by_x(&valid)
        };
        if !valid.iter().any(|p| p.x > median.x) {
            median = valid
                .iter()
                .copied()
                .reduce(|a, b| if b.x < a.x { b } else { a })
                .unwrap_or(median);
        }
        self.split = Some(median);

        let edge = find_bridge(&valid, median.x, chain);
        if !edge.straddles(median.x) {
            tracing::warn!(
                chain = %chain,
                split = median.x,
                left = ?edge.left,
                right = ?edge.right,
                "bridge does not straddle its split; dropped"
            );
            return;
        }
        self.edges.push(edge);
        tracing::trace!(
            chain = %chain,
            valid = valid.len(),
            split = median.x,
            left = ?edge.left,
            right = ?edge.right,
            "edge emitted"
        );
        if valid.len() == 2 {
            return;
        }

        let inside = |x: f64| left.x < x && x < right.x;
        let right_child = inside(edge.right.x);
        let left_child = inside(edge.left.x);
        match (right_child, left_child) {
            (true, true) => {
                self.worklist.push_back(SubProblem {
                    points: valid.clone(),
                    left: edge.right,
                    right,
                });
                self.worklist.push_back(SubProblem {
                    points: valid,
                    left,
                    right: edge.left,
                });
            }
            (true, false) => self.worklist.push_back(SubProblem {
                points: valid,
                left: edge.right,
                right,
            }),
            (false, true) => self.worklist.push_back(SubProblem {
                points: valid,
                left,
                right: edge.left,
            }),
            (false, false) => {}
        }
    }
}

/// Run one chain to completion.
pub fn build_hull(points: &[Vector2<f64>], chain: Chain) -> ChainEdges {
    HullAssembler::new(points, chain).finish()
}

/// Both chains of a divide-and-conquer run.
#[derive(Clone, Debug)]
pub struct DcHull {
    pub upper: ChainEdges,
    pub lower: ChainEdges,
}

impl DcHull {
    /// Stitch both chains into one CCW boundary, joining the extremes.
    ///
    /// Lower chain left to right, then upper chain right to left; repeated
    /// joints collapse, so collinear or single-point inputs come out degenerate.
    pub fn to_shape(&self) -> Result<HullShape, HullError> {
        let lower = self.lower.path()?;
        let upper = self.upper.path()?;
        let mut verts = lower;
        for p in upper.into_iter().rev() {
            if verts.last() != Some(&p) {
                verts.push(p);
            }
        }
        if verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        Ok(HullShape::from_cycle(verts))
    }

    /// All emitted edges, upper first.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.upper.edges.iter().chain(self.lower.edges.iter())
    }
}

/// Build both chains in one go.
pub fn divide_and_conquer(points: &[Vector2<f64>]) -> DcHull {
    DcHull {
        upper: build_hull(points, Chain::Upper),
        lower: build_hull(points, Chain::Lower),
    }
}

/// Interleaved driver for both chains: upper sub-problems first, then lower.
#[derive(Clone, Debug)]
pub struct DcStepper {
    upper: HullAssembler,
    lower: HullAssembler,
}

impl DcStepper {
    pub fn new(points: &[Vector2<f64>]) -> Self {
        Self {
            upper: HullAssembler::new(points, Chain::Upper),
            lower: HullAssembler::new(points, Chain::Lower),
        }
    }

    /// Process one pending sub-problem. Returns whether work remains.
    pub fn step(&mut self) -> bool {
        if !self.upper.is_done() {
            self.upper.step();
        } else {
            self.lower.step();
        }
        !(self.upper.is_done() && self.lower.is_done())
    }

    /// The assembler currently being driven.
    pub fn active(&self) -> &HullAssembler {
        if self.upper.is_done() {
            &self.lower
        } else {
            &self.upper
        }
    }

    pub fn upper(&self) -> &HullAssembler {
        &self.upper
    }

    pub fn lower(&self) -> &HullAssembler {
        &self.lower
    }

    pub fn finish(self) -> DcHull {
        DcHull {
            upper: self.upper.finish(),
            lower: self.lower.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn sorted_edges(mut e: Vec<Edge>) -> Vec<(f64, f64, f64, f64)> {
        e.sort_by(|a, b| a.left.x.total_cmp(&b.left.x));
        e.into_iter()
            .map(|e| (e.left.x, e.left.y, e.right.x, e.right.y))
            .collect()
    }

    #[test]
    fn square_with_interior_point() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![4.0, 4.0],
            vector![0.0, 4.0],
            vector![2.0, 2.0],
        ];
        let dc = divide_and_conquer(&pts);
        assert_eq!(sorted_edges(dc.upper.edges.clone()), vec![(0.0, 4.0, 4.0, 4.0)]);
        assert_eq!(sorted_edges(dc.lower.edges.clone()), vec![(0.0, 0.0, 4.0, 0.0)]);
        let shape = dc.to_shape().unwrap();
        assert_eq!(
            shape,
            HullShape::Polygon(vec![
                vector![0.0, 0.0],
                vector![4.0, 0.0],
                vector![4.0, 4.0],
                vector![0.0, 4.0],
            ])
        );
    }

    #[test]
    fn collinear_points_collapse_to_segment() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![1.0, 1.0],
            vector![2.0, 2.0],
            vector![3.0, 3.0],
        ];
        let shape = divide_and_conquer(&pts).to_shape().unwrap();
        assert_eq!(shape, HullShape::Segment(vector![0.0, 0.0], vector![3.0, 3.0]));
    }

    #[test]
    fn single_point_and_vertical_pair() {
        let p = vector![2.0, 3.0];
        assert_eq!(
            divide_and_conquer(&[p]).to_shape().unwrap(),
            HullShape::Point(p)
        );
        let q = vector![2.0, 7.0];
        assert_eq!(
            divide_and_conquer(&[q, p]).to_shape().unwrap(),
            HullShape::Segment(p, q)
        );
    }

    #[test]
    fn upper_chain_of_a_parabola_is_every_point() {
        // y = -(x^2): every point is on the upper hull.
        let pts: Vec<_> = (-6..=6).map(|x| vector![x as f64, -((x * x) as f64)]).collect();
        let up = build_hull(&pts, Chain::Upper);
        assert_eq!(up.edges.len(), pts.len() - 1);
        let path = up.path().unwrap();
        let mut expected = pts.clone();
        expected.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(path, expected);
        // the lower chain is the single chord between the extremes
        let low = build_hull(&pts, Chain::Lower);
        assert_eq!(low.edges.len(), 1);
    }

    #[test]
    fn stepping_processes_one_sub_problem_at_a_time() {
        let pts: Vec<_> = (-5..=5).map(|x| vector![x as f64, -((x * x) as f64)]).collect();
        let mut asm = HullAssembler::new(&pts, Chain::Upper);
        assert_eq!(asm.pending(), 1);
        let mut ticks = 0;
        while asm.step() {
            ticks += 1;
            assert!(asm.current_split().is_some());
            assert!(ticks < 100);
        }
        assert!(asm.is_done());
        assert_eq!(asm.processed(), ticks + 1);
        assert_eq!(asm.edges().len(), pts.len() - 1);
        // further steps are no-ops
        assert!(!asm.step());
        assert_eq!(asm.finish().edges.len(), pts.len() - 1);
    }

    #[test]
    fn dc_stepper_matches_batch_result() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![5.0, -1.0],
            vector![9.0, 2.0],
            vector![6.0, 7.0],
            vector![1.0, 5.0],
            vector![4.0, 3.0],
            vector![3.0, 1.0],
        ];
        let mut stepper = DcStepper::new(&pts);
        assert_eq!(stepper.active().chain(), Chain::Upper);
        while stepper.step() {}
        assert!(stepper.upper().is_done() && stepper.lower().is_done());
        let stepped = stepper.finish().to_shape().unwrap();
        let batch = divide_and_conquer(&pts).to_shape().unwrap();
        assert_eq!(stepped, batch);
        assert_eq!(stepped.vertices().len(), 5);
    }

    #[test]
    fn broken_chain_is_reported() {
        let chain = ChainEdges {
            chain: Chain::Upper,
            xmin: vector![0.0, 0.0],
            xmax: vector![4.0, 0.0],
            edges: vec![Edge::ordered(vector![0.0, 0.0], vector![1.0, 2.0])],
        };
        assert_eq!(
            chain.path(),
            Err(HullError::BrokenChain {
                chain: Chain::Upper
            })
        );
    }

    #[test]
    #[should_panic]
    fn empty_input_panics() {
        let _ = HullAssembler::new(&[], Chain::Lower);
    }
}
