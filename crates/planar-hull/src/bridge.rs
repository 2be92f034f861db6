//! Bridge search: the hull edge crossing a vertical split line.
//!
//! Purpose
//! - Given candidates and `split_x`, return the upper (or lower) hull edge
//!   `(l, r)` with `l.x <= split_x < r.x`, in time linear in the candidates.
//!
//! Method (prune-and-search over slopes)
//! - Pair candidates, take the median pair slope `m`, and find the points
//!   touching the supporting line of slope `m`. If their x-range straddles the
//!   split, that segment is the bridge. Otherwise the bridge slope lies on a
//!   known side of `m` and, in every pair sloped away from the bridge, the
//!   endpoint facing away from the split cannot be a bridge endpoint and is
//!   dropped. Each round drops at least a quarter of the paired points.
//! - Rounds run in a loop bounded by the input size; the former recursion
//!   depth becomes the round counter.
//!
//! Conventions
//! - y-up. The supporting-line intercept is `c = y - m·x`; the upper chain
//!   maximizes it, the lower chain minimizes it.
//! - Intercept ties use `cfg::TIE_EPS`; slope classes are compared exactly so
//!   that a true bridge endpoint is never dropped.
//! - The tie band is absolute. When the coordinate span is small against it,
//!   the support set can hold points just inside the true hull and the segment
//!   between its extremes can pass under a vertex. A found edge is therefore
//!   checked exactly against the remaining candidates and pushed outward
//!   until nothing lies strictly beyond it.
//!
//! Code cross-refs: `select::median_scalar`, `assemble::HullAssembler`

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::cfg::TIE_EPS;
use crate::select::median_scalar;
use crate::types::{cross, slope, Chain, Edge};

/// Bridge of `chain` over the vertical line `x = split_x`.
///
/// Panics when fewer than two points are given or when the split does not
/// separate them (`min x <= split_x < max x` is required); both are caller bugs.
pub fn find_bridge(points: &[Vector2<f64>], split_x: f64, chain: Chain) -> Edge {
    assert!(
        points.len() >= 2,
        "bridge: need at least two points, got {}",
        points.len()
    );
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        });
    assert!(
        lo <= split_x && split_x < hi,
        "bridge: split {split_x} outside [{lo}, {hi})"
    );

    let mut cand = points.to_vec();
    for round in 0..=points.len() {
        if cand.len() == 2 {
            return Edge::ordered(cand[0], cand[1]);
        }
        assert!(
            cand.len() > 2,
            "bridge: candidates collapsed below two points in round {round}"
        );
        match bridge_round(&cand, split_x, chain) {
            Round::Found(edge) => {
                tracing::trace!(%chain, round, split_x, "bridge found");
                return tighten(&cand, split_x, chain, edge);
            }
            Round::Narrowed(next) => {
                debug_assert!(next.len() < cand.len());
                cand = next;
            }
        }
    }
    panic!(
        "bridge: no convergence after {} rounds ({chain} chain, split {split_x})",
        points.len() + 1
    );
}

enum Round {
    Found(Edge),
    Narrowed(Vec<Vector2<f64>>),
}

/// Non-vertical candidate pair with `left.x < right.x`.
#[derive(Clone, Copy, Debug)]
struct SlopedPair {
    left: Vector2<f64>,
    right: Vector2<f64>,
    slope: f64,
}

fn bridge_round(cand: &[Vector2<f64>], split_x: f64, chain: Chain) -> Round {
    let (pairs, mut next) = pair_up(cand, chain);
    if pairs.is_empty() {
        // Every pair was vertical; only their outer points survive.
        return Round::Narrowed(next);
    }

    let slopes: Vec<f64> = pairs.iter().map(|p| p.slope).collect();
    let m = median_scalar(&slopes);
    let (pmin, pmax) = support_extent(cand, m, chain);

    if pmin.x <= split_x && pmax.x > split_x {
        return Round::Found(Edge {
            left: pmin,
            right: pmax,
        });
    }

    // Bridge lies right of the support set when pmax.x <= split_x.
    let bridge_right = pmax.x <= split_x;
    let toward = match (chain, bridge_right) {
        (Chain::Upper, true) | (Chain::Lower, false) => Ordering::Less,
        (Chain::Upper, false) | (Chain::Lower, true) => Ordering::Greater,
    };
    for pair in pairs {
        if pair.slope.total_cmp(&m) == toward {
            next.push(pair.left);
            next.push(pair.right);
        } else if bridge_right {
            next.push(pair.right);
        } else {
            next.push(pair.left);
        }
    }
    Round::Narrowed(next)
}

/// Pair consecutive candidates. Returns sloped pairs plus the points kept
/// unconditionally: the odd leftover and the outer point of each vertical pair.
fn pair_up(cand: &[Vector2<f64>], chain: Chain) -> (Vec<SlopedPair>, Vec<Vector2<f64>>) {
    let mut keep = Vec::with_capacity(cand.len() / 2 + 1);
    let rest = if cand.len() % 2 == 1 {
        keep.push(cand[0]);
        &cand[1..]
    } else {
        cand
    };
    let mut pairs = Vec::with_capacity(rest.len() / 2);
    for two in rest.chunks_exact(2) {
        let e = Edge::ordered(two[0], two[1]);
        match slope(e.left, e.right) {
            Some(s) => pairs.push(SlopedPair {
                left: e.left,
                right: e.right,
                slope: s,
            }),
            None => {
                let outer = if chain.is_outer(e.left.y, e.right.y) {
                    e.left
                } else {
                    e.right
                };
                keep.push(outer);
            }
        }
    }
    (pairs, keep)
}

/// Leftmost and rightmost points on the supporting line of slope `m`.
fn support_extent(cand: &[Vector2<f64>], m: f64, chain: Chain) -> (Vector2<f64>, Vector2<f64>) {
    let intercept = |p: &Vector2<f64>| p.y - m * p.x;
    let best = cand
        .iter()
        .map(intercept)
        .reduce(|a, b| if chain.is_outer(b, a) { b } else { a })
        .expect("bridge: support of an empty candidate set");
    let mut touching = cand
        .iter()
        .copied()
        .filter(|p| (intercept(p) - best).abs() <= TIE_EPS);
    let first = touching
        .next()
        .expect("bridge: extreme intercept must be attained");
    touching.fold((first, first), |(lo, hi), p| {
        (
            if p.x < lo.x { p } else { lo },
            if p.x > hi.x { p } else { hi },
        )
    })
}

/// Signed distance proxy: positive when `p` is strictly beyond `l → r` for `chain`.
#[inline]
fn beyond(chain: Chain, l: Vector2<f64>, r: Vector2<f64>, p: Vector2<f64>) -> f64 {
    match chain {
        Chain::Upper => cross(l, r, p),
        Chain::Lower => -cross(l, r, p),
    }
}

/// Replace an endpoint by the farthest point beyond the edge until none is left.
///
/// Each swap keeps `l.x <= split_x < r.x` and strictly raises (lowers, for the
/// lower chain) the edge's height over the split, so no edge repeats. Points on
/// the final line widen it to its outermost members, matching `support_extent`.
fn tighten(cand: &[Vector2<f64>], split_x: f64, chain: Chain, edge: Edge) -> Edge {
    let Edge {
        left: mut l,
        right: mut r,
    } = edge;
    for _ in 0..=cand.len() {
        let worst = cand
            .iter()
            .copied()
            .map(|p| (beyond(chain, l, r, p), p))
            .filter(|&(d, _)| d > 0.0)
            .max_by(|a, b| a.0.total_cmp(&b.0));
        match worst {
            Some((_, p)) if p.x <= split_x => l = p,
            Some((_, p)) => r = p,
            None => break,
        }
    }
    if (l, r) != (edge.left, edge.right) {
        tracing::trace!(%chain, split_x, left = ?l, right = ?r, "bridge tightened past tie band");
    }
    let (a, b) = (l, r);
    cand.iter()
        .copied()
        .filter(|&p| cross(a, b, p) == 0.0)
        .fold(Edge { left: l, right: r }, |e, p| Edge {
            left: if p.x < e.left.x { p } else { e.left },
            right: if p.x > e.right.x { p } else { e.right },
        })
}
