//! Basic planar types: edges, chains, orientation, and the hull result.
//!
//! - Points are plain `Vector2<f64>` values (y-up, exact coordinate equality).
//! - `Orientation` is the sign of `cross(q - p, r - p)`; no tolerance.
//! - `Chain` selects the upper (larger y) or lower (smaller y) half.
//!
//! Code cross-refs: `bridge::find_bridge`, `assemble::HullAssembler`,
//! `gift_wrap::GiftWrapper`

use nalgebra::Vector2;

/// Hull segment; `left.x <= right.x` by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub left: Vector2<f64>,
    pub right: Vector2<f64>,
}

impl Edge {
    /// Order two points by x (ties keep the argument order).
    #[inline]
    pub fn ordered(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        if b.x < a.x {
            Self { left: b, right: a }
        } else {
            Self { left: a, right: b }
        }
    }

    /// `left.x <= split_x < right.x`.
    #[inline]
    pub fn straddles(&self, split_x: f64) -> bool {
        self.left.x <= split_x && split_x < self.right.x
    }

    /// Slope `dy/dx`; `None` for vertical edges.
    #[inline]
    pub fn slope(&self) -> Option<f64> {
        slope(self.left, self.right)
    }
}

/// Turn direction of the triple `(p, q, r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Twice the signed area of triangle `(p, q, r)`.
#[inline]
pub fn cross(p: Vector2<f64>, q: Vector2<f64>, r: Vector2<f64>) -> f64 {
    let pq = q - p;
    let pr = r - p;
    pq.x * pr.y - pq.y * pr.x
}

/// Exact orientation test (y-up: positive area is counter-clockwise).
#[inline]
pub fn orientation(p: Vector2<f64>, q: Vector2<f64>, r: Vector2<f64>) -> Orientation {
    let v = cross(p, q, r);
    if v > 0.0 {
        Orientation::CounterClockwise
    } else if v < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

#[inline]
pub(crate) fn slope(a: Vector2<f64>, b: Vector2<f64>) -> Option<f64> {
    if a.x == b.x {
        None
    } else {
        Some((b.y - a.y) / (b.x - a.x))
    }
}

/// Which half of the hull a divide-and-conquer pass builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chain {
    Upper,
    Lower,
}

impl Chain {
    /// True if `p` lies on the kept side of the directed line `l → r`, or on it.
    ///
    /// `l.x < r.x` is assumed, so "left of" means "above".
    #[inline]
    pub fn keeps(self, l: Vector2<f64>, r: Vector2<f64>, p: Vector2<f64>) -> bool {
        match (self, orientation(l, r, p)) {
            (_, Orientation::Collinear) => true,
            (Chain::Upper, o) => o == Orientation::CounterClockwise,
            (Chain::Lower, o) => o == Orientation::Clockwise,
        }
    }

    /// True if `a` is strictly further out than `b` in y (higher for the upper chain).
    #[inline]
    pub fn is_outer(self, a: f64, b: f64) -> bool {
        match self {
            Chain::Upper => a > b,
            Chain::Lower => a < b,
        }
    }

    /// Leftmost point; equal x resolves to the outer y.
    pub fn xmin(self, points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
        let (&first, rest) = points.split_first()?;
        Some(rest.iter().fold(first, |best, &p| {
            if p.x < best.x || (p.x == best.x && self.is_outer(p.y, best.y)) {
                p
            } else {
                best
            }
        }))
    }

    /// Rightmost point; equal x resolves to the outer y.
    pub fn xmax(self, points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
        let (&first, rest) = points.split_first()?;
        Some(rest.iter().fold(first, |best, &p| {
            if p.x > best.x || (p.x == best.x && self.is_outer(p.y, best.y)) {
                p
            } else {
                best
            }
        }))
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Upper => f.write_str("upper"),
            Chain::Lower => f.write_str("lower"),
        }
    }
}

/// Hull result: a point, a segment, or a CCW polygon (first vertex not repeated).
#[derive(Clone, Debug, PartialEq)]
pub enum HullShape {
    Point(Vector2<f64>),
    Segment(Vector2<f64>, Vector2<f64>),
    Polygon(Vec<Vector2<f64>>),
}

impl HullShape {
    /// Classify a cyclic vertex list by its length.
    ///
    /// Panics on an empty list.
    pub fn from_cycle(mut verts: Vec<Vector2<f64>>) -> Self {
        match verts.len() {
            0 => panic!("hull cycle must contain at least one vertex"),
            1 => HullShape::Point(verts[0]),
            2 => HullShape::Segment(verts[0], verts[1]),
            _ => {
                verts.shrink_to_fit();
                HullShape::Polygon(verts)
            }
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !matches!(self, HullShape::Polygon(_))
    }

    /// Boundary vertices in traversal order.
    pub fn vertices(&self) -> Vec<Vector2<f64>> {
        match self {
            HullShape::Point(p) => vec![*p],
            HullShape::Segment(a, b) => vec![*a, *b],
            HullShape::Polygon(v) => v.clone(),
        }
    }

    /// Vertices sorted lexicographically by (x, y); for order-free comparisons.
    pub fn vertex_set(&self) -> Vec<Vector2<f64>> {
        let mut v = self.vertices();
        v.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        v
    }

    /// Shoelace area (zero for degenerate shapes).
    pub fn area(&self) -> f64 {
        match self {
            HullShape::Polygon(v) => {
                let n = v.len();
                let twice: f64 = (0..n)
                    .map(|k| {
                        let a = v[k];
                        let b = v[(k + 1) % n];
                        a.x * b.y - a.y * b.x
                    })
                    .sum();
                0.5 * twice
            }
            _ => 0.0,
        }
    }
}
