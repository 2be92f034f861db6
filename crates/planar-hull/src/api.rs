//! Validated entry points for drivers.
//!
//! The engine modules assume clean input and panic on caller bugs. This layer
//! checks the input once (non-empty, finite, no exact duplicates) and returns
//! `HullError` instead, then dispatches to the chosen algorithm.

use nalgebra::Vector2;

use crate::assemble::divide_and_conquer;
use crate::error::HullError;
use crate::gift_wrap::gift_wrap;
use crate::types::HullShape;

/// Hull algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    GiftWrap,
    DivideConquer,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::GiftWrap => "gift-wrap",
            Algorithm::DivideConquer => "divide-conquer",
        }
    }
}

/// Reject empty input, non-finite coordinates, and exact duplicates.
pub fn validate_points(points: &[Vector2<f64>]) -> Result<(), HullError> {
    if points.is_empty() {
        return Err(HullError::EmptyInput);
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(HullError::NonFinite { index });
    }
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| lex(&points[a], &points[b]).then(a.cmp(&b)));
    for w in order.windows(2) {
        if points[w[0]] == points[w[1]] {
            return Err(HullError::DuplicatePoint {
                first: w[0],
                second: w[1],
            });
        }
    }
    Ok(())
}

/// Sort and drop exact duplicates (input-side helper; the engine never calls it).
pub fn dedup_points(mut points: Vec<Vector2<f64>>) -> Vec<Vector2<f64>> {
    points.sort_by(lex);
    points.dedup();
    points
}

/// Validate, then compute the hull with `algo`.
///
/// Scale: the divide-and-conquer bridge search groups supporting-line
/// intercepts within the absolute band `cfg::TIE_EPS` (tuned for integer or
/// screen coordinates up to the low thousands). Edges found inside the band
/// are re-checked exactly, so smaller spans still give the exact hull, but
/// below a span of roughly `1e-2` most bridge rounds take that slower path.
/// Gift wrapping uses exact orientation only and has no scale dependence.
pub fn convex_hull(points: &[Vector2<f64>], algo: Algorithm) -> Result<HullShape, HullError> {
    validate_points(points)?;
    tracing::debug!(algo = algo.name(), n = points.len(), "convex hull");
    match algo {
        Algorithm::GiftWrap => Ok(gift_wrap(points)),
        Algorithm::DivideConquer => divide_and_conquer(points).to_shape(),
    }
}

#[inline]
pub fn hull_gift_wrap(points: &[Vector2<f64>]) -> Result<HullShape, HullError> {
    convex_hull(points, Algorithm::GiftWrap)
}

/// Divide-and-conquer hull; see `convex_hull` for how coordinate scale
/// interacts with the intercept tie band.
#[inline]
pub fn hull_divide_conquer(points: &[Vector2<f64>]) -> Result<HullShape, HullError> {
    convex_hull(points, Algorithm::DivideConquer)
}

fn lex(a: &Vector2<f64>, b: &Vector2<f64>) -> std::cmp::Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn validation_errors() {
        assert_eq!(validate_points(&[]), Err(HullError::EmptyInput));
        assert_eq!(
            validate_points(&[vector![0.0, 0.0], vector![f64::NAN, 1.0]]),
            Err(HullError::NonFinite { index: 1 })
        );
        assert_eq!(
            validate_points(&[vector![0.0, 0.0], vector![1.0, 1.0], vector![0.0, 0.0]]),
            Err(HullError::DuplicatePoint { first: 0, second: 2 })
        );
        assert!(validate_points(&[vector![0.0, 0.0], vector![1.0, 1.0]]).is_ok());
    }

    #[test]
    fn dedup_then_hull() {
        let pts = dedup_points(vec![
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 0.0],
            vector![0.0, 0.0],
        ]);
        assert_eq!(pts.len(), 3);
        for algo in [Algorithm::GiftWrap, Algorithm::DivideConquer] {
            let shape = convex_hull(&pts, algo).unwrap();
            assert_eq!(shape.vertices().len(), 3, "{}", algo.name());
        }
    }

    #[test]
    fn error_messages_are_readable() {
        let e = hull_gift_wrap(&[]).unwrap_err();
        assert_eq!(e.to_string(), "point set is empty");
        let e = hull_divide_conquer(&[vector![f64::INFINITY, 0.0]]).unwrap_err();
        assert!(e.to_string().contains("non-finite"));
    }
}
