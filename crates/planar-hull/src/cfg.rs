//! Tolerance defaults for the hull engine (internal).
//!
//! Policy
//! - One fixed constant per numeric decision. Call sites never carry their own
//!   literal; if a value ever needs tuning it changes here only.
//! - Orientation tests are exact. The tolerance below only groups points that
//!   share a supporting line during the bridge search.

/// Absolute band within which two line intercepts count as the same line.
///
/// Used by the bridge search to collect every point touching the supporting
/// line of the median slope. Sized for coordinates in the low thousands
/// (screen-space inputs). The band is absolute: for smaller spans it can
/// capture points strictly inside the hull, and the bridge search then
/// tightens the found edge with exact orientation tests.
pub const TIE_EPS: f64 = 1e-4;

/// Group size of the median-of-medians pivot rule.
pub(crate) const SELECT_GROUP: usize = 5;
