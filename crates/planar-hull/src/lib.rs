//! Planar convex hulls: gift wrapping and median-split divide and conquer.
//!
//! Layout
//! - `select`: median-of-medians order statistics (points by x, raw scalars).
//! - `bridge`: prune-and-search for the hull edge over a vertical split.
//! - `assemble`: worklist-driven upper/lower chain construction and stitching.
//! - `gift_wrap`: Jarvis march, independent of the three above.
//! - `api`: validated entry points; `sample`: seeded point clouds.
//!
//! Conventions
//! - Points are `Vector2<f64>` in y-up coordinates; "upper" means larger y.
//! - Engine functions panic on caller bugs (empty input, a bridge search over
//!   fewer than two points). The `api` layer validates and returns `HullError`.
//! - Drivers can advance `HullAssembler`, `DcStepper`, and `GiftWrapper` one
//!   step at a time; the engine holds no timing or rendering state.

pub mod api;
pub mod assemble;
pub mod bridge;
pub mod cfg;
pub mod error;
pub mod gift_wrap;
pub mod sample;
pub mod select;
pub mod types;

pub use api::{convex_hull, dedup_points, validate_points, Algorithm};
pub use error::HullError;
pub use types::{cross, orientation, Chain, Edge, HullShape, Orientation};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{
        convex_hull, dedup_points, hull_divide_conquer, hull_gift_wrap, validate_points, Algorithm,
    };
    pub use crate::assemble::{
        build_hull, divide_and_conquer, ChainEdges, DcHull, DcStepper, HullAssembler, SubProblem,
    };
    pub use crate::bridge::find_bridge;
    pub use crate::gift_wrap::{gift_wrap, wrap, GiftWrapper};
    pub use crate::sample::{
        sample_circle_points, sample_grid_points, sample_points, ReplayToken, SampleCfg,
    };
    pub use crate::select::{median_by_x, median_scalar, select_nth_by_key};
    pub use crate::types::{orientation, Chain, Edge, HullShape, Orientation};
    pub use crate::HullError;
    pub use nalgebra::Vector2;
}
