//! Error type shared by the validated facade, stitching, and the sampler.
//!
//! Engine preconditions (empty selector input, a bridge search over fewer than
//! two points) are not represented here: those are caller bugs and panic.

use std::fmt;

use crate::types::Chain;

#[derive(Debug, Clone, PartialEq)]
pub enum HullError {
    /// No points were supplied.
    EmptyInput,
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
    /// Two inputs share both coordinates.
    DuplicatePoint { first: usize, second: usize },
    /// Emitted edges do not link xmin to xmax on the given chain.
    BrokenChain { chain: Chain },
    /// Sampler configuration rejected.
    InvalidSampleCfg { reason: String },
}

impl HullError {
    pub(crate) fn invalid_cfg(reason: impl Into<String>) -> Self {
        Self::InvalidSampleCfg {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "point set is empty"),
            Self::NonFinite { index } => write!(f, "point {index} has a non-finite coordinate"),
            Self::DuplicatePoint { first, second } => {
                write!(f, "points {first} and {second} coincide")
            }
            Self::BrokenChain { chain } => {
                write!(f, "{chain} chain edges do not connect xmin to xmax")
            }
            Self::InvalidSampleCfg { reason } => write!(f, "invalid sample config: {reason}"),
        }
    }
}

impl std::error::Error for HullError {}
