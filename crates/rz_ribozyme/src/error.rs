use thiserror::Error;

use rz_structure::StructureError;

/// Error type for scaffold matching operations.
///
/// All of these are fail-fast input contract violations. A candidate
/// that simply does not fold into the scaffold is reported through
/// [`crate::Assessment::Unformed`], never through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RibozymeError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// A reference part's subsequence does not occur in the candidate.
    #[error("ribozyme part '{part}' not found in candidate sequence")]
    PartNotFound { part: String },

    /// Parts located out of order or overlapping each other.
    #[error("ribozyme parts are misordered or overlap in the candidate sequence")]
    MisorderedParts,

    /// A reference structure without enough hairpins to split on.
    #[error("reference structure has {found} hairpins, at least {needed} needed")]
    TooFewHairpins { found: usize, needed: usize },

    /// A loop-2 tip split index that does not fit the reference.
    #[error("split index {index} out of range for reference of length {length}")]
    BadSplit { index: usize, length: usize },

    /// References must split into two or three parts.
    #[error("reference must have two or three parts, got {0}")]
    BadPartCount(usize),
}
