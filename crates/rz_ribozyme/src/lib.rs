//! Ribozyme scaffold matching and loop excision.
//!
//! Decides whether a candidate (sequence, structure) pair folds into a
//! reference catalytic scaffold with two variable decorative loops,
//! tolerating stems a few base pairs longer or shorter than the
//! reference, and excises the loop regions for downstream scoring.
//!
//! All operations are pure functions over immutable inputs; a batch
//! driver may run them in parallel over independent candidates without
//! any locking.

mod error;
mod parts;
mod reference;
mod stems;
mod loops;

pub use error::*;
pub use parts::*;
pub use reference::*;
pub use stems::*;
pub use loops::*;
