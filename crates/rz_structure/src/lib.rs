//! Dot-bracket secondary structure primitives.
//!
//! Everything here operates on plain dot-bracket strings: bracket
//! partner resolution, hairpin detection, and the input validation
//! shared by the scaffold matching in `rz_ribozyme`.

mod error;
mod bracket;
mod hairpin;

pub use error::*;
pub use bracket::*;
pub use hairpin::*;
