use thiserror::Error;

/// Error type for malformed dot-bracket inputs.
///
/// These indicate a violated input contract (caller bug or corrupted
/// collaborator output). A structure that merely fails to match a
/// reference scaffold is a normal outcome, not one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Sequence and structure must be the same length.
    #[error("sequence length {sequence} does not match structure length {structure}")]
    LengthMismatch { sequence: usize, structure: usize },

    /// Structure strings may only contain '(', ')', '.' and '|'.
    #[error("invalid structure symbol '{symbol}' at index {index}")]
    InvalidSymbol { symbol: char, index: usize },

    /// A bracket with no matching counterpart anywhere in the string.
    #[error("unbalanced '{symbol}' at index {index}")]
    Unbalanced { symbol: char, index: usize },

    /// Partner lookup outside the structure.
    #[error("index {index} out of bounds for structure of length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    /// A partner scan ran off the end of the string.
    #[error("no partner found for '{symbol}' at index {index}")]
    UnresolvedPartner { symbol: char, index: usize },
}
