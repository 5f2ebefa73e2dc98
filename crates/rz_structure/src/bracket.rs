//! Bracket partner resolution and input validation.

use crate::StructureError;

/// Resolve the partner index of the position `index` in a dot-bracket
/// string.
///
/// Returns `Ok(None)` for an unpaired position. For `'('` the scan runs
/// forward, for `')'` backward, tracking nesting depth. A scan that
/// exhausts the string means the brackets do not balance, which is an
/// input contract violation and reported as an error.
pub fn partner_of(structure: &str, index: usize) -> Result<Option<usize>, StructureError> {
    let bytes = structure.as_bytes();
    let Some(&symbol) = bytes.get(index) else {
        return Err(StructureError::IndexOutOfBounds {
            index,
            length: bytes.len(),
        });
    };
    match symbol {
        b'(' => {
            let mut depth = 0usize;
            for (j, &b) in bytes.iter().enumerate().skip(index + 1) {
                match b {
                    b')' if depth == 0 => return Ok(Some(j)),
                    b')' => depth -= 1,
                    b'(' => depth += 1,
                    _ => {}
                }
            }
            Err(StructureError::UnresolvedPartner { symbol: '(', index })
        }
        b')' => {
            let mut depth = 0usize;
            for j in (0..index).rev() {
                match bytes[j] {
                    b'(' if depth == 0 => return Ok(Some(j)),
                    b'(' => depth -= 1,
                    b')' => depth += 1,
                    _ => {}
                }
            }
            Err(StructureError::UnresolvedPartner { symbol: ')', index })
        }
        _ => Ok(None),
    }
}

/// Check that `structure` contains only dot-bracket symbols and that its
/// brackets balance.
///
/// The `'|'` placeholder is accepted since manually supplied reference
/// structures may mark positions with it.
pub fn validate_structure(structure: &str) -> Result<(), StructureError> {
    let mut open = Vec::new();
    for (index, symbol) in structure.char_indices() {
        match symbol {
            '(' => open.push(index),
            ')' => {
                if open.pop().is_none() {
                    return Err(StructureError::Unbalanced { symbol: ')', index });
                }
            }
            '.' | '|' => {}
            _ => return Err(StructureError::InvalidSymbol { symbol, index }),
        }
    }
    if let Some(index) = open.pop() {
        return Err(StructureError::Unbalanced { symbol: '(', index });
    }
    Ok(())
}

/// Check that a (sequence, structure) pair is well formed: equal lengths
/// and a balanceable structure.
pub fn validate_pair(sequence: &str, structure: &str) -> Result<(), StructureError> {
    if sequence.len() != structure.len() {
        return Err(StructureError::LengthMismatch {
            sequence: sequence.len(),
            structure: structure.len(),
        });
    }
    validate_structure(structure)
}
