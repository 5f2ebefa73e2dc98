//! Reference ribozyme parts.

use crate::RibozymeError;

/// One anchor segment of the reference ribozyme: a subsequence paired
/// with its dot-bracket substructure.
///
/// A reference splits into either three parts (left, top, right) when
/// the loops are excluded from matching, or two parts (left, right)
/// when they are kept in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RibozymePart {
    pub sequence: String,
    pub structure: String,
}

impl RibozymePart {
    pub fn new(sequence: impl Into<String>, structure: impl Into<String>) -> Self {
        let part = RibozymePart {
            sequence: sequence.into(),
            structure: structure.into(),
        };
        debug_assert_eq!(part.sequence.len(), part.structure.len());
        part
    }

    /// Length of the segment in nucleotides.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Locate every part in `sequence` by first-occurrence substring search.
///
/// Parts must land left to right without overlap; anything else means
/// the candidate violates the part layout contract.
pub(crate) fn locate_parts(
    sequence: &str,
    parts: &[RibozymePart],
) -> Result<Vec<usize>, RibozymeError> {
    let mut positions = Vec::with_capacity(parts.len());
    let mut previous_end = 0;
    for part in parts {
        if part.is_empty() {
            return Err(RibozymeError::PartNotFound {
                part: String::new(),
            });
        }
        let pos = sequence
            .find(&part.sequence)
            .ok_or_else(|| RibozymeError::PartNotFound {
                part: part.sequence.clone(),
            })?;
        if pos < previous_end {
            return Err(RibozymeError::MisorderedParts);
        }
        previous_end = pos + part.len();
        positions.push(pos);
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_parts_in_order() {
        let parts = [
            RibozymePart::new("GC", "(("),
            RibozymePart::new("GCAGAGGC", "))...((("),
            RibozymePart::new("GCC", ")))"),
        ];
        let positions = locate_parts("GCUUCGGCAGAGGCGAAGCC", &parts).unwrap();
        assert_eq!(positions, vec![0, 6, 17]);
    }

    #[test]
    fn test_locate_missing_part() {
        let parts = [RibozymePart::new("AAAA", "....")];
        assert_eq!(
            locate_parts("GCGC", &parts),
            Err(RibozymeError::PartNotFound { part: "AAAA".into() })
        );
    }

    #[test]
    fn test_locate_misordered_parts() {
        // Both parts first occur at index 0.
        let parts = [
            RibozymePart::new("GC", "(("),
            RibozymePart::new("GCGC", "))))"),
        ];
        assert_eq!(
            locate_parts("GCGCGC", &parts),
            Err(RibozymeError::MisorderedParts)
        );
    }
}
