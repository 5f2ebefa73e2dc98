//! Reference scaffold configuration.
//!
//! The reference (sequence, structure) pair and the way it is split into
//! parts are decided once per run and shared read-only across a whole
//! batch. The split used to be an interactive prompt in earlier tooling;
//! here it is plain configuration.

use rz_structure::StructureError;
use rz_structure::find_hairpins;
use rz_structure::validate_pair;

use crate::RibozymeError;
use crate::RibozymePart;

/// How to split a reference ribozyme into parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Cut the loops out of the reference. Candidates may fold anything
    /// inside the loop windows, as long as the stems form.
    ExcludeLoops,
    /// Keep the loops in: candidates must reproduce them exactly. The
    /// reference is split at the tip of loop 2, `left_len` nucleotides
    /// in, and a bond is expected there in place of the covalent link
    /// (this is where an aptamer closes the loop).
    IncludeLoops { left_len: usize },
}

/// A reference ribozyme together with its derived parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceStructure {
    pub sequence: String,
    pub structure: String,
    pub parts: Vec<RibozymePart>,
}

impl ReferenceStructure {
    pub fn new(
        sequence: impl Into<String>,
        structure: impl Into<String>,
        split: SplitMode,
    ) -> Result<Self, RibozymeError> {
        let sequence = sequence.into();
        let structure = structure.into();
        validate_pair(&sequence, &structure)?;
        let parts = match split {
            SplitMode::ExcludeLoops => split_at_hairpins(&sequence, &structure)?,
            SplitMode::IncludeLoops { left_len } => {
                split_at_tip(&sequence, &structure, left_len)?
            }
        };
        Ok(ReferenceStructure {
            sequence,
            structure,
            parts,
        })
    }
}

/// Three-part split: left side up to the first loop's stem, top side
/// spanning both stems and the catalytic core, right side from the
/// second loop's stem. Boundaries come from the innermost pairs of the
/// first two hairpins.
fn split_at_hairpins(
    sequence: &str,
    structure: &str,
) -> Result<Vec<RibozymePart>, RibozymeError> {
    let hairpins = find_hairpins(structure);
    if hairpins.len() < 2 {
        return Err(RibozymeError::TooFewHairpins {
            found: hairpins.len(),
            needed: 2,
        });
    }
    let (start1, end1) = hairpins[0];
    let (start2, end2) = hairpins[1];
    Ok(vec![
        RibozymePart::new(&sequence[..=start1], &structure[..=start1]),
        RibozymePart::new(&sequence[end1..=start2], &structure[end1..=start2]),
        RibozymePart::new(&sequence[end2..], &structure[end2..]),
    ])
}

/// Two-part split at the tip of loop 2. The covalent link at the tip is
/// replaced by a fabricated `.(` / `).` boundary, so candidates are
/// expected to show a bond there instead.
fn split_at_tip(
    sequence: &str,
    structure: &str,
    left_len: usize,
) -> Result<Vec<RibozymePart>, RibozymeError> {
    if left_len < 2 || left_len + 2 > structure.len() {
        return Err(RibozymeError::BadSplit {
            index: left_len,
            length: structure.len(),
        });
    }
    let left_structure = format!("{}.(", &structure[..left_len - 2]);
    let right_structure = format!(").{}", &structure[left_len + 2..]);
    Ok(vec![
        RibozymePart::new(&sequence[..left_len], left_structure),
        RibozymePart::new(&sequence[left_len..], right_structure),
    ])
}

/// Trim unpaired hanging ends from an aptamer reference, so candidates
/// are not required to leave the ends unbonded for the aptamer to count
/// as formed. Both strings are sliced with the same window, from the
/// first `'('` through the last `')'`.
pub fn trim_hanging_ends<'a>(
    sequence: &'a str,
    structure: &'a str,
) -> Result<(&'a str, &'a str), StructureError> {
    if sequence.len() != structure.len() {
        return Err(StructureError::LengthMismatch {
            sequence: sequence.len(),
            structure: structure.len(),
        });
    }
    match (structure.find('('), structure.rfind(')')) {
        (Some(start), Some(end)) if start <= end => {
            Ok((&sequence[start..=end], &structure[start..=end]))
        }
        _ => Ok(("", "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REF_SEQ: &str = "GCUUCGGCAGAGGCGAAGCC";
    const REF_DB: &str = "((....))...(((...)))";

    #[test]
    fn test_exclude_loops_split() {
        let reference =
            ReferenceStructure::new(REF_SEQ, REF_DB, SplitMode::ExcludeLoops).unwrap();
        assert_eq!(
            reference.parts,
            vec![
                RibozymePart::new("GC", "(("),
                RibozymePart::new("GCAGAGGC", "))...((("),
                RibozymePart::new("GCC", ")))"),
            ]
        );
    }

    #[test]
    fn test_exclude_loops_needs_two_hairpins() {
        assert_eq!(
            ReferenceStructure::new("GCAAGC", "((..))", SplitMode::ExcludeLoops),
            Err(RibozymeError::TooFewHairpins { found: 1, needed: 2 })
        );
    }

    #[test]
    fn test_include_loops_split() {
        let reference =
            ReferenceStructure::new(REF_SEQ, REF_DB, SplitMode::IncludeLoops { left_len: 10 })
                .unwrap();
        assert_eq!(
            reference.parts,
            vec![
                RibozymePart::new("GCUUCGGCAG", "((....)).("),
                RibozymePart::new("AGGCGAAGCC", ").((...)))"),
            ]
        );
    }

    #[test]
    fn test_include_loops_bad_split() {
        assert!(matches!(
            ReferenceStructure::new(REF_SEQ, REF_DB, SplitMode::IncludeLoops { left_len: 19 }),
            Err(RibozymeError::BadSplit { .. })
        ));
    }

    #[test]
    fn test_reference_rejects_malformed_input() {
        assert!(matches!(
            ReferenceStructure::new("GCGC", "((.", SplitMode::ExcludeLoops),
            Err(RibozymeError::Structure(_))
        ));
    }

    #[test]
    fn test_trim_hanging_ends() {
        let (seq, db) = trim_hanging_ends("AAGCGCUU", "..((..))").unwrap();
        assert_eq!(seq, "GCGCUU");
        assert_eq!(db, "((..))");

        let (seq, db) = trim_hanging_ends("AAGC", "....").unwrap();
        assert_eq!(seq, "");
        assert_eq!(db, "");
    }
}
