//! Loop excision.
//!
//! Once a candidate is known to fold into the scaffold, the two
//! variable loop regions are excised as alternating
//! (nucleotide, structure symbol) strings for downstream encoding:
//! even indices hold nucleotides, odd indices structure symbols.

use rz_structure::partner_of;

use crate::Assessment;
use crate::RibozymeError;
use crate::RibozymePart;
use crate::measure;
use crate::stems::Layout;

/// The two excised loops plus the stem lengths actually present in the
/// candidate.
///
/// The default value (empty loops, zero lengths) is the sentinel for
/// "the candidate did not fold into the scaffold".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopExtraction {
    pub loops: [String; 2],
    pub stem_lengths: [usize; 2],
}

impl LoopExtraction {
    pub fn is_formed(&self) -> bool {
        self.stem_lengths != [0, 0]
    }
}

/// Locate and excise the two loop regions of a candidate.
///
/// The loop is the first continuous stretch of the loop window; a bond
/// inside it opens a secondary stem hanging off the loop, which is
/// skipped over bodily (the walk resumes at the bond's partner).
pub fn extract_loops(
    sequence: &str,
    structure: &str,
    parts: &[RibozymePart],
) -> Result<LoopExtraction, RibozymeError> {
    let report = match measure(sequence, structure, parts)? {
        Assessment::Formed(report) => report,
        Assessment::Unformed => return Ok(LoopExtraction::default()),
    };
    let stem_lengths = report.effective();
    if stem_lengths == [0, 0] {
        return Ok(LoopExtraction::default());
    }

    let layout = Layout::resolve(sequence, parts)?;
    let mut loops: [String; 2] = Default::default();
    for stem in 0..2 {
        let (loop_start, loop_end) = layout.boundaries[stem];
        let modification = report.modification[stem];
        let from = (loop_start as isize + 1 + modification).max(0) as usize;
        let to = (loop_end as isize - modification).max(0) as usize;
        loops[stem] = walk_loop(sequence, structure, from, to)?;
    }

    Ok(LoopExtraction {
        loops,
        stem_lengths,
    })
}

fn walk_loop(
    sequence: &str,
    structure: &str,
    from: usize,
    to: usize,
) -> Result<String, RibozymeError> {
    let seq = sequence.as_bytes();
    let db = structure.as_bytes();
    let mut out = String::with_capacity(to.saturating_sub(from) * 2);
    let mut i = from;
    while i < to {
        out.push(seq[i] as char);
        out.push(db[i] as char);
        if db[i] == b'(' {
            // Jump to the partner; its own (nucleotide, ')') pair is
            // still recorded before the walk moves on. In a balanced
            // structure an opening bracket always has one.
            let Some(partner) = partner_of(structure, i)? else {
                unreachable!("opening bracket without a partner");
            };
            i = partner;
        } else {
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReferenceStructure;
    use crate::SplitMode;

    // Stem 1 of length 2, stem 2 of length 3.
    const SMALL_SEQ: &str = "GCUUCGGCAGAGGCGAAGCC";
    const SMALL_DB: &str = "((....))...(((...)))";

    // Stem 1 of length 4, stem 2 of length 3.
    const WIDE_SEQ: &str = "GGGCUUCGGCCCAGACGGGAACCG";
    const WIDE_DB: &str = "((((....))))...(((...)))";

    fn small_parts() -> Vec<crate::RibozymePart> {
        ReferenceStructure::new(SMALL_SEQ, SMALL_DB, SplitMode::ExcludeLoops)
            .unwrap()
            .parts
    }

    fn wide_parts() -> Vec<crate::RibozymePart> {
        ReferenceStructure::new(WIDE_SEQ, WIDE_DB, SplitMode::ExcludeLoops)
            .unwrap()
            .parts
    }

    #[test]
    fn test_reference_loops() {
        let extraction = extract_loops(SMALL_SEQ, SMALL_DB, &small_parts()).unwrap();
        assert_eq!(extraction.loops, ["U.U.C.G.".to_string(), "G.A.A.".to_string()]);
        assert_eq!(extraction.stem_lengths, [2, 3]);
        assert!(extraction.is_formed());
    }

    #[test]
    fn test_replaced_loop_interior() {
        // Same scaffold, loop 1 interior swapped out.
        let candidate = "GCAAAAGCAGAGGCGAAGCC";
        let extraction = extract_loops(candidate, SMALL_DB, &small_parts()).unwrap();
        assert_eq!(extraction.loops, ["A.A.A.A.".to_string(), "G.A.A.".to_string()]);
        assert_eq!(extraction.stem_lengths, [2, 3]);
    }

    #[test]
    fn test_reduced_stem_widens_the_loop_window() {
        let candidate = "((........))...(((...)))";
        let extraction = extract_loops(WIDE_SEQ, candidate, &wide_parts()).unwrap();
        assert_eq!(
            extraction.loops,
            ["G.C.U.U.C.G.G.C.".to_string(), "G.A.A.".to_string()]
        );
        assert_eq!(extraction.stem_lengths, [2, 3]);
    }

    #[test]
    fn test_extended_stem_narrows_the_loop_window() {
        let candidate = "(((((..)))))...(((...)))";
        let extraction = extract_loops(WIDE_SEQ, candidate, &wide_parts()).unwrap();
        assert_eq!(extraction.loops, ["U.C.".to_string(), "G.A.A.".to_string()]);
        assert_eq!(extraction.stem_lengths, [5, 3]);
    }

    #[test]
    fn test_nested_stem_is_skipped_bodily() {
        // A 3-nt hairpin hangs off loop 1; only its boundary pair shows
        // up in the loop string and its interior is jumped over.
        let candidate = "((((.(.)))))...(((...)))";
        let extraction = extract_loops(WIDE_SEQ, candidate, &wide_parts()).unwrap();
        assert_eq!(extraction.loops[0], "U.U(G)");
        assert_eq!(extraction.loops[1], "G.A.A.");
        assert_eq!(extraction.stem_lengths, [4, 3]);
    }

    #[test]
    fn test_walk_jumps_straight_to_the_partner() {
        // Window 4..8 of loop 1: the bond at 5 is partnered at 7, so
        // index 6 never appears in the output.
        let candidate = "((((.(.)))))...(((...)))";
        assert_eq!(walk_loop(WIDE_SEQ, candidate, 4, 8).unwrap(), "U.U(G)");
    }

    #[test]
    fn test_unformed_candidate_yields_the_sentinel() {
        let candidate = "((((....)))).(.(((.).)))";
        let extraction = extract_loops(WIDE_SEQ, candidate, &wide_parts()).unwrap();
        assert_eq!(extraction, LoopExtraction::default());
        assert!(!extraction.is_formed());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let parts = wide_parts();
        let first = extract_loops(WIDE_SEQ, WIDE_DB, &parts).unwrap();
        let second = extract_loops(WIDE_SEQ, WIDE_DB, &parts).unwrap();
        assert_eq!(first, second);
    }
}
