//! Stem length measurement against a reference scaffold.
//!
//! Candidates are allowed to grow or shrink each of the two stems by a
//! few base pairs relative to the reference; everything outside those
//! tolerance windows must match the reference exactly.

use rz_structure::find_hairpins;
use rz_structure::partner_of;
use rz_structure::validate_pair;

use crate::RibozymeError;
use crate::RibozymePart;
use crate::parts::locate_parts;

/// Reference stem lengths plus a candidate's signed deviation from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StemReport {
    /// Stem lengths of the reference itself.
    pub base: [usize; 2],
    /// Signed deviation per stem: negative = shortened, positive =
    /// lengthened, zero = identical to the reference.
    pub modification: [isize; 2],
}

impl StemReport {
    /// Stem lengths actually present in the candidate.
    pub fn effective(&self) -> [usize; 2] {
        [0, 1].map(|i| (self.base[i] as isize + self.modification[i]).max(0) as usize)
    }
}

/// Outcome of matching a candidate against the reference scaffold.
///
/// `Unformed` is an expected domain outcome (the candidate simply did
/// not fold into the scaffold), not an error, and is aggregated by the
/// batch driver rather than propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Formed(StemReport),
    Unformed,
}

/// Where the reference parts land in a candidate, and the stem/loop
/// boundaries derived from them.
pub(crate) struct Layout {
    pub positions: Vec<usize>,
    /// Per stem: (loop_start, loop_end). `loop_start` is the last index
    /// of the part before the loop, `loop_end` the first index of the
    /// part after it.
    pub boundaries: [(usize, usize); 2],
}

impl Layout {
    pub fn resolve(sequence: &str, parts: &[RibozymePart]) -> Result<Self, RibozymeError> {
        let positions = locate_parts(sequence, parts)?;
        let boundaries = match parts.len() {
            3 => [
                (positions[0] + parts[0].len() - 1, positions[1]),
                (positions[1] + parts[1].len() - 1, positions[2]),
            ],
            // Two parts: loop 1 sits inside the left part, at its first
            // hairpin; loop 2's boundary is the split tip between the
            // two parts.
            2 => {
                let Some(&(start, end)) = find_hairpins(&parts[0].structure).first() else {
                    return Err(RibozymeError::TooFewHairpins { found: 0, needed: 1 });
                };
                [
                    (positions[0] + start, positions[0] + end),
                    (positions[0] + parts[0].len() - 1, positions[1]),
                ]
            }
            n => return Err(RibozymeError::BadPartCount(n)),
        };
        Ok(Layout {
            positions,
            boundaries,
        })
    }
}

/// Matched `('`…`')` run between the tail of `five` (walked backwards)
/// and the head of `three` (walked forwards).
fn paired_span(five: &str, three: &str) -> usize {
    five.bytes()
        .rev()
        .zip(three.bytes())
        .take_while(|&(f, t)| f == b'(' && t == b')')
        .count()
}

/// Stem lengths of the reference itself, from the lock-step walk at
/// each part boundary.
fn base_stem_lengths(parts: &[RibozymePart]) -> [usize; 2] {
    match parts {
        [left, top, right] => [
            paired_span(&left.structure, &top.structure),
            paired_span(&top.structure, &right.structure),
        ],
        [left, right] => {
            let stem1 = find_hairpins(&left.structure)
                .first()
                .map(|&(start, end)| {
                    paired_span(&left.structure[..=start], &left.structure[end..])
                })
                .unwrap_or(0);
            [stem1, paired_span(&left.structure, &right.structure)]
        }
        _ => [0, 0],
    }
}

/// Signed deviation of one stem, or `None` when the structure around
/// the stem is inconsistent with the scaffold.
fn stem_modification(
    structure: &str,
    loop_start: usize,
    loop_end: usize,
    base: usize,
) -> Result<Option<isize>, RibozymeError> {
    let bytes = structure.as_bytes();

    if bytes[loop_start] == b'.' {
        // Reduced stem: walk inward until the first intact pair.
        for j in 1..base {
            let Some(five) = loop_start.checked_sub(j) else {
                return Ok(None);
            };
            let three = loop_end + j;
            match (bytes.get(five).copied(), bytes.get(three).copied()) {
                (Some(b'('), Some(b')')) => {
                    if partner_of(structure, five)? == Some(three) {
                        return Ok(Some(-(j as isize)));
                    }
                    // Bonded, but to somewhere else entirely.
                    return Ok(None);
                }
                (Some(b'.'), Some(b'.')) => {}
                _ => return Ok(None),
            }
        }
        Ok(Some(0))
    } else {
        // Extended stem: walk outward while intact pairs continue.
        let mut j = 0usize;
        loop {
            let five = loop_start + j + 1;
            let Some(three) = loop_end.checked_sub(j + 1) else {
                break;
            };
            if bytes.get(five) != Some(&b'(') || bytes.get(three) != Some(&b')') {
                break;
            }
            if partner_of(structure, loop_start + j)? != Some(loop_end - j) {
                break;
            }
            j += 1;
        }
        Ok(Some(j as isize))
    }
}

/// Is index `i` inside a reduced-stem window, i.e. a position the
/// reference expects to be paired but the candidate legitimately left
/// unpaired?
fn in_reduced_window(layout: &Layout, modification: [isize; 2], i: usize) -> bool {
    for stem in 0..2 {
        if modification[stem] >= 0 {
            continue;
        }
        let j = (-modification[stem]) as usize;
        let (loop_start, loop_end) = layout.boundaries[stem];
        if (loop_start.saturating_sub(j - 1)..=loop_start).contains(&i)
            || (loop_end..=loop_end + j - 1).contains(&i)
        {
            return true;
        }
    }
    false
}

/// Exact-match validation of every part of the scaffold outside the
/// modified stem windows. The '|' placeholder in a reference part
/// matches any candidate symbol.
fn flanks_match(
    structure: &str,
    parts: &[RibozymePart],
    layout: &Layout,
    modification: [isize; 2],
) -> bool {
    let bytes = structure.as_bytes();
    for (part, &pos) in parts.iter().zip(&layout.positions) {
        for (offset, expected) in part.structure.bytes().enumerate() {
            let i = pos + offset;
            if expected == b'|' || in_reduced_window(layout, modification, i) {
                continue;
            }
            if bytes.get(i) != Some(&expected) {
                return false;
            }
        }
    }
    true
}

/// Measure how much each of the candidate's two stems deviates from the
/// reference, and validate that everything outside the tolerance
/// windows matches the reference exactly.
pub fn measure(
    sequence: &str,
    structure: &str,
    parts: &[RibozymePart],
) -> Result<Assessment, RibozymeError> {
    validate_pair(sequence, structure)?;
    let layout = Layout::resolve(sequence, parts)?;
    let base = base_stem_lengths(parts);

    let mut modification = [0isize; 2];
    for stem in 0..2 {
        let (loop_start, loop_end) = layout.boundaries[stem];
        match stem_modification(structure, loop_start, loop_end, base[stem])? {
            Some(m) => modification[stem] = m,
            None => return Ok(Assessment::Unformed),
        }
    }

    if !flanks_match(structure, parts, &layout, modification) {
        return Ok(Assessment::Unformed);
    }
    Ok(Assessment::Formed(StemReport { base, modification }))
}
