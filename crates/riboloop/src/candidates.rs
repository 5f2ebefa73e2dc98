//! Candidate sequence generation.
//!
//! Enumerates every loop sequence within a length range and splices
//! each one, together with an aptamer, into the two decorative loops of
//! the hammerhead scaffold.

use itertools::Itertools;

pub static NUCLEOTIDES: [char; 4] = ['A', 'U', 'C', 'G'];

/// The fixed scaffold a candidate is assembled around: the sTRSV
/// hammerhead ribozyme flanked by insulator sequences.
#[derive(Debug, Clone)]
pub struct Scaffold {
    pub five_insulator: String,
    pub five_arm: String,
    pub core: String,
    pub three_arm: String,
    pub three_insulator: String,
}

impl Default for Scaffold {
    fn default() -> Self {
        Scaffold {
            five_insulator: "GGGAAACAAACAAA".into(),
            five_arm: "GCUGUCACCGGA".into(),
            core: "UCCGGUCUGAUGAGUCC".into(),
            three_arm: "GGACGAAACAGC".into(),
            three_insulator: "AAAAAGAAAAAUAAAAA".into(),
        }
    }
}

impl Scaffold {
    /// The two candidate placements for one random loop: the aptamer in
    /// loop 2 with the random loop in loop 1, and vice versa.
    pub fn assemble(&self, aptamer: &str, random_loop: &str) -> [String; 2] {
        let place = |loop1: &str, loop2: &str| {
            format!(
                "{}{}{}{}{}{}{}",
                self.five_insulator,
                self.five_arm,
                loop1,
                self.core,
                loop2,
                self.three_arm,
                self.three_insulator
            )
        };
        [place(random_loop, aptamer), place(aptamer, random_loop)]
    }
}

/// Every sequence over {A, U, C, G} with length in `min..=max`.
pub fn loop_sequences(min: usize, max: usize) -> Vec<String> {
    (min..=max)
        .flat_map(|len| {
            (0..len)
                .map(|_| NUCLEOTIDES.iter().copied())
                .multi_cartesian_product()
                .map(|nucleotides| nucleotides.into_iter().collect::<String>())
        })
        .collect()
}

/// The full candidate list for one aptamer over a loop-length range.
pub fn candidate_list(scaffold: &Scaffold, aptamer: &str, min: usize, max: usize) -> Vec<String> {
    loop_sequences(min, max)
        .iter()
        .flat_map(|random_loop| scaffold.assemble(aptamer, random_loop))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_sequence_counts() {
        assert_eq!(loop_sequences(1, 1).len(), 4);
        assert_eq!(loop_sequences(1, 2).len(), 4 + 16);
        assert_eq!(loop_sequences(3, 3).len(), 64);
    }

    #[test]
    fn test_loop_sequences_cover_the_alphabet() {
        let loops = loop_sequences(1, 1);
        assert_eq!(loops, ["A", "U", "C", "G"]);
    }

    #[test]
    fn test_assemble_places_the_loop_on_both_sides() {
        let scaffold = Scaffold::default();
        let [first, second] = scaffold.assemble("AUGC", "UUU");
        assert!(first.contains("GCUGUCACCGGAUUUUCCGGUCUGAUGAGUCCAUGC"));
        assert!(second.contains("GCUGUCACCGGAAUGCUCCGGUCUGAUGAGUCCUUU"));
        assert!(first.starts_with("GGGAAACAAACAAA"));
        assert!(first.ends_with("AAAAAGAAAAAUAAAAA"));
    }

    #[test]
    fn test_candidate_list_has_two_placements_per_loop() {
        let scaffold = Scaffold::default();
        assert_eq!(candidate_list(&scaffold, "AUGC", 1, 1).len(), 8);
    }
}
