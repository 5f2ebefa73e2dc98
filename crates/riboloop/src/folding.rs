//! External folding collaborator.
//!
//! The matching core never folds anything itself; it only receives
//! already folded (sequence, structure) pairs. This module defines the
//! collaborator interface and a wrapper around the RNAstructure
//! command line tools.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use thiserror::Error;

/// Error type for the folding collaborator boundary.
#[derive(Error, Debug)]
pub enum FoldError {
    #[error("folding backend exited with status {0}")]
    BackendFailed(std::process::ExitStatus),

    #[error("folding backend produced no structure")]
    MissingStructure,

    #[error("folded structure length {structure} does not match sequence length {sequence}")]
    LengthMismatch { sequence: usize, structure: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Produces a minimum free energy dot-bracket structure for a sequence
/// at a given temperature (Kelvin).
pub trait FoldingEngine: Sync {
    fn fold(&self, sequence: &str, temperature: f64) -> Result<String, FoldError>;
}

/// Wrapper around RNAstructure's `Fold` and `ct2dot` tools.
///
/// Each call runs in its own scratch subdirectory so folds can proceed
/// in parallel, and cleans it up afterwards.
pub struct RnaStructureFold {
    workdir: PathBuf,
    counter: AtomicU64,
}

impl RnaStructureFold {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        RnaStructureFold {
            workdir: workdir.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl FoldingEngine for RnaStructureFold {
    fn fold(&self, sequence: &str, temperature: f64) -> Result<String, FoldError> {
        let scratch = self
            .workdir
            .join(format!("fold-{}", self.counter.fetch_add(1, Ordering::Relaxed)));
        fs::create_dir_all(&scratch)?;
        let result = fold_in(&scratch, sequence, temperature);
        let _ = fs::remove_dir_all(&scratch);
        result
    }
}

fn fold_in(
    scratch: &std::path::Path,
    sequence: &str,
    temperature: f64,
) -> Result<String, FoldError> {
    let fasta = scratch.join("candidate.fasta");
    let ct = scratch.join("candidate.ct");
    let db = scratch.join("candidate.db");

    fs::write(&fasta, format!(">candidate\n{sequence}\n"))?;

    let status = Command::new("Fold")
        .arg(&fasta)
        .arg(&ct)
        .args(["-w", "3", "-p", "100", "-t"])
        .arg(temperature.to_string())
        .status()?;
    if !status.success() {
        return Err(FoldError::BackendFailed(status));
    }

    let status = Command::new("ct2dot").arg(&ct).arg("1").arg(&db).status()?;
    if !status.success() {
        return Err(FoldError::BackendFailed(status));
    }

    let text = fs::read_to_string(&db)?;
    parse_dot_bracket(&text, sequence.len())
}

/// Pull the structure out of a `ct2dot` dot-bracket file: the energy
/// header, the sequence, then the structure on the third line.
fn parse_dot_bracket(text: &str, sequence_len: usize) -> Result<String, FoldError> {
    let structure = text
        .lines()
        .nth(2)
        .ok_or(FoldError::MissingStructure)?
        .trim()
        .to_string();
    if structure.len() != sequence_len {
        return Err(FoldError::LengthMismatch {
            sequence: sequence_len,
            structure: structure.len(),
        });
    }
    Ok(structure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dot_bracket_takes_the_third_line() {
        let text = ">ENERGY = -3.1  candidate\nGCGCAAAAGCGC\n((((....))))\n";
        assert_eq!(parse_dot_bracket(text, 12).unwrap(), "((((....))))");
    }

    #[test]
    fn test_parse_dot_bracket_without_a_structure_line() {
        assert!(matches!(
            parse_dot_bracket(">candidate\nGCGC\n", 4),
            Err(FoldError::MissingStructure)
        ));
    }

    #[test]
    fn test_parse_dot_bracket_length_mismatch() {
        let text = ">candidate\nGCGC\n((....))\n";
        assert!(matches!(
            parse_dot_bracket(text, 4),
            Err(FoldError::LengthMismatch {
                sequence: 4,
                structure: 8,
            })
        ));
    }
}
