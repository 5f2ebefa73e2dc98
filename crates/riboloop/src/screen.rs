//! Batch screening driver.
//!
//! Folds each candidate through the external engine, matches it against
//! the reference scaffold, and excises the loops of those that formed.
//! Every core call is a pure function over immutable inputs, so the
//! batch runs in parallel; results come back in candidate order.

use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use log::debug;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use rz_ribozyme::ReferenceStructure;
use rz_ribozyme::extract_loops;

use crate::folding::FoldingEngine;

/// One screened candidate: its fold plus the extraction verdict. Empty
/// loops with zero stem lengths mean the candidate did not form the
/// scaffold.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScreenRecord {
    pub sequence: String,
    pub structure: String,
    pub loops: [String; 2],
    pub stem_lengths: [usize; 2],
}

impl ScreenRecord {
    pub fn is_formed(&self) -> bool {
        self.stem_lengths != [0, 0]
    }
}

pub fn screen(
    candidates: &[String],
    reference: &ReferenceStructure,
    engine: &dyn FoldingEngine,
    temperature: f64,
) -> anyhow::Result<Vec<ScreenRecord>> {
    let bar = ProgressBar::new(candidates.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:50}] {pos}/{len} eta {eta}")?.progress_chars("=_"),
    );

    let records = candidates
        .par_iter()
        .map(|sequence| {
            let structure = engine.fold(sequence, temperature)?;
            let extraction = extract_loops(sequence, &structure, &reference.parts)?;
            if !extraction.is_formed() {
                debug!("candidate did not form the scaffold: {sequence}");
            }
            bar.inc(1);
            Ok(ScreenRecord {
                sequence: sequence.clone(),
                structure,
                loops: extraction.loops,
                stem_lengths: extraction.stem_lengths,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    bar.finish();

    let formed = records.iter().filter(|r| r.is_formed()).count();
    info!(
        "{formed} of {} candidates folded into the scaffold",
        records.len()
    );
    Ok(records)
}
