//! Command line driver: generate candidate ribozyme sequences, fold
//! them through RNAstructure, and excise the loops of those that match
//! the reference scaffold.

mod candidates;
mod folding;
mod screen;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use log::info;

use rz_ribozyme::ReferenceStructure;
use rz_ribozyme::SplitMode;

use crate::candidates::Scaffold;
use crate::candidates::candidate_list;
use crate::folding::FoldingEngine;
use crate::folding::RnaStructureFold;

#[derive(Parser)]
#[command(name = "riboloop", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SplitArg {
    /// Cut the loops from the reference; only the stems must form.
    ExcludeLoops,
    /// Keep the loops; candidates must reproduce them exactly.
    IncludeLoops,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate candidate sequences for an aptamer over a loop-length
    /// range, one per line on stdout.
    Generate {
        /// Aptamer sequence spliced into one of the two loops.
        #[arg(long)]
        aptamer: String,
        /// Smallest random loop size to consider.
        #[arg(long, default_value_t = 4)]
        min_loop: usize,
        /// Largest random loop size to consider.
        #[arg(long, default_value_t = 6)]
        max_loop: usize,
    },

    /// Derive and print the reference parts for a given split.
    Reference {
        #[arg(long)]
        sequence: String,
        /// Dot-bracket structure; folded via RNAstructure when omitted.
        #[arg(long)]
        structure: Option<String>,
        #[arg(long, value_enum, default_value = "exclude-loops")]
        split: SplitArg,
        /// 5' side length up to the tip of loop 2 (include-loops only).
        #[arg(long)]
        left_len: Option<usize>,
        /// Folding temperature in Kelvin.
        #[arg(long, default_value_t = 310.0)]
        temperature: f64,
        /// Scratch directory for the folding backend.
        #[arg(long, default_value = "riboloop-fold")]
        workdir: PathBuf,
    },

    /// Fold a candidate list and excise the loops of every candidate
    /// that matches the reference, as JSON lines on stdout.
    Screen {
        /// Reference ribozyme sequence.
        #[arg(long)]
        reference_sequence: String,
        /// Reference structure; folded via RNAstructure when omitted.
        #[arg(long)]
        reference_structure: Option<String>,
        #[arg(long, value_enum, default_value = "exclude-loops")]
        split: SplitArg,
        /// 5' side length up to the tip of loop 2 (include-loops only).
        #[arg(long)]
        left_len: Option<usize>,
        /// Folding temperature in Kelvin.
        #[arg(long, default_value_t = 310.0)]
        temperature: f64,
        /// File with one candidate sequence per line.
        #[arg(long)]
        candidates: PathBuf,
        /// Scratch directory for the folding backend.
        #[arg(long, default_value = "riboloop-fold")]
        workdir: PathBuf,
    },
}

fn split_mode(split: SplitArg, left_len: Option<usize>) -> Result<SplitMode> {
    match split {
        SplitArg::ExcludeLoops => Ok(SplitMode::ExcludeLoops),
        SplitArg::IncludeLoops => {
            let left_len =
                left_len.context("--left-len is required with --split include-loops")?;
            Ok(SplitMode::IncludeLoops { left_len })
        }
    }
}

/// Build the reference, folding its structure first when none was
/// supplied, and log it so the run is auditable.
fn resolve_reference(
    sequence: String,
    structure: Option<String>,
    split: SplitMode,
    engine: &dyn FoldingEngine,
    temperature: f64,
) -> Result<ReferenceStructure> {
    let structure = match structure {
        Some(structure) => structure,
        None => engine
            .fold(&sequence, temperature)
            .context("folding the reference sequence")?,
    };
    info!("reference sequence:  {sequence}");
    info!("reference structure: {structure}");
    let reference = ReferenceStructure::new(sequence, structure, split)?;
    for (index, part) in reference.parts.iter().enumerate() {
        info!("part {index}: {} / {}", part.sequence, part.structure);
    }
    Ok(reference)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            aptamer,
            min_loop,
            max_loop,
        } => {
            let scaffold = Scaffold::default();
            for candidate in candidate_list(&scaffold, &aptamer, min_loop, max_loop) {
                println!("{candidate}");
            }
        }

        Commands::Reference {
            sequence,
            structure,
            split,
            left_len,
            temperature,
            workdir,
        } => {
            let engine = RnaStructureFold::new(workdir);
            let split = split_mode(split, left_len)?;
            let reference =
                resolve_reference(sequence, structure, split, &engine, temperature)?;
            for part in &reference.parts {
                println!("{}", serde_json::to_string(&[&part.sequence, &part.structure])?);
            }
        }

        Commands::Screen {
            reference_sequence,
            reference_structure,
            split,
            left_len,
            temperature,
            candidates,
            workdir,
        } => {
            let engine = RnaStructureFold::new(workdir);
            let split = split_mode(split, left_len)?;
            let reference = resolve_reference(
                reference_sequence,
                reference_structure,
                split,
                &engine,
                temperature,
            )?;

            let list: Vec<String> = fs::read_to_string(&candidates)
                .with_context(|| format!("reading {}", candidates.display()))?
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect();

            for record in screen::screen(&list, &reference, &engine, temperature)? {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
    }
    Ok(())
}
