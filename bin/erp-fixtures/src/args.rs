//! Command line arguments for the `strata-erp-fixtures` binary.

use std::path::PathBuf;

use argh::FromArgs;
use strata_erp_corpus::{CorpusConfig, CorpusGenerator, CorpusMode, DEFAULT_ITERATIONS};

/// File the batch is written to when `--output` is not given.
const DEFAULT_OUTPUT: &str = "scripts.json";

/// Generates ERP redeem script fixtures for parser regression tests.
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct Args {
    #[argh(
        positional,
        default = "DEFAULT_ITERATIONS",
        description = "number of random scripts (default 1000)"
    )]
    pub(crate) iterations: usize,

    #[argh(
        option,
        short = 'o',
        default = "PathBuf::from(DEFAULT_OUTPUT)",
        description = "output file path (default scripts.json)"
    )]
    pub(crate) output: PathBuf,

    #[argh(switch, description = "generate invalid scripts", short = 'i')]
    pub(crate) invalid: bool,

    #[argh(option, description = "seed for reproducible batches (default random)")]
    pub(crate) seed: Option<u64>,

    #[argh(
        option,
        default = "CorpusGenerator::DEFAULT_PROGRESS_INTERVAL",
        description = "scripts between progress messages, 0 disables (default 100)"
    )]
    pub(crate) progress: usize,
}

impl Args {
    /// Converts the arguments into a corpus config.
    pub(crate) fn corpus_config(&self) -> CorpusConfig {
        CorpusConfig {
            mode: if self.invalid {
                CorpusMode::Invalid
            } else {
                CorpusMode::Valid
            },
            iterations: self.iterations,
            seed: self.seed,
            progress_interval: self.progress,
        }
    }
}
