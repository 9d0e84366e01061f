//! Corpus generation settings.

use crate::generator::{CorpusGenerator, CorpusMode};

/// Number of random scripts generated when none is specified.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Settings for one corpus run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Kind of fixtures to generate.
    pub mode: CorpusMode,

    /// Number of random scripts, bug reproductions come on top of these.
    pub iterations: usize,

    /// Seed for the fixture source, `None` picks one at random.
    pub seed: Option<u64>,

    /// Scripts between progress messages, 0 disables them.
    pub progress_interval: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            mode: CorpusMode::Valid,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            progress_interval: CorpusGenerator::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
