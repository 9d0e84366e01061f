//! Random corpus generation.

use std::ops::Range;

use strata_erp_script::RedeemScript;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    catalogue::BugCatalogue,
    config::CorpusConfig,
    source::{FixtureRng, random_federation},
};

/// Which kind of fixtures to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CorpusMode {
    /// Fixtures inside the bounds `OP_CHECKMULTISIG` and CSV accept.
    #[default]
    Valid,

    /// Fixtures drawn from much wider bounds, mostly out of range.
    Invalid,
}

impl CorpusMode {
    /// Range federation sizes are drawn from.
    pub fn federation_sizes(self) -> Range<usize> {
        match self {
            // 16 is the most keys bitcoinj allows in a multisig.
            Self::Valid => 1..16,
            Self::Invalid => 1..128,
        }
    }

    /// Range timelocks are drawn from.
    pub fn timelocks(self) -> Range<u32> {
        match self {
            Self::Valid => 256..65536,
            Self::Invalid => 0..u32::MAX,
        }
    }

    /// Short name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

/// Builds redeem script batches.
#[derive(Debug, Clone)]
pub struct CorpusGenerator {
    valid_bugs: BugCatalogue,
    invalid_bugs: BugCatalogue,
    progress_interval: usize,
}

impl Default for CorpusGenerator {
    fn default() -> Self {
        Self::new(
            BugCatalogue::builtin(CorpusMode::Valid),
            BugCatalogue::builtin(CorpusMode::Invalid),
        )
    }
}

impl CorpusGenerator {
    /// Default number of scripts between progress messages.
    pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

    /// Constructs a generator with explicit catalogues.
    pub fn new(valid_bugs: BugCatalogue, invalid_bugs: BugCatalogue) -> Self {
        Self {
            valid_bugs,
            invalid_bugs,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Constructs a generator with the built-in catalogues and the config's
    /// progress interval.
    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::default().with_progress_interval(config.progress_interval)
    }

    /// Sets how often progress is logged, 0 disables it.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Gets the catalogue appended to batches of `mode`.
    pub fn catalogue(&self, mode: CorpusMode) -> &BugCatalogue {
        match mode {
            CorpusMode::Valid => &self.valid_bugs,
            CorpusMode::Invalid => &self.invalid_bugs,
        }
    }

    /// Generates `count` random scripts followed by the mode's bug
    /// reproductions.
    ///
    /// Integer draws and keys both come from `src`, so the batch is fully
    /// determined by its state.
    pub fn generate<S: FixtureRng>(
        &self,
        mode: CorpusMode,
        count: usize,
        src: &mut S,
    ) -> Vec<RedeemScript> {
        let bugs = self.catalogue(mode);
        let mut scripts = Vec::with_capacity(count + bugs.len());

        for i in 0..count {
            scripts.push(random_redeem_script(mode, src));
            if self.progress_interval != 0 && i % self.progress_interval == 0 {
                info!(mode = mode.as_str(), progress = i, total = count, "generating");
            }
        }

        for bug in bugs.entries() {
            debug!(label = bug.label(), "appending bug reproduction");
            scripts.push(bug.reproduce(src));
        }

        scripts
    }
}

/// Draws federations and a timelock from `mode`'s ranges and compiles them.
pub fn random_redeem_script<S>(mode: CorpusMode, src: &mut S) -> RedeemScript
where
    S: FixtureRng + ?Sized,
{
    let sizes = mode.federation_sizes();
    let timelock = src.gen_range(mode.timelocks());
    let main = random_federation(src, sizes.clone());
    let emergency = random_federation(src, sizes);
    RedeemScript::new(main, emergency, timelock)
}
