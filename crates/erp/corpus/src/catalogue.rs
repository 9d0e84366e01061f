//! Deterministic reproductions of previously found parser bugs.
//!
//! Every batch ends with one entry per catalogue item, so a regression run
//! always exercises the known failure modes regardless of what the random
//! part of the batch happened to cover.

use strata_erp_script::RedeemScript;

use crate::{
    generator::CorpusMode,
    source::{FixtureRng, random_federation},
};

/// Timelock whose minimal encoding needs a sign padding byte.
///
/// `51691 = 0xc9eb`, the little-endian form `eb c9` has the high bit of its
/// last byte set, so it must be written as `eb c9 00`. RSKj's parser used to
/// strip that zero and read the timelock as negative.
pub const MSB_SET_TIMELOCK: u32 = 51691;

/// Builds one bug-reproducing fixture.
pub type BugGenerator = fn(&mut dyn FixtureRng) -> RedeemScript;

/// A labelled bug reproduction.
#[derive(Debug, Clone, Copy)]
pub struct BugReproduction {
    label: &'static str,
    generate: BugGenerator,
}

impl BugReproduction {
    /// Constructs a new entry.
    pub const fn new(label: &'static str, generate: BugGenerator) -> Self {
        Self { label, generate }
    }

    /// Gets the label identifying the bug.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Builds the fixture.
    pub fn reproduce(&self, src: &mut dyn FixtureRng) -> RedeemScript {
        (self.generate)(src)
    }
}

/// Valid scripts that were parsed incorrectly in the past.
const VALID_BUGS: &[BugReproduction] = &[BugReproduction::new(
    "msb-set-timelock",
    msb_set_timelock,
)];

/// Invalid scripts that were accepted in the past. None known yet.
const INVALID_BUGS: &[BugReproduction] = &[];

/// Ordered, immutable list of bug reproductions for one corpus mode.
#[derive(Debug, Clone)]
pub struct BugCatalogue {
    entries: Vec<BugReproduction>,
}

impl BugCatalogue {
    /// Constructs a catalogue from explicit entries.
    pub fn new(entries: Vec<BugReproduction>) -> Self {
        Self { entries }
    }

    /// Constructs an empty catalogue.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the built-in catalogue for `mode`.
    pub fn builtin(mode: CorpusMode) -> Self {
        let entries = match mode {
            CorpusMode::Valid => VALID_BUGS,
            CorpusMode::Invalid => INVALID_BUGS,
        };
        Self::new(entries.to_vec())
    }

    /// Gets the entries in order.
    pub fn entries(&self) -> &[BugReproduction] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by label.
    pub fn get(&self, label: &str) -> Option<&BugReproduction> {
        self.entries.iter().find(|e| e.label == label)
    }
}

fn msb_set_timelock(src: &mut dyn FixtureRng) -> RedeemScript {
    let sizes = CorpusMode::Valid.federation_sizes();
    let main = random_federation(src, sizes.clone());
    let emergency = random_federation(src, sizes);
    RedeemScript::new(main, emergency, MSB_SET_TIMELOCK)
}
