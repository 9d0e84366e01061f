//! Regression corpus generation for ERP redeem script parsers.
//!
//! A corpus is a batch of [`RedeemScript`](strata_erp_script::RedeemScript)
//! fixtures: randomly drawn ones followed by a fixed catalogue of
//! reproductions of previously found parser bugs. Batches are exported as a
//! JSON array of `{mainFed, emergencyFed, timelock, script}` records.
//!
//! ```
//! use strata_erp_corpus::{CorpusGenerator, CorpusMode, FixtureBatch, FixtureSource};
//!
//! let mut src = FixtureSource::from_seed(1);
//! let scripts = CorpusGenerator::default().generate(CorpusMode::Valid, 10, &mut src);
//! assert_eq!(scripts.len(), 11);
//!
//! let json = FixtureBatch::from_scripts(&scripts).to_json().unwrap();
//! assert!(json.starts_with('['));
//! ```

mod batch;
mod catalogue;
mod config;
mod errors;
mod generator;
mod source;

pub use batch::FixtureBatch;
pub use catalogue::{BugCatalogue, BugGenerator, BugReproduction, MSB_SET_TIMELOCK};
pub use config::{CorpusConfig, DEFAULT_ITERATIONS};
pub use errors::{CorpusError, CorpusResult};
pub use generator::{CorpusGenerator, CorpusMode, random_redeem_script};
pub use source::{FixtureRng, FixtureSource, KeySource, random_federation};
