//! Command line tool for generating ERP redeem script fixtures.
//!
//! # Warning
//!
//! This tool is intended for use in testing and development only. The keys
//! it generates are drawn from a seedable RNG and must not hold funds.

mod args;

use anyhow::Context;
use strata_erp_corpus::{CorpusGenerator, FixtureBatch, FixtureSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: args::Args = argh::from_env();
    if let Err(e) = run(args) {
        eprintln!("ERROR\n{e:?}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: args::Args) -> anyhow::Result<()> {
    let config = args.corpus_config();
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        mode = config.mode.as_str(),
        iterations = config.iterations,
        seed,
        "generating redeem scripts"
    );

    let mut src = FixtureSource::from_seed(seed);
    let scripts = CorpusGenerator::from_config(&config).generate(
        config.mode,
        config.iterations,
        &mut src,
    );
    let flagged = scripts.iter().filter(|rs| rs.is_invalid()).count();

    FixtureBatch::from_scripts(&scripts)
        .write_to(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        total = scripts.len(),
        flagged_invalid = flagged,
        output = %args.output.display(),
        "done"
    );
    Ok(())
}
