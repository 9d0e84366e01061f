//! End-to-end checks over seeded corpora.

#![expect(unused_crate_dependencies, reason = "deps used by the library only")]

use strata_erp_corpus::{
    CorpusGenerator, CorpusMode, FixtureBatch, FixtureSource, MSB_SET_TIMELOCK,
};
use strata_erp_script::{parse_erp_redeem_script, sort_public_keys};

#[test]
fn valid_corpus_parses_back() {
    let mut src = FixtureSource::from_seed(2024);
    let scripts = CorpusGenerator::default().generate(CorpusMode::Valid, 200, &mut src);
    assert_eq!(scripts.len(), 201);

    for rs in &scripts {
        let parsed = parse_erp_redeem_script(rs.script()).expect("valid script must parse");
        assert_eq!(parsed.main.keys, sort_public_keys(rs.main_federation()));
        assert_eq!(parsed.emergency.keys, sort_public_keys(rs.emergency_federation()));
        assert_eq!(parsed.main.threshold, rs.main_threshold());
        assert_eq!(parsed.emergency.threshold, rs.emergency_threshold());
        assert_eq!(parsed.timelock, rs.timelock());

        // 65535 is reachable from the valid draw range but outside the
        // accepted timelocks.
        assert_eq!(rs.is_invalid(), rs.timelock() == 65535);
    }

    let last = scripts.last().unwrap();
    assert_eq!(last.timelock(), MSB_SET_TIMELOCK);
}

#[test]
fn invalid_corpus_parses_back() {
    let mut src = FixtureSource::from_seed(7);
    let scripts = CorpusGenerator::default().generate(CorpusMode::Invalid, 50, &mut src);
    assert_eq!(scripts.len(), 50);

    for rs in &scripts {
        let parsed = parse_erp_redeem_script(rs.script()).expect("invalid script still parses");
        assert_eq!(parsed.timelock, rs.timelock());
        assert_eq!(parsed.main.keys.len(), rs.main_federation().len());
    }

    // With federations up to 127 keys and 32-bit timelocks, nearly every
    // draw is out of range.
    assert!(scripts.iter().filter(|rs| rs.is_invalid()).count() > 40);
}

#[test]
fn batch_file_roundtrip() {
    let mut src = FixtureSource::from_seed(31337);
    let scripts = CorpusGenerator::default().generate(CorpusMode::Valid, 25, &mut src);
    let batch = FixtureBatch::from_scripts(&scripts);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scripts.json");
    batch.write_to(&path).unwrap();

    let read = FixtureBatch::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read.len(), 26);
    assert_eq!(read, batch);

    let bug = &read.records()[25];
    assert_eq!(bug.timelock, MSB_SET_TIMELOCK);
    // <else> <push 3> eb c9 00 <csv>
    assert!(bug.script.contains("6703ebc900b2"));
}
