//! Redeem script fixtures with self-assessed structural validity.

use std::ops::RangeInclusive;

use bitcoin::{Script, ScriptBuf, secp256k1::PublicKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    builder::build_erp_redeem_script,
    keys::key_to_string,
    threshold::majority_threshold,
};

/// Federation sizes accepted by `OP_CHECKMULTISIG` in RSKj (bitcoinj caps the
/// key count below 16).
pub const VALID_FEDERATION_SIZES: RangeInclusive<usize> = 1..=15;

/// Relative timelocks accepted by RSKj, strictly inside the 16-bit range.
pub const VALID_TIMELOCKS: RangeInclusive<u32> = 1..=65534;

/// A compiled ERP redeem script along with the inputs it was built from.
///
/// Construction never fails: inputs outside the accepted bounds still get a
/// compiled program but are flagged through [`RedeemScript::is_invalid`], so
/// they can serve as negative fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScript {
    main_federation: Vec<PublicKey>,
    emergency_federation: Vec<PublicKey>,
    timelock: u32,
    main_threshold: usize,
    emergency_threshold: usize,
    script: ScriptBuf,
    invalid: bool,
}

impl RedeemScript {
    /// Compiles a redeem script, deriving both thresholds as a simple majority.
    pub fn new(
        main_federation: Vec<PublicKey>,
        emergency_federation: Vec<PublicKey>,
        timelock: u32,
    ) -> Self {
        let main_threshold = majority_threshold(main_federation.len());
        let emergency_threshold = majority_threshold(emergency_federation.len());
        let script = build_erp_redeem_script(
            main_threshold,
            &main_federation,
            emergency_threshold,
            &emergency_federation,
            timelock,
        );

        let invalid = !is_structurally_valid(
            main_federation.len(),
            emergency_federation.len(),
            timelock,
        );
        if invalid {
            debug!(
                main = main_federation.len(),
                emergency = emergency_federation.len(),
                timelock,
                "redeem script outside accepted bounds"
            );
        }

        Self {
            main_federation,
            emergency_federation,
            timelock,
            main_threshold,
            emergency_threshold,
            script,
            invalid,
        }
    }

    /// Gets the federation keys, in input order.
    pub fn main_federation(&self) -> &[PublicKey] {
        &self.main_federation
    }

    /// Gets the emergency federation keys, in input order.
    pub fn emergency_federation(&self) -> &[PublicKey] {
        &self.emergency_federation
    }

    /// Gets the relative timelock guarding the emergency branch.
    pub fn timelock(&self) -> u32 {
        self.timelock
    }

    /// Gets the signatures required on the federation branch.
    pub fn main_threshold(&self) -> usize {
        self.main_threshold
    }

    /// Gets the signatures required on the emergency branch.
    pub fn emergency_threshold(&self) -> usize {
        self.emergency_threshold
    }

    /// Gets the compiled program.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Whether any input was outside the accepted bounds.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Produces the record written to fixture batches.
    pub fn export(&self) -> RedeemScriptRecord {
        RedeemScriptRecord {
            main_fed: self.main_federation.iter().map(key_to_string).collect(),
            emergency_fed: self.emergency_federation.iter().map(key_to_string).collect(),
            timelock: self.timelock,
            script: hex::encode(self.script.as_bytes()),
        }
    }
}

/// Checks federation sizes and timelock against [`VALID_FEDERATION_SIZES`]
/// and [`VALID_TIMELOCKS`].
pub fn is_structurally_valid(main_size: usize, emergency_size: usize, timelock: u32) -> bool {
    VALID_FEDERATION_SIZES.contains(&main_size)
        && VALID_FEDERATION_SIZES.contains(&emergency_size)
        && VALID_TIMELOCKS.contains(&timelock)
}

/// Exported form of a [`RedeemScript`].
///
/// Keys are in their input order (not sorted), as lowercase compressed hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemScriptRecord {
    /// Federation keys.
    pub main_fed: Vec<String>,

    /// Emergency federation keys.
    pub emergency_fed: Vec<String>,

    /// Relative timelock.
    pub timelock: u32,

    /// Hex of the compiled program.
    pub script: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::build_erp_redeem_script_default,
        test_utils::{test_keys, test_keys_from},
    };

    fn redeem(main: usize, emergency: usize, timelock: u32) -> RedeemScript {
        RedeemScript::new(test_keys(main), test_keys_from(150, emergency), timelock)
    }

    #[test]
    fn test_in_bounds_is_valid() {
        for (main, emergency, timelock) in [(1, 1, 1), (15, 15, 65534), (3, 4, 500), (7, 2, 51691)]
        {
            assert!(!redeem(main, emergency, timelock).is_invalid());
        }
    }

    #[test]
    fn test_out_of_bounds_is_invalid() {
        let cases = [
            (0, 4, 500),
            (16, 4, 500),
            (100, 4, 500),
            (3, 0, 500),
            (3, 16, 500),
            (3, 4, 0),
            (3, 4, 65535),
            (3, 4, u32::MAX),
        ];
        for (main, emergency, timelock) in cases {
            let rs = redeem(main, emergency, timelock);
            assert!(rs.is_invalid(), "{main}/{emergency}/{timelock} should be invalid");
            assert!(!rs.script().is_empty(), "invalid fixtures still carry a program");
        }
    }

    #[test]
    fn test_thresholds_and_program() {
        let rs = redeem(3, 4, 500);
        assert_eq!(rs.main_threshold(), 2);
        assert_eq!(rs.emergency_threshold(), 3);
        assert_eq!(
            rs.script(),
            build_erp_redeem_script_default(rs.main_federation(), rs.emergency_federation(), 500)
                .as_script()
        );
    }

    #[test]
    fn test_export_keeps_input_order() {
        let mut main = test_keys(3);
        main.reverse();
        let emergency = test_keys_from(150, 2);
        let rs = RedeemScript::new(main.clone(), emergency.clone(), 1234);

        let record = rs.export();
        let expected_main: Vec<_> = main.iter().map(|k| k.to_string()).collect();
        let expected_emergency: Vec<_> = emergency.iter().map(|k| k.to_string()).collect();
        assert_eq!(record.main_fed, expected_main);
        assert_eq!(record.emergency_fed, expected_emergency);
        assert_eq!(record.timelock, 1234);
        assert_eq!(record.script, hex::encode(rs.script().as_bytes()));
    }

    #[test]
    fn test_export_json_field_names() {
        let record = redeem(1, 1, 300).export();
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["emergencyFed", "mainFed", "script", "timelock"]);
        assert_eq!(obj["timelock"], 300);

        let back: RedeemScriptRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
