//! ERP (Enhanced Retirement Process) redeem script compilation.
//!
//! This crate builds the two-branch multisig redeem scripts described by
//! RSKIP201 and parses them back for self-checks.
//!
//! # Script Structure
//!
//! ```text
//! OP_NOTIF
//!     <m> <federation pubkeys...> <n>
//! OP_ELSE
//!     <timelock> OP_CHECKSEQUENCEVERIFY OP_DROP
//!     <m'> <emergency pubkeys...> <n'>
//! OP_ENDIF
//! OP_CHECKMULTISIG
//! ```
//!
//! Keys in each branch are sorted by their compressed encoding, thresholds
//! default to a simple majority, and numbers use the minimal script-number
//! encoding, including the sign padding byte.
//!
//! # Examples
//!
//! ```
//! use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
//! use strata_erp_script::{RedeemScript, parse_erp_redeem_script};
//!
//! let secp = Secp256k1::signing_only();
//! let key = |b: u8| PublicKey::from_secret_key(&secp, &SecretKey::from_slice(&[b; 32]).unwrap());
//!
//! let main = vec![key(1), key(2), key(3)];
//! let emergency = vec![key(4), key(5), key(6), key(7)];
//! let rs = RedeemScript::new(main, emergency, 500);
//! assert!(!rs.is_invalid());
//!
//! let parsed = parse_erp_redeem_script(rs.script()).unwrap();
//! assert_eq!(parsed.main.threshold, 2);
//! assert_eq!(parsed.emergency.threshold, 3);
//! assert_eq!(parsed.timelock, 500);
//! ```

/// Redeem script builders.
pub mod builder;

/// Byte-level script writer.
pub mod encoder;

/// Error types for parsing.
pub mod errors;

pub mod keys;

/// ERP redeem script parser.
pub mod parser;

pub mod redeem;
pub mod threshold;

#[cfg(test)]
mod test_utils;

pub use builder::{
    build_erp_redeem_script, build_erp_redeem_script_default, build_erp_redeem_script_strict,
};
pub use encoder::{ErpOpcode, ScriptEncoder, encode_script_num};
pub use errors::ErpParseError;
pub use keys::{key_to_string, sort_public_keys};
pub use parser::{ParsedErpScript, ParsedMultisig, parse_erp_redeem_script};
pub use redeem::{RedeemScript, RedeemScriptRecord, is_structurally_valid};
pub use threshold::{ThresholdPolicy, majority_threshold};
