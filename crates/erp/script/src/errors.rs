use thiserror::Error;

/// Errors that can occur while parsing an ERP redeem script.
#[derive(Debug, Error)]
pub enum ErpParseError {
    /// The script could not be split into instructions.
    #[error("malformed instruction: {0}")]
    MalformedInstruction(#[from] bitcoin::script::Error),

    /// The script ended before the named element.
    #[error("script ended early, expected {0}")]
    UnexpectedEnd(&'static str),

    /// An opcode other than the expected one was found.
    #[error("expected {expected}, found {found}")]
    UnexpectedInstruction {
        /// Element the parser was looking for.
        expected: &'static str,
        /// Debug form of what was found instead.
        found: String,
    },

    /// A number was pushed with more bytes than necessary.
    #[error("non-minimal number encoding {0:02x?}")]
    NonMinimalNumber(Vec<u8>),

    /// A number push was longer than the parser can represent.
    #[error("number push too long ({0} bytes)")]
    NumberTooLong(usize),

    /// A threshold or key count was negative.
    #[error("negative {what} ({value})")]
    NegativeCount {
        /// Which element was negative.
        what: &'static str,
        /// Decoded value.
        value: i64,
    },

    /// The timelock decoded as a negative number, typically because the sign
    /// padding byte is missing.
    #[error("negative timelock ({0})")]
    NegativeTimelock(i64),

    /// The timelock does not fit in 32 bits.
    #[error("timelock out of range ({0})")]
    TimelockOutOfRange(i64),

    /// A 33-byte push was not a valid compressed public key.
    #[error("invalid pubkey: {0}")]
    InvalidPubkey(#[from] bitcoin::secp256k1::Error),

    /// The key count pushed after a key list disagrees with the list.
    #[error("declared {declared} keys but found {found}")]
    KeyCountMismatch {
        /// Count pushed in the script.
        declared: usize,
        /// Keys actually present.
        found: usize,
    },

    /// Instructions were found after `OP_CHECKMULTISIG`.
    #[error("trailing instructions after OP_CHECKMULTISIG")]
    TrailingInstructions,
}
