//! Multisig threshold derivation.

/// Number of keys in the emergency federation described by RSKIP201.
pub const STRICT_EMERGENCY_KEYS: usize = 4;

/// Emergency threshold given by RSKIP201's prose (3-of-4). Its pseudocode
/// disagrees, so this is only used when explicitly selected.
pub const RSKIP201_EMERGENCY_THRESHOLD: usize = 3;

/// Simple majority of `n` keys, `floor(n / 2) + 1`.
pub fn majority_threshold(n: usize) -> usize {
    n / 2 + 1
}

/// How a federation's signature threshold is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdPolicy {
    /// Threshold computed from the set size, as RSKj does.
    #[default]
    Majority,

    /// Threshold fixed by the caller regardless of set size.
    Fixed(usize),
}

impl ThresholdPolicy {
    /// The literal RSKIP201 reading for the emergency federation.
    pub const RSKIP201_EMERGENCY: Self = Self::Fixed(RSKIP201_EMERGENCY_THRESHOLD);

    /// Returns the threshold this policy assigns to a set of `n` keys.
    pub fn threshold_for(&self, n: usize) -> usize {
        match self {
            Self::Majority => majority_threshold(n),
            Self::Fixed(t) => *t,
        }
    }
}
