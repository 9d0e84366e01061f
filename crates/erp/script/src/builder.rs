use bitcoin::{ScriptBuf, secp256k1::PublicKey};

use crate::{
    encoder::{ErpOpcode, ScriptEncoder},
    keys::{COMPRESSED_PUBKEY_LEN, sort_public_keys},
    threshold::{STRICT_EMERGENCY_KEYS, ThresholdPolicy, majority_threshold},
};

/// Builds an ERP redeem script with explicit thresholds.
///
/// Creates a script with the structure:
/// ```text
/// OP_NOTIF
///     <main_threshold>
///     <main_pubkey_0> ... <main_pubkey_n>
///     <n>
/// OP_ELSE
///     <timelock>
///     OP_CHECKSEQUENCEVERIFY
///     OP_DROP
///     <emergency_threshold>
///     <emergency_pubkey_0> ... <emergency_pubkey_m>
///     <m>
/// OP_ENDIF
/// OP_CHECKMULTISIG
/// ```
///
/// Both key sets are sorted with [`sort_public_keys`] before being written.
/// Each branch leaves `threshold, keys, count` on the stack so the single
/// trailing `OP_CHECKMULTISIG` verifies whichever path was taken.
///
/// No bounds are checked here, out-of-range inputs still produce a program.
pub fn build_erp_redeem_script(
    main_threshold: usize,
    main_keys: &[PublicKey],
    emergency_threshold: usize,
    emergency_keys: &[PublicKey],
    timelock: u32,
) -> ScriptBuf {
    let capacity = estimated_len(main_keys.len(), emergency_keys.len());
    let mut enc = ScriptEncoder::with_capacity(capacity);

    enc.write_opcode(ErpOpcode::NotIf);
    write_multisig_section(&mut enc, main_threshold, main_keys);

    enc.write_opcode(ErpOpcode::Else);
    enc.write_number(i64::from(timelock))
        .write_opcode(ErpOpcode::CheckSequenceVerify)
        .write_opcode(ErpOpcode::Drop);
    write_multisig_section(&mut enc, emergency_threshold, emergency_keys);

    enc.write_opcode(ErpOpcode::EndIf)
        .write_opcode(ErpOpcode::CheckMultisig);

    enc.into_script()
}

/// Builds an ERP redeem script with both thresholds set to a simple majority
/// of their federation, which is what RSKj hardcodes.
pub fn build_erp_redeem_script_default(
    main_keys: &[PublicKey],
    emergency_keys: &[PublicKey],
    timelock: u32,
) -> ScriptBuf {
    build_erp_redeem_script(
        majority_threshold(main_keys.len()),
        main_keys,
        majority_threshold(emergency_keys.len()),
        emergency_keys,
        timelock,
    )
}

/// Builds an ERP redeem script only if the emergency federation has exactly
/// [`STRICT_EMERGENCY_KEYS`] members, as RSKIP201 prescribes.
///
/// Returns `None` when the precondition fails, callers are expected to skip
/// the fixture rather than treat it as an error. The emergency threshold is
/// taken from `emergency_policy`; with [`ThresholdPolicy::Majority`] the
/// result is identical to [`build_erp_redeem_script_default`].
pub fn build_erp_redeem_script_strict(
    main_keys: &[PublicKey],
    emergency_keys: &[PublicKey],
    timelock: u32,
    emergency_policy: ThresholdPolicy,
) -> Option<ScriptBuf> {
    if emergency_keys.len() != STRICT_EMERGENCY_KEYS {
        return None;
    }

    let script = match emergency_policy {
        ThresholdPolicy::Majority => {
            build_erp_redeem_script_default(main_keys, emergency_keys, timelock)
        }
        ThresholdPolicy::Fixed(_) => build_erp_redeem_script(
            majority_threshold(main_keys.len()),
            main_keys,
            emergency_policy.threshold_for(emergency_keys.len()),
            emergency_keys,
            timelock,
        ),
    };
    Some(script)
}

/// Writes `<threshold> <sorted keys...> <count>`, the multisig operands without
/// the verifying opcode.
fn write_multisig_section(enc: &mut ScriptEncoder, threshold: usize, keys: &[PublicKey]) {
    enc.write_count(threshold);
    for key in sort_public_keys(keys) {
        enc.write_buffer(&key.serialize());
    }
    enc.write_count(keys.len());
}

/// Upper bound on the program size for the given federation sizes.
fn estimated_len(main: usize, emergency: usize) -> usize {
    // 6 opcodes, 4 numbers of at most 2 bytes, timelock of at most 6 bytes.
    6 + 4 * 2 + 6 + (main + emergency) * (COMPRESSED_PUBKEY_LEN + 1)
}
