use std::iter::Peekable;

use bitcoin::{
    Opcode, Script,
    opcodes::all::{
        OP_CHECKMULTISIG, OP_CSV, OP_DROP, OP_ELSE, OP_ENDIF, OP_NOTIF, OP_PUSHNUM_1,
        OP_PUSHNUM_16, OP_PUSHNUM_NEG1,
    },
    script::{Instruction, Instructions},
    secp256k1::PublicKey,
};

use crate::{errors::ErpParseError, keys::COMPRESSED_PUBKEY_LEN};

/// Longest number push the parser decodes.
const MAX_NUM_LEN: usize = 8;

/// One multisig branch of a parsed ERP script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMultisig {
    /// Signatures required.
    pub threshold: usize,

    /// Keys in the order they were pushed.
    pub keys: Vec<PublicKey>,
}

impl ParsedMultisig {
    /// Whether the keys appear in canonical (byte-lexicographic) order.
    pub fn keys_sorted(&self) -> bool {
        self.keys
            .windows(2)
            .all(|pair| pair[0].serialize() <= pair[1].serialize())
    }
}

/// Contents recovered from an ERP redeem script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedErpScript {
    /// Federation branch.
    pub main: ParsedMultisig,

    /// Emergency branch.
    pub emergency: ParsedMultisig,

    /// Relative timelock guarding the emergency branch.
    pub timelock: u32,
}

/// Parses an ERP redeem script back into its branches and timelock.
///
/// Numbers must be minimally encoded, which includes writing `-1` and
/// `1..=16` with their dedicated opcodes rather than as data. A timelock written without its sign
/// padding byte decodes as negative and is rejected with
/// [`ErpParseError::NegativeTimelock`].
///
/// # Errors
///
/// Returns [`ErpParseError`] naming the first element that is missing or
/// malformed.
pub fn parse_erp_redeem_script(script: &Script) -> Result<ParsedErpScript, ErpParseError> {
    let mut instructions = script.instructions().peekable();

    expect_op(&mut instructions, OP_NOTIF, "OP_NOTIF")?;
    let main = parse_multisig_section(&mut instructions)?;

    expect_op(&mut instructions, OP_ELSE, "OP_ELSE")?;
    let timelock = parse_timelock(&mut instructions)?;
    expect_op(&mut instructions, OP_CSV, "OP_CHECKSEQUENCEVERIFY")?;
    expect_op(&mut instructions, OP_DROP, "OP_DROP")?;
    let emergency = parse_multisig_section(&mut instructions)?;

    expect_op(&mut instructions, OP_ENDIF, "OP_ENDIF")?;
    expect_op(&mut instructions, OP_CHECKMULTISIG, "OP_CHECKMULTISIG")?;

    if instructions.next().is_some() {
        return Err(ErpParseError::TrailingInstructions);
    }

    Ok(ParsedErpScript {
        main,
        emergency,
        timelock,
    })
}

/// Decodes a minimally encoded script number.
///
/// # Errors
///
/// If the encoding is longer than 8 bytes or not minimal.
pub fn decode_script_num(bytes: &[u8]) -> Result<i64, ErpParseError> {
    if bytes.len() > MAX_NUM_LEN {
        return Err(ErpParseError::NumberTooLong(bytes.len()));
    }

    let Some((&last, rest)) = bytes.split_last() else {
        return Ok(0);
    };

    // The last byte may only be a bare sign byte if the one before it would
    // otherwise carry the sign bit.
    if last & 0x7f == 0 && rest.last().is_none_or(|b| b & 0x80 == 0) {
        return Err(ErpParseError::NonMinimalNumber(bytes.to_vec()));
    }

    let magnitude = rest
        .iter()
        .rev()
        .fold(u64::from(last & 0x7f), |acc, b| (acc << 8) | u64::from(*b));
    let value = magnitude as i64;

    Ok(if last & 0x80 != 0 { -value } else { value })
}

type Instrs<'a> = Peekable<Instructions<'a>>;

fn next_instruction<'a>(
    instructions: &mut Instrs<'a>,
    expected: &'static str,
) -> Result<Instruction<'a>, ErpParseError> {
    match instructions.next() {
        Some(inst) => Ok(inst?),
        None => Err(ErpParseError::UnexpectedEnd(expected)),
    }
}

fn expect_op(
    instructions: &mut Instrs<'_>,
    op: Opcode,
    expected: &'static str,
) -> Result<(), ErpParseError> {
    match next_instruction(instructions, expected)? {
        Instruction::Op(found) if found == op => Ok(()),
        other => Err(ErpParseError::UnexpectedInstruction {
            expected,
            found: format!("{other:?}"),
        }),
    }
}

fn read_number(
    instructions: &mut Instrs<'_>,
    expected: &'static str,
) -> Result<i64, ErpParseError> {
    match next_instruction(instructions, expected)? {
        Instruction::PushBytes(bytes) => {
            let value = decode_script_num(bytes.as_bytes())?;
            // These have a single-opcode form.
            if matches!(value, -1 | 1..=16) {
                return Err(ErpParseError::NonMinimalNumber(bytes.as_bytes().to_vec()));
            }
            Ok(value)
        }
        Instruction::Op(op) if op == OP_PUSHNUM_NEG1 => Ok(-1),
        Instruction::Op(op)
            if (OP_PUSHNUM_1.to_u8()..=OP_PUSHNUM_16.to_u8()).contains(&op.to_u8()) =>
        {
            Ok(i64::from(op.to_u8() - OP_PUSHNUM_1.to_u8() + 1))
        }
        other => Err(ErpParseError::UnexpectedInstruction {
            expected,
            found: format!("{other:?}"),
        }),
    }
}

fn read_count(instructions: &mut Instrs<'_>, what: &'static str) -> Result<usize, ErpParseError> {
    let value = read_number(instructions, what)?;
    usize::try_from(value).map_err(|_| ErpParseError::NegativeCount { what, value })
}

fn parse_timelock(instructions: &mut Instrs<'_>) -> Result<u32, ErpParseError> {
    let value = read_number(instructions, "timelock")?;
    if value < 0 {
        return Err(ErpParseError::NegativeTimelock(value));
    }
    u32::try_from(value).map_err(|_| ErpParseError::TimelockOutOfRange(value))
}

/// Parses `<threshold> <keys...> <count>`.
fn parse_multisig_section(instructions: &mut Instrs<'_>) -> Result<ParsedMultisig, ErpParseError> {
    let threshold = read_count(instructions, "threshold")?;

    let mut keys = Vec::new();
    while let Some(Ok(Instruction::PushBytes(bytes))) = instructions.next_if(|inst| {
        matches!(inst, Ok(Instruction::PushBytes(b)) if b.len() == COMPRESSED_PUBKEY_LEN)
    }) {
        keys.push(PublicKey::from_slice(bytes.as_bytes())?);
    }

    let declared = read_count(instructions, "key count")?;
    if declared != keys.len() {
        return Err(ErpParseError::KeyCountMismatch {
            declared,
            found: keys.len(),
        });
    }

    Ok(ParsedMultisig { threshold, keys })
}
