//! Low-level byte-program writer for ERP redeem scripts.
//!
//! Three primitives are exposed: raw opcodes, minimally-encoded numbers and
//! length-prefixed data pushes. The output matches Bitcoin script framing
//! byte for byte.

use bitcoin::{
    Opcode, ScriptBuf,
    opcodes::all::{
        OP_CHECKMULTISIG, OP_CSV, OP_DROP, OP_ELSE, OP_ENDIF, OP_NOTIF, OP_PUSHBYTES_0,
        OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, OP_PUSHNUM_1, OP_PUSHNUM_NEG1,
    },
};

/// Largest buffer that can be framed with a direct length byte.
const MAX_DIRECT_PUSH_LEN: usize = 75;

/// Largest number that has a dedicated `OP_PUSHNUM_N` opcode.
const MAX_PUSHNUM: i64 = 16;

/// Opcodes the ERP builder emits directly.
///
/// Push opcodes are deliberately absent, they are chosen by
/// [`ScriptEncoder::write_number`] and [`ScriptEncoder::write_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErpOpcode {
    /// `OP_NOTIF`, opens the federation branch.
    NotIf,
    /// `OP_ELSE`, opens the emergency branch.
    Else,
    /// `OP_ENDIF`, closes both branches.
    EndIf,
    /// `OP_CHECKSEQUENCEVERIFY`, enforces the relative timelock.
    CheckSequenceVerify,
    /// `OP_DROP`, discards the timelock left on the stack by CSV.
    Drop,
    /// `OP_CHECKMULTISIG`, shared terminal verification.
    CheckMultisig,
}

impl ErpOpcode {
    /// Returns the underlying Bitcoin opcode.
    pub fn to_opcode(self) -> Opcode {
        match self {
            Self::NotIf => OP_NOTIF,
            Self::Else => OP_ELSE,
            Self::EndIf => OP_ENDIF,
            Self::CheckSequenceVerify => OP_CSV,
            Self::Drop => OP_DROP,
            Self::CheckMultisig => OP_CHECKMULTISIG,
        }
    }

    /// Returns the opcode byte.
    pub fn to_u8(self) -> u8 {
        self.to_opcode().to_u8()
    }
}

/// Encodes `n` as a minimal script number.
///
/// The encoding is little-endian sign-magnitude. If the most significant byte
/// of the magnitude already has its high bit set, an extra byte is appended to
/// carry the sign (`0x00` for positive, `0x80` for negative). Zero encodes as
/// the empty vector.
pub fn encode_script_num(n: i64) -> Vec<u8> {
    encode_magnitude(n.unsigned_abs(), n < 0)
}

fn encode_magnitude(mut abs: u64, negative: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);

    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    if let Some(last) = out.last_mut() {
        if *last & 0x80 != 0 {
            out.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            *last |= 0x80;
        }
    }

    out
}

/// Growing byte program.
#[derive(Debug, Clone, Default)]
pub struct ScriptEncoder {
    buf: Vec<u8>,
}

impl ScriptEncoder {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty program with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends a single opcode byte.
    pub fn write_opcode(&mut self, code: ErpOpcode) -> &mut Self {
        self.buf.push(code.to_u8());
        self
    }

    /// Appends a number using the shortest form a script interpreter accepts.
    ///
    /// `0`, `-1` and `1..=16` use their dedicated opcodes, anything else is
    /// pushed as a minimally encoded script number (see [`encode_script_num`]).
    pub fn write_number(&mut self, n: i64) -> &mut Self {
        match n {
            0 => self.buf.push(OP_PUSHBYTES_0.to_u8()),
            -1 => self.buf.push(OP_PUSHNUM_NEG1.to_u8()),
            1..=MAX_PUSHNUM => self.buf.push(OP_PUSHNUM_1.to_u8() + (n - 1) as u8),
            _ => {
                let encoded = encode_script_num(n);
                self.write_buffer(&encoded);
            }
        }
        self
    }

    /// Appends a non-negative count, such as a threshold or a number of keys.
    ///
    /// Same encoding as [`Self::write_number`], over the full `usize` range.
    pub fn write_count(&mut self, n: usize) -> &mut Self {
        match i64::try_from(n) {
            Ok(n) => self.write_number(n),
            Err(_) => {
                // Only reachable above i64::MAX, which needs a 9-byte push.
                let encoded = encode_magnitude(n as u64, false);
                self.write_buffer(&encoded)
            }
        }
    }

    /// Appends a data push: the smallest push opcode able to frame `bytes`,
    /// followed by the bytes themselves.
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than `u32::MAX`, which no push opcode can frame.
    pub fn write_buffer(&mut self, bytes: &[u8]) -> &mut Self {
        let len = bytes.len();
        match len {
            0..=MAX_DIRECT_PUSH_LEN => self.buf.push(len as u8),
            0x4c..=0xff => {
                self.buf.push(OP_PUSHDATA1.to_u8());
                self.buf.push(len as u8);
            }
            0x100..=0xffff => {
                self.buf.push(OP_PUSHDATA2.to_u8());
                self.buf.extend_from_slice(&(len as u16).to_le_bytes());
            }
            _ => {
                let Ok(len) = u32::try_from(len) else {
                    panic!("push of {len} bytes exceeds OP_PUSHDATA4");
                };
                self.buf.push(OP_PUSHDATA4.to_u8());
                self.buf.extend_from_slice(&len.to_le_bytes());
            }
        }
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finalizes the program.
    pub fn into_script(self) -> ScriptBuf {
        ScriptBuf::from_bytes(self.buf)
    }
}
