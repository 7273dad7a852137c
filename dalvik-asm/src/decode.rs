//! Decodes a single stream position into a [`DecodedInstruction`], and
//! recognizes the three data tables that Dalvik disguises as a `nop`
//! (packed-switch, sparse-switch, and fill-array-data payloads).

use crate::opcode::Opcode;

/// A fully decoded instruction: the opcode plus up to three scalar operand
/// slots, a 64-bit wide operand (for `const-wide` and 32-bit branch/pool
/// offsets), and up to five argument-register numbers for the variable-arity
/// invoke/`filled-new-array` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// The decoded opcode.
    pub opcode: Opcode,
    /// Width of this instruction in 16-bit code units.
    pub width: u16,
    /// First operand slot — usually the destination register.
    pub v_a: u32,
    /// Second operand slot — source register, literal, or branch offset.
    pub v_b: u32,
    /// Third operand slot — used by three-register and two-register+literal
    /// formats.
    pub v_c: u32,
    /// 64-bit operand: `const-wide` literals and 32-bit branch/pool offsets
    /// that don't fit in `v_b`.
    pub wide: u64,
    /// Number of valid entries in `args` (0 for non-invoke-shaped formats).
    pub arg_count: u8,
    /// Argument register numbers for `35c`/`35ms`/`35mi` forms (register
    /// numbers repeated contiguously for `3rc`/`3rms`/`3rmi` ranges, with
    /// `args[0]` holding the first register and `arg_count` the run length).
    pub args: [u16; 5],
}

impl DecodedInstruction {
    /// `true` if this instruction's format carries a range (`3rc`-family)
    /// argument list rather than up to five discrete registers.
    #[must_use]
    pub fn is_range(&self) -> bool {
        self.opcode.format().is_range_invoke()
    }
}

/// Errors that can occur while decoding a single instruction. These are
/// `StructuralReject` causes in the verifier; the decoder itself
/// does not distinguish reject categories, it just reports what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// `code` did not have enough remaining code units for this opcode's
    /// format.
    #[error("truncated instruction at code unit {0}")]
    Truncated(usize),
    /// The opcode's format is reserved for future extended instructions and
    /// has no decode rule.
    #[error("format has no assigned opcode and cannot be decoded")]
    UnsupportedFormat,
}

fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Decode the instruction starting at code-unit offset `pc`.
///
/// Does not interpret packed-switch/sparse-switch/array-data payloads: the
/// caller must check [`classify_nop`] first when `code[pc]` decodes to
/// opcode `0x00` (`nop`), since those tables are disguised as a `nop` with a
/// signature in the following bytes.
pub fn decode(code: &[u16], pc: usize) -> Result<DecodedInstruction, DecodeError> {
    let unit0 = *code.get(pc).ok_or(DecodeError::Truncated(pc))?;
    let opcode = Opcode::from_u8((unit0 & 0xff) as u8);
    let byte1 = (unit0 >> 8) as u8;
    let fmt = opcode.format();
    let width = fmt.width_in_code_units();

    let unit = |i: usize| -> Result<u16, DecodeError> {
        code.get(pc + i).copied().ok_or(DecodeError::Truncated(pc))
    };

    let mut d = DecodedInstruction {
        opcode,
        width,
        v_a: 0,
        v_b: 0,
        v_c: 0,
        wide: 0,
        arg_count: 0,
        args: [0; 5],
    };

    use crate::format::Format::*;
    match fmt {
        _00x => {}
        _10x => {}
        _12x => {
            d.v_a = u32::from(byte1 & 0x0f);
            d.v_b = u32::from(byte1 >> 4);
        }
        _11n => {
            d.v_a = u32::from(byte1 & 0x0f);
            d.v_b = sign_extend(u32::from(byte1 >> 4), 4) as u32;
        }
        _11x => {
            d.v_a = u32::from(byte1);
        }
        _10t => {
            d.wide = i64::from(sign_extend(u32::from(byte1), 8)) as u64;
        }
        _20bc => {
            d.v_a = u32::from(byte1);
            d.v_b = u32::from(unit(1)?);
        }
        _20t => {
            d.wide = i64::from(sign_extend(u32::from(unit(1)?), 16)) as u64;
        }
        _22x => {
            d.v_a = u32::from(byte1);
            d.v_b = u32::from(unit(1)?);
        }
        _21t => {
            d.v_a = u32::from(byte1);
            d.wide = i64::from(sign_extend(u32::from(unit(1)?), 16)) as u64;
        }
        _21s => {
            d.v_a = u32::from(byte1);
            d.v_b = sign_extend(u32::from(unit(1)?), 16) as u32;
        }
        _21h => {
            d.v_a = u32::from(byte1);
            d.v_b = u32::from(unit(1)?);
        }
        _21c => {
            d.v_a = u32::from(byte1);
            d.v_b = u32::from(unit(1)?);
        }
        _23x => {
            d.v_a = u32::from(byte1);
            let u1 = unit(1)?;
            d.v_b = u32::from(u1 & 0xff);
            d.v_c = u32::from(u1 >> 8);
        }
        _22b => {
            d.v_a = u32::from(byte1);
            let u1 = unit(1)?;
            d.v_b = u32::from(u1 & 0xff);
            d.v_c = sign_extend(u32::from(u1 >> 8), 8) as u32;
        }
        _22t => {
            d.v_a = u32::from(byte1 & 0x0f);
            d.v_b = u32::from(byte1 >> 4);
            d.wide = i64::from(sign_extend(u32::from(unit(1)?), 16)) as u64;
        }
        _22s => {
            d.v_a = u32::from(byte1 & 0x0f);
            d.v_b = u32::from(byte1 >> 4);
            d.v_c = sign_extend(u32::from(unit(1)?), 16) as u32;
        }
        _22c | _22cs => {
            d.v_a = u32::from(byte1 & 0x0f);
            d.v_b = u32::from(byte1 >> 4);
            d.v_c = u32::from(unit(1)?);
        }
        _30t => {
            let lo = u32::from(unit(1)?);
            let hi = u32::from(unit(2)?);
            d.wide = i64::from((hi << 16 | lo) as i32) as u64;
        }
        _32x => {
            d.v_a = u32::from(unit(1)?);
            d.v_b = u32::from(unit(2)?);
        }
        _31i => {
            d.v_a = u32::from(byte1);
            let lo = u32::from(unit(1)?);
            let hi = u32::from(unit(2)?);
            d.wide = i64::from((hi << 16 | lo) as i32) as u64;
        }
        _31t => {
            d.v_a = u32::from(byte1);
            let lo = u32::from(unit(1)?);
            let hi = u32::from(unit(2)?);
            d.wide = i64::from((hi << 16 | lo) as i32) as u64;
        }
        _31c => {
            d.v_a = u32::from(byte1);
            let lo = u32::from(unit(1)?);
            let hi = u32::from(unit(2)?);
            d.wide = u64::from(hi << 16 | lo);
        }
        _35c | _35ms | _35mi => {
            d.arg_count = byte1 >> 4;
            let reg_g = u32::from(byte1 & 0x0f);
            d.v_b = u32::from(unit(1)?);
            let regs = unit(2)?;
            d.args = [
                regs & 0xf,
                (regs >> 4) & 0xf,
                (regs >> 8) & 0xf,
                (regs >> 12) & 0xf,
                reg_g as u16,
            ];
        }
        _3rc | _3rms | _3rmi => {
            d.arg_count = byte1;
            d.v_b = u32::from(unit(1)?);
            d.v_a = u32::from(unit(2)?); // first argument register
            d.args[0] = unit(2)?;
        }
        _51l => {
            d.v_a = u32::from(byte1);
            let a = u64::from(unit(1)?);
            let b = u64::from(unit(2)?);
            let c = u64::from(unit(3)?);
            let e = u64::from(unit(4)?);
            d.wide = a | (b << 16) | (c << 32) | (e << 48);
        }
        _33x | _32s | _41c | _52c | _5rc => return Err(DecodeError::UnsupportedFormat),
    }

    Ok(d)
}

/// One of the three data tables Dalvik hides behind opcode `0x00` (`nop`),
/// distinguished by the two-byte signature in the code unit following the
/// `nop` pseudo-opcode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTable {
    /// `packed-switch-data`: width = `4 + 2*size`.
    PackedSwitch { size: u16 },
    /// `sparse-switch-data`: width = `2 + 4*size`.
    SparseSwitch { size: u16 },
    /// `fill-array-data` payload: width = `4 + ceil(size*elem_width / 2)`.
    ArrayData { elem_width: u16, size: u32 },
}

const PACKED_SWITCH_SIGNATURE: u16 = 0x0100;
const SPARSE_SWITCH_SIGNATURE: u16 = 0x0200;
const ARRAY_DATA_SIGNATURE: u16 = 0x0300;

impl DataTable {
    /// Total width of this table in 16-bit code units, signature included.
    #[must_use]
    pub const fn width(self) -> u16 {
        match self {
            Self::PackedSwitch { size } => 4 + 2 * size,
            Self::SparseSwitch { size } => 2 + 4 * size,
            Self::ArrayData { elem_width, size } => {
                4 + (((size as u64 * elem_width as u64) + 1) / 2) as u16
            }
        }
    }
}

/// If `code[pc]` is opcode `0x00` with a recognized data-table signature,
/// decode the table header and return it; if `code[pc] == 0x0000` it is a
/// genuine `nop` and this returns `Ok(None)`. Any other signature byte is a
/// structural error.
pub fn classify_nop(code: &[u16], pc: usize) -> Result<Option<DataTable>, DecodeError> {
    let unit0 = *code.get(pc).ok_or(DecodeError::Truncated(pc))?;
    debug_assert_eq!(unit0 & 0xff, 0, "caller must check opcode byte is 0x00");
    if unit0 == 0 {
        return Ok(None);
    }
    let size = *code.get(pc + 1).ok_or(DecodeError::Truncated(pc))?;
    match unit0 {
        PACKED_SWITCH_SIGNATURE => Ok(Some(DataTable::PackedSwitch { size })),
        SPARSE_SWITCH_SIGNATURE => Ok(Some(DataTable::SparseSwitch { size })),
        ARRAY_DATA_SIGNATURE => {
            let elem_width = size;
            let lo = u32::from(*code.get(pc + 2).ok_or(DecodeError::Truncated(pc))?);
            let hi = u32::from(*code.get(pc + 3).ok_or(DecodeError::Truncated(pc))?);
            Ok(Some(DataTable::ArrayData {
                elem_width,
                size: lo | (hi << 16),
            }))
        }
        _ => Ok(None),
    }
}
