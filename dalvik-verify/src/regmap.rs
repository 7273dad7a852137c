//! Register-map generator and on-disk codec.
//!
//! Walks the verified register lines at every GC-point instruction and
//! records, per instruction, which of the method's registers hold a
//! reference value. The encoding is the format used by the original
//! verifier's register-map writer (`RegisterMap.c`): a small header
//! followed by one `(address, bitmap)` entry per GC point, addresses
//! packed to one or two bytes depending on method size.

use alloc::format;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use crate::dataflow::VerifierData;
use crate::error::{InternalAssert, VerifyError};
use crate::method::MethodContract;
use crate::resolver::Resolver;

/// Address width used in the on-disk encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressFormat {
    /// `insns_size < 256`: one byte per address.
    Format8 = 0,
    /// Two bytes per address, little-endian.
    Format16 = 1,
}

/// One GC point's reference bitmap: bit `i` set means `v{i}` holds a
/// reference (or the `Zero` constant, which the GC scans as a null
/// reference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMapEntry {
    pub address: u32,
    pub bitmap: Vec<u8>,
}

/// A whole method's register map, ready to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMap {
    pub format: AddressFormat,
    pub reg_byte_width: u8,
    pub entries: Vec<RegisterMapEntry>,
}

fn reg_byte_width(registers_size: u16) -> u8 {
    ((usize::from(registers_size) + 7) / 8) as u8
}

/// Build a register map from a method that has already completed data-flow
/// verification. Every address flagged `gc_point` must have a
/// stored register line or this is an internal error: data-flow is required
/// to visit every GC point on every reachable path before it terminates.
pub fn generate<R: Resolver>(
    method: &MethodContract<R::Class>,
    data: &VerifierData<R::Class>,
) -> Result<RegisterMap, VerifyError> {
    let insns_size = method.insns.len();
    let format = if insns_size < 256 {
        AddressFormat::Format8
    } else {
        AddressFormat::Format16
    };
    let width = reg_byte_width(data.registers_size());

    let mut entries = Vec::new();
    for (addr, flags) in data.flags.instruction_starts() {
        if !flags.is_gc_point() {
            continue;
        }
        let line = data
            .line_at(addr)
            .ok_or(InternalAssert::MissingRegisterLine { addr: addr as u32 })?;

        let mut bitmap = vec![0u8; width as usize];
        for reg in 0..data.registers_size() {
            if line.get(reg).is_gc_reference() {
                let byte = usize::from(reg) / 8;
                let bit = reg % 8;
                bitmap[byte] |= 1 << bit;
            }
        }
        entries.push(RegisterMapEntry {
            address: addr as u32,
            bitmap,
        });
    }

    Ok(RegisterMap {
        format,
        reg_byte_width: width,
        entries,
    })
}

/// Encode a register map to the on-disk byte layout:
/// `u1 format, u1 reg_byte_width, u2 entry_count (LE)`, followed by
/// `entry_count` repetitions of `address (u1 or u2 LE) + reference_bitmap`.
///
/// A differential-compression format is reserved for future use and never
/// emitted by this encoder; `format` is always `Format8` or `Format16`.
#[must_use]
pub fn encode(map: &RegisterMap) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(map.format as u8);
    out.push(map.reg_byte_width);
    out.extend_from_slice(&(map.entries.len() as u16).to_le_bytes());
    for entry in &map.entries {
        match map.format {
            AddressFormat::Format8 => out.push(entry.address as u8),
            AddressFormat::Format16 => out.extend_from_slice(&(entry.address as u16).to_le_bytes()),
        }
        out.extend_from_slice(&entry.bitmap);
    }
    out
}

/// Error decoding a register map produced by [`encode`].
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeMapError {
    #[error("register map truncated")]
    Truncated,
    #[error("unknown address format byte {0}")]
    BadFormat(u8),
}

/// Decode the byte layout written by [`encode`]. Used by the self-check in
/// [`generate`]'s caller.
pub fn decode_map(bytes: &[u8]) -> Result<RegisterMap, DecodeMapError> {
    if bytes.len() < 4 {
        return Err(DecodeMapError::Truncated);
    }
    let format = match bytes[0] {
        0 => AddressFormat::Format8,
        1 => AddressFormat::Format16,
        other => return Err(DecodeMapError::BadFormat(other)),
    };
    let reg_byte_width = bytes[1];
    let entry_count = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;

    let addr_width = match format {
        AddressFormat::Format8 => 1,
        AddressFormat::Format16 => 2,
    };
    let entry_width = addr_width + reg_byte_width as usize;

    let mut pos = 4usize;
    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        if bytes.len() < pos + entry_width {
            return Err(DecodeMapError::Truncated);
        }
        let address = match format {
            AddressFormat::Format8 => u32::from(bytes[pos]),
            AddressFormat::Format16 => u32::from(u16::from_le_bytes([bytes[pos], bytes[pos + 1]])),
        };
        let bitmap = bytes[pos + addr_width..pos + entry_width].to_vec();
        entries.push(RegisterMapEntry { address, bitmap });
        pos += entry_width;
    }

    Ok(RegisterMap {
        format,
        reg_byte_width,
        entries,
    })
}

/// Re-encode `map` and decode the result, asserting the round trip matches.
pub fn self_check(map: &RegisterMap) -> Result<(), VerifyError> {
    let bytes = encode(map);
    let decoded =
        decode_map(&bytes).map_err(|e| InternalAssert::Other(format!("register map round trip failed: {e}")))?;
    if &decoded != map {
        return Err(InternalAssert::Other("register map round trip mismatch".to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_format8() {
        let map = RegisterMap {
            format: AddressFormat::Format8,
            reg_byte_width: 2,
            entries: vec![
                RegisterMapEntry {
                    address: 0,
                    bitmap: vec![0b0000_0001, 0],
                },
                RegisterMapEntry {
                    address: 12,
                    bitmap: vec![0b1010_0000, 0b0000_0001],
                },
            ],
        };
        assert!(self_check(&map).is_ok());
    }

    #[test]
    fn round_trip_format16() {
        let map = RegisterMap {
            format: AddressFormat::Format16,
            reg_byte_width: 1,
            entries: vec![RegisterMapEntry {
                address: 300,
                bitmap: vec![0xff],
            }],
        };
        assert!(self_check(&map).is_ok());
    }

    #[test]
    fn reg_byte_width_rounds_up() {
        assert_eq!(reg_byte_width(1), 1);
        assert_eq!(reg_byte_width(8), 1);
        assert_eq!(reg_byte_width(9), 2);
        assert_eq!(reg_byte_width(16), 2);
        assert_eq!(reg_byte_width(17), 3);
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(matches!(decode_map(&[0, 1]), Err(DecodeMapError::Truncated)));
    }
}
