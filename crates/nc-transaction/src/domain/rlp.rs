//! # Canonical RLP Codec
//!
//! Length-prefixed structural encoding for the transaction wire format.
//! Encoding follows the usual RLP rules; the decoder is strict: every
//! non-minimal length form, leading-zero integer, or trailing byte is
//! rejected so that each value has exactly one valid encoding.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("non-canonical encoding")]
    NonCanonical,
    #[error("trailing bytes after value")]
    TrailingBytes,
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("integer wider than {0} bytes")]
    IntegerOverflow(usize),
    #[error("expected {expected}-byte string, found {found} bytes")]
    WrongLength { expected: usize, found: usize },
    #[error("list has {found} items, expected {expected}")]
    WrongArity { expected: usize, found: usize },
}

// =============================================================================
// ENCODING
// =============================================================================

/// RLP-encode a byte string.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        vec![data[0]]
    } else if data.len() < 56 {
        let mut out = vec![0x80 + data.len() as u8];
        out.extend_from_slice(data);
        out
    } else {
        let len_bytes = encode_length(data.len());
        let mut out = vec![0xb7 + len_bytes.len() as u8];
        out.extend_from_slice(&len_bytes);
        out.extend_from_slice(data);
        out
    }
}

/// RLP-encode an unsigned integer as its minimal big-endian byte string.
/// Zero encodes as the empty string.
pub fn encode_uint(value: impl Into<primitive_types::U256>) -> Vec<u8> {
    let value: primitive_types::U256 = value.into();
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let start = buf.iter().position(|&b| b != 0).unwrap_or(32);
    encode_bytes(&buf[start..])
}

/// Wrap already-encoded items into an RLP list.
pub fn encode_list(encoded_items: &[Vec<u8>]) -> Vec<u8> {
    let total_len: usize = encoded_items.iter().map(Vec::len).sum();

    let mut out = Vec::with_capacity(total_len + 9);
    if total_len < 56 {
        out.push(0xc0 + total_len as u8);
    } else {
        let len_bytes = encode_length(total_len);
        out.push(0xf7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    for item in encoded_items {
        out.extend_from_slice(item);
    }
    out
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

// =============================================================================
// DECODING
// =============================================================================

/// A decoded RLP value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

/// Decode a complete RLP value, rejecting trailing input.
pub fn decode(buf: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, consumed) = decode_at(buf)?;
    if consumed != buf.len() {
        return Err(RlpError::TrailingBytes);
    }
    Ok(item)
}

/// Decode the value at the start of `buf`, returning it and the number of
/// bytes consumed.
fn decode_at(buf: &[u8]) -> Result<(RlpItem, usize), RlpError> {
    let &prefix = buf.first().ok_or(RlpError::UnexpectedEof)?;
    match prefix {
        // Single byte, itself its own encoding.
        0x00..=0x7f => Ok((RlpItem::Bytes(vec![prefix]), 1)),

        // Short string.
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let data = slice(buf, 1, len)?;
            if len == 1 && data[0] < 0x80 {
                // Must have used the single-byte form.
                return Err(RlpError::NonCanonical);
            }
            Ok((RlpItem::Bytes(data.to_vec()), 1 + len))
        }

        // Long string.
        0xb8..=0xbf => {
            let len_of_len = (prefix - 0xb7) as usize;
            let len = read_length(buf, len_of_len)?;
            let data = slice(buf, 1 + len_of_len, len)?;
            Ok((RlpItem::Bytes(data.to_vec()), 1 + len_of_len + len))
        }

        // Short list.
        0xc0..=0xf7 => {
            let len = (prefix - 0xc0) as usize;
            let body = slice(buf, 1, len)?;
            Ok((RlpItem::List(decode_items(body)?), 1 + len))
        }

        // Long list.
        0xf8..=0xff => {
            let len_of_len = (prefix - 0xf7) as usize;
            let len = read_length(buf, len_of_len)?;
            let body = slice(buf, 1 + len_of_len, len)?;
            Ok((RlpItem::List(decode_items(body)?), 1 + len_of_len + len))
        }
    }
}

/// Decode the concatenated items of a list body.
fn decode_items(mut body: &[u8]) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    while !body.is_empty() {
        let (item, consumed) = decode_at(body)?;
        items.push(item);
        body = &body[consumed..];
    }
    Ok(items)
}

/// Read a long-form length and verify it is minimal.
fn read_length(buf: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let len_bytes = slice(buf, 1, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical);
    }
    let mut len: usize = 0;
    for &b in len_bytes {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(b as usize))
            .ok_or(RlpError::IntegerOverflow(8))?;
    }
    if len < 56 {
        // Must have used the short form.
        return Err(RlpError::NonCanonical);
    }
    Ok(len)
}

fn slice(buf: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    buf.get(start..start + len).ok_or(RlpError::UnexpectedEof)
}

impl RlpItem {
    pub fn bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            RlpItem::Bytes(b) => Ok(b),
            RlpItem::List(_) => Err(RlpError::TypeMismatch {
                expected: "string",
                found: "list",
            }),
        }
    }

    /// The items of a list with exactly `arity` elements.
    pub fn list(&self, arity: usize) -> Result<&[RlpItem], RlpError> {
        match self {
            RlpItem::List(items) if items.len() == arity => Ok(items),
            RlpItem::List(items) => Err(RlpError::WrongArity {
                expected: arity,
                found: items.len(),
            }),
            RlpItem::Bytes(_) => Err(RlpError::TypeMismatch {
                expected: "list",
                found: "string",
            }),
        }
    }

    /// A canonical unsigned integer: minimal big-endian, no leading zeros.
    pub fn u256(&self) -> Result<primitive_types::U256, RlpError> {
        let bytes = self.int_bytes(32)?;
        Ok(primitive_types::U256::from_big_endian(bytes))
    }

    pub fn u64(&self) -> Result<u64, RlpError> {
        let bytes = self.int_bytes(8)?;
        let mut value: u64 = 0;
        for &b in bytes {
            value = value << 8 | b as u64;
        }
        Ok(value)
    }

    pub fn u32(&self) -> Result<u32, RlpError> {
        let bytes = self.int_bytes(4)?;
        let mut value: u32 = 0;
        for &b in bytes {
            value = value << 8 | b as u32;
        }
        Ok(value)
    }

    pub fn u8(&self) -> Result<u8, RlpError> {
        let bytes = self.int_bytes(1)?;
        Ok(bytes.first().copied().unwrap_or(0))
    }

    /// A byte string of exactly `N` bytes.
    pub fn fixed<const N: usize>(&self) -> Result<[u8; N], RlpError> {
        let bytes = self.bytes()?;
        let arr: [u8; N] = bytes.try_into().map_err(|_| RlpError::WrongLength {
            expected: N,
            found: bytes.len(),
        })?;
        Ok(arr)
    }

    fn int_bytes(&self, max: usize) -> Result<&[u8], RlpError> {
        let bytes = self.bytes()?;
        if bytes.first() == Some(&0) {
            return Err(RlpError::NonCanonical);
        }
        if bytes.len() > max {
            return Err(RlpError::IntegerOverflow(max));
        }
        Ok(bytes)
    }
}
