//! Bounds-checked byte access shared by rendered codecs and the interpreter.
//!
//! Every helper checks the range it touches and returns
//! [CodecError::BufferTooSmall] instead of indexing past the end.

use crate::{endian::ByteOrder, errors::CodecError};

/// Fails unless `available >= needed`.
#[inline]
pub fn require(available: usize, needed: usize) -> Result<(), CodecError> {
    if available < needed {
        return Err(CodecError::BufferTooSmall { needed, available });
    }

    Ok(())
}

fn range(len: usize, offset: usize, width: usize) -> Result<std::ops::Range<usize>, CodecError> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(CodecError::BufferTooSmall {
            needed: offset.saturating_add(width),
            available: len,
        }),
    }
}

/// Reads a `width`-byte unsigned integer (`width` ≤ 8) at `offset`.
pub fn read_uint(
    buffer: &[u8],
    offset: usize,
    width: usize,
    order: ByteOrder,
) -> Result<u64, CodecError> {
    let bytes = &buffer[range(buffer.len(), offset, width)?];

    let value = match order {
        ByteOrder::Big => bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
        ByteOrder::Little => bytes
            .iter()
            .rev()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
    };

    Ok(value)
}

/// Writes the low `width` bytes of `value` at `offset`.
pub fn write_uint(
    buffer: &mut [u8],
    offset: usize,
    width: usize,
    order: ByteOrder,
    value: u64,
) -> Result<(), CodecError> {
    let span = range(buffer.len(), offset, width)?;
    let bytes = &mut buffer[span];

    for i in 0..width {
        let byte = (value >> (8 * i)) as u8;
        match order {
            ByteOrder::Little => bytes[i] = byte,
            ByteOrder::Big => bytes[width - 1 - i] = byte,
        }
    }

    Ok(())
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Integers a field can be stored as.
pub trait FixedWidth: Copy + Into<i128> {
    const WIDTH: usize;

    fn from_raw(raw: u64) -> Self;

    fn to_raw(self) -> u64;
}

macro_rules! fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    raw as $ty
                }

                #[inline]
                fn to_raw(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

fixed_width!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Reads a `T` at `offset`.
#[inline]
pub fn read<T: FixedWidth>(
    buffer: &[u8],
    offset: usize,
    order: ByteOrder,
) -> Result<T, CodecError> {
    read_uint(buffer, offset, T::WIDTH, order).map(T::from_raw)
}

/// Writes `value` at `offset`.
#[inline]
pub fn write<T: FixedWidth>(
    buffer: &mut [u8],
    offset: usize,
    order: ByteOrder,
    value: T,
) -> Result<(), CodecError> {
    write_uint(buffer, offset, T::WIDTH, order, value.to_raw())
}

/// Reads a `T` at `offset` and converts it into the enum `E`.
pub fn read_enum<E, T>(
    buffer: &[u8],
    offset: usize,
    order: ByteOrder,
    type_name: &str,
) -> Result<E, CodecError>
where
    T: FixedWidth,
    E: TryFrom<T>,
{
    let raw: T = read(buffer, offset, order)?;
    E::try_from(raw).map_err(|_| CodecError::InvalidEnumValue {
        type_name: type_name.to_string(),
        value: raw.into(),
    })
}

/// Runs a nested decode on `buffer[offset..]` and checks the length it reports.
pub fn decode_nested<T, F>(
    buffer: &[u8],
    offset: usize,
    decode: F,
) -> Result<(T, usize), CodecError>
where
    F: FnOnce(&[u8]) -> Result<(T, usize), CodecError>,
{
    require(buffer.len(), offset)?;
    let rest = &buffer[offset..];
    let (value, consumed) = decode(rest)?;
    check_reported(offset, consumed, rest.len())?;
    Ok((value, consumed))
}

/// Runs a nested encode on `buffer[offset..]` and checks the length it reports.
pub fn encode_nested<F>(buffer: &mut [u8], offset: usize, encode: F) -> Result<usize, CodecError>
where
    F: FnOnce(&mut [u8]) -> Result<usize, CodecError>,
{
    require(buffer.len(), offset)?;
    let rest = &mut buffer[offset..];
    let available = rest.len();
    let written = encode(rest)?;
    check_reported(offset, written, available)?;
    Ok(written)
}

fn check_reported(offset: usize, reported: usize, available: usize) -> Result<(), CodecError> {
    if reported > available {
        return Err(CodecError::InvalidLength {
            offset,
            reported,
            available,
        });
    }

    Ok(())
}
