//! Consistent Overhead Byte Stuffing.
//!
//! The encoded form is a run of blocks. Each block is a code byte `C`
//! followed by `C - 1` non-zero literal bytes. A block with `C < 255` that is
//! not the last block of the buffer stands for its literals plus one zero
//! byte; a block with `C == 255` stands for 254 literals and nothing else.
//!
//! The functions here never allocate: the caller hands in an output buffer
//! sized with [`encoded_size_bound`] or [`decoded_size_bound`].

use super::{MAX_CODE, MAX_LITERALS};
use crate::error::CobsError;
use log::{debug, trace};

/// Worst-case encoded length for `plain_len` input bytes.
pub const fn encoded_size_bound(plain_len: usize) -> usize {
    if plain_len == 0 {
        1
    } else {
        plain_len + (plain_len + MAX_LITERALS - 1) / MAX_LITERALS
    }
}

/// Worst-case decoded length for `encoded_len` input bytes.
///
/// Every block spends one byte on its code and yields at most one implied
/// zero, and the final block never yields one, so at least one input byte
/// produces no output.
pub const fn decoded_size_bound(encoded_len: usize) -> usize {
    if encoded_len == 0 {
        0
    } else {
        encoded_len - 1
    }
}

/// Encode `input` into `output`, returning the number of bytes written.
///
/// `output` must hold at least `encoded_size_bound(input.len())` bytes,
/// otherwise [`CobsError::InvalidArgument`] is returned. Bytes past the
/// returned length are left in an unspecified state.
pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
    if output.len() < encoded_size_bound(input.len()) {
        return Err(CobsError::InvalidArgument);
    }

    let mut block_start = 0;
    let mut cursor = 1;

    for &byte in input {
        if cursor - block_start == MAX_CODE as usize {
            output[block_start] = MAX_CODE;
            block_start = cursor;
            cursor += 1;
        }

        if byte == 0 {
            output[block_start] = (cursor - block_start) as u8;
            block_start = cursor;
            cursor += 1;
        } else {
            output[cursor] = byte;
            cursor += 1;
        }
    }
    output[block_start] = (cursor - block_start) as u8;

    trace!("cobs: encoded {} bytes into {}", input.len(), cursor);
    Ok(cursor)
}

/// Decode `input` into `output`, returning the number of bytes written.
///
/// `output` must hold at least `decoded_size_bound(input.len())` bytes. On
/// error the contents of `output` are unspecified.
pub fn decode_into(input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
    if output.len() < decoded_size_bound(input.len()) {
        return Err(CobsError::InvalidArgument);
    }

    let mut index = 0;
    let mut cursor = 0;

    while index < input.len() {
        let code = input[index];
        if code == 0 {
            return Err(reject(CobsError::ZeroInEncodedData, index));
        }

        let block_end = index + code as usize;
        for position in index + 1..block_end {
            let byte = match input.get(position) {
                Some(&byte) => byte,
                None => return Err(reject(CobsError::TruncatedEncodedData, index)),
            };
            if byte == 0 {
                return Err(reject(CobsError::ZeroInEncodedData, position));
            }
            output[cursor] = byte;
            cursor += 1;
        }

        index = block_end;
        if index >= input.len() {
            break;
        }
        if code < MAX_CODE {
            output[cursor] = 0;
            cursor += 1;
        }
    }

    trace!("cobs: decoded {} bytes into {}", input.len(), cursor);
    Ok(cursor)
}

fn reject(error: CobsError, position: usize) -> CobsError {
    debug!("cobs: rejecting encoded data at offset {}: {}", position, error);
    error
}

/// Encode `input` into a freshly allocated vector.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, CobsError> {
    super::with_output(encoded_size_bound(input.len()), |output| encode_into(input, output))
}

/// Decode `input` into a freshly allocated vector.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, CobsError> {
    super::with_output(decoded_size_bound(input.len()), |output| decode_into(input, output))
}
