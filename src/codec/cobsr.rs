//! COBS/R, the "reduced" COBS variant.
//!
//! Encoding matches COBS except for the final block: when the last plain byte
//! is at least as large as the final code, that byte replaces the code and the
//! output is one byte shorter. The decoder recognises this because the final
//! code then points past the end of the input, which plain COBS would reject as
//! truncated.

use super::MAX_CODE;
use crate::error::CobsError;
use log::{debug, trace};

/// Worst-case encoded length for `plain_len` input bytes. Same as COBS.
pub const fn encoded_size_bound(plain_len: usize) -> usize {
    super::cobs::encoded_size_bound(plain_len)
}

/// Worst-case decoded length for `encoded_len` input bytes.
pub const fn decoded_size_bound(encoded_len: usize) -> usize {
    encoded_len
}

pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
    if output.len() < encoded_size_bound(input.len()) {
        return Err(CobsError::InvalidArgument);
    }

    let mut block_start = 0;
    let mut cursor = 1;
    let mut last = 0u8;

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
        last = byte;
    }

    let code = (cursor - block_start) as u8;
    if last >= code {
        output[block_start] = last;
        cursor -= 1;
    } else {
        output[block_start] = code;
    }

    trace!("cobsr: encoded {} bytes into {}", input.len(), cursor);
    Ok(cursor)
}

/// Decode COBS/R data. Never reports [`CobsError::TruncatedEncodedData`]: a
/// final code running past the input is the folded last byte.
pub fn decode_into(input: &[u8], output: &mut [u8]) -> Result<usize, CobsError> {
    if output.len() < decoded_size_bound(input.len()) {
        return Err(CobsError::InvalidArgument);
    }

    let mut index = 0;
    let mut cursor = 0;

    while index < input.len() {
        let code = input[index];
        if code == 0 {
            debug!("cobsr: zero code byte at offset {}", index);
            return Err(CobsError::ZeroInEncodedData);
        }

        let block_end = index + code as usize;
        for position in index + 1..block_end {
            let byte = match input.get(position) {
                Some(0) => {
                    debug!("cobsr: zero literal at offset {}", position);
                    return Err(CobsError::ZeroInEncodedData);
                }
                Some(&byte) => byte,
                None => {
                    // the code byte doubles as the last plain byte
                    output[cursor] = code;
                    cursor += 1;
                    break;
                }
            };
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

    trace!("cobsr: decoded {} bytes into {}", input.len(), cursor);
    Ok(cursor)
}

pub fn encode(input: &[u8]) -> Result<Vec<u8>, CobsError> {
    super::with_output(encoded_size_bound(input.len()), |output| encode_into(input, output))
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>, CobsError> {
    super::with_output(decoded_size_bound(input.len()), |output| decode_into(input, output))
}
