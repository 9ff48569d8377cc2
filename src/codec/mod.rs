//! Byte-stuffing codecs.
//!
//! [`cobs`] is the plain scheme, [`cobsr`] the reduced variant. Both expose
//! buffer-supplied `encode_into`/`decode_into` plus allocating wrappers built on
//! top of them.

pub mod cobs;
pub mod cobsr;

use crate::error::CobsError;
use std::fmt;

/// Byte that separates encoded packets on a stream.
pub const FRAME_DELIMITER: u8 = 0x00;

/// Largest code byte; marks a block of 254 literals with no implied zero.
pub(crate) const MAX_CODE: u8 = 0xFF;

pub(crate) const MAX_LITERALS: usize = MAX_CODE as usize - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Cobs,
    CobsR,
}

impl Variant {
    pub fn encode(self, input: &[u8]) -> Result<Vec<u8>, CobsError> {
        match self {
            Variant::Cobs => cobs::encode(input),
            Variant::CobsR => cobsr::encode(input),
        }
    }

    pub fn decode(self, input: &[u8]) -> Result<Vec<u8>, CobsError> {
        match self {
            Variant::Cobs => cobs::decode(input),
            Variant::CobsR => cobsr::decode(input),
        }
    }

    pub fn encoded_size_bound(self, plain_len: usize) -> usize {
        match self {
            Variant::Cobs => cobs::encoded_size_bound(plain_len),
            Variant::CobsR => cobsr::encoded_size_bound(plain_len),
        }
    }

    pub fn decoded_size_bound(self, encoded_len: usize) -> usize {
        match self {
            Variant::Cobs => cobs::decoded_size_bound(encoded_len),
            Variant::CobsR => cobsr::decoded_size_bound(encoded_len),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Cobs => f.write_str("cobs"),
            Variant::CobsR => f.write_str("cobsr"),
        }
    }
}

/// Allocate `capacity` bytes, run `fill` over them and keep the written prefix.
pub(crate) fn with_output<F>(capacity: usize, fill: F) -> Result<Vec<u8>, CobsError>
where
    F: FnOnce(&mut [u8]) -> Result<usize, CobsError>,
{
    let mut output = vec![0u8; capacity];
    let len = fill(&mut output)?;
    output.truncate(len);
    Ok(output)
}
