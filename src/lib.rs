//! # cobs-frame
//!
//! Consistent Overhead Byte Stuffing (COBS) for packet framing on byte
//! streams such as serial links.
//!
//! COBS rewrites an arbitrary byte sequence so it contains no `0x00`, which
//! leaves that value free to mark packet boundaries. The overhead is one byte
//! per 254 input bytes (at least one byte), whatever the content.
//!
//! ## Features
//!
//! - **Buffer-supplied core**: [`encode_into`] and [`decode_into`] write into a
//!   caller buffer sized with [`encoded_size_bound`] / [`decoded_size_bound`]
//!   and never allocate
//! - **Allocating wrappers**: [`encode`] and [`decode`] for the common case
//! - **COBS/R**: the reduced variant in [`codec::cobsr`], often one byte shorter
//! - **Stream framing**: [`pipeline`] splits a stream into packets and appends
//!   the [`FRAME_DELIMITER`], or reverses that
//!
//! ## Quick Start
//!
//! ```rust
//! use cobs_frame::{decode, encode};
//!
//! let encoded = encode(&[0x11, 0x22, 0x00, 0x33]).unwrap();
//! assert_eq!(encoded, [0x03, 0x11, 0x22, 0x02, 0x33]);
//! assert_eq!(decode(&encoded).unwrap(), [0x11, 0x22, 0x00, 0x33]);
//! ```
//!
//! ### Caller-supplied buffers
//!
//! ```rust
//! use cobs_frame::{encode_into, encoded_size_bound};
//!
//! const PACKET: usize = 300;
//! let plain = [0xAA; PACKET];
//! let mut out = [0u8; encoded_size_bound(PACKET)];
//! let len = encode_into(&plain, &mut out).unwrap();
//! assert_eq!(len, 302);
//! ```
//!
//! ### Framing a stream
//!
//! ```rust
//! use cobs_frame::{decode_frames, encode_frames, FrameConfig};
//!
//! let config = FrameConfig::default().with_packet_size(16);
//! let framed = encode_frames(b"first\0second\0third", &config).unwrap();
//! assert!(framed.ends_with(&[0x00]));
//! assert_eq!(decode_frames(&framed, &config).unwrap(), b"first\0second\0third");
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;

pub use codec::cobs::{decode, decode_into, decoded_size_bound, encode, encode_into, encoded_size_bound};
pub use codec::{Variant, FRAME_DELIMITER};
pub use config::FrameConfig;
pub use error::{CobsError, Error, Result};
pub use pipeline::{decode_stream, encode_stream, FrameStats};

use std::io::Cursor;

/// Split `data` into packets and return the concatenated, delimited frames.
///
/// In-memory form of [`pipeline::encode_stream`].
pub fn encode_frames(data: &[u8], config: &FrameConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Vec::new();

    pipeline::encode_stream(&mut input, &mut output, config)?;
    Ok(output)
}

/// Decode every frame in `framed` and return the joined packets.
pub fn decode_frames(framed: &[u8], config: &FrameConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(framed);
    let mut output = Vec::new();

    pipeline::decode_stream(&mut input, &mut output, config)?;
    Ok(output)
}
