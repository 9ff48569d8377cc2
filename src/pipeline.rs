//! Stream framing on top of the codec: packets go out encoded and terminated by
//! [`FRAME_DELIMITER`], and come back by splitting on it.

use crate::codec::FRAME_DELIMITER;
use crate::config::FrameConfig;
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use std::io::{Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
	pub frames: usize,
	pub plain_size: u64,
	pub encoded_size: u64,
}

impl FrameStats {
	/// Bytes added by stuffing and delimiters.
	pub fn overhead(&self) -> u64 {
		self.encoded_size.saturating_sub(self.plain_size)
	}
}

pub fn encode_stream<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &FrameConfig,
) -> Result<FrameStats> {
	config.validate()?;

	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	// An empty stream still carries one (empty) packet.
	let packets: Vec<&[u8]> = if buffer.is_empty() {
		vec![&buffer[..]]
	} else {
		buffer.chunks(config.max_packet_size).collect()
	};

	let pool = thread_pool(config.threads)?;
	let pb = progress_bar(config, buffer.len() as u64, "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})");

	let variant = config.variant;
	let frames: Vec<Vec<u8>> = pool.install(|| {
		packets
			.par_iter()
			.enumerate()
			.map(|(frame, packet)| {
				let encoded = variant.encode(packet).map_err(|source| Error::Codec { frame, source });
				pb.inc(packet.len() as u64);
				encoded
			})
			.collect::<Result<Vec<_>>>()
	})?;

	pb.finish_with_message("Encoding finished");

	let mut encoded_size = 0u64;
	for frame in &frames {
		writer.write_all(frame)?;
		writer.write_all(&[FRAME_DELIMITER])?;
		encoded_size += frame.len() as u64 + 1;
	}
	writer.flush()?;

	let stats = FrameStats { frames: frames.len(), plain_size: buffer.len() as u64, encoded_size };
	info!("{}: encoded {} bytes into {} frames ({} bytes)", variant, stats.plain_size, stats.frames, stats.encoded_size);
	Ok(stats)
}

pub fn decode_stream<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &FrameConfig,
) -> Result<FrameStats> {
	config.validate()?;

	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let segments: Vec<&[u8]> = buffer
		.split(|&b| b == FRAME_DELIMITER)
		.filter(|segment| !segment.is_empty())
		.collect();
	let delimiters = buffer.iter().filter(|&&b| b == FRAME_DELIMITER).count();
	let skipped = (delimiters + 1).saturating_sub(segments.len());
	if skipped > 0 {
		debug!("skipped {} empty segments", skipped);
	}

	let pool = thread_pool(config.threads)?;
	let pb = progress_bar(config, segments.len() as u64, "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] Frames {pos}/{len} ({eta})");

	let variant = config.variant;
	let packets: Vec<Vec<u8>> = pool.install(|| {
		segments
			.par_iter()
			.enumerate()
			.map(|(frame, segment)| {
				let decoded = variant.decode(segment).map_err(|source| Error::Codec { frame, source });
				pb.inc(1);
				decoded
			})
			.collect::<Result<Vec<_>>>()
	})?;

	pb.finish_with_message("Decoding finished");

	let mut plain_size = 0u64;
	for packet in &packets {
		writer.write_all(packet)?;
		plain_size += packet.len() as u64;
	}
	writer.flush()?;

	let stats = FrameStats { frames: packets.len(), plain_size, encoded_size: buffer.len() as u64 };
	info!("{}: decoded {} frames ({} bytes) into {} bytes", variant, stats.frames, stats.encoded_size, stats.plain_size);
	Ok(stats)
}

fn thread_pool(threads: usize) -> Result<rayon::ThreadPool> {
	rayon::ThreadPoolBuilder::new()
		.num_threads(threads)
		.build()
		.map_err(|e| Error::Config(format!("cannot start worker threads: {}", e)))
}

fn progress_bar(config: &FrameConfig, len: u64, template: &str) -> ProgressBar {
	if !config.show_progress {
		return ProgressBar::hidden();
	}
	let pb = ProgressBar::new(len);
	if let Ok(style) = ProgressStyle::default_bar().template(template) {
		pb.set_style(style.progress_chars("#>-"));
	}
	pb
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::Variant;
	use crate::error::CobsError;
	use std::io::Cursor;

	fn config() -> FrameConfig {
		FrameConfig::default().with_threads(2)
	}

	#[test]
	fn test_encode_appends_delimiters() {
		let mut input = Cursor::new(vec![0x11u8, 0x22, 0x00, 0x33]);
		let mut output: Vec<u8> = Vec::new();
		let stats = encode_stream(&mut input, &mut output, &config()).unwrap();

		assert_eq!(output, vec![0x03, 0x11, 0x22, 0x02, 0x33, 0x00]);
		assert_eq!(stats, FrameStats { frames: 1, plain_size: 4, encoded_size: 6 });
		assert_eq!(stats.overhead(), 2);
	}

	#[test]
	fn test_empty_stream_is_one_frame() {
		let mut output: Vec<u8> = Vec::new();
		let stats = encode_stream(&mut Cursor::new(Vec::<u8>::new()), &mut output, &config()).unwrap();
		assert_eq!(output, vec![0x01, 0x00]);
		assert_eq!(stats.frames, 1);
	}

	#[test]
	fn test_packets_split_and_rejoin() {
		let data: Vec<u8> = (0..1000u32).map(|i| (i % 7) as u8).collect();
		let cfg = config().with_packet_size(100);

		let mut framed: Vec<u8> = Vec::new();
		let stats = encode_stream(&mut Cursor::new(data.clone()), &mut framed, &cfg).unwrap();
		assert_eq!(stats.frames, 10);
		assert_eq!(framed.iter().filter(|&&b| b == FRAME_DELIMITER).count(), 10);

		let mut restored: Vec<u8> = Vec::new();
		let stats = decode_stream(&mut Cursor::new(framed), &mut restored, &cfg).unwrap();
		assert_eq!(stats.frames, 10);
		assert_eq!(restored, data);
	}

	#[test]
	fn test_decode_skips_empty_segments() {
		let framed: Vec<u8> = vec![0x00, 0x02, 0x11, 0x00, 0x00, 0x02, 0x22];
		let mut restored: Vec<u8> = Vec::new();
		let stats = decode_stream(&mut Cursor::new(framed), &mut restored, &config()).unwrap();
		assert_eq!(stats.frames, 2);
		assert_eq!(restored, vec![0x11, 0x22]);
	}

	#[test]
	fn test_decode_reports_frame_index() {
		let framed: Vec<u8> = vec![0x02, 0x11, 0x00, 0x05, 0x11, 0x00];
		let err = decode_stream(&mut Cursor::new(framed), &mut Vec::<u8>::new(), &config()).unwrap_err();
		match err {
			Error::Codec { frame, source } => {
				assert_eq!(frame, 1);
				assert_eq!(source, CobsError::TruncatedEncodedData);
			}
			other => panic!("unexpected error: {}", other),
		}
	}

	#[test]
	fn test_cobsr_stream() {
		let data = b"abc\0def\0\0ghi".to_vec();
		let cfg = config().with_variant(Variant::CobsR).with_packet_size(5);

		let mut framed: Vec<u8> = Vec::new();
		encode_stream(&mut Cursor::new(data.clone()), &mut framed, &cfg).unwrap();
		let mut restored: Vec<u8> = Vec::new();
		decode_stream(&mut Cursor::new(framed), &mut restored, &cfg).unwrap();
		assert_eq!(restored, data);
	}

	#[test]
	fn test_invalid_config_rejected() {
		let cfg = config().with_packet_size(0);
		let err = encode_stream(&mut Cursor::new(vec![1u8]), &mut Vec::<u8>::new(), &cfg).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}
}
