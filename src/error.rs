use thiserror::Error;

/// Failure of a single encode or decode call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CobsError {
	/// The output buffer is smaller than the size bound for the input.
	#[error("invalid argument: output buffer too small")]
	InvalidArgument,

	/// A code byte or literal byte in the encoded input is zero.
	#[error("zero byte in encoded data")]
	ZeroInEncodedData,

	/// A block declares more bytes than remain in the encoded input.
	#[error("truncated encoded data")]
	TruncatedEncodedData,
}

#[derive(Error, Debug)]
pub enum Error {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("frame {frame}: {source}")]
	Codec {
		frame: usize,
		#[source]
		source: CobsError,
	},

	#[error("Configuration error: {0}")]
	Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
