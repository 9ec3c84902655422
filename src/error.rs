use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Cannot compress empty input")]
	EmptyInput,

	#[error("Invalid container format: {0}")]
	InvalidFormat(String),

	#[error("Corrupt encoded stream: {0}")]
	CorruptStream(String),

	#[error("No code derived for byte 0x{0:02x}")]
	MissingCode(u8),

	#[error("Frequency of byte 0x{0:02x} does not fit in a 32-bit table entry")]
	FrequencyOverflow(u8),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
	/// Truncated reads become format errors; everything else is reported as-is.
	pub(crate) fn from_read(err: std::io::Error, field: &str) -> Self {
		if err.kind() == std::io::ErrorKind::UnexpectedEof {
			HuffError::InvalidFormat(format!("truncated while reading {}", field))
		} else {
			HuffError::Io(err)
		}
	}
}
