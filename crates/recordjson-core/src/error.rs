//! Error types for field registration and serialization
//!
//! Registration and serialization fail in different phases, so they have
//! separate error types. [`Error`] wraps both for callers that drive the two
//! phases from one code path.

use crate::data_type::DataType;
use crate::format::Format;

/// Errors raised while registering a field.
///
/// These surface at startup, when the record types are registered, and are
/// never produced by the serializer.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	/// A date format was configured on a field that is neither a date nor a number
	#[error(
		"format `{format}` requires Date or numeric field, but {record}.{field} is declared as {data_type}"
	)]
	DateFormatRequiresDate {
		record: &'static str,
		field: String,
		format: Format,
		data_type: DataType,
	},

	/// A binary format was configured on a field that is neither binary nor text
	#[error(
		"format `{format}` requires binary or string field, but {record}.{field} is declared as {data_type}"
	)]
	BinaryFormatRequiresBinary {
		record: &'static str,
		field: String,
		format: Format,
		data_type: DataType,
	},

	/// A format name did not match any known format
	#[error("unknown format `{0}`")]
	UnknownFormat(String),
}

impl ConfigurationError {
	/// Returns the name of the offending field, if the error is tied to one
	pub fn field(&self) -> Option<&str> {
		match self {
			ConfigurationError::DateFormatRequiresDate { field, .. }
			| ConfigurationError::BinaryFormatRequiresBinary { field, .. } => Some(field),
			ConfigurationError::UnknownFormat(_) => None,
		}
	}
}

/// Errors raised while building a value tree.
///
/// Any of these aborts the whole `serialize` call; no partial tree is returned.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
	/// The record type has no registered fields
	#[error("record type {record} has no registered fields")]
	UnregisteredRecord { record: &'static str },

	/// The serializer was handed something other than a record or a sequence
	#[error("cannot serialize a {found} value; expected a record or a sequence of records")]
	UnsupportedInput { found: &'static str },

	/// The runtime value of a field does not fit its rule
	#[error("field `{field}` holds a {found} value, which format `{format}` cannot encode")]
	UnsupportedValue {
		field: String,
		format: Format,
		found: &'static str,
	},

	/// A numeric timestamp falls outside the representable date range
	#[error("field `{field}` holds timestamp {millis}ms, which is out of range")]
	TimestampOutOfRange { field: String, millis: i128 },

	/// NaN and infinities have no JSON representation
	#[error("field `{field}` holds a non-finite number")]
	NonFiniteNumber { field: String },

	/// A fallible custom transform rejected the value
	#[error("custom transform for field `{field}` failed: {message}")]
	Transform { field: String, message: String },
}

impl EncodingError {
	/// Creates a transform failure; intended for use inside `try_custom` closures
	///
	/// The field name is filled in by the serializer.
	///
	/// # Examples
	///
	/// ```
	/// use recordjson_core::EncodingError;
	///
	/// let err = EncodingError::transform("value too long");
	/// assert!(err.to_string().contains("value too long"));
	/// ```
	pub fn transform(message: impl Into<String>) -> Self {
		EncodingError::Transform {
			field: String::new(),
			message: message.into(),
		}
	}

	/// Attaches the field name to a transform error raised without one
	pub(crate) fn in_field(self, name: &str) -> Self {
		match self {
			EncodingError::Transform { field, message } if field.is_empty() => {
				EncodingError::Transform {
					field: name.to_string(),
					message,
				}
			}
			other => other,
		}
	}
}

/// Either phase's error
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Registration failed
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),
	/// Serialization failed
	#[error(transparent)]
	Encoding(#[from] EncodingError),
}

/// Result type spanning registration and serialization
pub type Result<T> = std::result::Result<T, Error>;
