//! Value conversions shared by the byte and date formats

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use crate::error::EncodingError;
use crate::format::Format;
use crate::value::FieldValue;

fn unsupported(field: &str, format: Format, value: &FieldValue<'_>) -> EncodingError {
	EncodingError::UnsupportedValue {
		field: field.to_string(),
		format,
		found: value.kind(),
	}
}

/// The bytes a byte format operates on: binary as-is, text as UTF-8
pub(crate) fn bytes_of<'v>(
	field: &str,
	format: Format,
	value: &'v FieldValue<'_>,
) -> Result<&'v [u8], EncodingError> {
	match value {
		FieldValue::Bytes(bytes) => Ok(bytes.as_ref()),
		FieldValue::Text(text) => Ok(text.as_bytes()),
		other => Err(unsupported(field, format, other)),
	}
}

pub(crate) fn base64(bytes: &[u8]) -> String {
	STANDARD.encode(bytes)
}

pub(crate) fn hex(bytes: &[u8]) -> String {
	hex::encode(bytes)
}

/// The instant a date format renders; numbers are milliseconds since the epoch
pub(crate) fn instant_of(
	field: &str,
	format: Format,
	value: &FieldValue<'_>,
) -> Result<DateTime<Utc>, EncodingError> {
	let millis = match *value {
		FieldValue::DateTime(instant) => return Ok(instant),
		FieldValue::Int(millis) => millis,
		FieldValue::UInt(millis) => {
			i64::try_from(millis).map_err(|_| EncodingError::TimestampOutOfRange {
				field: field.to_string(),
				millis: i128::from(millis),
			})?
		}
		FieldValue::Float(millis) if !millis.is_finite() => {
			return Err(EncodingError::NonFiniteNumber {
				field: field.to_string(),
			});
		}
		// Sub-millisecond fractions are dropped.
		FieldValue::Float(millis) => millis.trunc() as i64,
		ref other => return Err(unsupported(field, format, other)),
	};

	DateTime::from_timestamp_millis(millis).ok_or_else(|| EncodingError::TimestampOutOfRange {
		field: field.to_string(),
		millis: i128::from(millis),
	})
}

/// Text form of a date-time under raw passthrough
pub(crate) fn rfc3339(instant: &DateTime<Utc>) -> String {
	instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Byte count, used by [`Format::ByteLength`]
pub(crate) fn byte_length(bytes: &[u8]) -> u64 {
	bytes.len() as u64
}
