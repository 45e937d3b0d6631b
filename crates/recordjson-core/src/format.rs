//! Output formats and the resolved per-field rule

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_type::DataType;
use crate::error::{ConfigurationError, EncodingError};
use crate::value::FieldValue;

/// `chrono` patterns of the date formats
pub(crate) const DATE_YMD: &str = "%Y-%m-%d";
pub(crate) const DATE_YMD_HM: &str = "%Y-%m-%d %H:%M";
pub(crate) const DATE_YMD_HMS: &str = "%Y-%m-%d %H:%M:%S";

/// How a field's value is rendered into the value tree
///
/// The string names match the wire names used in settings files and error
/// messages (`"raw"`, `"base64"`, `"dt_ymd_hm"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
	/// Value passed through unchanged
	#[default]
	Raw,
	/// Standard base64 of the bytes (text is UTF-8 encoded first)
	Base64,
	/// Lowercase hexadecimal of the bytes (text is UTF-8 encoded first)
	Hex,
	/// Number of bytes (UTF-8 length for text)
	ByteLength,
	/// `YYYY-MM-DD`
	#[serde(rename = "dt_ymd")]
	DateYmd,
	/// `YYYY-MM-DD HH:mm`
	#[serde(rename = "dt_ymd_hm")]
	DateYmdHm,
	/// `YYYY-MM-DD HH:mm:ss`
	#[serde(rename = "dt_ymd_hms")]
	DateYmdHms,
	/// The value is itself serialized as a record (or sequence of records)
	Json,
}

impl Format {
	/// All formats, in declaration order
	pub const ALL: [Format; 8] = [
		Format::Raw,
		Format::Base64,
		Format::Hex,
		Format::ByteLength,
		Format::DateYmd,
		Format::DateYmdHm,
		Format::DateYmdHms,
		Format::Json,
	];

	/// Returns the wire name of the format
	pub fn as_str(&self) -> &'static str {
		match self {
			Format::Raw => "raw",
			Format::Base64 => "base64",
			Format::Hex => "hex",
			Format::ByteLength => "byte_length",
			Format::DateYmd => "dt_ymd",
			Format::DateYmdHm => "dt_ymd_hm",
			Format::DateYmdHms => "dt_ymd_hms",
			Format::Json => "json",
		}
	}

	/// Whether this is one of the date formats
	pub fn is_date(&self) -> bool {
		matches!(
			self,
			Format::DateYmd | Format::DateYmdHm | Format::DateYmdHms
		)
	}

	/// Whether this is one of the byte-oriented formats
	pub fn is_binary(&self) -> bool {
		matches!(self, Format::Base64 | Format::Hex | Format::ByteLength)
	}

	/// Checks that this format can be applied to a field of `data_type`
	///
	/// `record` and `field` only feed the error message.
	///
	/// # Examples
	///
	/// ```
	/// use recordjson_core::{DataType, Format};
	///
	/// assert!(Format::DateYmd.check_compatible("Post", "created", DataType::Number).is_ok());
	/// assert!(Format::Hex.check_compatible("Post", "created", DataType::Number).is_err());
	/// ```
	pub fn check_compatible(
		&self,
		record: &'static str,
		field: &str,
		data_type: DataType,
	) -> Result<(), ConfigurationError> {
		if self.is_date() && !data_type.accepts_date_format() {
			return Err(ConfigurationError::DateFormatRequiresDate {
				record,
				field: field.to_string(),
				format: *self,
				data_type,
			});
		}
		if self.is_binary() && !data_type.accepts_binary_format() {
			return Err(ConfigurationError::BinaryFormatRequiresBinary {
				record,
				field: field.to_string(),
				format: *self,
				data_type,
			});
		}
		Ok(())
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Format {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Format::ALL
			.into_iter()
			.find(|format| format.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| ConfigurationError::UnknownFormat(s.to_string()))
	}
}

type TransformFn = dyn for<'a> Fn(&FieldValue<'a>) -> Result<Value, EncodingError> + Send + Sync;

/// A user-supplied function from a field value to an output value
///
/// Its result is embedded in the tree as-is.
#[derive(Clone)]
pub struct CustomTransform(Arc<TransformFn>);

impl CustomTransform {
	/// Wraps an infallible transform
	pub fn new<F>(f: F) -> Self
	where
		F: for<'a> Fn(&FieldValue<'a>) -> Value + Send + Sync + 'static,
	{
		Self(Arc::new(
			move |value: &FieldValue<'_>| -> Result<Value, EncodingError> { Ok(f(value)) },
		))
	}

	/// Wraps a transform that may reject the value
	pub fn fallible<F>(f: F) -> Self
	where
		F: for<'a> Fn(&FieldValue<'a>) -> Result<Value, EncodingError> + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// Applies the transform
	pub fn apply(&self, value: &FieldValue<'_>) -> Result<Value, EncodingError> {
		(self.0)(value)
	}
}

impl fmt::Debug for CustomTransform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CustomTransform(..)")
	}
}

/// The rule a configured field is serialized with
///
/// Resolved once at registration: a custom transform takes precedence over
/// any enum format configured next to it.
#[derive(Debug, Clone)]
pub enum FieldRule {
	Raw,
	Base64,
	Hex,
	ByteLength,
	DateYmd,
	DateYmdHm,
	DateYmdHms,
	Json,
	Custom(CustomTransform),
}

impl FieldRule {
	/// The enum format this rule renders with, if it is not a custom transform
	pub fn format(&self) -> Option<Format> {
		match self {
			FieldRule::Raw => Some(Format::Raw),
			FieldRule::Base64 => Some(Format::Base64),
			FieldRule::Hex => Some(Format::Hex),
			FieldRule::ByteLength => Some(Format::ByteLength),
			FieldRule::DateYmd => Some(Format::DateYmd),
			FieldRule::DateYmdHm => Some(Format::DateYmdHm),
			FieldRule::DateYmdHms => Some(Format::DateYmdHms),
			FieldRule::Json => Some(Format::Json),
			FieldRule::Custom(_) => None,
		}
	}

	/// Whether this rule is a custom transform
	pub fn is_custom(&self) -> bool {
		matches!(self, FieldRule::Custom(_))
	}

	/// Short label for logs
	pub fn name(&self) -> &'static str {
		self.format().map_or("custom", |format| format.as_str())
	}
}

impl From<Format> for FieldRule {
	fn from(format: Format) -> Self {
		match format {
			Format::Raw => FieldRule::Raw,
			Format::Base64 => FieldRule::Base64,
			Format::Hex => FieldRule::Hex,
			Format::ByteLength => FieldRule::ByteLength,
			Format::DateYmd => FieldRule::DateYmd,
			Format::DateYmdHm => FieldRule::DateYmdHm,
			Format::DateYmdHms => FieldRule::DateYmdHms,
			Format::Json => FieldRule::Json,
		}
	}
}
