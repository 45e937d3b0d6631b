//! Builder-friendly options for registered fields.

use serde_json::Value;

use crate::error::EncodingError;
use crate::format::{CustomTransform, FieldRule, Format};
use crate::value::FieldValue;

/// Per-field configuration given at registration
///
/// Registering a field with options, even empty ones, differs from
/// registering it without: configured fields render absent values as `null`
/// before any rule runs, unconfigured ones pass every value through.
///
/// # Examples
///
/// ```
/// use recordjson_core::{FieldOptions, Format};
///
/// let options = FieldOptions::new().rename("created_on").format(Format::DateYmd);
/// assert_eq!(options.output_key(), Some("created_on"));
/// assert_eq!(options.configured_format(), Some(Format::DateYmd));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
	output_key: Option<String>,
	format: Option<Format>,
	custom: Option<CustomTransform>,
}

impl FieldOptions {
	/// Creates empty options
	pub fn new() -> Self {
		Self::default()
	}

	/// Emits the field under `name` instead of its source key
	pub fn rename(mut self, name: impl Into<String>) -> Self {
		self.output_key = Some(name.into());
		self
	}

	/// Sets the output format
	pub fn format(mut self, format: Format) -> Self {
		self.format = Some(format);
		self
	}

	/// Renders the field with `f`; takes precedence over [`format`](Self::format)
	pub fn custom<F>(mut self, f: F) -> Self
	where
		F: for<'a> Fn(&FieldValue<'a>) -> Value + Send + Sync + 'static,
	{
		self.custom = Some(CustomTransform::new(f));
		self
	}

	/// Like [`custom`](Self::custom), for transforms that can reject a value
	pub fn try_custom<F>(mut self, f: F) -> Self
	where
		F: for<'a> Fn(&FieldValue<'a>) -> Result<Value, EncodingError> + Send + Sync + 'static,
	{
		self.custom = Some(CustomTransform::fallible(f));
		self
	}

	/// The configured output key, if renamed
	pub fn output_key(&self) -> Option<&str> {
		self.output_key.as_deref()
	}

	/// The configured enum format, if any
	pub fn configured_format(&self) -> Option<Format> {
		self.format
	}

	/// Whether a custom transform is configured
	pub fn has_custom(&self) -> bool {
		self.custom.is_some()
	}

	/// Resolves the rule the serializer applies
	pub(crate) fn rule(&self) -> FieldRule {
		match (&self.custom, self.format) {
			(Some(custom), _) => FieldRule::Custom(custom.clone()),
			(None, Some(format)) => FieldRule::from(format),
			(None, None) => FieldRule::Raw,
		}
	}
}
