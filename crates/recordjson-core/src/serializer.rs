//! Value-tree serializer
//!
//! [`RecordSerializer`] walks a record's registered fields in registration
//! order and builds a [`serde_json::Value`]. Fields that were never
//! registered are not read at all.

use serde_json::{Map, Number, Value};

use crate::encoding;
use crate::error::EncodingError;
use crate::format::{self, FieldRule, Format};
use crate::registry::FieldRegistry;
use crate::settings::SerializerSettings;
use crate::value::{AsRecordType, FieldValue, Record};

/// Builds value trees from registered records
///
/// # Examples
///
/// ```
/// use recordjson_core::{DataType, FieldOptions, FieldRegistry, FieldValue, IntoFieldValue, Record, RecordSerializer};
/// use serde_json::json;
///
/// struct Sample {
///     p1: i32,
///     p2: String,
/// }
///
/// impl Record for Sample {
///     fn field(&self, key: &str) -> Option<FieldValue<'_>> {
///         match key {
///             "p1" => Some(self.p1.to_field_value()),
///             "p2" => Some(self.p2.to_field_value()),
///             _ => None,
///         }
///     }
/// }
///
/// let registry = FieldRegistry::new();
/// registry
///     .record::<Sample>()
///     .field("p1", DataType::Number)
///     .unwrap()
///     .field_with("p2", DataType::Text, FieldOptions::new().rename("property2"))
///     .unwrap();
///
/// let sample = Sample { p1: 1, p2: "p2".to_string() };
/// let value = RecordSerializer::new(&registry).serialize_record(&sample).unwrap();
/// assert_eq!(value, json!({ "p1": 1, "property2": "p2" }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RecordSerializer<'r> {
	registry: &'r FieldRegistry,
	settings: SerializerSettings,
}

impl<'r> RecordSerializer<'r> {
	/// Creates a serializer with default settings
	pub fn new(registry: &'r FieldRegistry) -> Self {
		Self::with_settings(registry, SerializerSettings::default())
	}

	pub fn with_settings(registry: &'r FieldRegistry, settings: SerializerSettings) -> Self {
		Self { registry, settings }
	}

	pub fn settings(&self) -> &SerializerSettings {
		&self.settings
	}

	/// Serializes a record or a sequence of records
	///
	/// Sequences map element-wise and may nest.
	///
	/// # Errors
	///
	/// Returns [`EncodingError::UnsupportedInput`] for any other value, and
	/// propagates the first error raised by a field.
	pub fn serialize(&self, input: &FieldValue<'_>) -> Result<Value, EncodingError> {
		match input {
			FieldValue::Record(record) => self.serialize_dyn(*record),
			FieldValue::List(items) => items
				.iter()
				.map(|item| self.serialize(item))
				.collect::<Result<Vec<_>, _>>()
				.map(Value::Array),
			other => Err(EncodingError::UnsupportedInput {
				found: other.kind(),
			}),
		}
	}

	/// Serializes one record
	pub fn serialize_record<R: Record>(&self, record: &R) -> Result<Value, EncodingError> {
		self.serialize_dyn(record)
	}

	/// Serializes a slice of records into an array
	pub fn serialize_records<R: Record>(&self, records: &[R]) -> Result<Value, EncodingError> {
		records
			.iter()
			.map(|record| self.serialize_dyn(record))
			.collect::<Result<Vec<_>, _>>()
			.map(Value::Array)
	}

	fn serialize_dyn(&self, record: &dyn Record) -> Result<Value, EncodingError> {
		let record_type = AsRecordType::record_type(record);
		let schema =
			self.registry
				.schema_for(record_type)
				.ok_or(EncodingError::UnregisteredRecord {
					record: record_type.name(),
				})?;

		tracing::trace!(
			record = record_type.name(),
			fields = schema.len(),
			"serializing record"
		);

		let mut object = Map::with_capacity(schema.len());
		for spec in schema.fields() {
			let field = spec.source_key();
			let value = record.field(field).unwrap_or(FieldValue::Null);
			let rendered = match spec.rule() {
				None => self.raw(field, &value)?,
				Some(_) if value.is_null() => Value::Null,
				Some(rule) => self.apply(field, rule, &value)?,
			};
			object.insert(spec.output_key().to_string(), rendered);
		}

		Ok(Value::Object(object))
	}

	fn apply(
		&self,
		field: &str,
		rule: &FieldRule,
		value: &FieldValue<'_>,
	) -> Result<Value, EncodingError> {
		match rule {
			FieldRule::Custom(transform) => transform.apply(value).map_err(|err| err.in_field(field)),
			FieldRule::Raw => self.raw(field, value),
			FieldRule::Base64 => {
				let bytes = encoding::bytes_of(field, Format::Base64, value)?;
				Ok(Value::String(encoding::base64(bytes)))
			}
			FieldRule::Hex => {
				let bytes = encoding::bytes_of(field, Format::Hex, value)?;
				Ok(Value::String(encoding::hex(bytes)))
			}
			FieldRule::ByteLength => {
				let bytes = encoding::bytes_of(field, Format::ByteLength, value)?;
				Ok(Value::from(encoding::byte_length(bytes)))
			}
			FieldRule::DateYmd => self.date(field, Format::DateYmd, format::DATE_YMD, value),
			FieldRule::DateYmdHm => self.date(field, Format::DateYmdHm, format::DATE_YMD_HM, value),
			FieldRule::DateYmdHms => self.date(field, Format::DateYmdHms, format::DATE_YMD_HMS, value),
			FieldRule::Json => match value {
				FieldValue::Record(_) | FieldValue::List(_) => self.serialize(value),
				other => Err(EncodingError::UnsupportedValue {
					field: field.to_string(),
					format: Format::Json,
					found: other.kind(),
				}),
			},
		}
	}

	/// Wall-clock values render as they are; instants render in the configured zone
	fn date(
		&self,
		field: &str,
		format: Format,
		pattern: &str,
		value: &FieldValue<'_>,
	) -> Result<Value, EncodingError> {
		let text = match value {
			FieldValue::LocalDateTime(naive) => naive.format(pattern).to_string(),
			other => {
				let instant = encoding::instant_of(field, format, other)?;
				self.settings.time_zone().format(&instant, pattern)
			}
		};
		Ok(Value::String(text))
	}

	/// Passthrough rendering of a value in its natural JSON form
	fn raw(&self, field: &str, value: &FieldValue<'_>) -> Result<Value, EncodingError> {
		let rendered = match value {
			FieldValue::Null => Value::Null,
			FieldValue::Bool(flag) => Value::Bool(*flag),
			FieldValue::Int(n) => Value::from(*n),
			FieldValue::UInt(n) => Value::from(*n),
			FieldValue::Float(n) => Number::from_f64(*n).map(Value::Number).ok_or_else(|| {
				EncodingError::NonFiniteNumber {
					field: field.to_string(),
				}
			})?,
			FieldValue::Text(text) => Value::String(text.to_string()),
			FieldValue::Bytes(bytes) => Value::Array(bytes.iter().map(|&b| Value::from(b)).collect()),
			FieldValue::DateTime(instant) => Value::String(encoding::rfc3339(instant)),
			FieldValue::LocalDateTime(naive) => {
				Value::String(encoding::rfc3339(&self.settings.time_zone().resolve(naive)))
			}
			FieldValue::Record(record) => self.serialize_dyn(*record)?,
			FieldValue::List(items) => Value::Array(
				items
					.iter()
					.map(|item| self.raw(field, item))
					.collect::<Result<Vec<_>, _>>()?,
			),
			FieldValue::Json(tree) => tree.clone(),
		};
		Ok(rendered)
	}
}
