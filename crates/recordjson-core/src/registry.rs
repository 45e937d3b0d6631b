//! Field registry
//!
//! The registry maps each record type to the ordered list of fields that are
//! serialized for it. Formats are validated against the declared data type
//! when a field is registered, so misconfiguration fails at startup rather
//! than on the first serialization.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::data_type::{DataType, DeclaredType};
use crate::error::ConfigurationError;
use crate::format::FieldRule;
use crate::options::FieldOptions;
use crate::value::{Record, RecordType};

/// Registry entry for one field
#[derive(Debug, Clone)]
pub struct FieldSpec {
	source_key: String,
	output_key: String,
	data_type: DataType,
	rule: Option<FieldRule>,
}

impl FieldSpec {
	fn new(source_key: String, data_type: DataType, options: Option<&FieldOptions>) -> Self {
		let output_key = options
			.and_then(FieldOptions::output_key)
			.map_or_else(|| source_key.clone(), str::to_string);
		Self {
			source_key,
			output_key,
			data_type,
			rule: options.map(FieldOptions::rule),
		}
	}

	/// The key the value is read from
	pub fn source_key(&self) -> &str {
		&self.source_key
	}

	/// The key the value is written under
	pub fn output_key(&self) -> &str {
		&self.output_key
	}

	/// The declared data type
	pub fn data_type(&self) -> DataType {
		self.data_type
	}

	/// The rule, or `None` for a field registered without options
	pub fn rule(&self) -> Option<&FieldRule> {
		self.rule.as_ref()
	}

	/// Whether the field was registered with options
	pub fn is_configured(&self) -> bool {
		self.rule.is_some()
	}

	/// Whether the output key differs from the source key
	pub fn is_renamed(&self) -> bool {
		self.output_key != self.source_key
	}
}

/// The ordered fields registered for one record type
#[derive(Debug, Clone)]
pub struct RecordSchema {
	record_type: RecordType,
	fields: IndexMap<String, FieldSpec>,
}

impl RecordSchema {
	fn new(record_type: RecordType) -> Self {
		Self {
			record_type,
			fields: IndexMap::new(),
		}
	}

	/// The record type this schema belongs to
	pub fn record_type(&self) -> RecordType {
		self.record_type
	}

	/// Fields in registration order
	pub fn fields(&self) -> impl ExactSizeIterator<Item = &FieldSpec> {
		self.fields.values()
	}

	/// Looks up a field by source key
	pub fn field(&self, source_key: &str) -> Option<&FieldSpec> {
		self.fields.get(source_key)
	}

	/// Output keys in registration order
	pub fn output_keys(&self) -> Vec<&str> {
		self.fields().map(FieldSpec::output_key).collect()
	}

	/// Number of registered fields
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no field is registered
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Inserts or replaces in place; returns `true` when a field was replaced
	fn upsert(&mut self, spec: FieldSpec) -> bool {
		self.fields.insert(spec.source_key.clone(), spec).is_some()
	}
}

/// Types that know how to register their own fields
///
/// Implemented by `#[derive(Record)]`.
pub trait RegisterFields: Record + Sized {
	fn register_fields(registry: &FieldRegistry) -> Result<(), ConfigurationError>;
}

/// Per-type field registry
///
/// Construct one at startup, register every record type, then share it by
/// reference (or in an `Arc`) with the serializers. Registration and
/// serialization may run concurrently; writers take the lock exclusively.
///
/// # Examples
///
/// ```
/// use recordjson_core::{DataType, FieldOptions, FieldRegistry, FieldValue, IntoFieldValue, Record};
///
/// struct Sample { p1: i64, p2: String }
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
/// let schema = registry.schema::<Sample>().unwrap();
/// assert_eq!(schema.output_keys(), vec!["p1", "property2"]);
/// ```
#[derive(Debug, Default)]
pub struct FieldRegistry {
	schemas: RwLock<HashMap<RecordType, Arc<RecordSchema>>>,
}

impl FieldRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a field of `R`
	///
	/// `options = None` registers a plain passthrough field. Registering the
	/// same `source_key` again replaces the earlier entry and keeps its position.
	///
	/// # Errors
	///
	/// Returns a [`ConfigurationError`] when a date format is set on a field
	/// that is not a date or number, or a binary format on a field that is
	/// not binary or text.
	pub fn register_field<R: Record>(
		&self,
		source_key: impl Into<String>,
		data_type: DataType,
		options: Option<FieldOptions>,
	) -> Result<(), ConfigurationError> {
		self.register_field_for(RecordType::of::<R>(), source_key, data_type, options)
	}

	/// Non-generic form of [`register_field`](Self::register_field)
	pub fn register_field_for(
		&self,
		record_type: RecordType,
		source_key: impl Into<String>,
		data_type: DataType,
		options: Option<FieldOptions>,
	) -> Result<(), ConfigurationError> {
		let source_key = source_key.into();

		if let Some(format) = options.as_ref().and_then(FieldOptions::configured_format)
			&& let Err(err) = format.check_compatible(record_type.name(), &source_key, data_type)
		{
			tracing::warn!(
				record = record_type.name(),
				field = %source_key,
				%format,
				%data_type,
				"rejected field registration"
			);
			return Err(err);
		}

		let spec = FieldSpec::new(source_key, data_type, options.as_ref());
		let output_key = spec.output_key.clone();
		let rule = spec.rule.as_ref().map_or("none", FieldRule::name);

		let mut schemas = self.schemas.write();
		let schema = schemas
			.entry(record_type)
			.or_insert_with(|| Arc::new(RecordSchema::new(record_type)));
		let replaced = Arc::make_mut(schema).upsert(spec);

		if replaced {
			tracing::debug!(
				record = record_type.name(),
				%output_key,
				rule,
				"replaced registered field"
			);
		} else {
			tracing::debug!(
				record = record_type.name(),
				%output_key,
				rule,
				"registered field"
			);
		}
		Ok(())
	}

	/// Starts a chained registration for `R`
	pub fn record<R: Record>(&self) -> RecordRegistration<'_, R> {
		RecordRegistration {
			registry: self,
			_marker: PhantomData,
		}
	}

	/// Runs the generated registration of `R`
	pub fn register<R: RegisterFields>(&self) -> Result<(), ConfigurationError> {
		R::register_fields(self)
	}

	/// The schema registered for `R`
	pub fn schema<R: Record>(&self) -> Option<Arc<RecordSchema>> {
		self.schema_for(RecordType::of::<R>())
	}

	/// The schema registered for `record_type`
	pub fn schema_for(&self, record_type: RecordType) -> Option<Arc<RecordSchema>> {
		self.schemas.read().get(&record_type).cloned()
	}

	/// Whether any field of `R` is registered
	pub fn is_registered<R: Record>(&self) -> bool {
		self.schemas.read().contains_key(&RecordType::of::<R>())
	}

	/// Number of registered record types
	pub fn len(&self) -> usize {
		self.schemas.read().len()
	}

	/// Whether no record type is registered
	pub fn is_empty(&self) -> bool {
		self.schemas.read().is_empty()
	}
}

/// Chained field registration for one record type
///
/// Returned by [`FieldRegistry::record`]. Each step registers immediately, so
/// an error leaves the previously registered fields in place.
pub struct RecordRegistration<'r, R> {
	registry: &'r FieldRegistry,
	_marker: PhantomData<fn() -> R>,
}

impl<R: Record> RecordRegistration<'_, R> {
	/// Registers a passthrough field
	pub fn field(
		&mut self,
		source_key: impl Into<String>,
		data_type: DataType,
	) -> Result<&mut Self, ConfigurationError> {
		self.registry
			.register_field::<R>(source_key, data_type, None)?;
		Ok(self)
	}

	/// Registers a configured field
	pub fn field_with(
		&mut self,
		source_key: impl Into<String>,
		data_type: DataType,
		options: FieldOptions,
	) -> Result<&mut Self, ConfigurationError> {
		self.registry
			.register_field::<R>(source_key, data_type, Some(options))?;
		Ok(self)
	}

	/// Registers a passthrough field whose data type follows from `T`
	pub fn typed_field<T: DeclaredType + ?Sized>(
		&mut self,
		source_key: impl Into<String>,
	) -> Result<&mut Self, ConfigurationError> {
		self.field(source_key, T::DATA_TYPE)
	}

	/// Registers a configured field whose data type follows from `T`
	pub fn typed_field_with<T: DeclaredType + ?Sized>(
		&mut self,
		source_key: impl Into<String>,
		options: FieldOptions,
	) -> Result<&mut Self, ConfigurationError> {
		self.field_with(source_key, T::DATA_TYPE, options)
	}
}
