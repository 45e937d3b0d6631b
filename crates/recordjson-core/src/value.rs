//! Runtime field values and the `Record` trait
//!
//! A record exposes each registered field as a [`FieldValue`], borrowing from
//! the record where it can. The serializer turns those values into
//! `serde_json::Value` trees according to the registered rules.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;

/// Identity of a record type in the registry
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
	id: TypeId,
	name: &'static str,
}

impl RecordType {
	/// Returns the identity of `T`
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	/// The `TypeId` the registry is keyed by
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// The type name, for diagnostics
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for RecordType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for RecordType {}

impl Hash for RecordType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

/// Resolves the concrete type behind a `&dyn Record`
///
/// Implemented for every sized `'static` type; there is no need to implement
/// it by hand.
pub trait AsRecordType {
	/// The identity of the concrete record type
	fn record_type(&self) -> RecordType;
}

impl<T: Any> AsRecordType for T {
	fn record_type(&self) -> RecordType {
		RecordType::of::<T>()
	}
}

/// A type whose fields can be read by name
///
/// Implement by hand or with `#[derive(Record)]`. Returning `None` for an
/// unknown key is equivalent to returning [`FieldValue::Null`].
///
/// # Examples
///
/// ```
/// use recordjson_core::{FieldValue, IntoFieldValue, Record};
///
/// struct Point {
///     x: i64,
///     label: String,
/// }
///
/// impl Record for Point {
///     fn field(&self, key: &str) -> Option<FieldValue<'_>> {
///         match key {
///             "x" => Some(self.x.to_field_value()),
///             "label" => Some(self.label.to_field_value()),
///             _ => None,
///         }
///     }
/// }
///
/// let point = Point { x: 3, label: "origin".to_string() };
/// assert!(matches!(point.field("x"), Some(FieldValue::Int(3))));
/// ```
pub trait Record: AsRecordType + Send + Sync + 'static {
	/// Reads the field stored under `key`
	fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

/// The runtime value of a single field
#[derive(Clone)]
pub enum FieldValue<'a> {
	/// Absent value
	Null,
	Bool(bool),
	Int(i64),
	UInt(u64),
	Float(f64),
	Text(Cow<'a, str>),
	Bytes(Cow<'a, [u8]>),
	/// A point in time
	DateTime(DateTime<Utc>),
	/// A wall-clock date-time without a time zone; dates are read as midnight
	LocalDateTime(NaiveDateTime),
	/// A nested record
	Record(&'a dyn Record),
	/// An ordered sequence of values
	List(Vec<FieldValue<'a>>),
	/// An already-built value tree, passed through as-is
	Json(Value),
}

impl<'a> FieldValue<'a> {
	/// Wraps a nested record
	pub fn record<R: Record>(record: &'a R) -> Self {
		FieldValue::Record(record)
	}

	/// Wraps a slice of records as a sequence
	pub fn records<R: Record>(records: &'a [R]) -> Self {
		FieldValue::List(records.iter().map(|r| FieldValue::Record(r)).collect())
	}

	/// Whether this is the absent marker
	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	/// A short name of the variant, for error messages
	pub fn kind(&self) -> &'static str {
		match self {
			FieldValue::Null => "null",
			FieldValue::Bool(_) => "boolean",
			FieldValue::Int(_) | FieldValue::UInt(_) => "integer",
			FieldValue::Float(_) => "float",
			FieldValue::Text(_) => "text",
			FieldValue::Bytes(_) => "binary",
			FieldValue::DateTime(_) => "date-time",
			FieldValue::LocalDateTime(_) => "local date-time",
			FieldValue::Record(_) => "record",
			FieldValue::List(_) => "sequence",
			FieldValue::Json(_) => "json",
		}
	}

	/// Returns the text, if this is a text value
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldValue::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the bytes, if this is a binary value
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			FieldValue::Bytes(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Returns the number as `f64`, if this is a numeric value
	pub fn as_f64(&self) -> Option<f64> {
		match *self {
			FieldValue::Int(n) => Some(n as f64),
			FieldValue::UInt(n) => Some(n as f64),
			FieldValue::Float(n) => Some(n),
			_ => None,
		}
	}

	/// Returns the instant, if this is a date-time value
	pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
		match self {
			FieldValue::DateTime(dt) => Some(*dt),
			_ => None,
		}
	}

	/// Returns the wall-clock date-time, if this is a zone-less value
	pub fn as_local_datetime(&self) -> Option<NaiveDateTime> {
		match self {
			FieldValue::LocalDateTime(naive) => Some(*naive),
			_ => None,
		}
	}
}

impl fmt::Debug for FieldValue<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldValue::Null => f.write_str("Null"),
			FieldValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			FieldValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
			FieldValue::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
			FieldValue::Float(n) => f.debug_tuple("Float").field(n).finish(),
			FieldValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
			FieldValue::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
			FieldValue::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
			FieldValue::LocalDateTime(naive) => f.debug_tuple("LocalDateTime").field(naive).finish(),
			FieldValue::Record(r) => f
				.debug_tuple("Record")
				.field(&AsRecordType::record_type(*r).name())
				.finish(),
			FieldValue::List(items) => f.debug_tuple("List").field(items).finish(),
			FieldValue::Json(v) => f.debug_tuple("Json").field(v).finish(),
		}
	}
}

/// Conversion from a field's Rust type to a [`FieldValue`] borrowing from it
pub trait IntoFieldValue {
	fn to_field_value(&self) -> FieldValue<'_>;
}

macro_rules! signed_field_value {
	($($ty:ty),+) => {
		$(
			impl IntoFieldValue for $ty {
				fn to_field_value(&self) -> FieldValue<'_> {
					FieldValue::Int(i64::from(*self))
				}
			}
		)+
	};
}

macro_rules! unsigned_field_value {
	($($ty:ty),+) => {
		$(
			impl IntoFieldValue for $ty {
				fn to_field_value(&self) -> FieldValue<'_> {
					FieldValue::UInt(u64::from(*self))
				}
			}
		)+
	};
}

signed_field_value!(i8, i16, i32, i64);
unsigned_field_value!(u8, u16, u32, u64);

impl IntoFieldValue for isize {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Int(*self as i64)
	}
}

impl IntoFieldValue for usize {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::UInt(*self as u64)
	}
}

impl IntoFieldValue for f32 {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Float(f64::from(*self))
	}
}

impl IntoFieldValue for f64 {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Float(*self)
	}
}

impl IntoFieldValue for bool {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Bool(*self)
	}
}

impl IntoFieldValue for char {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Text(Cow::Owned(self.to_string()))
	}
}

impl IntoFieldValue for str {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Text(Cow::Borrowed(self))
	}
}

impl IntoFieldValue for String {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Text(Cow::Borrowed(self.as_str()))
	}
}

impl IntoFieldValue for Cow<'_, str> {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Text(Cow::Borrowed(self.as_ref()))
	}
}

impl IntoFieldValue for [u8] {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Bytes(Cow::Borrowed(self))
	}
}

impl IntoFieldValue for Vec<u8> {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Bytes(Cow::Borrowed(self.as_slice()))
	}
}

impl IntoFieldValue for bytes::Bytes {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Bytes(Cow::Borrowed(self.as_ref()))
	}
}

impl<Tz: TimeZone> IntoFieldValue for DateTime<Tz> {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::DateTime(self.with_timezone(&Utc))
	}
}

impl IntoFieldValue for NaiveDateTime {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::LocalDateTime(*self)
	}
}

impl IntoFieldValue for NaiveDate {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::LocalDateTime(self.and_time(NaiveTime::MIN))
	}
}

impl IntoFieldValue for Value {
	fn to_field_value(&self) -> FieldValue<'_> {
		FieldValue::Json(self.clone())
	}
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
	fn to_field_value(&self) -> FieldValue<'_> {
		match self {
			Some(value) => value.to_field_value(),
			None => FieldValue::Null,
		}
	}
}

impl<T: IntoFieldValue + ?Sized> IntoFieldValue for &T {
	fn to_field_value(&self) -> FieldValue<'_> {
		(**self).to_field_value()
	}
}

impl<T: IntoFieldValue + ?Sized> IntoFieldValue for Box<T> {
	fn to_field_value(&self) -> FieldValue<'_> {
		(**self).to_field_value()
	}
}
