//! Declared data types of record fields
//!
//! The registry never inspects values to learn a field's type. The caller
//! states it, either directly as a [`DataType`] or through the
//! [`DeclaredType`] mapping from Rust types.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared data type of a field, used to validate its format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
	/// UTF-8 text
	Text,
	/// Raw bytes
	Binary,
	/// Integer or floating point number
	Number,
	/// A point in time
	DateTime,
	/// Anything else (booleans, nested records, collections, JSON)
	Other,
}

impl DataType {
	/// Returns the lowercase name used in error messages
	pub fn as_str(&self) -> &'static str {
		match self {
			DataType::Text => "text",
			DataType::Binary => "binary",
			DataType::Number => "number",
			DataType::DateTime => "date-time",
			DataType::Other => "other",
		}
	}

	/// Whether date formats may be applied to fields of this type
	pub fn accepts_date_format(&self) -> bool {
		matches!(self, DataType::Number | DataType::DateTime)
	}

	/// Whether binary formats may be applied to fields of this type
	pub fn accepts_binary_format(&self) -> bool {
		matches!(self, DataType::Text | DataType::Binary)
	}
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Compile-time mapping from a Rust field type to its [`DataType`]
///
/// # Examples
///
/// ```
/// use recordjson_core::{DataType, DeclaredType};
///
/// assert_eq!(<String as DeclaredType>::DATA_TYPE, DataType::Text);
/// assert_eq!(<Option<u32> as DeclaredType>::DATA_TYPE, DataType::Number);
/// assert_eq!(<Vec<u8> as DeclaredType>::DATA_TYPE, DataType::Binary);
/// ```
pub trait DeclaredType {
	/// The data type the registry validates formats against
	const DATA_TYPE: DataType;
}

macro_rules! declared_type {
	($data_type:expr => $($ty:ty),+ $(,)?) => {
		$(
			impl DeclaredType for $ty {
				const DATA_TYPE: DataType = $data_type;
			}
		)+
	};
}

declared_type!(DataType::Text => String, str, Cow<'_, str>, char);
declared_type!(DataType::Binary => Vec<u8>, [u8], bytes::Bytes);
declared_type!(
	DataType::Number => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);
declared_type!(
	DataType::DateTime => chrono::NaiveDateTime, chrono::NaiveDate
);
declared_type!(DataType::Other => bool, serde_json::Value);

impl<Tz: chrono::TimeZone> DeclaredType for chrono::DateTime<Tz> {
	const DATA_TYPE: DataType = DataType::DateTime;
}

impl<T: DeclaredType> DeclaredType for Option<T> {
	const DATA_TYPE: DataType = T::DATA_TYPE;
}

impl<T: DeclaredType + ?Sized> DeclaredType for &T {
	const DATA_TYPE: DataType = T::DATA_TYPE;
}

impl<T: DeclaredType + ?Sized> DeclaredType for Box<T> {
	const DATA_TYPE: DataType = T::DATA_TYPE;
}
