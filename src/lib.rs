//! # recordjson
//!
//! Per-field formatting rules for turning Rust records into JSON value trees.
//!
//! A record type opts individual fields into serialization. Each registered
//! field can be renamed, given an output format (base64, hex, byte length,
//! calendar dates, nested JSON) or rendered by a custom transform. Fields that
//! are not registered never appear in the output.
//!
//! ## Feature Flags
//!
//! - `derive` (default) - `#[derive(Record)]` with `#[json(...)]` field attributes
//!
//! ## Quick Example
//!
//! ```
//! use recordjson::prelude::*;
//! use serde_json::json;
//!
//! #[derive(Record)]
//! struct Sample {
//!     #[json]
//!     p1: i32,
//!
//!     #[json(rename = "property2")]
//!     p2: String,
//!
//!     #[json(format = "hex")]
//!     p5: Vec<u8>,
//!
//!     internal: u64,
//! }
//!
//! let registry = FieldRegistry::new();
//! registry.register::<Sample>()?;
//!
//! let sample = Sample {
//!     p1: 1,
//!     p2: "p2".to_string(),
//!     p5: b"p5".to_vec(),
//!     internal: 42,
//! };
//! let value = RecordSerializer::new(&registry).serialize_record(&sample)?;
//! assert_eq!(value, json!({ "p1": 1, "property2": "p2", "p5": "7035" }));
//! # Ok::<(), recordjson::Error>(())
//! ```
//!
//! Without the derive, the same registration is written with
//! [`FieldRegistry::record`] and a hand-written [`Record`] impl.

// Lets the derive's `::recordjson` paths resolve inside this crate's own tests.
extern crate self as recordjson;

pub use recordjson_core::{
	AsRecordType, ConfigurationError, CustomTransform, DataType, DeclaredType, EncodingError,
	Error, FieldOptions, FieldRegistry, FieldRule, FieldSpec, FieldValue, Format, IntoFieldValue,
	Record, RecordRegistration, RecordSchema, RecordSerializer, RecordType, RegisterFields,
	Result, SerializerSettings, SettingsError, TimeZoneSetting,
};

#[cfg(feature = "derive")]
pub use recordjson_macros::Record;

/// Convenience re-exports for the common registration and serialization path
pub mod prelude {
	pub use crate::{
		DataType, FieldOptions, FieldRegistry, FieldValue, Format, IntoFieldValue, Record,
		RecordSerializer, RegisterFields, SerializerSettings,
	};
}
