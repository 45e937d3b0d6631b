//! # recordjson-core
//!
//! Field registry and value-tree serializer.
//!
//! Records opt fields into serialization by registering them with a
//! [`FieldRegistry`], optionally with a rename, an output [`Format`] or a
//! custom transform. [`RecordSerializer`] then walks the registered fields of
//! a record, in registration order, and builds a `serde_json::Value`.
//!
//! ## Example
//!
//! ```
//! use recordjson_core::{
//!     DataType, FieldOptions, FieldRegistry, FieldValue, Format, IntoFieldValue, Record,
//!     RecordSerializer,
//! };
//! use serde_json::json;
//!
//! struct Upload {
//!     name: String,
//!     payload: Vec<u8>,
//! }
//!
//! impl Record for Upload {
//!     fn field(&self, key: &str) -> Option<FieldValue<'_>> {
//!         match key {
//!             "name" => Some(self.name.to_field_value()),
//!             "payload" => Some(self.payload.to_field_value()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let registry = FieldRegistry::new();
//! registry
//!     .record::<Upload>()
//!     .field("name", DataType::Text)?
//!     .field_with(
//!         "payload",
//!         DataType::Binary,
//!         FieldOptions::new().rename("size").format(Format::ByteLength),
//!     )?;
//!
//! let upload = Upload { name: "a.bin".to_string(), payload: vec![0; 4] };
//! let value = RecordSerializer::new(&registry).serialize_record(&upload)?;
//! assert_eq!(value, json!({ "name": "a.bin", "size": 4 }));
//! # Ok::<(), recordjson_core::Error>(())
//! ```

mod data_type;
mod encoding;
mod error;
mod format;
mod options;
mod registry;
mod serializer;
mod settings;
mod value;

pub use data_type::{DataType, DeclaredType};
pub use error::{ConfigurationError, EncodingError, Error, Result};
pub use format::{CustomTransform, FieldRule, Format};
pub use options::FieldOptions;
pub use registry::{FieldRegistry, FieldSpec, RecordRegistration, RecordSchema, RegisterFields};
pub use serializer::RecordSerializer;
pub use settings::{SerializerSettings, SettingsError, TimeZoneSetting};
pub use value::{AsRecordType, FieldValue, IntoFieldValue, Record, RecordType};
