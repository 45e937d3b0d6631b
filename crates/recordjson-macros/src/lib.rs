//! Procedural macros for recordjson.
//!
//! This crate provides the `#[derive(Record)]` macro, which implements
//! `Record` and `RegisterFields` for a struct from `#[json]` field attributes.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attr_parser;
mod crate_paths;
mod record_derive;

/// Derives `Record` and `RegisterFields` for a struct with named fields.
///
/// Only fields marked with `#[json]` are serialized. Fields are registered
/// in declaration order when `FieldRegistry::register::<T>()` runs.
///
/// # Attributes
///
/// - `#[json]` - Register the field as a plain passthrough
/// - `#[json(rename = "key")]` - Emit the field under `key`
/// - `#[json(format = "base64")]` - Apply an output format (`raw`, `base64`, `hex`,
///   `byte_length`, `dt_ymd`, `dt_ymd_hm`, `dt_ymd_hms`, `json`)
/// - `#[json(with = "path::to::fn")]` - Render the field with a custom transform
///   of type `fn(&FieldValue<'_>) -> serde_json::Value`
/// - `#[json(try_with = "path::to::fn")]` - Same, returning `Result<Value, EncodingError>`
/// - `#[json(data_type = "binary")]` - Override the data type derived from the field's Rust type
/// - `#[json(nested)]` - The field is itself a `Record` (or `Option` of one)
/// - `#[json(nested_list)]` - The field is a `Vec` or slice of records (or `Option` of one)
///
/// A field given `rename`, `format`, `with` or `try_with` is registered with
/// options, so an absent value renders as `null` without running its rule.
///
/// # Example
///
/// ```ignore
/// use recordjson::Record;
///
/// #[derive(Record)]
/// struct Sample {
///     #[json]
///     p1: i32,
///
///     #[json(rename = "property2")]
///     p2: String,
///
///     #[json(format = "base64")]
///     p4: Vec<u8>,
///
///     // Not serialized
///     internal: u64,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl recordjson::Record for Sample {
///     fn field(&self, key: &str) -> Option<recordjson::FieldValue<'_>> {
///         match key {
///             "p1" => Some(recordjson::IntoFieldValue::to_field_value(&self.p1)),
///             "p2" => Some(recordjson::IntoFieldValue::to_field_value(&self.p2)),
///             "p4" => Some(recordjson::IntoFieldValue::to_field_value(&self.p4)),
///             _ => None,
///         }
///     }
/// }
///
/// impl recordjson::RegisterFields for Sample {
///     fn register_fields(registry: &recordjson::FieldRegistry) -> Result<(), recordjson::ConfigurationError> {
///         registry.register_field::<Self>("p1", <i32 as recordjson::DeclaredType>::DATA_TYPE, None)?;
///         registry.register_field::<Self>(
///             "p2",
///             <String as recordjson::DeclaredType>::DATA_TYPE,
///             Some(recordjson::FieldOptions::new().rename("property2")),
///         )?;
///         registry.register_field::<Self>(
///             "p4",
///             <Vec<u8> as recordjson::DeclaredType>::DATA_TYPE,
///             Some(recordjson::FieldOptions::new().format(recordjson::Format::Base64)),
///         )?;
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_derive(Record, attributes(json))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	record_derive::record_derive_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}
