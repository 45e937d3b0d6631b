//! Registration through the builder API and hand-written `Record` impls

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use proptest::prelude::*;
use recordjson::{
	DataType, EncodingError, FieldOptions, FieldRegistry, FieldValue, Format, IntoFieldValue,
	Record, RecordSerializer,
};
use recordjson_integration_tests::utc_serializer;
use rstest::rstest;
use serde_json::{Map, Value, json};

struct Sample {
	p1: i32,
	p2: String,
	blob: Option<Vec<u8>>,
	created: Option<i64>,
}

impl Record for Sample {
	fn field(&self, key: &str) -> Option<FieldValue<'_>> {
		match key {
			"p1" => Some(self.p1.to_field_value()),
			"p2" => Some(self.p2.to_field_value()),
			"blob" => Some(self.blob.to_field_value()),
			"created" => Some(self.created.to_field_value()),
			_ => None,
		}
	}
}

fn sample() -> Sample {
	Sample {
		p1: 1,
		p2: "p2".to_string(),
		blob: None,
		created: None,
	}
}

#[rstest]
fn test_unconfigured_and_renamed_fields() {
	// Arrange
	let registry = FieldRegistry::new();
	registry
		.record::<Sample>()
		.field("p1", DataType::Number)
		.unwrap()
		.field_with("p2", DataType::Text, FieldOptions::new().rename("property2"))
		.unwrap();

	// Act
	let json = RecordSerializer::new(&registry)
		.serialize_record(&sample())
		.unwrap();

	// Assert
	assert_eq!(json, json!({ "p1": 1, "property2": "p2" }));
}

#[rstest]
fn test_custom_transform_overrides_format() {
	let registry = FieldRegistry::new();
	registry
		.register_field::<Sample>(
			"p2",
			DataType::Text,
			Some(
				FieldOptions::new()
					.format(Format::Base64)
					.custom(|value| json!(value.as_str().map(str::len))),
			),
		)
		.unwrap();

	let json = RecordSerializer::new(&registry)
		.serialize_record(&sample())
		.unwrap();

	assert_eq!(json, json!({ "p2": 2 }));
}

#[rstest]
fn test_fallible_transform_aborts_serialization() {
	let registry = FieldRegistry::new();
	registry
		.record::<Sample>()
		.field("p1", DataType::Number)
		.unwrap()
		.field_with(
			"p2",
			DataType::Text,
			FieldOptions::new().try_custom(|value| match value.as_str() {
				Some(text) if text.len() > 1 => Err(EncodingError::transform("longer than one character")),
				_ => Ok(json!("short")),
			}),
		)
		.unwrap();

	let err = RecordSerializer::new(&registry)
		.serialize_record(&sample())
		.unwrap_err();

	assert_eq!(
		err,
		EncodingError::Transform {
			field: "p2".to_string(),
			message: "longer than one character".to_string(),
		}
	);
	assert!(err.to_string().contains("p2"));
}

#[rstest]
fn test_re_registration_keeps_position() {
	let registry = FieldRegistry::new();
	registry
		.record::<Sample>()
		.field("p1", DataType::Number)
		.unwrap()
		.field("p2", DataType::Text)
		.unwrap()
		.field_with("p1", DataType::Number, FieldOptions::new().rename("first"))
		.unwrap();

	let json = RecordSerializer::new(&registry)
		.serialize_record(&sample())
		.unwrap();

	let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
	assert_eq!(keys, ["first", "p2"]);
}

#[rstest]
fn test_registry_is_shared_across_threads() {
	// Arrange
	let registry = Arc::new(FieldRegistry::new());
	registry
		.register_field::<Sample>("p1", DataType::Number, None)
		.unwrap();

	// Act
	let outputs: Vec<_> = (0..4)
		.map(|n| {
			let registry = Arc::clone(&registry);
			thread::spawn(move || {
				let record = Sample { p1: n, ..sample() };
				RecordSerializer::new(&registry)
					.serialize_record(&record)
					.unwrap()
			})
		})
		.collect::<Vec<_>>()
		.into_iter()
		.map(|handle| handle.join().unwrap())
		.collect();

	// Assert
	for (n, output) in outputs.iter().enumerate() {
		assert_eq!(output, &json!({ "p1": n }));
	}
}

fn any_format() -> impl Strategy<Value = Format> {
	prop::sample::select(vec![
		Format::Raw,
		Format::Base64,
		Format::Hex,
		Format::ByteLength,
		Format::DateYmd,
		Format::DateYmdHm,
		Format::DateYmdHms,
		Format::Json,
	])
}

/// The field a format can be registered on without a configuration error
fn field_for(format: Format) -> (&'static str, DataType) {
	if format.is_date() {
		("created", DataType::Number)
	} else if format.is_binary() {
		("blob", DataType::Binary)
	} else {
		("blob", DataType::Other)
	}
}

proptest! {
	#[test]
	fn prop_renamed_absent_value_is_null_for_every_format(
		format in any_format(),
		name in "[a-z][a-z0-9_]{0,12}",
	) {
		let (field, data_type) = field_for(format);
		let registry = FieldRegistry::new();
		registry
			.register_field::<Sample>(field, data_type, Some(FieldOptions::new().rename(name.clone()).format(format)))
			.unwrap();

		let json = utc_serializer(&registry).serialize_record(&sample()).unwrap();

		let mut expected = Map::new();
		expected.insert(name, Value::Null);
		prop_assert_eq!(json, Value::Object(expected));
	}

	#[test]
	fn prop_custom_transform_is_skipped_for_absent_values(
		name in "[a-z][a-z0-9_]{0,12}",
		field in prop::sample::select(vec!["blob", "created"]),
	) {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let registry = FieldRegistry::new();
		registry
			.register_field::<Sample>(
				field,
				DataType::Other,
				Some(FieldOptions::new().rename(name.clone()).custom(move |_| {
					counter.fetch_add(1, Ordering::SeqCst);
					json!("transformed")
				})),
			)
			.unwrap();

		let json = utc_serializer(&registry).serialize_record(&sample()).unwrap();

		let mut expected = Map::new();
		expected.insert(name, Value::Null);
		prop_assert_eq!(json, Value::Object(expected));
		prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn prop_base64_decodes_to_the_input_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
		let registry = FieldRegistry::new();
		registry
			.register_field::<Sample>("blob", DataType::Binary, Some(FieldOptions::new().format(Format::Base64)))
			.unwrap();
		let record = Sample { blob: Some(bytes.clone()), ..sample() };

		let json = RecordSerializer::new(&registry).serialize_record(&record).unwrap();

		let encoded = json["blob"].as_str().unwrap().to_string();
		prop_assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
	}

	#[test]
	fn prop_hex_decodes_to_the_input_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
		let registry = FieldRegistry::new();
		registry
			.register_field::<Sample>("blob", DataType::Binary, Some(FieldOptions::new().format(Format::Hex)))
			.unwrap();
		let record = Sample { blob: Some(bytes.clone()), ..sample() };

		let json = RecordSerializer::new(&registry).serialize_record(&record).unwrap();

		let encoded = json["blob"].as_str().unwrap().to_string();
		prop_assert_eq!(hex::decode(encoded).unwrap(), bytes);
	}
}
