//! Nested records, sequences and the JSON format

use recordjson::prelude::*;
use recordjson::EncodingError;
use rstest::{fixture, rstest};
use serde_json::json;

#[derive(Record)]
struct Item {
	#[json(rename = "one")]
	p1: i64,
	#[json(rename = "two")]
	p2: String,
}

#[derive(Record)]
struct Holder {
	#[json(nested)]
	p1: Item,
	#[json(nested, format = "json")]
	p2: Item,
	#[json(nested_list, format = "json")]
	items: Vec<Item>,
	#[json(nested_list, format = "json")]
	maybe_items: Option<Vec<Item>>,
}

fn item(p1: i64, p2: &str) -> Item {
	Item {
		p1,
		p2: p2.to_string(),
	}
}

#[fixture]
fn registry() -> FieldRegistry {
	let registry = FieldRegistry::new();
	registry.register::<Item>().unwrap();
	registry.register::<Holder>().unwrap();
	registry
}

#[rstest]
fn test_json_field_equals_direct_serialization(registry: FieldRegistry) {
	// Arrange
	let holder = Holder {
		p1: item(1, "p2"),
		p2: item(2, "p.2"),
		items: vec![item(3, "c"), item(4, "d")],
		maybe_items: None,
	};
	let serializer = RecordSerializer::new(&registry);

	// Act
	let json = serializer.serialize_record(&holder).unwrap();

	// Assert
	assert_eq!(json["p1"], json!({ "one": 1, "two": "p2" }));
	assert_eq!(json["p2"], serializer.serialize_record(&holder.p2).unwrap());
	assert_eq!(
		json["items"],
		serializer.serialize_records(&holder.items).unwrap()
	);
	assert_eq!(json["maybe_items"], json!(null));
}

#[rstest]
fn test_sequence_preserves_length_and_order(registry: FieldRegistry) {
	let items = [item(1, "p2"), item(2, "p.2")];

	let json = RecordSerializer::new(&registry)
		.serialize_records(&items)
		.unwrap();

	assert_eq!(
		json,
		json!([
			{ "one": 1, "two": "p2" },
			{ "one": 2, "two": "p.2" },
		])
	);
}

#[rstest]
fn test_serialize_accepts_nested_sequences(registry: FieldRegistry) {
	let first = [item(1, "a")];
	let second = [item(2, "b"), item(3, "c")];
	let input = FieldValue::List(vec![FieldValue::records(&first), FieldValue::records(&second)]);

	let json = RecordSerializer::new(&registry).serialize(&input).unwrap();

	assert_eq!(json.as_array().map(Vec::len), Some(2));
	assert_eq!(json[1][1], json!({ "one": 3, "two": "c" }));
}

#[rstest]
fn test_empty_sequence(registry: FieldRegistry) {
	let json = RecordSerializer::new(&registry)
		.serialize_records::<Item>(&[])
		.unwrap();

	assert_eq!(json, json!([]));
}

#[rstest]
fn test_scalar_input_is_rejected(registry: FieldRegistry) {
	let err = RecordSerializer::new(&registry)
		.serialize(&FieldValue::Text("loose".into()))
		.unwrap_err();

	assert_eq!(err, EncodingError::UnsupportedInput { found: "text" });
}

#[rstest]
fn test_unregistered_nested_record_fails_the_call() {
	// Item is never registered, so the nested field cannot be rendered.
	let registry = FieldRegistry::new();
	registry.register::<Holder>().unwrap();
	let holder = Holder {
		p1: item(1, "a"),
		p2: item(2, "b"),
		items: Vec::new(),
		maybe_items: None,
	};

	let err = RecordSerializer::new(&registry)
		.serialize_record(&holder)
		.unwrap_err();

	assert!(matches!(err, EncodingError::UnregisteredRecord { record } if record.ends_with("Item")));
}
