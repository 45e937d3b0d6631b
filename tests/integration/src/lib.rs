//! Shared fixtures for the recordjson integration tests

use recordjson::{FieldRegistry, RecordSerializer, SerializerSettings};

/// Serializer settings pinned to UTC so date assertions do not depend on the host
pub fn utc_settings() -> SerializerSettings {
	SerializerSettings::from_toml_str("time_zone = \"utc\"")
		.unwrap_or_else(|err| panic!("utc settings must parse: {err}"))
}

/// A serializer over `registry` rendering dates in UTC
pub fn utc_serializer(registry: &FieldRegistry) -> RecordSerializer<'_> {
	RecordSerializer::with_settings(registry, utc_settings())
}
