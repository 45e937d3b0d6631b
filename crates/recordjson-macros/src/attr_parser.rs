//! Attribute parsing for `#[json(...)]` field attributes.

use proc_macro2::Span;
use syn::{
	Error, Ident, Lit, LitStr, Result, Token,
	parse::{Parse, ParseStream},
	punctuated::Punctuated,
};

/// Output formats accepted by `format = "..."`, by wire name.
const FORMATS: &[(&str, &str)] = &[
	("raw", "Raw"),
	("base64", "Base64"),
	("hex", "Hex"),
	("byte_length", "ByteLength"),
	("dt_ymd", "DateYmd"),
	("dt_ymd_hm", "DateYmdHm"),
	("dt_ymd_hms", "DateYmdHms"),
	("json", "Json"),
];

/// Declared data types accepted by `data_type = "..."`.
const DATA_TYPES: &[(&str, &str)] = &[
	("text", "Text"),
	("binary", "Binary"),
	("number", "Number"),
	("date_time", "DateTime"),
	("date-time", "DateTime"),
	("other", "Other"),
];

/// How the generated accessor reads a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Access {
	/// Through `IntoFieldValue`
	#[default]
	Value,
	/// As a nested record
	Nested,
	/// As a sequence of nested records
	NestedList,
}

/// Parsed attributes from `#[json(...)]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct JsonAttrs {
	/// Output key
	pub(crate) rename: Option<LitStr>,
	/// `Format` variant name
	pub(crate) format: Option<Ident>,
	/// `DataType` variant name overriding the one derived from the field type
	pub(crate) data_type: Option<Ident>,
	/// Infallible custom transform
	pub(crate) with: Option<syn::Path>,
	/// Fallible custom transform
	pub(crate) try_with: Option<syn::Path>,
	pub(crate) access: Access,
}

impl JsonAttrs {
	/// Whether the field is registered with options rather than as a plain passthrough
	pub(crate) fn is_configured(&self) -> bool {
		self.rename.is_some()
			|| self.format.is_some()
			|| self.with.is_some()
			|| self.try_with.is_some()
	}

	/// Whether `format = "json"` was given
	pub(crate) fn is_json_format(&self) -> bool {
		self.format.as_ref().is_some_and(|format| format == "Json")
	}
}

impl Parse for JsonAttrs {
	fn parse(input: ParseStream) -> Result<Self> {
		let attrs = Punctuated::<JsonAttr, Token![,]>::parse_terminated(input)?;

		let mut result = Self::default();

		for attr in attrs {
			match attr {
				JsonAttr::Flag(name) => {
					let access = match name.to_string().as_str() {
						"nested" => Access::Nested,
						"nested_list" => Access::NestedList,
						_ => {
							return Err(Error::new(
								name.span(),
								format!("unknown flag attribute `{}`", name),
							));
						}
					};
					if result.access != Access::Value {
						return Err(Error::new(
							name.span(),
							"`nested` and `nested_list` may only be given once",
						));
					}
					result.access = access;
				}
				JsonAttr::NameValue { name, value } => {
					let name_str = name.to_string();
					let duplicate = || Error::new(name.span(), format!("duplicate `{}` attribute", name));
					match name_str.as_str() {
						"rename" => {
							if result.rename.is_some() {
								return Err(duplicate());
							}
							result.rename = Some(lit_str(&value)?);
						}
						"format" => {
							if result.format.is_some() {
								return Err(duplicate());
							}
							result.format = Some(lookup(&value, FORMATS, "format")?);
						}
						"data_type" => {
							if result.data_type.is_some() {
								return Err(duplicate());
							}
							result.data_type = Some(lookup(&value, DATA_TYPES, "data type")?);
						}
						"with" | "try_with" => {
							if result.with.is_some() || result.try_with.is_some() {
								return Err(Error::new(
									name.span(),
									"only one of `with` and `try_with` may be given",
								));
							}
							let path = lit_str(&value)?.parse::<syn::Path>()?;
							if name_str == "with" {
								result.with = Some(path);
							} else {
								result.try_with = Some(path);
							}
						}
						_ => {
							return Err(Error::new(
								name.span(),
								format!("unknown attribute `{}`", name),
							));
						}
					}
				}
			}
		}

		if result.is_json_format() && result.access == Access::Value {
			return Err(Error::new(
				Span::call_site(),
				"`format = \"json\"` requires `nested` or `nested_list`",
			));
		}

		Ok(result)
	}
}

/// Single attribute: either a flag or a name-value pair.
enum JsonAttr {
	Flag(Ident),
	NameValue { name: Ident, value: Lit },
}

impl Parse for JsonAttr {
	fn parse(input: ParseStream) -> Result<Self> {
		let name: Ident = input.parse()?;

		if input.peek(Token![=]) {
			let _eq: Token![=] = input.parse()?;
			let value: Lit = input.parse()?;
			Ok(JsonAttr::NameValue { name, value })
		} else {
			Ok(JsonAttr::Flag(name))
		}
	}
}

fn lit_str(lit: &Lit) -> Result<LitStr> {
	match lit {
		Lit::Str(s) => Ok(s.clone()),
		other => Err(Error::new(other.span(), "expected a string literal")),
	}
}

/// Maps a wire name to the variant it names, case-insensitively.
fn lookup(lit: &Lit, table: &[(&str, &str)], what: &str) -> Result<Ident> {
	let value = lit_str(lit)?;
	let wanted = value.value().to_ascii_lowercase();
	table
		.iter()
		.find(|(wire, _)| *wire == wanted)
		.map(|(_, variant)| Ident::new(variant, value.span()))
		.ok_or_else(|| {
			let known: Vec<_> = table.iter().map(|(wire, _)| *wire).collect();
			Error::new(
				value.span(),
				format!(
					"unknown {} `{}`; expected one of: {}",
					what,
					value.value(),
					known.join(", ")
				),
			)
		})
}
