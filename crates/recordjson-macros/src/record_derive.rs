//! Derive macro for the `Record` and `RegisterFields` traits
//!
//! Only fields carrying a `#[json]` attribute are exposed and registered.
//! Registration order follows declaration order.

use crate::attr_parser::{Access, JsonAttrs};
use crate::crate_paths::get_recordjson_crate;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Type};

/// A `#[json]` field ready for code generation
struct JsonField {
	ident: syn::Ident,
	ty: Type,
	attrs: JsonAttrs,
}

pub(crate) fn record_derive_impl(input: DeriveInput) -> syn::Result<TokenStream> {
	let struct_name = &input.ident;

	let fields = match &input.data {
		Data::Struct(data_struct) => match &data_struct.fields {
			Fields::Named(fields) => &fields.named,
			_ => {
				return Err(syn::Error::new_spanned(
					struct_name,
					"Record can only be derived for structs with named fields",
				));
			}
		},
		_ => {
			return Err(syn::Error::new_spanned(
				struct_name,
				"Record can only be derived for structs",
			));
		}
	};

	let mut json_fields = Vec::new();
	for field in fields {
		let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("json")) else {
			continue;
		};
		let attrs = match &attr.meta {
			syn::Meta::Path(_) => JsonAttrs::default(),
			_ => attr.parse_args::<JsonAttrs>()?,
		};
		let Some(ident) = field.ident.clone() else {
			continue;
		};
		json_fields.push(JsonField {
			ident,
			ty: field.ty.clone(),
			attrs,
		});
	}

	let krate = get_recordjson_crate();
	let accessor_arms = json_fields.iter().map(|field| generate_accessor(field, &krate));
	let registrations = json_fields
		.iter()
		.map(|field| generate_registration(field, &krate));

	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics #krate::Record for #struct_name #ty_generics #where_clause {
			fn field(&self, key: &str) -> ::core::option::Option<#krate::FieldValue<'_>> {
				match key {
					#(#accessor_arms)*
					_ => ::core::option::Option::None,
				}
			}
		}

		impl #impl_generics #krate::RegisterFields for #struct_name #ty_generics #where_clause {
			fn register_fields(
				registry: &#krate::FieldRegistry,
			) -> ::core::result::Result<(), #krate::ConfigurationError> {
				#(#registrations)*
				::core::result::Result::Ok(())
			}
		}
	})
}

/// `match` arm reading one field
fn generate_accessor(field: &JsonField, krate: &TokenStream) -> TokenStream {
	let ident = &field.ident;
	let key = ident.unraw().to_string();
	let optional = option_inner(&field.ty).is_some();

	let value = match (field.attrs.access, optional) {
		(Access::Value, _) => quote! {
			#krate::IntoFieldValue::to_field_value(&self.#ident)
		},
		(Access::Nested, false) => quote! {
			#krate::FieldValue::record(&self.#ident)
		},
		(Access::Nested, true) => quote! {
			self.#ident
				.as_ref()
				.map_or(#krate::FieldValue::Null, #krate::FieldValue::record)
		},
		(Access::NestedList, false) => quote! {
			#krate::FieldValue::records(&self.#ident)
		},
		(Access::NestedList, true) => quote! {
			self.#ident
				.as_deref()
				.map_or(#krate::FieldValue::Null, #krate::FieldValue::records)
		},
	};

	quote! {
		#key => ::core::option::Option::Some(#value),
	}
}

/// Registration statement for one field
fn generate_registration(field: &JsonField, krate: &TokenStream) -> TokenStream {
	let key = field.ident.unraw().to_string();
	let ty = &field.ty;
	let attrs = &field.attrs;

	let data_type = match (&attrs.data_type, attrs.access) {
		(Some(variant), _) => quote!(#krate::DataType::#variant),
		(None, Access::Value) => quote!(<#ty as #krate::DeclaredType>::DATA_TYPE),
		(None, _) => quote!(#krate::DataType::Other),
	};

	let options = if attrs.is_configured() {
		let rename = attrs.rename.as_ref().map(|name| quote!(.rename(#name)));
		let format = attrs
			.format
			.as_ref()
			.map(|variant| quote!(.format(#krate::Format::#variant)));
		let custom = match (&attrs.with, &attrs.try_with) {
			(Some(path), _) => Some(quote!(.custom(#path))),
			(None, Some(path)) => Some(quote!(.try_custom(#path))),
			(None, None) => None,
		};
		quote! {
			::core::option::Option::Some(
				#krate::FieldOptions::new() #rename #format #custom
			)
		}
	} else {
		quote!(::core::option::Option::None)
	};

	quote! {
		registry.register_field::<Self>(#key, #data_type, #options)?;
	}
}

/// Returns `T` for a field declared as `Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
	if let Type::Path(type_path) = ty
		&& type_path.qself.is_none()
		&& let Some(last_segment) = type_path.path.segments.last()
		&& last_segment.ident == "Option"
		&& let syn::PathArguments::AngleBracketed(args) = &last_segment.arguments
		&& let Some(syn::GenericArgument::Type(inner)) = args.args.first()
	{
		return Some(inner);
	}
	None
}
