//! Crate path resolution for generated code

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the path generated code uses to reach the record runtime.
///
/// # Strategy
///
/// 1. Inside `recordjson-core` itself: `crate`
/// 2. `recordjson` facade is a dependency: `::recordjson` (or its renamed form)
/// 3. Only `recordjson-core` is a dependency: `::recordjson_core` (or its renamed form)
/// 4. Fallback: `::recordjson`
pub(crate) fn get_recordjson_crate() -> TokenStream {
	use proc_macro_crate::{FoundCrate, crate_name};

	if let Ok(FoundCrate::Itself) = crate_name("recordjson-core") {
		return quote!(crate);
	}

	for candidate in ["recordjson", "recordjson-core"] {
		match crate_name(candidate) {
			Ok(FoundCrate::Name(name)) => {
				let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
				return quote!(::#ident);
			}
			// The facade compiling its own doctests and tests
			Ok(FoundCrate::Itself) => return quote!(::recordjson),
			Err(_) => {}
		}
	}

	quote!(::recordjson)
}
