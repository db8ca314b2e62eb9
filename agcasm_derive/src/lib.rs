//! Derive macros for agcasm.
#![allow(clippy::missing_panics_doc)]

use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::LitStr;

/// A unit variant together with its canonical upper-case spelling and any extra spellings given with
/// `#[parse(alias = "...")]`.
struct UnitVariant {
	identifier: syn::Ident,
	spelling:   String,
	aliases:    Vec<String>,
}

fn unit_variants(type_: &syn::DeriveInput, derive_name: &str) -> Vec<UnitVariant> {
	let syn::Data::Enum(enum_) = &type_.data else {
		panic!("{derive_name} cannot be derived for non-enum types.");
	};
	enum_
		.variants
		.iter()
		.map(|variant| {
			if !matches!(variant.fields, syn::Fields::Unit) {
				panic!(
					"{derive_name} cannot be derived for enums containing non-unit variants; variant {} is not a unit.",
					variant.to_token_stream()
				);
			}
			let mut aliases = Vec::new();
			for attribute in variant.attrs.iter().filter(|attribute| attribute.path().is_ident("parse")) {
				attribute
					.parse_nested_meta(|meta| {
						if meta.path.is_ident("alias") {
							let alias: LitStr = meta.value()?.parse()?;
							aliases.push(alias.value().to_uppercase());
							Ok(())
						} else {
							Err(meta.error("unsupported parse attribute"))
						}
					})
					.unwrap();
			}
			UnitVariant {
				identifier: variant.ident.clone(),
				spelling: variant.ident.to_string().to_uppercase(),
				aliases,
			}
		})
		.collect()
}

/// Derives `crate::common::Parse` for a unit enum. Matching is case-insensitive against the upper-cased variant
/// name and any `#[parse(alias = "...")]` spellings.
#[proc_macro_derive(Parse, attributes(parse))]
pub fn parse_macro_derive(input: TokenStream) -> TokenStream {
	let type_ = syn::parse::<syn::DeriveInput>(input).unwrap();
	let variants = unit_variants(&type_, "Parse");
	let name = &type_.ident;
	let name_string = name.to_string().to_lowercase();

	let (spellings, identifiers): (Vec<_>, Vec<_>) = variants
		.iter()
		.flat_map(|variant| {
			std::iter::once(variant.spelling.clone())
				.chain(variant.aliases.iter().cloned())
				.map(|spelling| (spelling, variant.identifier.clone()))
		})
		.unzip();

	quote! {
		#[automatically_derived]
		#[allow(missing_docs)]
		impl crate::common::Parse for #name {
			fn parse(value: &str) -> Result<Self, crate::AssemblyError> {
				Ok(match value.to_ascii_uppercase().as_str() {
					#( #spellings => Self::#identifiers, )*
					_ => return Err(crate::AssemblyError::InvalidConstant {
						constant: value.to_owned(),
						typename: #name_string.to_owned(),
					}),
				})
			}
		}
	}
	.into()
}

/// Derives `crate::common::VariantName`, yielding the upper-cased variant name.
#[proc_macro_derive(VariantName)]
pub fn variant_name_derive(input: TokenStream) -> TokenStream {
	let type_ = syn::parse::<syn::DeriveInput>(input).unwrap();
	let variants = unit_variants(&type_, "VariantName");
	let name = &type_.ident;
	let identifiers = variants.iter().map(|variant| &variant.identifier);
	let spellings = variants.iter().map(|variant| &variant.spelling);

	quote! {
		#[automatically_derived]
		impl crate::common::VariantName for #name {
			fn variant_name(&self) -> &'static str {
				match self {
					#( Self::#identifiers => #spellings, )*
				}
			}
		}
	}
	.into()
}
