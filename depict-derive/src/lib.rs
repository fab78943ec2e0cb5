//! Derive macros for `depict`.
//!
//! This crate generates the traversal code behind `#[derive(Depict)]`. It:
//! - reads `#[depict(...)]` container and field attributes
//! - reads `#[serde(rename)]`/`#[serde(skip)]` as transport-name hints
//! - emits a `Depict` implementation that enumerates fields through a walker
//!
//! It does **not** decide inclusion, depth or output shape. Those are applied
//! by the `depict` runtime while walking.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_depict_bounds, add_display_bounds};

/// Derives `depict::Depict` for structs and enums.
///
/// The generated code is placed next to the type, so it reads private fields
/// directly. Every field type must implement `Depict` unless the field is
/// skipped or uses `display`/`opaque`.
///
/// # Container Attributes
///
/// - `#[depict(error)]` - The type implements `std::error::Error`; its message
///   is appended as `(error)` when it is the portrayed root.
/// - `#[depict(string)]` - The type implements `Display`; its text is appended as
///   `(string)` when the design enables `show_string`.
///
/// # Field Attributes
///
/// - **No annotation**: The field is walked under its declared name (or its
///   `#[serde(rename = "...")]` hint).
/// - `#[depict(rename = "name")]`: Overrides the output name. `"-"` omits the field.
/// - `#[depict(skip)]`: Omits the field; its type needs no `Depict` impl.
/// - `#[depict(display)]`: Renders the field through `Display` as text.
/// - `#[depict(opaque)]`: Renders the field as `#<type name>` without walking it.
///
/// # Enums
///
/// Unit variants render as their name. Other variants render as a record with
/// a single entry named after the variant; newtype variants hold the value
/// directly, tuple and struct variants a nested record of their fields.
///
/// Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `slog::Value` (behind `cfg(feature = "slog")`): portrays the value with the
///   default design. The derive first looks for a top-level `slog` crate; if not
///   found, it checks the `DEPICT_SLOG_CRATE` env var for an alternate path
///   (e.g., `my_log::slog`). If neither is available, compilation fails with a
///   clear error.
#[proc_macro_derive(Depict, attributes(depict))]
pub fn derive_depict(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the depict crate root.
///
/// Handles crate renaming (e.g., `my_depict = { package = "depict", ... }`).
/// Inside `depict` itself the crate aliases itself as `depict`, so the
/// absolute path works there too.
fn crate_root() -> TokenStream {
    match crate_name("depict") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::depict },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// Handles crate renaming (e.g., `my_slog = { package = "slog", ... }`).
/// If the top-level `slog` crate is not available, falls back to the
/// `DEPICT_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("DEPICT_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the DEPICT_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("DEPICT_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

/// Output of the struct/enum specific derivations.
struct DeriveOutput {
    depict_body: TokenStream,
    depict_generics: Vec<syn::Ident>,
    display_generics: Vec<syn::Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { error, string } = parse_container_options(&attrs)?;

    let root = crate_root();

    let output = match data {
        Data::Struct(data) => derive_struct(data, &generics, &root)?,
        Data::Enum(data) => derive_enum(data, &generics, &root)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Depict` cannot be derived for unions",
            ));
        }
    };

    let depict_generics = add_depict_bounds(generics.clone(), &output.depict_generics, &root);
    let mut depict_generics = add_display_bounds(depict_generics, &output.display_generics);
    let (_, ty_generics, _) = generics.split_for_impl();
    let self_ty: syn::Type = parse_quote!(#ident #ty_generics);
    if error {
        depict_generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#self_ty: ::std::error::Error));
    }
    if string {
        depict_generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#self_ty: ::core::fmt::Display));
    }
    let (impl_generics, ty_generics, where_clause) = depict_generics.split_for_impl();

    let error_impl = if error {
        quote! {
            fn error_text(&self) -> ::core::option::Option<::std::string::String> {
                ::core::option::Option::Some(::std::string::ToString::to_string(self))
            }
        }
    } else {
        quote! {}
    };
    let string_impl = if string {
        quote! {
            fn string_text(&self) -> ::core::option::Option<::std::string::String> {
                ::core::option::Option::Some(::std::string::ToString::to_string(self))
            }
        }
    } else {
        quote! {}
    };

    // Only generate slog impl when the slog feature is enabled on depict-derive.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        quote! {
            impl #impl_generics #slog_crate::Value for #ident #ty_generics #where_clause {
                fn serialize(
                    &self,
                    record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    #root::slog::serialize_portrayed(self, record, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    let depict_body = &output.depict_body;
    Ok(quote! {
        impl #impl_generics #root::Depict for #ident #ty_generics #where_clause {
            fn depict(&self, walker: &#root::Walker<'_>) -> #root::Sketch {
                #depict_body
            }

            #error_impl

            #string_impl
        }

        #slog_impl
    })
}
