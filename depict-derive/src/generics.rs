//! Generic type parameter handling and trait bound management.
//!
//! This module adds bounds only for generics that are used by walked or
//! displayed fields. Skipped and opaque fields add none.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics: it depicts as nil
//! whatever `T` is, so
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: u64,
//!     _marker: PhantomData<T>,
//! }
//! ```
//!
//! does not require `T: Depict`.

use proc_macro2::TokenStream;
use syn::{parse_quote, Ident};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Adds `Depict` bounds to generic parameters used in walked fields.
pub(crate) fn add_depict_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    root: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#root::Depict));
        }
    }
    generics
}

/// Adds `Display` bounds to generic parameters used in `#[depict(display)]` fields.
pub(crate) fn add_display_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Display));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn collect(ty: TokenStream, generics: TokenStream) -> Vec<String> {
        let ty: syn::Type = syn::parse2(ty).unwrap();
        let generics: syn::Generics = syn::parse2(generics).unwrap();
        let mut result = Vec::new();
        collect_generics_from_type(&ty, &generics, &mut result);
        result.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_nested_parameters_once() {
        let found = collect(quote! { HashMap<K, Vec<(V, K)>> }, quote! { <K, V, W> });
        assert_eq!(found, ["K", "V"]);
    }

    #[test]
    fn skips_phantom_data() {
        let found = collect(quote! { PhantomData<T> }, quote! { <T> });
        assert!(found.is_empty());
    }

    #[test]
    fn looks_through_references_and_arrays() {
        let found = collect(quote! { &'a [T; 4] }, quote! { <'a, T> });
        assert_eq!(found, ["T"]);
    }

    #[test]
    fn bounds_only_used_parameters() {
        let generics: syn::Generics = syn::parse2(quote! { <T, U> }).unwrap();
        let t: Ident = syn::parse2(quote! { T }).unwrap();
        let bounded = add_depict_bounds(generics, &[t], &quote! { ::depict });
        let bounded = add_display_bounds(bounded, &[]);
        assert_eq!(
            quote! { #bounded }.to_string(),
            quote! { <T: ::depict::Depict, U> }.to_string()
        );
    }
}
