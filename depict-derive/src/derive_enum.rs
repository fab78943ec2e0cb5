//! Enum-specific `Depict` derivation.
//!
//! Variants are externally tagged:
//! - unit variants depict as their name
//! - newtype variants as `{Variant: value}`
//! - tuple and struct variants as `{Variant: {fields}}`
//!
//! Variant names accept `#[depict(rename = "...")]` and serde rename hints.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, DataEnum, Field, Fields, Index, Result};

use crate::{
    strategy::{parse_field_strategy, parse_variant_names, Strategy},
    transform::{field_name, generate_field_visit, visit_closure, DeriveContext},
    DeriveOutput,
};

pub(crate) fn derive_enum(
    data: DataEnum,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut depict_generics = Vec::new();
    let mut display_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        root,
        depict_generics: &mut depict_generics,
        display_generics: &mut display_generics,
    };

    let mut arms = Vec::new();
    for variant in &data.variants {
        let names = parse_variant_names(&variant.attrs, variant.ident.span())?;
        let variant_ident = &variant.ident;
        let declared = variant_ident.unraw().to_string();
        let name = field_name(root, &declared, &names);

        let arm = match &variant.fields {
            Fields::Unit => quote! {
                Self::#variant_ident => walker.scalar(
                    #name.resolve(walker.design().ignores_tag_hints()),
                )
            },
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let field = &fields.unnamed[0];
                let strategy = parse_field_strategy(&field.attrs)?;
                let (pattern, value) = if strategy == Strategy::Omit {
                    (quote! { Self::#variant_ident(_) }, quote! {})
                } else {
                    (
                        quote! { Self::#variant_ident(field_0) },
                        quote! { field_0 },
                    )
                };
                // The variant name is the only key; field-level names are unused.
                let strategy = match strategy {
                    Strategy::Omit => Strategy::Omit,
                    Strategy::Walk(_) => Strategy::Walk(names.clone()),
                    Strategy::Display(_) => Strategy::Display(names.clone()),
                    Strategy::Opaque(_) => Strategy::Opaque(names.clone()),
                };
                let visit = generate_field_visit(
                    &mut ctx,
                    &field.ty,
                    &declared,
                    &value,
                    field.span(),
                    &strategy,
                );
                let closure = visit_closure(&[visit]);
                quote! { #pattern => walker.record(#closure) }
            }
            Fields::Unnamed(fields) => {
                let (patterns, visits) = variant_fields(&mut ctx, fields.unnamed.iter())?;
                let closure = visit_closure(&visits);
                quote! {
                    Self::#variant_ident(#(#patterns),*) => walker.record(|fields| {
                        fields.nested(#name, #closure);
                    })
                }
            }
            Fields::Named(fields) => {
                let (patterns, visits) = variant_fields(&mut ctx, fields.named.iter())?;
                let closure = visit_closure(&visits);
                quote! {
                    Self::#variant_ident { #(#patterns,)* .. } => walker.record(|fields| {
                        fields.nested(#name, #closure);
                    })
                }
            }
        };
        arms.push(arm);
    }

    let depict_body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms),*
            }
        }
    };

    Ok(DeriveOutput {
        depict_body,
        depict_generics,
        display_generics,
    })
}

/// Builds the bindings and visits for the fields of a tuple or struct variant.
///
/// Fields are bound as `field_N` so they never shadow the generated
/// `walker`/`fields` bindings. Omitted fields are not bound.
fn variant_fields<'f>(
    ctx: &mut DeriveContext<'_>,
    fields: impl Iterator<Item = &'f Field>,
) -> Result<(Vec<TokenStream>, Vec<TokenStream>)> {
    let mut patterns = Vec::new();
    let mut visits = Vec::new();

    for (index, field) in fields.enumerate() {
        let strategy = parse_field_strategy(&field.attrs)?;
        let binding: Ident = format_ident!("field_{index}");
        let omitted = strategy == Strategy::Omit;

        let declared = match &field.ident {
            Some(ident) => {
                if !omitted {
                    patterns.push(quote! { #ident: #binding });
                }
                ident.unraw().to_string()
            }
            None => {
                patterns.push(if omitted {
                    quote! { _ }
                } else {
                    quote! { #binding }
                });
                Index::from(index).index.to_string()
            }
        };

        visits.push(generate_field_visit(
            ctx,
            &field.ty,
            &declared,
            &quote! { #binding },
            field.span(),
            &strategy,
        ));
    }

    Ok((patterns, visits))
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::*;

    fn derive(input: TokenStream) -> Result<DeriveOutput> {
        let input: DeriveInput = syn::parse2(input).unwrap();
        let Data::Enum(data) = input.data else {
            panic!("expected an enum");
        };
        derive_enum(data, &input.generics, &quote! { ::depict })
    }

    #[test]
    fn unit_variants_depict_as_their_name() {
        let output = derive(quote! {
            enum State {
                Idle,
                #[depict(rename = "busy")]
                Busy,
            }
        })
        .unwrap();
        let body = output.depict_body.to_string();
        assert!(body.contains("walker . scalar"));
        assert!(body.contains("\"busy\""));
    }

    #[test]
    fn newtype_variant_uses_variant_name() {
        let output = derive(quote! {
            enum Event<T> {
                Payload(#[depict(rename = "ignored")] T),
            }
        })
        .unwrap();
        let body = output.depict_body.to_string();
        assert!(body.contains("\"Payload\""));
        assert!(!body.contains("ignored"));
        assert!(!body.contains("nested"));
        assert_eq!(output.depict_generics, ["T"]);
    }

    #[test]
    fn struct_variants_nest_their_fields() {
        let output = derive(quote! {
            enum Shape {
                Rect { width: u32, #[depict(skip)] cache: Cache },
                Pair(u8, #[depict(skip)] Cache, u8),
            }
        })
        .unwrap();
        let body = output.depict_body.to_string();
        assert!(body.contains("nested"));
        assert!(body.contains("width : field_0"));
        assert!(!body.contains("cache"));
        assert!(body.contains("field_0 , _ , field_2"));
    }

    #[test]
    fn empty_enum_matches_nothing() {
        let output = derive(quote! { enum Never {} }).unwrap();
        assert_eq!(
            output.depict_body.to_string(),
            quote! { match *self {} }.to_string()
        );
    }

    #[test]
    fn variant_field_modes_error() {
        assert!(derive(quote! { enum Bad { #[depict(display)] A } }).is_err());
    }
}
