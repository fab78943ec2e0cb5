//! Shared per-field code generation for struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};

use crate::{
    generics::collect_generics_from_type,
    strategy::{Names, Strategy},
};

/// Accumulated state during field processing.
///
/// Groups the generics collected while walking the fields of a struct or of
/// every enum variant.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) root: &'a TokenStream,
    pub(crate) depict_generics: &'a mut Vec<Ident>,
    pub(crate) display_generics: &'a mut Vec<Ident>,
}

/// Builds the `FieldName` expression for a field or variant.
pub(crate) fn field_name(root: &TokenStream, declared: &str, names: &Names) -> TokenStream {
    let mut tokens = quote! { #root::FieldName::new(#declared) };
    if let Some(rename) = &names.rename {
        tokens = quote! { #tokens.renamed(#rename) };
    }
    if let Some(hint) = &names.hint {
        tokens = quote! { #tokens.hinted(#hint) };
    }
    tokens
}

/// Generates the visit statement for a single field.
///
/// `value` must evaluate to a reference to the field. Omitted fields produce
/// no code, so their types need no bounds.
///
/// | Strategy | Generated call | Bound |
/// |----------|----------------|-------|
/// | `Omit` | none | none |
/// | `Walk` | `fields.field(..)` | `Depict` |
/// | `Display` | `fields.display(..)` | `Display` |
/// | `Opaque` | `fields.opaque(..)` | none |
pub(crate) fn generate_field_visit(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    declared: &str,
    value: &TokenStream,
    span: Span,
    strategy: &Strategy,
) -> TokenStream {
    match strategy {
        Strategy::Omit => quote! {},
        Strategy::Walk(names) => {
            collect_generics_from_type(ty, ctx.generics, ctx.depict_generics);
            let name = field_name(ctx.root, declared, names);
            quote_spanned! { span =>
                fields.field(#name, #value);
            }
        }
        Strategy::Display(names) => {
            collect_generics_from_type(ty, ctx.generics, ctx.display_generics);
            let name = field_name(ctx.root, declared, names);
            quote_spanned! { span =>
                fields.display(#name, #value);
            }
        }
        Strategy::Opaque(names) => {
            let name = field_name(ctx.root, declared, names);
            quote_spanned! { span =>
                fields.opaque(#name, #value);
            }
        }
    }
}

/// Wraps field visits in a closure for `Walker::record` or `Fields::nested`.
pub(crate) fn visit_closure(visits: &[TokenStream]) -> TokenStream {
    if visits.iter().all(TokenStream::is_empty) {
        quote! { |_fields| {} }
    } else {
        quote! { |fields| { #(#visits)* } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_chains_rename_and_hint() {
        let names = Names {
            rename: Some("b".to_string()),
            hint: Some("c".to_string()),
        };
        let tokens = field_name(&quote! { ::depict }, "a", &names);
        assert_eq!(
            tokens.to_string(),
            quote! { ::depict::FieldName::new("a").renamed("b").hinted("c") }.to_string()
        );
    }

    #[test]
    fn omitted_fields_collect_no_generics() {
        let generics: syn::Generics = syn::parse2(quote! { <T> }).unwrap();
        let ty: syn::Type = syn::parse2(quote! { Vec<T> }).unwrap();
        let root = quote! { ::depict };
        let mut depict_generics = Vec::new();
        let mut display_generics = Vec::new();
        let mut ctx = DeriveContext {
            generics: &generics,
            root: &root,
            depict_generics: &mut depict_generics,
            display_generics: &mut display_generics,
        };

        let omitted = generate_field_visit(
            &mut ctx,
            &ty,
            "items",
            &quote! { &self.items },
            Span::call_site(),
            &Strategy::Omit,
        );
        assert!(omitted.is_empty());
        let opaque = generate_field_visit(
            &mut ctx,
            &ty,
            "items",
            &quote! { &self.items },
            Span::call_site(),
            &Strategy::Opaque(Names::default()),
        );
        assert!(opaque.to_string().contains("opaque"));
        let displayed = generate_field_visit(
            &mut ctx,
            &ty,
            "items",
            &quote! { &self.items },
            Span::call_site(),
            &Strategy::Display(Names::default()),
        );
        assert!(displayed.to_string().contains("display"));

        assert!(depict_generics.is_empty());
        assert_eq!(display_generics.len(), 1);
    }

    #[test]
    fn empty_visits_use_an_unused_binding() {
        assert_eq!(
            visit_closure(&[quote! {}]).to_string(),
            quote! { |_fields| {} }.to_string()
        );
    }
}
