//! Struct-specific `Depict` derivation.
//!
//! Named fields keep their (unraw) identifiers as declared names; tuple fields
//! are named by position (`"0"`, `"1"`, ...). Unit structs depict as an empty
//! record.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Index, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_visit, visit_closure, DeriveContext},
    DeriveOutput,
};

pub(crate) fn derive_struct(
    data: DataStruct,
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

    let mut visits = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        let strategy = parse_field_strategy(&field.attrs)?;
        let (declared, value) = match &field.ident {
            Some(ident) => (ident.unraw().to_string(), quote! { &self.#ident }),
            None => {
                let index = Index::from(index);
                (index.index.to_string(), quote! { &self.#index })
            }
        };
        visits.push(generate_field_visit(
            &mut ctx,
            &field.ty,
            &declared,
            &value,
            field.span(),
            &strategy,
        ));
    }

    let closure = match data.fields {
        Fields::Unit => visit_closure(&[]),
        Fields::Named(_) | Fields::Unnamed(_) => visit_closure(&visits),
    };

    Ok(DeriveOutput {
        depict_body: quote! { walker.record(#closure) },
        depict_generics,
        display_generics,
    })
}
