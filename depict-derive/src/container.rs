//! Container-level attribute parsing for `#[derive(Depict)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[depict(...)]` attributes.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// The type is an error; its message becomes the root `(error)` entry.
    pub(crate) error: bool,
    /// The type is `Display`; its text becomes the root `(string)` entry.
    pub(crate) string: bool,
}

/// Parses container-level `#[depict(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("depict") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[depict] on container - no meaning, ignore
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("error") {
                        options.error = true;
                        Ok(())
                    } else if meta.path.is_ident("string") {
                        options.string = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `error` or `string`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[depict]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let options = parse_container_options(&parse_attrs(quote! {})).unwrap();
        assert!(!options.error);
        assert!(!options.string);
    }

    #[test]
    fn error_and_string_are_parsed() {
        let attrs = parse_attrs(quote! { #[depict(error, string)] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.error);
        assert!(options.string);
    }

    #[test]
    fn options_accumulate_across_attributes() {
        let attrs = parse_attrs(quote! {
            #[depict(error)]
            #[depict(string)]
        });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.error && options.string);
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[depict(skip_debug)] });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option `skip_debug`"));
    }

    #[test]
    fn name_value_errors() {
        let attrs = parse_attrs(quote! { #[depict = "x"] });
        assert!(parse_container_options(&attrs).is_err());
    }

    #[test]
    fn bare_depict_on_container_is_ignored() {
        let attrs = parse_attrs(quote! { #[depict] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.error);
    }
}
