//! Parsing of `#[depict(...)]` field and variant attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms. `#[serde(...)]` attributes are read
//! leniently: only `rename` and `skip`/`skip_serializing` are picked up, as
//! name hints, and anything else (or anything unparseable) is left to serde.

use proc_macro2::Span;
use syn::{
    punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Lit, LitStr, Meta,
    MetaNameValue, Result, Token,
};

/// Name of an omitted field, as understood by the runtime.
const OMITTED: &str = "-";

/// Output names attached to a field or variant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Names {
    /// `#[depict(rename = "...")]`; always wins.
    pub(crate) rename: Option<String>,
    /// Transport name taken from `#[serde(...)]`.
    pub(crate) hint: Option<String>,
}

/// Field traversal strategy based on `#[depict(...)]` attributes.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Walk` | Field is depicted through its `Depict` impl |
/// | `#[depict(skip)]` | `Omit` | Field never appears |
/// | `#[depict(display)]` | `Display` | Field is rendered as its `Display` text |
/// | `#[depict(opaque)]` | `Opaque` | Field is rendered as `#<type name>` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    Omit,
    Walk(Names),
    Display(Names),
    Opaque(Names),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Display,
    Opaque,
}

fn set_mode(target: &mut Option<Mode>, next: Mode, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "`display` and `opaque` are mutually exclusive and may appear once",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut mode: Option<Mode> = None;
    let mut rename: Option<String> = None;
    let mut skip = false;
    let mut skip_attr: Option<&Attribute> = None;
    let mut hint: Option<String> = None;

    for attr in attrs {
        if attr.path().is_ident("serde") {
            if let Some(found) = serde_hint(attr) {
                hint = Some(found);
            }
            continue;
        }
        if !attr.path().is_ident("depict") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        if skip {
                            return Err(meta.error("duplicate `skip`"));
                        }
                        skip = true;
                        Ok(())
                    } else if meta.path.is_ident("rename") {
                        let value: LitStr = meta.value()?.parse()?;
                        if rename.is_some() {
                            return Err(meta.error("duplicate `rename`"));
                        }
                        rename = Some(value.value());
                        Ok(())
                    } else if meta.path.is_ident("display") {
                        set_mode(&mut mode, Mode::Display, meta.path.span())
                    } else if meta.path.is_ident("opaque") {
                        set_mode(&mut mode, Mode::Opaque, meta.path.span())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `rename`, `skip`, `display` or `opaque`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
                if skip && skip_attr.is_none() {
                    skip_attr = Some(attr);
                }
            }
            Meta::Path(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected field options (e.g., #[depict(rename = \"name\")])",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "name-value syntax is not supported for #[depict]",
                ));
            }
        }
    }

    if skip {
        if rename.is_some() || mode.is_some() {
            let message = "`skip` cannot be combined with other field options";
            return Err(match skip_attr {
                Some(attr) => syn::Error::new_spanned(attr, message),
                None => syn::Error::new(Span::call_site(), message),
            });
        }
        return Ok(Strategy::Omit);
    }
    if rename.as_deref() == Some(OMITTED) {
        return Ok(Strategy::Omit);
    }

    let names = Names { rename, hint };
    Ok(match mode {
        None => Strategy::Walk(names),
        Some(Mode::Display) => Strategy::Display(names),
        Some(Mode::Opaque) => Strategy::Opaque(names),
    })
}

/// Parses the names of an enum variant; only renaming is meaningful there.
pub(crate) fn parse_variant_names(attrs: &[Attribute], span: Span) -> Result<Names> {
    match parse_field_strategy(attrs)? {
        Strategy::Walk(names) => Ok(names),
        _ => Err(syn::Error::new(
            span,
            "enum variants only support `#[depict(rename = \"...\")]`",
        )),
    }
}

/// Extracts a transport name from a `#[serde(...)]` attribute.
fn serde_hint(attr: &Attribute) -> Option<String> {
    let nested = attr
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .ok()?;
    let mut hint = None;
    for meta in nested {
        match meta {
            Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_serializing") => {
                return Some(OMITTED.to_string());
            }
            Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                if let Some(value) = string_value(&nv.value) {
                    hint = Some(value);
                }
            }
            Meta::List(list) if list.path.is_ident("rename") => {
                let Ok(inner) = list
                    .parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)
                else {
                    continue;
                };
                for nv in inner {
                    if nv.path.is_ident("serialize") {
                        if let Some(value) = string_value(&nv.value) {
                            hint = Some(value);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    hint
}

fn string_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) => Some(value.value()),
        _ => None,
    }
}
