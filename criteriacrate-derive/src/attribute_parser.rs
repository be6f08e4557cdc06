//! Parsing of `#[criteria(...)]` attributes.

use syn::parse::{Parse, ParseStream, Parser};
use syn::spanned::Spanned;
use syn::{Attribute, Error, Expr, ExprLit, Lit, Meta, Result, punctuated::Punctuated, token::Comma};

use crate::field_analyzer::type_spelling;

/// Field or method attributes from `#[criteria(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MemberAttrs {
    pub ignore: bool,
    pub include: bool,
    pub alias: Option<String>,
    /// Source spelling of the element type override.
    pub element: Option<String>,
    pub filter: bool,
    pub base: bool,
}

impl MemberAttrs {
    fn merge(&mut self, other: Self) {
        self.ignore |= other.ignore;
        self.include |= other.include;
        self.filter |= other.filter;
        self.base |= other.base;
        if other.alias.is_some() {
            self.alias = other.alias;
        }
        if other.element.is_some() {
            self.element = other.element;
        }
    }
}

fn string_value(expr: &Expr) -> Option<String> {
    if let Expr::Lit(ExprLit {
        lit: Lit::Str(s), ..
    }) = expr
    {
        Some(s.value())
    } else {
        None
    }
}

impl Parse for MemberAttrs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attrs = Self::default();
        let metas: Punctuated<Meta, Comma> = Punctuated::parse_terminated(input)?;

        for meta in metas {
            match &meta {
                Meta::Path(path) => {
                    if path.is_ident("ignore") || path.is_ident("skip") || path.is_ident("exclude") {
                        attrs.ignore = true;
                    } else if path.is_ident("include") {
                        attrs.include = true;
                    } else if path.is_ident("filter") {
                        attrs.filter = true;
                    } else if path.is_ident("base") {
                        attrs.base = true;
                    }
                }
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("alias") {
                        let alias = string_value(&nv.value).ok_or_else(|| {
                            Error::new(nv.value.span(), "alias must be a string literal")
                        })?;
                        attrs.alias = Some(alias);
                        attrs.include = true;
                    } else if nv.path.is_ident("element") {
                        // `element = i64`, or `element = "Vec<u8>"` for generic types
                        let element = match &nv.value {
                            Expr::Path(path) => {
                                type_spelling(&syn::Type::Path(syn::TypePath {
                                    qself: None,
                                    path: path.path.clone(),
                                }))
                            }
                            other => {
                                let spelled = string_value(other).ok_or_else(|| {
                                    Error::new(other.span(), "element must be a type or a string literal")
                                })?;
                                let ty: syn::Type = syn::parse_str(&spelled)
                                    .map_err(|e| Error::new(other.span(), e.to_string()))?;
                                type_spelling(&ty)
                            }
                        };
                        attrs.element = Some(element);
                    }
                }
                // unknown list-style keys are ignored
                Meta::List(_) => {}
            }
        }

        Ok(attrs)
    }
}

/// Merge every `#[criteria(...)]` attribute of a field or method.
pub(crate) fn parse_member_attrs(attrs: &[Attribute]) -> Result<MemberAttrs> {
    let mut merged = MemberAttrs::default();
    for attr in attrs.iter().filter(|attr| is_criteria_attr(attr)) {
        match &attr.meta {
            Meta::List(_) => merged.merge(attr.parse_args::<MemberAttrs>().map_err(|e| {
                Error::new(e.span(), format!("invalid #[criteria] attribute: {e}"))
            })?),
            // bare `#[criteria]` means include
            Meta::Path(_) => merged.include = true,
            Meta::NameValue(nv) => {
                return Err(Error::new_spanned(nv, "expected #[criteria(...)]"));
            }
        }
    }
    Ok(merged)
}

pub(crate) fn is_criteria_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("criteria")
}

/// Struct-level `#[criteria(...)]` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ContainerAttrs {
    pub methods: bool,
}

pub(crate) fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttrs> {
    let mut container = ContainerAttrs::default();
    for attr in attrs.iter().filter(|attr| is_criteria_attr(attr)) {
        if let Meta::List(list) = &attr.meta {
            let metas = Punctuated::<Meta, Comma>::parse_terminated.parse2(list.tokens.clone())?;
            for meta in metas {
                if let Meta::Path(path) = meta
                    && path.is_ident("methods")
                {
                    container.methods = true;
                }
            }
        }
    }
    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &str) -> Result<MemberAttrs> {
        syn::parse_str::<MemberAttrs>(tokens)
    }

    #[test]
    fn test_flags() {
        let attrs = parse("include, filter").unwrap();
        assert!(attrs.include && attrs.filter);
        assert!(!attrs.ignore && !attrs.base);
    }

    #[test]
    fn test_ignore_synonyms() {
        for tokens in ["ignore", "skip", "exclude"] {
            assert!(parse(tokens).unwrap().ignore, "{tokens}");
        }
    }

    #[test]
    fn test_alias_implies_include() {
        let attrs = parse(r#"alias = "myName""#).unwrap();
        assert_eq!(attrs.alias.as_deref(), Some("myName"));
        assert!(attrs.include);
    }

    #[test]
    fn test_alias_must_be_string() {
        assert!(parse("alias = 42").is_err());
    }

    #[test]
    fn test_element_as_path_or_string() {
        assert_eq!(parse("element = i64").unwrap().element.as_deref(), Some("i64"));
        assert_eq!(
            parse("element = chrono::NaiveDate").unwrap().element.as_deref(),
            Some("chrono::NaiveDate")
        );
        assert_eq!(
            parse(r#"element = "Vec<u8>""#).unwrap().element.as_deref(),
            Some("Vec<u8>")
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let attrs = parse(r#"include, rename = "x", nested(a, b), whatever"#).unwrap();
        assert_eq!(
            attrs,
            MemberAttrs {
                include: true,
                ..MemberAttrs::default()
            }
        );
    }

    #[test]
    fn test_attributes_merge_across_occurrences() {
        let field: syn::Field = syn::parse_quote! {
            #[criteria(include)]
            #[serde(default)]
            #[criteria(alias = "x", ignore)]
            pub value: i32
        };
        let attrs = parse_member_attrs(&field.attrs).unwrap();
        assert!(attrs.include && attrs.ignore);
        assert_eq!(attrs.alias.as_deref(), Some("x"));
    }

    #[test]
    fn test_container_methods_flag() {
        let input: syn::DeriveInput = syn::parse_quote! {
            #[criteria(methods)]
            struct C { a: i32 }
        };
        assert!(parse_container_attrs(&input.attrs).unwrap().methods);
    }
}
