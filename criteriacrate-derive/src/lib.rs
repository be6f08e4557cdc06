mod attribute_parser;
mod codegen;
mod field_analyzer;
mod methods;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

/// Derive `criteriacrate::Criteria` for a struct with named fields.
///
/// Every field is recorded in the declaration. Filter-typed fields (`StringFilter`,
/// `Option<IntegerFilter>`, ...) are extracted without annotation; other fields need
/// `#[criteria(include)]` or `#[criteria(alias = "...")]`.
///
/// Field attributes: `ignore` (or `skip`, `exclude`), `include`, `alias = "..."`,
/// `element = Type`, `filter`, `base`. Struct attribute: `methods`, which reads accessors
/// from a `#[criteria_methods]` impl block.
#[proc_macro_derive(Criteria, attributes(criteria))]
pub fn derive_criteria(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    codegen::expand_criteria(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Declare the accessor methods of a criteria type.
///
/// Methods annotated with `#[criteria(include)]` or `#[criteria(alias = "...")]` that take
/// `&self`, no parameters or type parameters, and return a value become criteria members. The struct must opt in
/// with `#[criteria(methods)]`.
#[proc_macro_attribute]
pub fn criteria_methods(args: TokenStream, item: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[criteria_methods] takes no arguments",
        )
        .into_compile_error()
        .into();
    }
    let item = parse_macro_input!(item as ItemImpl);
    methods::expand_criteria_methods(item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
