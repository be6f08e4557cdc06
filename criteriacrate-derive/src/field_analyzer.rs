//! Syntactic classification of member types.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericArgument, PathArguments, Type};

/// Filter value types of the runtime crate, matched on the last path segment.
const FILTER_TYPES: [&str; 11] = [
    "Filter",
    "RangeFilter",
    "StringFilter",
    "BooleanFilter",
    "UuidFilter",
    "IntegerFilter",
    "LongFilter",
    "FloatFilter",
    "DoubleFilter",
    "LocalDateFilter",
    "InstantFilter",
];

const COLLECTION_TYPES: [&str; 6] = [
    "Vec",
    "VecDeque",
    "HashSet",
    "BTreeSet",
    "LinkedList",
    "BinaryHeap",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Value,
    Filter,
    Iterable,
    Array,
}

impl Shape {
    /// The runtime `Classification` variant.
    pub(crate) fn classification(self) -> TokenStream {
        match self {
            Self::Value => quote!(::criteriacrate::metadata::Classification::Value),
            Self::Filter => quote!(::criteriacrate::metadata::Classification::FilterTyped),
            Self::Iterable => quote!(::criteriacrate::metadata::Classification::Iterable),
            Self::Array => quote!(::criteriacrate::metadata::Classification::Array),
        }
    }

    pub(crate) fn is_sequence(self) -> bool {
        matches!(self, Self::Iterable | Self::Array)
    }
}

/// A member type after `Option` unwrapping.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MemberType {
    pub optional: bool,
    pub shape: Shape,
}

fn strip_groups(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => strip_groups(&group.elem),
        Type::Paren(paren) => strip_groups(&paren.elem),
        other => other,
    }
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    if let Type::Path(type_path) = strip_groups(ty) {
        type_path.path.segments.last()
    } else {
        None
    }
}

/// The single type argument of the last path segment, as in `Option<T>` or `Box<T>`.
fn single_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments
        && args.args.len() == 1
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        Some(inner)
    } else {
        None
    }
}

/// `T` for `Option<T>` (including `std::option::Option<T>`).
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident == "Option" {
        single_type_argument(segment)
    } else {
        None
    }
}

fn is_slice(ty: &Type) -> bool {
    matches!(strip_groups(ty), Type::Slice(_))
}

fn shape_of(ty: &Type, forced_filter: bool) -> Shape {
    if forced_filter {
        return Shape::Filter;
    }
    match strip_groups(ty) {
        Type::Array(_) | Type::Slice(_) => Shape::Array,
        Type::Reference(reference) if is_slice(&reference.elem) => Shape::Array,
        Type::Path(_) => {
            let Some(segment) = last_segment(ty) else {
                return Shape::Value;
            };
            let ident = segment.ident.to_string();
            if FILTER_TYPES.contains(&ident.as_str()) {
                Shape::Filter
            } else if COLLECTION_TYPES.contains(&ident.as_str()) {
                Shape::Iterable
            } else if ident == "Box" && single_type_argument(segment).is_some_and(is_slice) {
                Shape::Array
            } else {
                Shape::Value
            }
        }
        _ => Shape::Value,
    }
}

/// Classify a declared field or return type. `Option` is unwrapped first.
pub(crate) fn analyze_type(ty: &Type, forced_filter: bool) -> MemberType {
    match option_inner(ty) {
        Some(inner) => MemberType {
            optional: true,
            shape: shape_of(inner, forced_filter),
        },
        None => MemberType {
            optional: false,
            shape: shape_of(ty, forced_filter),
        },
    }
}

/// Compact source spelling of a type, as recorded in descriptors (`Option<Vec<i64>>`).
pub(crate) fn type_spelling(ty: &Type) -> String {
    let spelled = ty.to_token_stream().to_string();
    let mut compact = String::with_capacity(spelled.len());
    let mut chars = spelled.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev = compact.chars().last();
            let next = chars.peek().copied();
            let glued = matches!(prev, Some(':' | '<' | '&' | '(' | '['))
                || matches!(next, Some(':' | '<' | '>' | ',' | ')' | ']' | ';'));
            if !glued {
                compact.push(' ');
            }
        } else {
            compact.push(c);
        }
    }
    compact
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn classify(ty: Type) -> (bool, Shape) {
        let analyzed = analyze_type(&ty, false);
        (analyzed.optional, analyzed.shape)
    }

    #[test]
    fn test_filter_types() {
        assert_eq!(classify(parse_quote!(StringFilter)), (false, Shape::Filter));
        assert_eq!(classify(parse_quote!(Option<IntegerFilter>)), (true, Shape::Filter));
        assert_eq!(
            classify(parse_quote!(criteriacrate::filter::RangeFilter<f64>)),
            (false, Shape::Filter)
        );
        assert_eq!(
            classify(parse_quote!(std::option::Option<Filter<bool>>)),
            (true, Shape::Filter)
        );
    }

    #[test]
    fn test_forced_filter() {
        let analyzed = analyze_type(&parse_quote!(Option<MyCustomFilter>), true);
        assert!(analyzed.optional);
        assert_eq!(analyzed.shape, Shape::Filter);
    }

    #[test]
    fn test_collections_are_iterable() {
        assert_eq!(classify(parse_quote!(Vec<String>)), (false, Shape::Iterable));
        assert_eq!(classify(parse_quote!(Option<HashSet<u32>>)), (true, Shape::Iterable));
        assert_eq!(
            classify(parse_quote!(std::collections::BTreeSet<i64>)),
            (false, Shape::Iterable)
        );
    }

    #[test]
    fn test_arrays_and_slices() {
        assert_eq!(classify(parse_quote!([u8; 4])), (false, Shape::Array));
        assert_eq!(classify(parse_quote!(&'static [i32])), (false, Shape::Array));
        assert_eq!(classify(parse_quote!(Box<[String]>)), (false, Shape::Array));
        assert_eq!(classify(parse_quote!(Option<[u8; 2]>)), (true, Shape::Array));
    }

    #[test]
    fn test_everything_else_is_value() {
        assert_eq!(classify(parse_quote!(i32)), (false, Shape::Value));
        assert_eq!(classify(parse_quote!(Option<String>)), (true, Shape::Value));
        assert_eq!(classify(parse_quote!(Box<str>)), (false, Shape::Value));
        assert_eq!(classify(parse_quote!(&'static str)), (false, Shape::Value));
        assert_eq!(classify(parse_quote!(Option<Option<u8>>)), (true, Shape::Value));
    }

    #[test]
    fn test_type_spelling_is_compact() {
        assert_eq!(type_spelling(&parse_quote!(Option<Vec<i64>>)), "Option<Vec<i64>>");
        assert_eq!(
            type_spelling(&parse_quote!(std::collections::HashMap<String, u8>)),
            "std::collections::HashMap<String, u8>"
        );
        assert_eq!(type_spelling(&parse_quote!([u8; 4])), "[u8; 4]");
        assert_eq!(type_spelling(&parse_quote!(&'static [i32])), "&'static [i32]");
    }
}
