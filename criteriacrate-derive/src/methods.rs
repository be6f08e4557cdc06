//! `#[criteria_methods]` expansion for inherent impl blocks.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, GenericParam, ImplItem, ImplItemFn, ItemImpl, ReturnType, Type};

use crate::attribute_parser::{is_criteria_attr, parse_member_attrs};
use crate::codegen::{annotation_calls, is_readable};
use crate::field_analyzer::{MemberType, Shape, analyze_type, type_spelling};

/// Mirrors the runtime's identity method list so no reader is generated for them.
const IDENTITY_METHODS: [&str; 10] = [
    "eq",
    "ne",
    "hash",
    "fmt",
    "to_string",
    "clone",
    "clone_from",
    "cmp",
    "partial_cmp",
    "type_id",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReceiverKind {
    Ref,
    Other,
    Associated,
}

impl ReceiverKind {
    fn of(method: &ImplItemFn) -> Self {
        match method.sig.receiver() {
            Some(receiver)
                if receiver.reference.is_some()
                    && receiver.mutability.is_none()
                    && receiver.colon_token.is_none() =>
            {
                Self::Ref
            }
            Some(_) => Self::Other,
            None => Self::Associated,
        }
    }

    fn tokens(self) -> TokenStream {
        match self {
            Self::Ref => quote!(::criteriacrate::metadata::Receiver::Ref),
            Self::Other => quote!(::criteriacrate::metadata::Receiver::Other),
            Self::Associated => quote!(::criteriacrate::metadata::Receiver::Associated),
        }
    }
}

fn returns_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(&**ty, Type::Tuple(tuple) if tuple.elems.is_empty()),
    }
}

/// Expression producing `MemberValue` from the owned result of `self.#ident()`.
fn method_value(ident: &syn::Ident, member_type: MemberType) -> TokenStream {
    let value = quote!(::criteriacrate::metadata::MemberValue);
    let reader = match member_type.shape {
        Shape::Filter => quote!(#value::owned_filter),
        Shape::Value => quote!(#value::owned_scalar),
        Shape::Iterable | Shape::Array => {
            quote!(|values| #value::owned_sequence(values.iter().cloned()))
        }
    };
    if member_type.optional {
        quote!(self.#ident().map_or(#value::Absent, #reader))
    } else if member_type.shape.is_sequence() {
        quote!(#value::owned_sequence(self.#ident().iter().cloned()))
    } else {
        quote!((#reader)(self.#ident()))
    }
}

pub(crate) fn expand_criteria_methods(mut item: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[criteria_methods] applies to inherent impl blocks only",
        ));
    }

    let mut declared = Vec::new();
    let mut value_arms = Vec::new();

    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let attrs = parse_member_attrs(&method.attrs)?;
        method.attrs.retain(|attr| !is_criteria_attr(attr));

        let ident = &method.sig.ident;
        let method_name = ident.to_string();
        let receiver = ReceiverKind::of(method);
        let arity = method
            .sig
            .inputs
            .iter()
            .filter(|input| matches!(input, FnArg::Typed(_)))
            .count();
        let unit = returns_unit(&method.sig.output);
        let generic = method
            .sig
            .generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)));
        let (return_type, member_type) = match &method.sig.output {
            ReturnType::Default => ("()".to_string(), analyze_type(&syn::parse_quote!(()), false)),
            ReturnType::Type(_, ty) => (type_spelling(ty), analyze_type(ty, attrs.filter)),
        };

        let classification = member_type.shape.classification();
        let receiver_tokens = receiver.tokens();
        let unit_call = unit.then(|| quote!(.returns_unit()));
        let generic_call = generic.then(|| quote!(.generic()));
        let annotations = annotation_calls(&attrs);
        declared.push(quote! {
            ::criteriacrate::metadata::DeclaredMethod::new(#method_name, #return_type, #classification)
                .receiver(#receiver_tokens)
                .arity(#arity)
                #unit_call
                #generic_call
                #annotations
        });

        let callable = receiver == ReceiverKind::Ref
            && arity == 0
            && !unit
            && !generic
            && !IDENTITY_METHODS.contains(&method_name.as_str());
        if callable && attrs.include && is_readable(&attrs, member_type) {
            let value = method_value(ident, member_type);
            value_arms.push(quote! {
                #method_name => ::core::option::Option::Some(#value),
            });
        }
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics ::criteriacrate::metadata::CriteriaMethods for #self_ty #where_clause {
            fn declared_methods() -> ::std::vec::Vec<::criteriacrate::metadata::DeclaredMethod> {
                ::std::vec![#(#declared),*]
            }

            fn method_value(
                &self,
                name: &str,
            ) -> ::core::option::Option<::criteriacrate::metadata::MemberValue<'_>> {
                match name {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
