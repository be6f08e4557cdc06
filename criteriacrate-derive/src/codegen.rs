//! `#[derive(Criteria)]` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use crate::attribute_parser::{MemberAttrs, parse_container_attrs, parse_member_attrs};
use crate::field_analyzer::{MemberType, Shape, analyze_type, type_spelling};

/// Builder chain recording the annotations of one member on a `DeclaredMember`/`DeclaredMethod`.
pub(crate) fn annotation_calls(attrs: &MemberAttrs) -> TokenStream {
    let ignore = attrs.ignore.then(|| quote!(.ignore()));
    let include = (attrs.include && attrs.alias.is_none()).then(|| quote!(.include()));
    let alias = attrs.alias.as_ref().map(|alias| quote!(.alias(#alias)));
    let element = attrs.element.as_ref().map(|element| quote!(.element(#element)));
    quote!(#ignore #include #alias #element)
}

/// Whether the runtime can accept this member, so a value reader must exist.
pub(crate) fn is_readable(attrs: &MemberAttrs, member_type: MemberType) -> bool {
    !attrs.ignore && (attrs.include || member_type.shape == Shape::Filter)
}

/// Expression producing `MemberValue` from a borrowed field.
fn field_value(ident: &Ident, member_type: MemberType) -> TokenStream {
    let value = quote!(::criteriacrate::metadata::MemberValue);
    let reader = match member_type.shape {
        Shape::Filter => quote!(#value::filter),
        Shape::Value => quote!(#value::scalar),
        Shape::Iterable | Shape::Array => quote!(|values| #value::sequence(values.iter())),
    };
    if member_type.optional {
        quote!(self.#ident.as_ref().map_or(#value::Absent, #reader))
    } else if member_type.shape.is_sequence() {
        quote!(#value::sequence(self.#ident.iter()))
    } else {
        quote!((#reader)(&self.#ident))
    }
}

struct FieldMember<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    attrs: MemberAttrs,
    member_type: MemberType,
}

pub(crate) fn expand_criteria(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Criteria can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Criteria can only be derived for structs with named fields",
        ));
    };

    let container = parse_container_attrs(&input.attrs)?;

    let mut members = Vec::new();
    let mut base: Option<(&Ident, &Type)> = None;
    for field in &named.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_member_attrs(&field.attrs)?;
        if attrs.base {
            if base.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "only one #[criteria(base)] field is allowed",
                ));
            }
            base = Some((ident, &field.ty));
            continue;
        }
        let member_type = analyze_type(&field.ty, attrs.filter);
        members.push(FieldMember {
            ident,
            ty: &field.ty,
            attrs,
            member_type,
        });
    }

    let name = &input.ident;
    let owner = name.to_string();

    let declared_fields = members.iter().map(|member| {
        let field_name = member.ident.to_string();
        let declared_type = type_spelling(member.ty);
        let classification = member.member_type.shape.classification();
        let annotations = annotation_calls(&member.attrs);
        quote! {
            .field(
                ::criteriacrate::metadata::DeclaredMember::new(#field_name, #declared_type, #classification)
                    #annotations
            )
        }
    });

    let value_arms = members
        .iter()
        .filter(|member| is_readable(&member.attrs, member.member_type))
        .map(|member| {
            let field_name = member.ident.to_string();
            let value = field_value(member.ident, member.member_type);
            quote! {
                (::criteriacrate::metadata::MemberKind::Field, #field_name) => ::core::option::Option::Some(#value),
            }
        });

    let (declared_methods, method_arm) = if container.methods {
        (
            quote!(.methods(<Self as ::criteriacrate::metadata::CriteriaMethods>::declared_methods())),
            quote! {
                (::criteriacrate::metadata::MemberKind::Method, name) => {
                    <Self as ::criteriacrate::metadata::CriteriaMethods>::method_value(self, name)
                }
            },
        )
    } else {
        (TokenStream::new(), TokenStream::new())
    };

    let (extends, fallback) = match base {
        Some((base_ident, base_ty)) => (
            quote!(.extends(<#base_ty as ::criteriacrate::metadata::Criteria>::declaration())),
            quote! {
                .or_else(|| ::criteriacrate::metadata::Criteria::member_value(&self.#base_ident, kind, name))
            },
        ),
        None => (TokenStream::new(), TokenStream::new()),
    };

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::criteriacrate::metadata::Criteria for #name #ty_generics #where_clause {
            fn declaration() -> ::criteriacrate::metadata::Declaration {
                ::criteriacrate::metadata::Declaration::new(#owner)
                    #(#declared_fields)*
                    #declared_methods
                    #extends
            }

            #[allow(unused_variables)]
            fn member_value(
                &self,
                kind: ::criteriacrate::metadata::MemberKind,
                name: &str,
            ) -> ::core::option::Option<::criteriacrate::metadata::MemberValue<'_>> {
                let value = match (kind, name) {
                    #(#value_arms)*
                    #method_arm
                    _ => ::core::option::Option::None,
                };
                value #fallback
            }
        }
    })
}
