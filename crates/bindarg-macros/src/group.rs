//! `#[derive(OptionGroup)]` implementation.
//!
//! The generated code implements `bindarg_core::Param` for the struct:
//!
//! 1. `target_type` - a `TargetType::Group` listing every bound field
//! 2. `from_value` - reads the converted fields back in declaration order
//! 3. `into_value` - the reverse, so groups can also be returned
//!
//! plus `ReturnValues`/`Returns` through `bindarg_core::impl_single_return!`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type, spanned::Spanned};

// ============================================================================
// Attribute structures
// ============================================================================

/// Per-field `#[option(...)]` settings.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

struct BoundField {
    ident: Ident,
    ty: Type,
    option: LitStr,
}

// ============================================================================
// Entry point
// ============================================================================

pub fn derive_option_group(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "OptionGroup cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "OptionGroup requires a struct with named fields",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new(
                input.span(),
                "OptionGroup cannot be derived for enums",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "OptionGroup cannot be derived for unions",
            ));
        }
    };

    let mut bound = Vec::new();
    let mut skipped = Vec::new();

    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        if attrs.skip {
            skipped.push(ident);
            continue;
        }
        let option = attrs
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
        bound.push(BoundField {
            option: LitStr::new(&option, ident.span()),
            ident,
            ty: field.ty.clone(),
        });
    }

    Ok(generate_impl(name, &bound, &skipped))
}

// ============================================================================
// Attribute parsing
// ============================================================================

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("option") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let name = meta.value()?.parse::<LitStr>()?.value();
                if name.is_empty() || name.starts_with('-') {
                    return Err(meta.error("option name must be non-empty and not start with '-'"));
                }
                result.rename = Some(name);
            } else if meta.path.is_ident("skip") {
                result.skip = true;
            } else {
                return Err(meta.error("expected `rename = \"...\"` or `skip`"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

// ============================================================================
// Code generation
// ============================================================================

fn generate_impl(name: &Ident, bound: &[BoundField], skipped: &[Ident]) -> TokenStream {
    let name_lit = LitStr::new(&name.to_string(), name.span());

    let shapes = bound.iter().map(|f| {
        let (option, ty) = (&f.option, &f.ty);
        quote! {
            ::bindarg_core::FieldShape::new(#option, <#ty as ::bindarg_core::Param>::target_type())
        }
    });

    let reads = bound.iter().map(|f| {
        let (ident, option, ty) = (&f.ident, &f.option, &f.ty);
        quote! { #ident: __fields.read::<#ty>(#option)? }
    });

    let defaults = skipped.iter().map(|ident| {
        quote! { #ident: ::std::default::Default::default() }
    });

    let values = bound.iter().map(|f| {
        let (ident, option) = (&f.ident, &f.option);
        quote! {
            (
                ::std::string::String::from(#option),
                ::bindarg_core::Param::into_value(self.#ident),
            )
        }
    });

    quote! {
        impl ::bindarg_core::Param for #name {
            fn target_type() -> ::bindarg_core::TargetType {
                ::bindarg_core::TargetType::Group(::bindarg_core::GroupShape::new(
                    #name_lit,
                    ::std::vec![#(#shapes),*],
                ))
            }

            fn from_value(
                value: ::bindarg_core::Value,
            ) -> ::bindarg_core::ConversionResult<Self> {
                #[allow(unused_mut, unused_variables)]
                let mut __fields = ::bindarg_core::FieldReader::open(value, #name_lit)?;
                ::std::result::Result::Ok(Self {
                    #(#reads,)*
                    #(#defaults,)*
                })
            }

            fn into_value(self) -> ::bindarg_core::Value {
                ::bindarg_core::Value::Group(::bindarg_core::GroupValue::new(
                    #name_lit,
                    ::std::vec![#(#values),*],
                ))
            }
        }

        ::bindarg_core::impl_single_return!(#name);
    }
}
