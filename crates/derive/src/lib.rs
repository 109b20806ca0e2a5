//! `#[derive(Record)]` for fixed-width records
//!
//! Each field carrying a `#[fixed("...")]` attribute becomes one entry of the
//! record's field table, in declaration order. Fields without the attribute
//! are left out of the layout entirely and must implement `Default`.
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use fixedwidth::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Statement {
//!     #[fixed("len:8,format:%m%d%Y")]
//!     date: NaiveDate,
//!     #[fixed("len:3")]
//!     number: i64,
//!     #[fixed("len:5")]
//!     text: String,
//!     cached_total: u64,
//! }
//! ```
//!
//! The expansion implements `fixedwidth::Record` and registers the type as a
//! nested field, so records compose.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, LitStr, Type,
};

const ATTR: &str = "fixed";

/// Derive `fixedwidth::Record` from `#[fixed("...")]` field annotations
#[proc_macro_derive(Record, attributes(fixed))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

struct LayoutField {
    ident: Ident,
    ty: Type,
    tag: LitStr,
}

fn expand_record(input: DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "#[derive(Record)] does not support generic records",
        ));
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named,
            other => {
                return Err(Error::new(
                    other.span(),
                    "#[derive(Record)] requires a struct with named fields",
                ))
            }
        },
        Data::Enum(data) => {
            return Err(Error::new(
                data.enum_token.span(),
                "#[derive(Record)] cannot be used on enums",
            ))
        }
        Data::Union(data) => {
            return Err(Error::new(
                data.union_token.span(),
                "#[derive(Record)] cannot be used on unions",
            ))
        }
    };

    let mut layout = Vec::new();
    for field in &named.named {
        if let Some(tag) = layout_tag(field)? {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| Error::new(field.span(), "expected a named field"))?;
            layout.push(LayoutField {
                ident,
                ty: field.ty.clone(),
                tag,
            });
        }
    }

    let name = &input.ident;
    let specs = layout.iter().map(|f| {
        let field_name = f.ident.to_string();
        let ty = &f.ty;
        let tag = &f.tag;
        quote! {
            ::fixedwidth::FieldSpec::of::<#ty>(#field_name, #tag)
        }
    });
    let encodes = layout.iter().enumerate().map(|(index, f)| {
        let ident = &f.ident;
        quote! {
            enc.field(&<Self as ::fixedwidth::Record>::FIELDS[#index], &self.#ident)?;
        }
    });
    let decodes = layout.iter().enumerate().map(|(index, f)| {
        let ident = &f.ident;
        quote! {
            dec.field(&<Self as ::fixedwidth::Record>::FIELDS[#index], &mut self.#ident)?;
        }
    });

    Ok(quote! {
        impl ::fixedwidth::Record for #name {
            const FIELDS: &'static [::fixedwidth::FieldSpec] = &[#(#specs),*];

            #[allow(unused_variables)]
            fn encode_fields(
                &self,
                enc: &mut ::fixedwidth::Encoder<'_>,
            ) -> ::fixedwidth::Result<()> {
                #(#encodes)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn decode_fields(
                &mut self,
                dec: &mut ::fixedwidth::Decoder<'_>,
            ) -> ::fixedwidth::Result<()> {
                #(#decodes)*
                ::core::result::Result::Ok(())
            }
        }

        ::fixedwidth::impl_record_field!(#name);
    })
}

/// Annotation string of a field, or `None` when the field is not part of the layout
fn layout_tag(field: &syn::Field) -> Result<Option<LitStr>, Error> {
    let mut found = None;
    for attr in &field.attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }
        if found.is_some() {
            return Err(Error::new(attr.span(), "duplicate #[fixed] attribute"));
        }
        let tag: LitStr = attr.parse_args().map_err(|err| {
            Error::new(
                err.span(),
                "expected #[fixed(\"len:<int>[,pad:..][,base:..][,align:..][,format:..]\")]",
            )
        })?;
        if tag.value().trim().is_empty() {
            return Err(Error::new(tag.span(), "#[fixed] annotation must not be empty"));
        }
        found = Some(tag);
    }
    Ok(found)
}
