//! `#[derive(KeyProvider)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, Ident, Index, PathArguments, Type,
    parse_macro_input, spanned::Spanned,
};

/// Implementation of the `KeyProvider` derive.
pub fn derive_key_provider_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

/// How the marked field produces the key.
enum KeyMode {
    Required,
    Optional,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "KeyProvider can only be derived for structs",
        ));
    };

    let mut marked = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        if let Some(mode) = key_mode(field)? {
            marked.push((index, field, mode));
        }
    }

    let (index, field, mode) = match marked.len() {
        0 => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "KeyProvider requires one field marked with #[event_key]",
            ));
        }
        1 => marked.remove(0),
        _ => {
            return Err(syn::Error::new_spanned(
                marked[1].1,
                "only one field may be marked with #[event_key]",
            ));
        }
    };

    let accessor = match (&data.fields, &field.ident) {
        (Fields::Named(_), Some(ident)) => quote! { self.#ident },
        _ => {
            let index = Index::from(index);
            quote! { self.#index }
        }
    };

    let (key_type, body) = match mode {
        KeyMode::Required => (
            field.ty.clone(),
            quote! { ::core::option::Option::Some(&#accessor) },
        ),
        KeyMode::Optional => (
            option_inner(&field.ty)?.clone(),
            quote! { #accessor.as_ref() },
        ),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::vigil::KeyProvider for #name #ty_generics #where_clause {
            type Key = #key_type;

            fn event_key(&self) -> ::core::option::Option<&Self::Key> {
                #body
            }
        }
    })
}

fn key_mode(field: &Field) -> syn::Result<Option<KeyMode>> {
    let Some(attr) = field
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("event_key"))
    else {
        return Ok(None);
    };

    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(Some(KeyMode::Required));
    }

    let flag: Ident = attr.parse_args()?;
    if flag == "optional" {
        Ok(Some(KeyMode::Optional))
    } else {
        Err(syn::Error::new(
            flag.span(),
            format!("unknown event_key option: {}", flag),
        ))
    }
}

fn option_inner(ty: &Type) -> syn::Result<&Type> {
    if let Type::Path(path) = ty
        && path.qself.is_none()
        && let Some(segment) = path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Ok(inner);
    }

    Err(syn::Error::new(
        ty.span(),
        "#[event_key(optional)] requires an Option<K> field",
    ))
}
