//! `#[derive(BindAlias)]` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::AliasStruct;

/// Expands `#[derive(BindAlias)]` into a `FieldValue` impl that delegates to
/// the wrapped type under an alias descriptor.
pub fn expand_alias(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let alias = AliasStruct::parse(input)?;

    let ident = &alias.ident;
    let inner = &alias.inner;
    let krate = &alias.krate;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = alias.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #krate::FieldValue for #ident #ty_generics #where_clause {
            fn descriptor() -> #krate::TypeDescriptor {
                #krate::TypeDescriptor::alias(
                    #name,
                    <#inner as #krate::FieldValue>::descriptor(),
                )
            }

            fn from_value(
                value: #krate::Value,
            ) -> ::std::result::Result<Self, #krate::ValueMismatch> {
                <#inner as #krate::FieldValue>::from_value(value).map(Self)
            }

            fn to_value(&self) -> #krate::Value {
                #krate::FieldValue::to_value(&self.0)
            }
        }
    })
}
