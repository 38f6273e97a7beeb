//! `#[derive(Bind)]` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Path};

use crate::parse::{BindField, BindStruct};

/// Expands `#[derive(Bind)]`.
pub fn expand_bind(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let record = BindStruct::parse(input)?;
    Ok(generate_bind_impl(&record))
}

/// Generates the `Bind` impl:
/// - `fields()` lists every field, annotated or not, in declaration order
/// - `assign()` and `value_of()` dispatch on the names of annotated fields
fn generate_bind_impl(record: &BindStruct) -> TokenStream {
    let ident = &record.ident;
    let krate = &record.krate;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();

    let specs = record.fields.iter().map(|f| field_spec(krate, f));
    let assign_arms = record.bound_fields().map(|f| assign_arm(krate, f));
    let value_arms = record.bound_fields().map(|f| value_arm(krate, f));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Bind for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<#krate::FieldSpec> {
                ::std::vec![#(#specs),*]
            }

            #[allow(unused_variables, unreachable_code)]
            fn assign(
                &mut self,
                field: &str,
                value: #krate::Value,
            ) -> ::std::result::Result<(), #krate::BindError> {
                match field {
                    #(#assign_arms)*
                    _ => ::std::result::Result::Err(#krate::BindError::unknown_field(field)),
                }
            }

            fn value_of(&self, field: &str) -> ::std::option::Option<#krate::Value> {
                match field {
                    #(#value_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
}

fn field_spec(krate: &Path, field: &BindField) -> TokenStream {
    let name = field.name();
    let ty = &field.ty;
    match &field.annotation {
        Some(annotation) => quote! {
            #krate::FieldSpec::bound(
                #name,
                #annotation,
                <#ty as #krate::FieldValue>::descriptor(),
            )
        },
        None => quote! { #krate::FieldSpec::unbound(#name) },
    }
}

fn assign_arm(krate: &Path, field: &BindField) -> TokenStream {
    let name = field.name();
    let ident = &field.ident;
    let ty = &field.ty;
    quote! {
        #name => {
            self.#ident = <#ty as #krate::FieldValue>::from_value(value)
                .map_err(|e| #krate::BindError::mismatch(field, e))?;
            ::std::result::Result::Ok(())
        }
    }
}

fn value_arm(krate: &Path, field: &BindField) -> TokenStream {
    let name = field.name();
    let ident = &field.ident;
    quote! {
        #name => ::std::option::Option::Some(#krate::FieldValue::to_value(&self.#ident)),
    }
}
