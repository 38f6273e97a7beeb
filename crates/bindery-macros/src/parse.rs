//! Parsing utilities for the derive macros.
//!
//! This module turns `DeriveInput`s into the shapes the expanders need.

use syn::{
    ext::IdentExt, parse_quote, spanned::Spanned, Data, DeriveInput, Fields, Generics, Ident,
    LitStr, Path, Type,
};

/// Name of the field attribute carrying a binding annotation.
const BIND_ATTR: &str = "bind";

/// A struct deriving `Bind`.
#[derive(Debug)]
pub struct BindStruct {
    /// The struct name.
    pub ident: Ident,
    /// The struct generics.
    pub generics: Generics,
    /// The fields, in declaration order.
    pub fields: Vec<BindField>,
    /// Path of the crate generated code refers to.
    pub krate: Path,
}

/// One named field of a `Bind` struct.
#[derive(Debug)]
pub struct BindField {
    /// The field identifier.
    pub ident: Ident,
    /// The field type.
    pub ty: Type,
    /// The `#[bind("...")]` annotation, if present.
    pub annotation: Option<LitStr>,
}

impl BindField {
    /// Returns the field name as declared, without any `r#` prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

impl BindStruct {
    /// Parses a derive input into a `Bind` struct.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        let krate = parse_crate_path(&input.attrs)?;
        let named = match input.data {
            Data::Struct(data) => match data.fields {
                Fields::Named(named) => named,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "Bind can only be derived for structs with named fields",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "Bind can only be derived for structs",
                ))
            }
        };

        let fields = named
            .named
            .into_iter()
            .map(|field| {
                let annotation = parse_annotation(&field.attrs)?;
                // Named fields always carry an identifier.
                let ident = field
                    .ident
                    .ok_or_else(|| syn::Error::new(field.ty.span(), "expected a named field"))?;
                Ok(BindField {
                    ident,
                    ty: field.ty,
                    annotation,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            fields,
            krate,
        })
    }

    /// Returns the fields that carry an annotation.
    pub fn bound_fields(&self) -> impl Iterator<Item = &BindField> {
        self.fields.iter().filter(|f| f.annotation.is_some())
    }
}

/// Reads `#[bind(crate = "path")]` from a container, defaulting to
/// `::bindery_extract`.
fn parse_crate_path(attrs: &[syn::Attribute]) -> syn::Result<Path> {
    let mut krate = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident(BIND_ATTR)) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("crate") {
                return Err(meta.error(r#"expected #[bind(crate = "path")]"#));
            }
            if krate.is_some() {
                return Err(meta.error("duplicate crate path"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            krate = Some(lit.parse::<Path>()?);
            Ok(())
        })?;
    }
    Ok(krate.unwrap_or_else(|| parse_quote!(::bindery_extract)))
}

fn parse_annotation(attrs: &[syn::Attribute]) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident(BIND_ATTR)) {
        if found.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[bind] attribute"));
        }
        let lit: LitStr = attr.parse_args().map_err(|e| {
            syn::Error::new(e.span(), r#"expected #[bind("location.key")]"#)
        })?;
        found = Some(lit);
    }
    Ok(found)
}

/// A newtype deriving `BindAlias`.
#[derive(Debug)]
pub struct AliasStruct {
    /// The newtype name.
    pub ident: Ident,
    /// The newtype generics.
    pub generics: Generics,
    /// The wrapped type.
    pub inner: Type,
    /// Path of the crate generated code refers to.
    pub krate: Path,
}

impl AliasStruct {
    /// Parses a derive input into an alias newtype.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        let error = || {
            syn::Error::new(
                input.ident.span(),
                "BindAlias can only be derived for tuple structs with exactly one field",
            )
        };

        let Data::Struct(data) = &input.data else {
            return Err(error());
        };
        let Fields::Unnamed(unnamed) = &data.fields else {
            return Err(error());
        };
        if unnamed.unnamed.len() != 1 {
            return Err(error());
        }
        let inner = unnamed.unnamed[0].ty.clone();
        let krate = parse_crate_path(&input.attrs)?;

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            inner,
            krate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_bind_struct() {
        let input: DeriveInput = parse_quote! {
            struct ListUsers {
                #[bind("query.page")]
                page: Option<u32>,
                #[serde(default)]
                body: String,
                #[bind("header.X-Tenant")]
                r#type: String,
            }
        };
        let parsed = BindStruct::parse(input).unwrap();

        assert_eq!(parsed.ident, "ListUsers");
        assert_eq!(parsed.fields.len(), 3);
        assert_eq!(parsed.fields[0].annotation.as_ref().unwrap().value(), "query.page");
        assert!(parsed.fields[1].annotation.is_none());
        assert_eq!(parsed.fields[2].name(), "type");
        assert_eq!(parsed.bound_fields().count(), 2);
    }

    #[test]
    fn test_malformed_annotation_text_is_accepted() {
        // Annotation text is checked by the resolver, not the macro.
        let input: DeriveInput = parse_quote! {
            struct Odd {
                #[bind("cookie")]
                value: String,
            }
        };
        assert!(BindStruct::parse(input).is_ok());
    }

    #[test]
    fn test_rejects_non_string_annotation() {
        let input: DeriveInput = parse_quote! {
            struct Bad {
                #[bind(query.page)]
                page: u32,
            }
        };
        assert!(BindStruct::parse(input).is_err());
    }

    #[test]
    fn test_rejects_duplicate_annotation() {
        let input: DeriveInput = parse_quote! {
            struct Bad {
                #[bind("query.a")]
                #[bind("query.b")]
                page: u32,
            }
        };
        let err = BindStruct::parse(input).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_tuple_and_enum() {
        let tuple: DeriveInput = parse_quote! { struct Pair(u32, u32); };
        assert!(BindStruct::parse(tuple).is_err());

        let enumeration: DeriveInput = parse_quote! { enum Kind { A, B } };
        assert!(BindStruct::parse(enumeration).is_err());
    }

    #[test]
    fn test_crate_path() {
        let default: DeriveInput = parse_quote! {
            struct Plain {
                #[bind("query.q")]
                q: String,
            }
        };
        let parsed = BindStruct::parse(default).unwrap();
        assert_eq!(parsed.krate, parse_quote!(::bindery_extract));

        let facade: DeriveInput = parse_quote! {
            #[bind(crate = "bindery::extract")]
            struct Routed {
                #[bind("query.q")]
                q: String,
            }
        };
        let parsed = BindStruct::parse(facade).unwrap();
        assert_eq!(parsed.krate, parse_quote!(bindery::extract));

        let alias: DeriveInput = parse_quote! {
            #[bind(crate = "bindery::extract")]
            struct Status(String);
        };
        assert_eq!(AliasStruct::parse(alias).unwrap().krate, parse_quote!(bindery::extract));
    }

    #[test]
    fn test_rejects_unknown_container_option() {
        let input: DeriveInput = parse_quote! {
            #[bind(rename = "x")]
            struct Bad {
                q: String,
            }
        };
        assert!(BindStruct::parse(input).is_err());
    }

    #[test]
    fn test_parse_alias() {
        let input: DeriveInput = parse_quote! { struct Status(String); };
        let parsed = AliasStruct::parse(input).unwrap();
        assert_eq!(parsed.ident, "Status");
    }

    #[test]
    fn test_alias_requires_single_field() {
        let two: DeriveInput = parse_quote! { struct Pair(String, String); };
        assert!(AliasStruct::parse(two).is_err());

        let named: DeriveInput = parse_quote! { struct Named { value: String } };
        assert!(AliasStruct::parse(named).is_err());
    }
}
