// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, Fields, GenericParam};

use super::field_meta::parse_field_meta;

struct KeyedField<'a> {
    ident: &'a syn::Ident,
    key: String,
    default: bool,
}

fn keyed_fields(ast: &DeriveInput) -> syn::Result<Vec<KeyedField<'_>>> {
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "Serializable cannot be derived for tuple structs",
                ))
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "Serializable can only be derived for structs",
            ))
        }
    };

    let mut keyed = Vec::new();
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();
    for field in fields {
        let meta = parse_field_meta(field)?;
        if meta.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let key = meta.key(field);
        if let Some(existing) = seen.get(&key) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("key '{}' is already used by field '{}'", key, existing),
            ));
        }
        seen.insert(key.clone(), ident);
        keyed.push(KeyedField {
            ident,
            key,
            default: meta.default,
        });
    }
    Ok(keyed)
}

pub(crate) fn derive_serializable(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let fields = keyed_fields(ast)?;

    let mut generics = ast.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::graphdoc_core::Field));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let write_fields = fields.iter().map(|field| {
        let ident = field.ident;
        let key = &field.key;
        quote! {
            ser.serialize(#key, &self.#ident)?;
        }
    });
    let read_fields = fields.iter().map(|field| {
        let ident = field.ident;
        let key = &field.key;
        if field.default {
            quote! {
                de.deserialize_or(#key, &mut self.#ident, ::std::default::Default::default())?;
            }
        } else {
            quote! {
                de.deserialize(#key, &mut self.#ident)?;
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::graphdoc_core::Serializable for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn serialize(
                &self,
                ser: &mut ::graphdoc_core::Serializer<'_>,
            ) -> ::std::result::Result<(), ::graphdoc_core::Error> {
                #(#write_fields)*
                ::std::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn deserialize(
                &mut self,
                de: &mut ::graphdoc_core::Deserializer<'_>,
            ) -> ::std::result::Result<(), ::graphdoc_core::Error> {
                #(#read_fields)*
                ::std::result::Result::Ok(())
            }
        }

        impl #impl_generics ::graphdoc_core::Field for #name #ty_generics #where_clause {
            fn write_content(
                &self,
                ser: &mut ::graphdoc_core::Serializer<'_>,
            ) -> ::std::result::Result<(), ::graphdoc_core::Error> {
                ::graphdoc_core::Serializable::serialize(self, ser)
            }

            fn read_content(
                &mut self,
                de: &mut ::graphdoc_core::Deserializer<'_>,
            ) -> ::std::result::Result<(), ::graphdoc_core::Error> {
                ::graphdoc_core::Serializable::deserialize(self, de)
            }
        }
    })
}
