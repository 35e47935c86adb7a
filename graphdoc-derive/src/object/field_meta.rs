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

//! Field-level metadata parsing for `#[graphdoc(...)]` attributes.

use syn::{Field, LitStr};

/// Parsed `#[graphdoc(...)]` attributes of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Key used instead of the field name.
    pub rename: Option<String>,
    pub skip: bool,
    /// Missing keys fall back to `Default::default()`.
    pub default: bool,
}

impl FieldMeta {
    /// Document key of `field`.
    pub fn key(&self, field: &Field) -> String {
        match (&self.rename, &field.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => {
                let name = ident.to_string();
                name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
            }
            (None, None) => String::new(),
        }
    }
}

/// Parse `#[graphdoc(...)]` attributes from a field
pub fn parse_field_meta(field: &Field) -> syn::Result<FieldMeta> {
    let mut meta = FieldMeta::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("graphdoc") {
            continue;
        }

        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("rename") {
                let lit: LitStr = nested.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new(lit.span(), "rename key must not be empty"));
                }
                meta.rename = Some(lit.value());
            } else if nested.path.is_ident("skip") {
                meta.skip = true;
            } else if nested.path.is_ident("default") {
                meta.default = true;
            } else {
                return Err(nested.error("expected `rename`, `skip` or `default`"));
            }
            Ok(())
        })?;
    }

    if meta.skip && (meta.rename.is_some() || meta.default) {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with other graphdoc attributes",
        ));
    }

    Ok(meta)
}
