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

//! Derive macro for graphdoc.
//!
//! `#[derive(Serializable)]` implements `graphdoc_core::Serializable` and
//! `graphdoc_core::Field` for structs with named fields. Every field is
//! stored under its name; the `#[graphdoc(...)]` attribute adjusts that:
//!
//! - `rename = "key"`: store the field under another key
//! - `skip`: leave the field out; it keeps its value on read
//! - `default`: the key may be missing on read, the field then becomes
//!   `Default::default()`
//!
//! The struct itself must implement `Default`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;

/// Derive macro for graph serialization.
///
/// # Example
///
/// ```rust, ignore
/// use graphdoc::{Ptr, Serializable};
///
/// #[derive(Serializable, Default)]
/// struct Node {
///     #[graphdoc(rename = "caption")]
///     label: String,
///     next: Ptr<Node>,
///     #[graphdoc(skip)]
///     visits: u32,
/// }
/// ```
#[proc_macro_derive(Serializable, attributes(graphdoc))]
pub fn proc_macro_derive_serializable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_serializable(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
