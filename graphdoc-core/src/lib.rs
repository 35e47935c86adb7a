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

//! # graphdoc-core
//!
//! Core engine converting a live, possibly cyclic object graph into a
//! hierarchical document and back.
//!
//! ## Architecture
//!
//! - **`document`**: ordered tree of named nodes and its JSON text form
//! - **`arena`**: owner of every value reachable through a [`Ptr`]
//! - **`field`**: per-type encoding of primitives, containers, pairs,
//!   pointers and composites
//! - **`serializer`** / **`deserializer`**: the two directions of a pass
//! - **`resolver`**: reference bookkeeping and the polymorphic type registry
//! - **`config`**, **`types`**: settings and layout constants
//! - **`error`**: error taxonomy
//!
//! ## Key Concepts
//!
//! ### Pointer identity
//!
//! A value reachable through several pointers is written once. The first
//! pointer node to it carries an `id`, every later one a `ref` to that id.
//! Reading resolves references in any order, including cycles, so shared
//! and cyclic structures come back with the same shape.
//!
//! ### Encodings
//!
//! With [`Encoding::Nodes`] every value is a child node and primitives keep
//! their text in a `value` attribute. With [`Encoding::Attributes`]
//! primitives become attributes of the enclosing node, which makes
//! documents denser.
//!
//! ### Polymorphism
//!
//! Pointers to an abstract family such as `Ptr<dyn Shape>` store a `type`
//! tag taken from the [`TypeRegistry`]; reading asks the registered
//! [`Factory`] chain for a fresh instance of that tag.
//!
//! ## Usage
//!
//! ```rust
//! use graphdoc_core::{composite, Arena, Deserializer, Error, GraphDoc, Ptr};
//! use graphdoc_core::{Serializable, Serializer};
//!
//! #[derive(Default)]
//! struct Link {
//!     label: String,
//!     next: Ptr<Link>,
//! }
//!
//! impl Serializable for Link {
//!     fn serialize(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
//!         ser.serialize("label", &self.label)?;
//!         ser.serialize("next", &self.next)
//!     }
//!
//!     fn deserialize(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
//!         de.deserialize("next", &mut self.next)?;
//!         de.deserialize("label", &mut self.label)
//!     }
//! }
//!
//! composite!(Link);
//!
//! let graphdoc = GraphDoc::default();
//! let mut arena = Arena::new();
//! let a = arena.insert(Link { label: "a".into(), next: Ptr::null() });
//! let b = arena.insert(Link { label: "b".into(), next: a.into() });
//! arena.get_mut(a).unwrap().next = b.into();
//!
//! let text = graphdoc.to_text(&arena, &Ptr::from(a)).unwrap();
//! let mut head = Ptr::<Link>::null();
//! graphdoc.from_text(&mut arena, &text, &mut head).unwrap();
//!
//! let first = arena.deref(head).unwrap();
//! let second = arena.deref(first.next).unwrap();
//! assert_eq!(second.label, "b");
//! assert!(arena.same(second.next, head));
//! ```

pub mod arena;
pub mod config;
pub mod deserializer;
pub mod document;
pub mod error;
pub mod field;
pub mod graphdoc;
pub mod resolver;
pub mod serializer;
pub mod types;

pub use arena::{Arena, Handle, Ptr};
pub use config::Config;
pub use deserializer::{Deserializer, State};
pub use document::{Document, DocumentProcessor, Node, NodeId};
pub use error::Error;
pub use field::{Entries, Field, Items, Object, Pointee, Serializable};
pub use graphdoc::GraphDoc;
pub use resolver::type_resolver::{Factory, TypeFactory, TypeRegistry};
pub use serializer::Serializer;
pub use types::{Encoding, Options};
