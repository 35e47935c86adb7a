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

//! # graphdoc
//!
//! graphdoc turns a live object graph, with shared and cyclic pointers and
//! polymorphic pointees, into a hierarchical document and rebuilds the same
//! graph from it.
//!
//! ## Key Features
//!
//! - **Pointer identity**: a value behind several pointers is written once
//!   and referenced by id everywhere else
//! - **Cycles and forward references**: references are resolved in any order
//! - **Polymorphism**: `Ptr<dyn Trait>` targets are rebuilt through a chain of
//!   registered factories
//! - **Two densities**: primitives as child nodes or as attributes
//! - **Order independence**: keys of one level can be read in any order
//!
//! ## Example
//!
//! ```rust
//! use graphdoc::{Arena, GraphDoc, Ptr, Serializable};
//!
//! #[derive(Serializable, Default)]
//! struct Person {
//!     name: String,
//!     #[graphdoc(rename = "best-friend")]
//!     friend: Ptr<Person>,
//!     #[graphdoc(default)]
//!     nicknames: Vec<String>,
//! }
//!
//! let graphdoc = GraphDoc::default();
//! let mut arena = Arena::new();
//! let ann = arena.insert(Person { name: "Ann".into(), ..Person::default() });
//! let bob = arena.insert(Person { name: "Bob".into(), friend: ann.into(), ..Person::default() });
//! arena.get_mut(ann).unwrap().friend = bob.into();
//!
//! let people: Vec<Ptr<Person>> = vec![ann.into(), bob.into()];
//! let text = graphdoc.to_text(&arena, &people).unwrap();
//!
//! let mut copy: Vec<Ptr<Person>> = Vec::new();
//! graphdoc.from_text(&mut arena, &text, &mut copy).unwrap();
//! let ann_copy = arena.deref(copy[0]).unwrap();
//! assert_eq!(ann_copy.name, "Ann");
//! assert!(arena.same(ann_copy.friend, copy[1]));
//! ```

pub use graphdoc_core::{
    abstract_pointee, composite, error::Error, Arena, Config, Deserializer, Document,
    DocumentProcessor, Encoding, Entries, Factory, Field, GraphDoc, Handle, Items, Object,
    Options, Pointee, Ptr, Serializable, Serializer, TypeFactory, TypeRegistry,
};
pub use graphdoc_derive::Serializable;
