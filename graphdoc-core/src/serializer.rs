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

//! Writing side of the engine.
//!
//! A [`Serializer`] builds one [`Document`] from any number of keyed values.
//! Pointers met along the way are queued and only resolved when the
//! document is finished, because whether a target is written inline, gets
//! an id or is merely referenced depends on everything serialized in the
//! same pass.

use std::any::Any;
use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::arena::{Arena, Ptr};
use crate::config::Config;
use crate::document::{text, Document, NodeId};
use crate::ensure;
use crate::error::Error;
use crate::field::{Entries, Field, Items, Object, Pointee};
use crate::resolver::ref_resolver::{Address, PendingReference, RefWriter};
use crate::resolver::type_resolver::TypeRegistry;
use crate::types::{
    is_reserved_attribute, Options, ID_ATTRIBUTE, REF_ATTRIBUTE, TYPE_ATTRIBUTE,
    VALUE_ATTRIBUTE,
};

/// Converts values into a document.
///
/// ```rust
/// use graphdoc_core::{Arena, Config, Serializer, TypeRegistry};
///
/// let arena = Arena::new();
/// let registry = TypeRegistry::new();
/// let config = Config::default();
///
/// let mut ser = Serializer::new(&arena, &registry, &config);
/// ser.serialize("answer", &42i32).unwrap();
/// let document = ser.into_document().unwrap();
/// let root = document.root();
/// let answer = document.first_child_named(root, "answer").unwrap();
/// assert_eq!(document.attribute(answer, "value"), Some("42"));
/// ```
pub struct Serializer<'a> {
    arena: &'a Arena,
    registry: &'a TypeRegistry,
    config: &'a Config,
    options: Options,
    document: Document,
    cursor: NodeId,
    refs: RefWriter,
}

impl<'a> Serializer<'a> {
    pub fn new(arena: &'a Arena, registry: &'a TypeRegistry, config: &'a Config) -> Self {
        let document = Document::with_version(config.version());
        let cursor = document.root();
        Serializer {
            arena,
            registry,
            config,
            options: config.options(),
            document,
            cursor,
            refs: RefWriter::new(),
        }
    }

    #[inline(always)]
    pub fn options(&self) -> Options {
        self.options
    }

    #[inline(always)]
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    #[inline(always)]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// The document as built so far. Pointer nodes are still unresolved.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Runs `f` with `options` in effect and restores the previous options
    /// afterwards, also when `f` fails.
    pub fn with_options<R>(
        &mut self,
        options: Options,
        f: impl FnOnce(&mut Self) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let saved = std::mem::replace(&mut self.options, options);
        let result = f(self);
        self.options = saved;
        result
    }

    /// Serializes `value` below the current node under `key`.
    pub fn serialize<T: Field>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        value.write_field(key, self)
    }

    /// Serializes `value` unless it equals `default`; the matching
    /// [`Deserializer::deserialize_or`](crate::deserializer::Deserializer::deserialize_or)
    /// restores the default for the missing key.
    pub fn serialize_unless<T: Field + PartialEq>(
        &mut self,
        key: &str,
        value: &T,
        default: &T,
    ) -> Result<(), Error> {
        if value == default {
            return Ok(());
        }
        self.serialize(key, value)
    }

    /// Serializes a collection naming every element node `item_key`.
    pub fn serialize_items<C: Items>(
        &mut self,
        key: &str,
        collection: &C,
        item_key: &str,
    ) -> Result<(), Error> {
        self.write_node_with(key, collection, |ser| collection.write_items(item_key, ser))
    }

    /// Serializes a map with custom names for its value and key nodes.
    pub fn serialize_map_with<M: Entries>(
        &mut self,
        key: &str,
        map: &M,
        value_key: &str,
        key_key: &str,
    ) -> Result<(), Error> {
        self.write_node_with(key, map, |ser| map.write_entries(value_key, key_key, ser))
    }

    /// Serializes raw bytes as base64 text.
    pub fn serialize_blob(&mut self, key: &str, bytes: &[u8]) -> Result<(), Error> {
        let encoded = STANDARD.encode(bytes);
        self.serialize(key, &encoded)
    }

    /// Resolves all pending references and returns the finished document.
    pub fn into_document(mut self) -> Result<Document, Error> {
        self.resolve_references()?;
        Ok(self.document)
    }

    /// Resolves all pending references and renders the document to `writer`.
    pub fn write<W: Write>(self, writer: W) -> Result<(), Error> {
        let pretty = self.config.is_pretty();
        let document = self.into_document()?;
        text::write_document(&document, writer, pretty)
    }

    pub fn write_to_string(self) -> Result<String, Error> {
        let pretty = self.config.is_pretty();
        let document = self.into_document()?;
        text::render(&document, pretty)
    }

    /// Moves the cursor to `node` for the duration of `f`.
    pub(crate) fn descend<R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut Self) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let saved = std::mem::replace(&mut self.cursor, node);
        let result = f(self);
        self.cursor = saved;
        result
    }

    pub(crate) fn write_node<T: Field>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        self.write_node_with(key, value, |ser| value.write_content(ser))
    }

    /// Creates child `key`, maps the address of `value` to it and runs `f`
    /// inside it.
    pub(crate) fn write_node_with<T: Any>(
        &mut self,
        key: &str,
        value: &T,
        f: impl FnOnce(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let node = self.document.create_child(self.cursor, key);
        if std::mem::size_of::<T>() != 0 {
            self.refs.record(Address::of(value), node);
        }
        self.descend(node, f)
    }

    pub(crate) fn write_attribute(&mut self, key: &str, value: String) -> Result<(), Error> {
        ensure!(
            !is_reserved_attribute(key),
            Error::attribute_naming(format!("'{}' is a reserved attribute name", key))
        );
        ensure!(
            !self.document.has_attribute(self.cursor, key),
            Error::attribute_naming(format!(
                "attribute '{}' already exists on node '{}'",
                key,
                self.document.name(self.cursor)
            ))
        );
        self.document.set_attribute(self.cursor, key, value);
        Ok(())
    }

    pub(crate) fn write_value_content(&mut self, value: String) {
        self.document.set_attribute(self.cursor, VALUE_ATTRIBUTE, value);
    }

    pub(crate) fn write_text_content(&mut self, text: String) {
        self.document.set_text(self.cursor, text);
    }

    /// Writes a collection element. Primitive elements always get a node of
    /// their own, also in attribute encoding.
    pub(crate) fn write_item<T: Field>(&mut self, item_key: &str, item: &T) -> Result<(), Error> {
        if T::is_primitive() {
            self.write_node(item_key, item)
        } else {
            item.write_field(item_key, self)
        }
    }

    pub(crate) fn write_entry<K: Field, V: Field>(
        &mut self,
        key_key: &str,
        key: &K,
        value_key: &str,
        value: &V,
    ) -> Result<(), Error> {
        if !(self.options.is_attributes() && K::is_primitive()) {
            self.write_item(key_key, key)?;
            return self.write_item(value_key, value);
        }
        self.write_item(value_key, value)?;
        let Some(node) = self.document.children(self.cursor).last().copied() else {
            return Err(Error::format(format!("no '{}' node written", value_key)));
        };
        self.descend(node, |ser| key.write_field(key_key, ser))?;
        if let Some(text) = self.document.attribute(node, key_key).map(str::to_string) {
            self.document.set_first_attribute(node, key_key, text);
        }
        Ok(())
    }

    /// Writes a pointer node below the cursor.
    ///
    /// A null pointer, or one that resolves to nothing, is an empty node. In
    /// pointer-content mode the target is written inline, with nested
    /// pointers back in reference mode. Otherwise the node is queued until
    /// [`Serializer::into_document`] decides between an id and a reference.
    pub(crate) fn write_pointer<T: ?Sized + Pointee>(
        &mut self,
        key: &str,
        ptr: &Ptr<T>,
    ) -> Result<(), Error> {
        let node = self.document.create_child(self.cursor, key);
        let arena = self.arena;
        let Some(slot) = arena.live_slot(ptr) else {
            return Ok(());
        };
        let Some(object) = arena.object_at(slot) else {
            return Ok(());
        };
        self.write_type_tag(node, object);
        if self.options.is_pointer_content() {
            self.record_target(slot, object, node);
            let options = self.options.with_pointer_content(false);
            return self.descend(node, |ser| {
                ser.with_options(options, |ser| object.write_object(ser))
            });
        }
        self.refs.push_pending(PendingReference {
            node,
            slot,
            options: self.options,
        });
        Ok(())
    }

    fn write_type_tag(&mut self, node: NodeId, object: &dyn Object) {
        if let Some(tag) = self.registry.type_tag_for(object) {
            self.document.set_attribute(node, TYPE_ATTRIBUTE, tag);
        }
    }

    fn record_target(&mut self, slot: usize, object: &dyn Object, node: NodeId) {
        self.refs.record_slot(slot, node);
        if std::mem::size_of_val(object.as_any()) != 0 {
            self.refs.record(Address::of_object(object), node);
        }
    }

    /// Node already holding the content of the value in `slot`, if any.
    fn target_node(&self, slot: usize, object: &dyn Object) -> Option<NodeId> {
        self.refs.node_for_slot(slot).or_else(|| {
            if std::mem::size_of_val(object.as_any()) == 0 {
                None
            } else {
                self.refs.node_for(Address::of_object(object))
            }
        })
    }

    /// Drains the pending queue. Targets with a node get an id there and the
    /// pointer a `ref`; the first pointer to any other target takes the next
    /// id and receives the content itself.
    fn resolve_references(&mut self) -> Result<(), Error> {
        let arena = self.arena;
        while let Some(pending) = self.refs.pop_pending() {
            let Some(object) = arena.object_at(pending.slot) else {
                continue;
            };
            match self.target_node(pending.slot, object) {
                Some(target) => {
                    let id = match self.document.attribute(target, ID_ATTRIBUTE) {
                        Some(id) => id.to_string(),
                        None => {
                            let id = self.refs.next_id();
                            self.document.set_first_attribute(target, ID_ATTRIBUTE, id.clone());
                            id
                        }
                    };
                    self.document.set_attribute(pending.node, REF_ATTRIBUTE, id);
                }
                None => {
                    let id = self.refs.next_id();
                    self.document.set_first_attribute(pending.node, ID_ATTRIBUTE, id);
                    self.record_target(pending.slot, object, pending.node);
                    self.descend(pending.node, |ser| {
                        ser.with_options(pending.options, |ser| object.write_object(ser))
                    })?;
                }
            }
        }
        Ok(())
    }
}
