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

//! Reading side of the engine.
//!
//! A [`Deserializer`] serves one document: [`Deserializer::read`] parses and
//! checks it, any number of `deserialize` calls pull keyed values out of it,
//! and [`Deserializer::finish`] reports the references that never resolved.
//!
//! Nodes are matched by name below the cursor. Every node is consumed once,
//! so several values written under the same key come back in document
//! order, while distinct keys can be read in any order.
//!
//! Pointer targets are allocated and registered where their node is met,
//! but their content is queued and read once the outermost `deserialize`
//! call has read its own value. Long pointer chains therefore do not grow
//! the call stack.

use std::collections::{HashSet, VecDeque};
use std::io::Read;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::arena::{Arena, Handle, Ptr};
use crate::config::Config;
use crate::document::{text, Document, DocumentProcessor, NodeId};
use crate::ensure;
use crate::error::Error;
use crate::field::{Entries, Field, Items, Object, Pointee};
use crate::invalid_operation;
use crate::resolver::ref_resolver::{IdTarget, RefReader};
use crate::resolver::type_resolver::TypeRegistry;
use crate::types::{
    Options, ID_ATTRIBUTE, REF_ATTRIBUTE, ROOT_NODE, TYPE_ATTRIBUTE, VALUE_ATTRIBUTE,
    VERSION_ATTRIBUTE,
};

/// Lifecycle of a [`Deserializer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Created, no document read yet.
    Constructed,
    /// A document was read and checked.
    Read,
    /// At least one value was deserialized.
    Deserializing,
    /// [`Deserializer::finish`] was called.
    Done,
}

/// Pointer target whose content has not been read yet.
struct PendingTarget {
    node: NodeId,
    slot: usize,
    options: Options,
}

/// Rebuilds values, and the object graph behind their pointers, from a
/// document.
///
/// Values reached through pointers are allocated in the arena the
/// deserializer borrows and stay there after it is dropped.
///
/// ```rust
/// use graphdoc_core::{Arena, Config, Deserializer, TypeRegistry};
///
/// let mut arena = Arena::new();
/// let registry = TypeRegistry::new();
/// let config = Config::default();
///
/// let mut de = Deserializer::new(&mut arena, &registry, &config);
/// de.read_str(r#"{"name":"GraphDocument","attributes":{"version":"1.0"},
///     "children":[{"name":"answer","attributes":{"value":"42"}}]}"#)
///     .unwrap();
/// let mut answer = 0i32;
/// de.deserialize("answer", &mut answer).unwrap();
/// assert_eq!(answer, 42);
/// assert!(de.finish().unwrap().is_empty());
/// ```
pub struct Deserializer<'a> {
    arena: &'a mut Arena,
    registry: &'a TypeRegistry,
    config: &'a Config,
    options: Options,
    state: State,
    document: Document,
    cursor: NodeId,
    visited: HashSet<NodeId>,
    refs: RefReader,
    // Set while a subtree is read a second time; its ids are known already.
    replay: bool,
    // Nesting of public `deserialize*` calls; the outermost drains `pending`.
    depth: usize,
    pending: VecDeque<PendingTarget>,
    // Value node of the map entry being read and the attribute holding its key.
    entry_key: Option<(NodeId, String)>,
    unresolvable: Vec<String>,
    warnings: Vec<String>,
}

impl<'a> Deserializer<'a> {
    pub fn new(arena: &'a mut Arena, registry: &'a TypeRegistry, config: &'a Config) -> Self {
        let document = Document::default();
        let cursor = document.root();
        Deserializer {
            arena,
            registry,
            config,
            options: config.options(),
            state: State::Constructed,
            document,
            cursor,
            visited: HashSet::new(),
            refs: RefReader::new(),
            replay: false,
            depth: 0,
            pending: VecDeque::new(),
            entry_key: None,
            unresolvable: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn options(&self) -> Options {
        self.options
    }

    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline(always)]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn arena(&self) -> &Arena {
        self.arena
    }

    /// Ids referenced by the document that no node defines, as found by
    /// [`Deserializer::read`].
    pub fn unresolvable_references(&self) -> &[String] {
        &self.unresolvable
    }

    /// Non-fatal conditions met so far: dropped collection items, surplus
    /// items and map entries without an allocated counterpart.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
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

    /// Parses the document text from `reader` and prepares it for reading.
    pub fn read<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        self.ensure_state(State::Constructed, "read")?;
        let document = text::read_document(reader)?;
        self.load(document, None)
    }

    /// Like [`Deserializer::read`], running `processor` on the document after
    /// the version check and before references are scanned.
    pub fn read_with<R: Read, P: DocumentProcessor>(
        &mut self,
        reader: R,
        processor: &mut P,
    ) -> Result<(), Error> {
        self.ensure_state(State::Constructed, "read")?;
        let document = text::read_document(reader)?;
        self.load(document, Some(processor))
    }

    pub fn read_str(&mut self, source: &str) -> Result<(), Error> {
        self.ensure_state(State::Constructed, "read")?;
        let document = text::parse(source)?;
        self.load(document, None)
    }

    /// Reads an already parsed document.
    pub fn read_document(&mut self, document: Document) -> Result<(), Error> {
        self.ensure_state(State::Constructed, "read")?;
        self.load(document, None)
    }

    pub fn read_document_with<P: DocumentProcessor>(
        &mut self,
        document: Document,
        processor: &mut P,
    ) -> Result<(), Error> {
        self.ensure_state(State::Constructed, "read")?;
        self.load(document, Some(processor))
    }

    /// Deserializes the value stored under `key` below the current node.
    ///
    /// Fails with [`Error::NoSuchData`] if there is no such value left.
    pub fn deserialize<T: Field>(&mut self, key: &str, value: &mut T) -> Result<(), Error> {
        self.read_value(|de| value.read_field(key, de))
    }

    /// Deserializes `key`, falling back to `default` if it is missing.
    pub fn deserialize_or<T: Field>(
        &mut self,
        key: &str,
        value: &mut T,
        default: T,
    ) -> Result<(), Error> {
        match self.deserialize(key, value) {
            Err(err) if err.is_no_such_data() => {
                *value = default;
                Ok(())
            }
            other => other,
        }
    }

    /// Deserializes a collection whose element nodes are named `item_key`.
    pub fn deserialize_items<C: Items>(
        &mut self,
        key: &str,
        collection: &mut C,
        item_key: &str,
    ) -> Result<(), Error> {
        self.read_value(|de| {
            de.read_node_with(key, collection, |de, collection| {
                collection.read_items(item_key, de)
            })
        })
    }

    /// Deserializes a map with custom names for its value and key nodes.
    pub fn deserialize_map_with<M: Entries>(
        &mut self,
        key: &str,
        map: &mut M,
        value_key: &str,
        key_key: &str,
    ) -> Result<(), Error> {
        self.read_value(|de| {
            de.read_node_with(key, map, |de, map| map.read_entries(value_key, key_key, de))
        })
    }

    /// Deserializes bytes stored as base64 text.
    pub fn deserialize_blob(&mut self, key: &str) -> Result<Vec<u8>, Error> {
        let mut encoded = String::new();
        self.deserialize(key, &mut encoded)?;
        STANDARD
            .decode(encoded.trim())
            .map_err(|err| Error::format(format!("'{}' is not valid base64: {}", key, err)))
    }

    /// Releases the value behind `handle`. Pointers already pointing at it
    /// and references to its id read later resolve to nothing.
    pub fn free_pointer<T: ?Sized>(&mut self, handle: Handle<T>) -> Option<Box<dyn Object>> {
        self.refs.release(handle.index());
        self.arena.release(handle)
    }

    /// Ends deserialization and returns the ids some pointer is still
    /// waiting for.
    pub fn finish(&mut self) -> Result<Vec<String>, Error> {
        match self.state {
            State::Read | State::Deserializing => {}
            State::Constructed => {
                invalid_operation!("finish() called before a document was read")
            }
            State::Done => invalid_operation!("finish() called twice"),
        }
        self.state = State::Done;
        let pending = self.refs.pending_ids();
        for id in &pending {
            log::debug!("reference '{}' was never resolved", id);
        }
        Ok(pending)
    }

    fn ensure_state(&self, expected: State, operation: &str) -> Result<(), Error> {
        if self.state != expected {
            invalid_operation!(
                "{}() is not allowed in state {:?}, expected {:?}",
                operation,
                self.state,
                expected
            );
        }
        Ok(())
    }

    /// Runs one public read. The outermost call also reads the content of
    /// every pointer target queued meanwhile, after `f` and even if `f`
    /// failed, so targets reached before a failure are complete.
    fn read_value(&mut self, f: impl FnOnce(&mut Self) -> Result<(), Error>) -> Result<(), Error> {
        self.begin()?;
        self.depth += 1;
        let mut result = f(self);
        if self.depth == 1 {
            let drained = self.read_pending_targets();
            result = result.and(drained);
        }
        self.depth -= 1;
        result
    }

    fn read_pending_targets(&mut self) -> Result<(), Error> {
        while let Some(pending) = self.pending.pop_front() {
            let Some(mut object) = self.arena.take(pending.slot) else {
                continue;
            };
            let result = self.descend(pending.node, |de| {
                de.with_options(pending.options, |de| object.read_object(de))
            });
            self.arena.fill(pending.slot, object);
            if let Err(err) = result {
                self.pending.clear();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Logs a non-fatal condition and keeps it for [`Deserializer::warnings`].
    pub(crate) fn warn(&mut self, message: String) {
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    fn begin(&mut self) -> Result<(), Error> {
        match self.state {
            State::Read | State::Deserializing => {
                self.state = State::Deserializing;
                Ok(())
            }
            State::Constructed => {
                invalid_operation!("deserialize() called before read()")
            }
            State::Done => invalid_operation!("deserialize() called after finish()"),
        }
    }

    fn load(
        &mut self,
        mut document: Document,
        processor: Option<&mut dyn DocumentProcessor>,
    ) -> Result<(), Error> {
        let root = document.root();
        ensure!(
            document.name(root) == ROOT_NODE,
            Error::format(format!(
                "root node is '{}', expected '{}'",
                document.name(root),
                ROOT_NODE
            ))
        );
        let found = document.attribute(root, VERSION_ATTRIBUTE).unwrap_or("");
        ensure!(
            found == self.config.version(),
            Error::version_mismatch(self.config.version().to_string(), found.to_string())
        );
        if let Some(processor) = processor {
            processor.process(&mut document)?;
        }
        self.unresolvable = scan_references(&document)?;
        for id in &self.unresolvable {
            log::warn!("reference '{}' points to no node of the document", id);
        }
        if self.config.is_strict_references() && !self.unresolvable.is_empty() {
            return Err(Error::reference_resolving(format!(
                "unresolvable references: {}",
                self.unresolvable.join(", ")
            )));
        }
        self.cursor = document.root();
        self.document = document;
        self.state = State::Read;
        Ok(())
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

    /// First unvisited child of the cursor named `key`.
    pub(crate) fn peek(&self, key: &str) -> Option<NodeId> {
        self.document
            .children_named(self.cursor, key)
            .find(|node| !self.visited.contains(node))
    }

    pub(crate) fn has_next(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    /// Consumes the next child named `key`.
    pub(crate) fn next_element(&mut self, key: &str) -> Result<NodeId, Error> {
        match self.peek(key) {
            Some(node) => {
                self.visited.insert(node);
                Ok(node)
            }
            None => Err(Error::no_such_data(format!(
                "no '{}' below '{}'",
                key,
                self.document.name(self.cursor)
            ))),
        }
    }

    pub(crate) fn skip(&mut self, key: &str) -> Result<(), Error> {
        self.next_element(key).map(|_| ())
    }

    pub(crate) fn read_node<T: Field>(&mut self, key: &str, value: &mut T) -> Result<(), Error> {
        self.read_node_with(key, value, |de, value| value.read_content(de))
    }

    /// Consumes child `key` and runs `f` inside it. A node carrying an id
    /// was aliased by a pointer when written; it is read twice, once into an
    /// arena copy that owns the id and once into `value`.
    pub(crate) fn read_node_with<T: Field>(
        &mut self,
        key: &str,
        value: &mut T,
        mut f: impl FnMut(&mut Self, &mut T) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let node = self.next_element(key)?;
        match self.document.attribute(node, ID_ATTRIBUTE) {
            Some(id) if !self.replay => {
                let id = id.to_string();
                self.materialize(node, &id, value, &mut f)
            }
            _ => self.descend(node, |de| f(de, value)),
        }
    }

    fn materialize<T: Field>(
        &mut self,
        node: NodeId,
        id: &str,
        value: &mut T,
        f: &mut impl FnMut(&mut Self, &mut T) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let slot = self.arena.reserve();
        self.refs.register(id, slot, self.arena)?;
        let mut copy = T::default();
        self.descend(node, |de| f(de, &mut copy))?;
        self.arena.fill(slot, Box::new(copy));

        let visited = std::mem::take(&mut self.visited);
        let replay = std::mem::replace(&mut self.replay, true);
        let result = self.descend(node, |de| f(de, value));
        self.replay = replay;
        self.visited.extend(visited);
        result
    }

    pub(crate) fn read_attribute(&self, key: &str) -> Result<String, Error> {
        self.try_read_attribute(key).ok_or_else(|| {
            Error::no_such_data(format!(
                "no attribute '{}' on '{}'",
                key,
                self.document.name(self.cursor)
            ))
        })
    }

    pub(crate) fn try_read_attribute(&self, key: &str) -> Option<String> {
        self.document
            .attribute(self.cursor, key)
            .map(str::to_string)
    }

    pub(crate) fn read_value_content(&self) -> Result<String, Error> {
        self.try_read_attribute(VALUE_ATTRIBUTE).ok_or_else(|| {
            Error::format(format!(
                "node '{}' has no '{}' attribute",
                self.document.name(self.cursor),
                VALUE_ATTRIBUTE
            ))
        })
    }

    /// Literal text of the cursor node, else its `value` attribute.
    pub(crate) fn read_text_content(&self) -> Result<String, Error> {
        match self.document.text(self.cursor) {
            Some(text) => Ok(text.to_string()),
            None => self.read_value_content(),
        }
    }

    /// Reads a collection element, the counterpart of
    /// [`Serializer::write_item`](crate::serializer::Serializer).
    pub(crate) fn read_item<T: Field>(&mut self, item_key: &str, item: &mut T) -> Result<(), Error> {
        if T::is_primitive() {
            self.read_node(item_key, item)
        } else {
            item.read_field(item_key, self)
        }
    }

    /// Reads elements until none is left, handing each to `push`. Elements
    /// that cannot be allocated are dropped.
    pub(crate) fn read_each_item<T: Field>(
        &mut self,
        item_key: &str,
        mut push: impl FnMut(T),
    ) -> Result<(), Error> {
        loop {
            let mut item = T::default();
            match self.read_item(item_key, &mut item) {
                Ok(()) => push(item),
                Err(err) if err.is_no_such_data() => return Ok(()),
                Err(err) if err.is_memory_allocation() => {
                    self.warn(format!("dropping '{}' item: {}", item_key, err));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Reads elements into existing ones, in order.
    pub(crate) fn read_items_in_place<'b, T: Field>(
        &mut self,
        item_key: &str,
        items: impl Iterator<Item = &'b mut T>,
    ) -> Result<(), Error> {
        for item in items {
            match self.read_item(item_key, item) {
                Ok(()) => {}
                Err(err) if err.is_no_such_data() => return Ok(()),
                Err(err) => return Err(err),
            }
        }
        let mut surplus = 0usize;
        while self.next_element(item_key).is_ok() {
            surplus += 1;
        }
        if surplus > 0 {
            self.warn(format!(
                "{} serialized '{}' items have no allocated element and are ignored",
                surplus, item_key
            ));
        }
        Ok(())
    }

    pub(crate) fn read_entry<K: Field, V: Field>(
        &mut self,
        key_key: &str,
        key: &mut K,
        value_key: &str,
        value: &mut V,
    ) -> Result<(), Error> {
        self.read_entry_key(key_key, key, value_key)?;
        self.read_item(value_key, value)
    }

    /// Reads the key of the next map entry and leaves its value node for
    /// [`Deserializer::read_item`] or [`Deserializer::skip`].
    pub(crate) fn read_entry_key<K: Field>(
        &mut self,
        key_key: &str,
        key: &mut K,
        value_key: &str,
    ) -> Result<(), Error> {
        if !(self.options.is_attributes() && K::is_primitive()) {
            return self.read_item(key_key, key);
        }
        let Some(node) = self.peek(value_key) else {
            return Err(Error::no_such_data(format!(
                "no '{}' below '{}'",
                value_key,
                self.document.name(self.cursor)
            )));
        };
        self.entry_key = Some((node, key_key.to_string()));
        self.descend(node, |de| key.read_field(key_key, de))
            .map_err(|err| {
                if err.is_no_such_data() {
                    Error::format(format!("'{}' node without '{}'", value_key, key_key))
                } else {
                    err
                }
            })
    }

    /// Reads the pointer node `key` into `ptr`.
    pub(crate) fn read_pointer<T: ?Sized + Pointee>(
        &mut self,
        key: &str,
        ptr: &mut Ptr<T>,
    ) -> Result<(), Error> {
        let node = self.next_element(key)?;
        if self.options.is_pointer_content() {
            return self.read_pointer_content(node, ptr);
        }
        *ptr = Ptr::null();
        if let Some(id) = self.document.attribute(node, REF_ATTRIBUTE) {
            let id = id.to_string();
            if self.document.has_attribute(node, TYPE_ATTRIBUTE) {
                // The instance is only created to fail on unknown types the
                // same way a definition would.
                drop(self.allocate::<T>(node)?);
            }
            *ptr = self.reference(&id);
            return Ok(());
        }
        let id = self.document.attribute(node, ID_ATTRIBUTE).map(str::to_string);
        if let Some(known) = self.replayed(id.as_deref()) {
            *ptr = known;
            return Ok(());
        }
        if id.is_none() && self.is_null_node(node) {
            return Ok(());
        }
        let options = self.options;
        *ptr = self.read_target(node, id.as_deref(), options)?;
        Ok(())
    }

    /// Pointer-content mode: the target's content is inline. A live target
    /// is read in place, otherwise a new one is allocated; nested pointers
    /// are read in reference mode.
    fn read_pointer_content<T: ?Sized + Pointee>(
        &mut self,
        node: NodeId,
        ptr: &mut Ptr<T>,
    ) -> Result<(), Error> {
        let options = self.options.with_pointer_content(false);
        let id = self.document.attribute(node, ID_ATTRIBUTE).map(str::to_string);
        if let Some(known) = self.replayed(id.as_deref()) {
            *ptr = known;
            return Ok(());
        }
        if let Some(slot) = self.arena.live_slot(ptr) {
            let Some(mut object) = self.arena.take(slot) else {
                return Ok(());
            };
            if let Some(id) = &id {
                self.refs.register(id, slot, self.arena)?;
            }
            let result = self.descend(node, |de| {
                de.with_options(options, |de| object.read_object(de))
            });
            self.arena.fill(slot, object);
            return result;
        }
        if id.is_none() && self.is_null_node(node) {
            *ptr = Ptr::null();
            return Ok(());
        }
        *ptr = self.read_target(node, id.as_deref(), options)?;
        Ok(())
    }

    /// Allocates the target of a pointer node, registers its id and queues
    /// its content.
    fn read_target<T: ?Sized + Pointee>(
        &mut self,
        node: NodeId,
        id: Option<&str>,
        options: Options,
    ) -> Result<Ptr<T>, Error> {
        let object = self.allocate::<T>(node)?;
        let slot = self.arena.reserve();
        if let Some(id) = id {
            self.refs.register(id, slot, self.arena)?;
        }
        self.arena.fill(slot, object);
        self.pending.push_back(PendingTarget {
            node,
            slot,
            options,
        });
        Ok(Ptr::from_slot(slot))
    }

    /// While replaying a subtree, a pointer node with an id resolves to the
    /// value allocated on the first pass.
    fn replayed<T: ?Sized>(&self, id: Option<&str>) -> Option<Ptr<T>> {
        if !self.replay {
            return None;
        }
        match self.refs.lookup(id?)? {
            IdTarget::Object(slot) => Some(Ptr::from_slot(slot)),
            IdTarget::Released => Some(Ptr::null()),
        }
    }

    fn reference<T: ?Sized>(&mut self, id: &str) -> Ptr<T> {
        match self.refs.lookup(id) {
            Some(IdTarget::Object(slot)) => Ptr::from_slot(slot),
            Some(IdTarget::Released) => Ptr::null(),
            None => Ptr::from_ticket(self.refs.ticket_for(id, self.arena)),
        }
    }

    /// Creates the instance a pointer node describes: through the factory
    /// chain if it carries a type tag, by default construction otherwise.
    fn allocate<T: ?Sized + Pointee>(&self, node: NodeId) -> Result<Box<dyn Object>, Error> {
        if let Some(tag) = self.document.attribute(node, TYPE_ATTRIBUTE) {
            match self.registry.create_instance(tag) {
                Some(object) if T::admits(object.as_ref()) => return Ok(object),
                Some(object) => log::warn!(
                    "type '{}' ({}) cannot be stored behind a pointer to {}",
                    tag,
                    object.type_name(),
                    std::any::type_name::<T>()
                ),
                None => log::debug!("no factory knows type '{}'", tag),
            }
        }
        T::instantiate().ok_or_else(|| {
            Error::memory_allocation(format!(
                "cannot allocate abstract type {} for node '{}'{}",
                std::any::type_name::<T>(),
                self.document.name(node),
                match self.document.attribute(node, TYPE_ATTRIBUTE) {
                    Some(tag) => format!(" with unknown type '{}'", tag),
                    None => String::new(),
                }
            ))
        })
    }

    /// A node of a null pointer carries at most a type tag, plus the key
    /// attribute when it is the value node of a map entry.
    fn is_null_node(&self, id: NodeId) -> bool {
        let entry_key = match &self.entry_key {
            Some((entry, key)) if *entry == id => Some(key.as_str()),
            _ => None,
        };
        let node = self.document.node(id);
        node.children().is_empty()
            && node.text().is_none()
            && node
                .attributes()
                .keys()
                .all(|key| key == TYPE_ATTRIBUTE || Some(key.as_str()) == entry_key)
    }
}

/// Checks id uniqueness and returns the referenced ids no node defines.
fn scan_references(document: &Document) -> Result<Vec<String>, Error> {
    let mut ids = HashSet::new();
    let mut refs = Vec::new();
    for node in document.descendants(document.root()) {
        let id = document.attribute(node, ID_ATTRIBUTE);
        let reference = document.attribute(node, REF_ATTRIBUTE);
        if id.is_some() && reference.is_some() {
            return Err(Error::reference_resolving(format!(
                "node '{}' carries both an id and a reference",
                document.name(node)
            )));
        }
        if let Some(id) = id {
            if !ids.insert(id) {
                return Err(Error::duplicate_id(format!(
                    "reference id '{}' is defined more than once",
                    id
                )));
            }
        }
        if let Some(reference) = reference {
            refs.push(reference);
        }
    }
    let mut missing: Vec<String> = refs
        .into_iter()
        .filter(|reference| !ids.contains(reference))
        .map(str::to_string)
        .collect();
    missing.sort();
    missing.dedup();
    Ok(missing)
}
