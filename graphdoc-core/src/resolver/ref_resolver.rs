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

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};

use crate::arena::Arena;
use crate::document::NodeId;
use crate::error::Error;
use crate::field::Object;
use crate::types::Options;

/// Identity of a live value during one serialization pass.
///
/// The type is part of the identity because a struct and its first field
/// share an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    addr: usize,
    type_id: TypeId,
}

impl Address {
    pub fn of<T: Any>(value: &T) -> Self {
        Address {
            addr: value as *const T as *const () as usize,
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn of_object(object: &dyn Object) -> Self {
        let any = object.as_any();
        Address {
            addr: any as *const dyn Any as *const () as usize,
            type_id: any.type_id(),
        }
    }
}

/// A pointer node waiting for its target to be given an id.
#[derive(Clone, Copy, Debug)]
pub struct PendingReference {
    pub node: NodeId,
    pub slot: usize,
    /// Options in effect where the pointer was written; its target's
    /// content is written with the same options.
    pub options: Options,
}

/// Reference writer for tracking pointer identity during serialization.
///
/// RefWriter maps the address of every value written as a node to that node,
/// and every arena slot whose content was written to its node. Slots are
/// tracked separately since zero-sized values share one address. Pointer
/// nodes are queued until [`Serializer::write`](crate::serializer::Serializer::write)
/// resolves them. The queue is first-in first-out, so ids are assigned in the
/// order pointers were first met.
///
/// # Examples
///
/// ```rust
/// use graphdoc_core::document::Document;
/// use graphdoc_core::resolver::ref_resolver::{Address, RefWriter};
///
/// let mut doc = Document::default();
/// let node = doc.create_child(doc.root(), "i");
/// let value = 42i32;
///
/// let mut refs = RefWriter::new();
/// assert!(refs.record(Address::of(&value), node));
/// assert!(!refs.record(Address::of(&value), doc.root()));
/// assert_eq!(refs.node_for(Address::of(&value)), Some(node));
/// assert_eq!(refs.next_id(), "1");
/// ```
#[derive(Debug, Default)]
pub struct RefWriter {
    nodes: HashMap<Address, NodeId>,
    slots: HashMap<usize, NodeId>,
    pending: VecDeque<PendingReference>,
    last_id: u64,
}

impl RefWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `address` to `node` unless it already has a node. Returns whether
    /// the mapping was added.
    pub fn record(&mut self, address: Address, node: NodeId) -> bool {
        match self.nodes.entry(address) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(node);
                true
            }
        }
    }

    pub fn node_for(&self, address: Address) -> Option<NodeId> {
        self.nodes.get(&address).copied()
    }

    /// Maps arena `slot` to the node holding its content. First write wins.
    pub fn record_slot(&mut self, slot: usize, node: NodeId) {
        self.slots.entry(slot).or_insert(node);
    }

    pub fn node_for_slot(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(&slot).copied()
    }

    pub fn push_pending(&mut self, pending: PendingReference) {
        self.pending.push_back(pending);
    }

    pub fn pop_pending(&mut self) -> Option<PendingReference> {
        self.pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Next unused reference id.
    pub fn next_id(&mut self) -> String {
        self.last_id += 1;
        self.last_id.to_string()
    }
}

/// What a reference id resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdTarget {
    /// Arena slot of the value first read under the id.
    Object(usize),
    /// The value was freed; references to it read as null.
    Released,
}

/// Reference reader for resolving ids during deserialization.
///
/// Every id read is mapped to the arena slot of its value. References to ids
/// that are not known yet get a ticket from the arena; all references to the
/// same id share one ticket, which is settled when the id is registered.
///
/// # Examples
///
/// ```rust
/// use graphdoc_core::arena::Arena;
/// use graphdoc_core::resolver::ref_resolver::{IdTarget, RefReader};
///
/// let mut arena = Arena::new();
/// let mut refs = RefReader::new();
/// let ticket = refs.ticket_for("3", &mut arena);
/// assert_eq!(refs.ticket_for("3", &mut arena), ticket);
/// assert_eq!(refs.pending_ids(), vec!["3".to_string()]);
///
/// refs.register("3", 0, &mut arena).unwrap();
/// assert_eq!(refs.lookup("3"), Some(IdTarget::Object(0)));
/// assert!(refs.pending_ids().is_empty());
/// assert!(refs.register("3", 1, &mut arena).is_err());
/// ```
#[derive(Debug, Default)]
pub struct RefReader {
    targets: HashMap<String, IdTarget>,
    ids: HashMap<usize, String>,
    waiting: HashMap<String, usize>,
}

impl RefReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, id: &str) -> Option<IdTarget> {
        self.targets.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.targets.contains_key(id)
    }

    /// Records `slot` as the value of `id` and settles the ticket waiting on it.
    pub fn register(&mut self, id: &str, slot: usize, arena: &mut Arena) -> Result<(), Error> {
        if self.targets.contains_key(id) {
            return Err(Error::duplicate_id(format!(
                "reference id '{}' is defined more than once",
                id
            )));
        }
        self.targets.insert(id.to_string(), IdTarget::Object(slot));
        self.ids.insert(slot, id.to_string());
        if let Some(ticket) = self.waiting.remove(id) {
            arena.settle_ticket(ticket, slot);
        }
        Ok(())
    }

    /// Ticket every reference to the not yet known `id` shares.
    pub fn ticket_for(&mut self, id: &str, arena: &mut Arena) -> usize {
        *self
            .waiting
            .entry(id.to_string())
            .or_insert_with(|| arena.new_ticket())
    }

    /// Marks the id of `slot`, if any, as released.
    pub fn release(&mut self, slot: usize) {
        if let Some(id) = self.ids.get(&slot) {
            self.targets.insert(id.clone(), IdTarget::Released);
        }
    }

    /// Ids some reference is still waiting for, sorted.
    pub fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.waiting.keys().cloned().collect();
        ids.sort_by_key(|id| match id.parse::<u64>() {
            Ok(number) => (0, number, String::new()),
            Err(_) => (1, 0, id.clone()),
        });
        ids
    }
}
