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

//! Arena owning every heap value reachable through pointers.
//!
//! Object graphs with shared and cyclic links are expressed with [`Ptr`]
//! fields instead of references. A `Ptr<T>` is a small `Copy` value that is
//! either null, a [`Handle`] into an [`Arena`], or a ticket. Tickets are
//! handed out by the deserializer for references whose target has not been
//! read yet; the arena records which slot each ticket resolves to once the
//! target shows up, so the pointer never has to be patched in place.
//!
//! `T` is the static pointee type and may be unsized, e.g. `Ptr<dyn Shape>`
//! for a polymorphic family.
//!
//! Two pointers designating the same value may hold different tickets or a
//! ticket and a slot, so `Ptr` has no `==`. Compare with [`Arena::same`] and
//! test for null with [`Arena::is_null`].
//!
//! ```rust
//! use graphdoc_core::arena::{Arena, Ptr};
//!
//! let mut arena = Arena::new();
//! let handle = arena.insert(-7i32);
//! let ptr: Ptr<i32> = handle.into();
//! assert_eq!(arena.deref(ptr), Some(&-7));
//! assert_eq!(arena.deref(Ptr::<i32>::null()), None);
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::field::Object;

enum Slot {
    /// Allocated but still being populated.
    Reserved,
    Occupied(Box<dyn Object>),
    Released,
}

/// Non-null address of a value in an [`Arena`].
pub struct Handle<T: ?Sized> {
    index: usize,
    marker: PhantomData<fn() -> *const T>,
}

impl<T: ?Sized> Handle<T> {
    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> Self {
        Handle {
            index,
            marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.index
    }

    /// Reinterprets the static pointee type, e.g. to store a concrete value
    /// behind a `Ptr<dyn Trait>`.
    #[inline(always)]
    pub fn cast<U: ?Sized>(self) -> Handle<U> {
        Handle::from_index(self.index)
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Handle<T> {}

impl<T: ?Sized> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: ?Sized> Eq for Handle<T> {}

impl<T: ?Sized> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    Null,
    Slot(usize),
    Ticket(usize),
}

/// Nullable pointer slot to an arena value of static type `T`.
pub struct Ptr<T: ?Sized> {
    target: Target,
    marker: PhantomData<fn() -> *const T>,
}

impl<T: ?Sized> Ptr<T> {
    #[inline(always)]
    pub fn null() -> Self {
        Ptr::from_target(Target::Null)
    }

    #[inline(always)]
    pub(crate) fn from_target(target: Target) -> Self {
        Ptr {
            target,
            marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn from_slot(index: usize) -> Self {
        Ptr::from_target(Target::Slot(index))
    }

    #[inline(always)]
    pub(crate) fn from_ticket(ticket: usize) -> Self {
        Ptr::from_target(Target::Ticket(ticket))
    }

    #[inline(always)]
    pub(crate) fn target(&self) -> Target {
        self.target
    }

    /// Whether the pointer was never set. Says nothing about whether it
    /// resolves; use [`Arena::is_null`] for that.
    #[inline(always)]
    pub fn is_unset(&self) -> bool {
        self.target == Target::Null
    }

    #[inline(always)]
    pub fn cast<U: ?Sized>(self) -> Ptr<U> {
        Ptr::from_target(self.target)
    }
}

impl<T: ?Sized> From<Handle<T>> for Ptr<T> {
    fn from(handle: Handle<T>) -> Self {
        Ptr::from_slot(handle.index)
    }
}

impl<T: ?Sized> Default for Ptr<T> {
    fn default() -> Self {
        Ptr::null()
    }
}

impl<T: ?Sized> Clone for Ptr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Ptr<T> {}

impl<T: ?Sized> fmt::Debug for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Target::Null => write!(f, "Ptr(null)"),
            Target::Slot(index) => write!(f, "Ptr({})", index),
            Target::Ticket(ticket) => write!(f, "Ptr(ticket {})", ticket),
        }
    }
}

/// Owner of all values addressed by [`Handle`]s and [`Ptr`]s.
///
/// Slots are never reused, so a handle to a released value stays dangling
/// forever instead of aliasing a newer value.
#[derive(Default)]
pub struct Arena {
    slots: Vec<Slot>,
    tickets: Vec<Option<usize>>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `value` into the arena.
    pub fn insert<T: Object>(&mut self, value: T) -> Handle<T> {
        Handle::from_index(self.insert_boxed(Box::new(value)))
    }

    pub(crate) fn insert_boxed(&mut self, object: Box<dyn Object>) -> usize {
        self.slots.push(Slot::Occupied(object));
        self.slots.len() - 1
    }

    pub(crate) fn reserve(&mut self) -> usize {
        self.slots.push(Slot::Reserved);
        self.slots.len() - 1
    }

    /// Stores `object` in a reserved slot or puts back a taken one.
    pub(crate) fn fill(&mut self, index: usize, object: Box<dyn Object>) {
        if let Some(slot) = self.slots.get_mut(index) {
            if matches!(slot, Slot::Reserved) {
                *slot = Slot::Occupied(object);
            }
        }
    }

    /// Takes the value out for in-place population; the slot stays reserved
    /// until [`Arena::fill`] puts it back.
    pub(crate) fn take(&mut self, index: usize) -> Option<Box<dyn Object>> {
        let slot = self.slots.get_mut(index)?;
        match std::mem::replace(slot, Slot::Reserved) {
            Slot::Occupied(object) => Some(object),
            other => {
                *slot = other;
                None
            }
        }
    }

    pub(crate) fn release_index(&mut self, index: usize) -> Option<Box<dyn Object>> {
        let slot = self.slots.get_mut(index)?;
        match std::mem::replace(slot, Slot::Released) {
            Slot::Occupied(object) => Some(object),
            _ => None,
        }
    }

    pub(crate) fn new_ticket(&mut self) -> usize {
        self.tickets.push(None);
        self.tickets.len() - 1
    }

    pub(crate) fn settle_ticket(&mut self, ticket: usize, index: usize) {
        if let Some(entry) = self.tickets.get_mut(ticket) {
            *entry = Some(index);
        }
    }

    /// Slot a pointer designates, whatever the slot's state.
    pub(crate) fn slot_of(&self, target: Target) -> Option<usize> {
        match target {
            Target::Null => None,
            Target::Slot(index) => Some(index),
            Target::Ticket(ticket) => self.tickets.get(ticket).copied().flatten(),
        }
    }

    pub(crate) fn object_at(&self, index: usize) -> Option<&dyn Object> {
        match self.slots.get(index) {
            Some(Slot::Occupied(object)) => Some(object.as_ref()),
            _ => None,
        }
    }

    /// Live slot a pointer designates.
    pub(crate) fn live_slot<T: ?Sized>(&self, ptr: &Ptr<T>) -> Option<usize> {
        self.slot_of(ptr.target())
            .filter(|index| self.object_at(*index).is_some())
    }

    /// Resolves a pointer to the handle of a live value.
    ///
    /// Returns `None` for null pointers, pointers whose reference was never
    /// resolved and pointers to released values.
    pub fn resolve<T: ?Sized>(&self, ptr: Ptr<T>) -> Option<Handle<T>> {
        self.live_slot(&ptr).map(Handle::from_index)
    }

    /// Whether `ptr` resolves to nothing: it is unset, its reference never
    /// resolved or its value was released.
    pub fn is_null<T: ?Sized>(&self, ptr: Ptr<T>) -> bool {
        self.live_slot(&ptr).is_none()
    }

    /// Whether two pointers resolve to the same live value.
    pub fn same<T: ?Sized, U: ?Sized>(&self, a: Ptr<T>, b: Ptr<U>) -> bool {
        match (self.live_slot(&a), self.live_slot(&b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn object<T: ?Sized>(&self, handle: Handle<T>) -> Option<&dyn Object> {
        self.object_at(handle.index)
    }

    pub fn object_mut<T: ?Sized>(&mut self, handle: Handle<T>) -> Option<&mut dyn Object> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(object)) => Some(object.as_mut()),
            _ => None,
        }
    }

    pub fn get<T: Any>(&self, handle: Handle<T>) -> Option<&T> {
        self.downcast_ref(handle)
    }

    pub fn get_mut<T: Any>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.object_mut(handle)?.as_any_mut().downcast_mut::<T>()
    }

    /// Value behind `handle` as concrete type `U`, whatever its static type.
    pub fn downcast_ref<U: Any, T: ?Sized>(&self, handle: Handle<T>) -> Option<&U> {
        self.object(handle)?.as_any().downcast_ref::<U>()
    }

    /// Follows a pointer with a concrete static type.
    pub fn deref<T: Any>(&self, ptr: Ptr<T>) -> Option<&T> {
        self.get(self.resolve(ptr)?)
    }

    /// Drops the value behind `handle` and returns it. Pointers to it resolve
    /// to `None` from now on.
    pub fn release<T: ?Sized>(&mut self, handle: Handle<T>) -> Option<Box<dyn Object>> {
        self.release_index(handle.index)
    }

    pub fn is_live<T: ?Sized>(&self, handle: Handle<T>) -> bool {
        self.object_at(handle.index).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("slots", &self.slots.len())
            .field("live", &self.len())
            .field("tickets", &self.tickets.len())
            .finish()
    }
}
