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

//! Polymorphic type registry.
//!
//! A [`TypeRegistry`] is an ordered chain of [`Factory`] implementations. The
//! serializer asks it for the type tag of a pointer target, the deserializer
//! asks it for a fresh instance of a tag. Factories are consulted in
//! registration order and the first answer wins.

use std::any::TypeId;

use crate::error::Error;
use crate::field::{Field, Object};

/// Maps runtime types to stable tags and back to fresh instances.
pub trait Factory {
    /// Tag for the runtime type of `object`, or `None` if unknown to this factory.
    fn type_tag(&self, object: &dyn Object) -> Option<&str>;

    /// Default-constructed instance for `tag`, or `None` if unknown to this factory.
    fn create(&self, tag: &str) -> Option<Box<dyn Object>>;
}

type ConstructorFn = fn() -> Box<dyn Object>;

fn construct<T: Field>() -> Box<dyn Object> {
    Box::new(T::default())
}

#[derive(Clone, Debug)]
struct FactoryEntry {
    type_id: TypeId,
    tag: String,
    constructor: ConstructorFn,
}

/// Stock factory: an ordered list of `(type, tag, constructor)` entries.
///
/// ```rust
/// use graphdoc_core::resolver::type_resolver::{Factory, TypeFactory};
///
/// let mut factory = TypeFactory::new();
/// factory.register::<i64>("Long").unwrap();
/// let object = factory.create("Long").unwrap();
/// assert_eq!(factory.type_tag(object.as_ref()), Some("Long"));
/// assert!(factory.create("Short").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeFactory {
    entries: Vec<FactoryEntry>,
}

impl TypeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `tag`. Each type and each tag may appear once.
    pub fn register<T: Field>(&mut self, tag: impl Into<String>) -> Result<(), Error> {
        let tag = tag.into();
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.tag == tag || entry.type_id == type_id)
        {
            return Err(Error::invalid_operation(format!(
                "cannot register {} as '{}': '{}' is already registered",
                std::any::type_name::<T>(),
                tag,
                entry.tag
            )));
        }
        self.entries.push(FactoryEntry {
            type_id,
            tag,
            constructor: construct::<T>,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Factory for TypeFactory {
    fn type_tag(&self, object: &dyn Object) -> Option<&str> {
        let type_id = object.as_any().type_id();
        self.entries
            .iter()
            .find(|entry| entry.type_id == type_id)
            .map(|entry| entry.tag.as_str())
    }

    fn create(&self, tag: &str) -> Option<Box<dyn Object>> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| (entry.constructor)())
    }
}

/// Ordered chain of factories.
#[derive(Default)]
pub struct TypeRegistry {
    factories: Vec<Box<dyn Factory>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `factory` to the chain.
    pub fn register_factory<F: Factory + 'static>(&mut self, factory: F) {
        self.factories.push(Box::new(factory));
    }

    /// Appends a single-entry factory producing `T` for `tag`.
    pub fn register<T: Field>(&mut self, tag: impl Into<String>) -> Result<(), Error> {
        let tag = tag.into();
        if self.create_instance(&tag).is_some() {
            return Err(Error::invalid_operation(format!(
                "type tag '{}' is already registered",
                tag
            )));
        }
        let mut factory = TypeFactory::new();
        factory.register::<T>(tag)?;
        self.register_factory(factory);
        Ok(())
    }

    /// First tag any factory knows for the runtime type of `object`.
    ///
    /// `None` means the static type of the pointer is exact and no tag needs
    /// to be written.
    pub fn type_tag_for(&self, object: &dyn Object) -> Option<&str> {
        self.factories
            .iter()
            .find_map(|factory| factory.type_tag(object))
    }

    /// Instance from the first factory recognizing `tag`.
    pub fn create_instance(&self, tag: &str) -> Option<Box<dyn Object>> {
        self.factories
            .iter()
            .find_map(|factory| factory.create(tag))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
