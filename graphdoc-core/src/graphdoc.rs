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

use crate::arena::Arena;
use crate::config::Config;
use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::Field;
use crate::resolver::type_resolver::{Factory, TypeRegistry};
use crate::serializer::Serializer;
use crate::types::Encoding;

/// Key under which [`GraphDoc::to_text`] stores its value.
const VALUE_KEY: &str = "value";

/// Entry point of the engine: configuration plus the type registry.
///
/// `GraphDoc` is configured once with chained setters and then hands out
/// serializers and deserializers that share its settings, so both sides of
/// a round trip agree on the layout.
///
/// # Examples
///
/// ```rust
/// use graphdoc_core::{Arena, Encoding, GraphDoc, Ptr};
///
/// let graphdoc = GraphDoc::default().encoding(Encoding::Attributes).pretty(false);
///
/// let mut arena = Arena::new();
/// let shared: Ptr<i64> = arena.insert(7i64).into();
/// let pair = (shared, shared);
///
/// let text = graphdoc.to_text(&arena, &pair).unwrap();
/// let mut copy = (Ptr::<i64>::null(), Ptr::<i64>::null());
/// graphdoc.from_text(&mut arena, &text, &mut copy).unwrap();
///
/// assert!(arena.same(copy.0, copy.1));
/// assert_eq!(arena.deref(copy.0), Some(&7));
/// ```
#[derive(Default)]
pub struct GraphDoc {
    config: Config,
    registry: TypeRegistry,
}

impl GraphDoc {
    /// Sets how primitive values are laid out.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Enables inlining of pointer targets.
    ///
    /// Pointers are then written like embedded values and read back into
    /// the values they already point to. Sets cannot be used in this mode.
    pub fn pointer_content(mut self, pointer_content: bool) -> Self {
        self.config.pointer_content = pointer_content;
        self
    }

    /// Makes references to ids missing from the document fail `read()`.
    pub fn strict_references(mut self, strict_references: bool) -> Self {
        self.config.strict_references = strict_references;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Sets the version written to and required from documents.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Registers `T` under `tag` for polymorphic pointers.
    pub fn register<T: Field>(&mut self, tag: impl Into<String>) -> Result<(), Error> {
        self.registry.register::<T>(tag)
    }

    /// Appends a factory to the chain consulted for type tags.
    pub fn register_factory<F: Factory + 'static>(&mut self, factory: F) {
        self.registry.register_factory(factory);
    }

    pub fn serializer<'a>(&'a self, arena: &'a Arena) -> Serializer<'a> {
        Serializer::new(arena, &self.registry, &self.config)
    }

    pub fn deserializer<'a>(&'a self, arena: &'a mut Arena) -> Deserializer<'a> {
        Deserializer::new(arena, &self.registry, &self.config)
    }

    /// Writes a document holding `value` alone.
    pub fn to_text<T: Field>(&self, arena: &Arena, value: &T) -> Result<String, Error> {
        let mut ser = self.serializer(arena);
        ser.serialize(VALUE_KEY, value)?;
        ser.write_to_string()
    }

    /// Reads a document written by [`GraphDoc::to_text`] into `value`.
    pub fn from_text<T: Field>(
        &self,
        arena: &mut Arena,
        source: &str,
        value: &mut T,
    ) -> Result<(), Error> {
        let mut de = self.deserializer(arena);
        de.read_str(source)?;
        de.deserialize(VALUE_KEY, value)?;
        de.finish()?;
        Ok(())
    }

    /// Deep copy of `value` through a document round trip. Pointer targets
    /// are copied into `arena` and keep their sharing among each other.
    pub fn clone_value<T: Field>(&self, arena: &mut Arena, value: &T) -> Result<T, Error> {
        let text = self.to_text(arena, value)?;
        let mut copy = T::default();
        self.from_text(arena, &text, &mut copy)?;
        Ok(copy)
    }
}
