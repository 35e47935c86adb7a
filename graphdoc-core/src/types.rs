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

/// Name of the document's root node.
pub const ROOT_NODE: &str = "GraphDocument";
/// Root attribute carrying the format version.
pub const VERSION_ATTRIBUTE: &str = "version";
/// Format version written by default and expected on read.
pub const FORMAT_VERSION: &str = "1.0";

/// Marks the first serialized occurrence of a pointer target.
pub const ID_ATTRIBUTE: &str = "id";
/// Marks a later occurrence of a pointer target.
pub const REF_ATTRIBUTE: &str = "ref";
/// Type tag of a polymorphic pointer target.
pub const TYPE_ATTRIBUTE: &str = "type";
/// Carries a primitive value inside its own node.
pub const VALUE_ATTRIBUTE: &str = "value";

/// Attribute keys owned by the engine itself.
pub const RESERVED_ATTRIBUTES: [&str; 3] = [ID_ATTRIBUTE, REF_ATTRIBUTE, TYPE_ATTRIBUTE];

pub const ITEM_NODE: &str = "item";
pub const KEY_NODE: &str = "key";
pub const VALUE_NODE: &str = "value";
pub const FIRST_NODE: &str = "first";
pub const SECOND_NODE: &str = "second";

#[inline(always)]
pub fn is_reserved_attribute(key: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&key)
}

/// How primitive values are laid out in the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Every value is a child node; primitives carry a `value` attribute.
    #[default]
    Nodes,
    /// Primitives are attributes of the enclosing node.
    Attributes,
}

/// Encoding options in effect for one serializer or deserializer call.
///
/// A serializer starts with the options of its [`Config`](crate::config::Config)
/// and only changes them for the duration of a `with_options` closure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Options {
    pub encoding: Encoding,
    /// Inline pointer targets instead of writing references.
    pub pointer_content: bool,
}

impl Options {
    pub fn new(encoding: Encoding, pointer_content: bool) -> Self {
        Options {
            encoding,
            pointer_content,
        }
    }

    #[inline(always)]
    pub fn is_attributes(&self) -> bool {
        self.encoding == Encoding::Attributes
    }

    #[inline(always)]
    pub fn is_pointer_content(&self) -> bool {
        self.pointer_content
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_pointer_content(mut self, pointer_content: bool) -> Self {
        self.pointer_content = pointer_content;
        self
    }
}

/// Whether a string must be stored as node text instead of an attribute.
#[inline(always)]
pub fn needs_text_node(value: &str) -> bool {
    value.contains('\n') || value.contains('\r')
}
