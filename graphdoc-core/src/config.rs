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

use crate::types::{Encoding, Options, FORMAT_VERSION};

/// Configuration for graph serialization.
///
/// This struct holds all the options that control how documents are written
/// and read. It is owned by the [`GraphDoc`](crate::graphdoc::GraphDoc)
/// instance and borrowed by every `Serializer`/`Deserializer` it creates, so
/// both sides of a round trip agree on the layout.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether primitives are written as attributes or as child nodes.
    pub encoding: Encoding,
    /// Whether pointer targets are inlined instead of written by reference.
    pub pointer_content: bool,
    /// Version stamped on the root node and required on read.
    pub version: String,
    /// Whether references to ids that never occur fail `read()`.
    /// When disabled they are only logged and leave their pointers null.
    pub strict_references: bool,
    /// Whether the document text is indented.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            encoding: Encoding::Nodes,
            pointer_content: false,
            version: FORMAT_VERSION.to_string(),
            strict_references: false,
            pretty: true,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primitive encoding.
    #[inline(always)]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Check if attribute encoding is enabled.
    #[inline(always)]
    pub fn is_attributes(&self) -> bool {
        self.encoding == Encoding::Attributes
    }

    /// Check if pointer-content mode is enabled.
    #[inline(always)]
    pub fn is_pointer_content(&self) -> bool {
        self.pointer_content
    }

    /// Get the document format version.
    #[inline(always)]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Check if dangling references are fatal.
    #[inline(always)]
    pub fn is_strict_references(&self) -> bool {
        self.strict_references
    }

    /// Check if the rendered document is indented.
    #[inline(always)]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// The options a fresh serializer or deserializer starts with.
    #[inline(always)]
    pub fn options(&self) -> Options {
        Options::new(self.encoding, self.pointer_content)
    }
}
