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

//! Text form of a [`Document`].
//!
//! Every node becomes a JSON object:
//!
//! ```json
//! { "name": "ip", "attributes": { "id": "1", "value": "-7" } }
//! ```
//!
//! `attributes`, `text` and `children` are omitted when empty. Attribute order
//! is preserved through `IndexMap`. Pointer chains nest as deep as they are
//! long, so neither direction is bounded by a recursion limit: rendering
//! grows the stack on demand and parsing runs on `serde_stacker`.

use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use super::{Document, NodeId};
use crate::error::Error;

const RED_ZONE: usize = 64 * 1024;
const STACK_SIZE: usize = 1024 * 1024;

/// Borrowed node, rendered straight from the document.
struct NodeView<'a> {
    document: &'a Document,
    id: NodeId,
}

struct ChildrenView<'a> {
    document: &'a Document,
    ids: &'a [NodeId],
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(RED_ZONE, STACK_SIZE, || {
            let node = self.document.node(self.id);
            let len = 1
                + usize::from(!node.attributes().is_empty())
                + usize::from(node.text().is_some())
                + usize::from(!node.children().is_empty());
            let mut state = serializer.serialize_struct("Node", len)?;
            state.serialize_field("name", node.name())?;
            if !node.attributes().is_empty() {
                state.serialize_field("attributes", node.attributes())?;
            }
            if let Some(text) = node.text() {
                state.serialize_field("text", text)?;
            }
            if !node.children().is_empty() {
                state.serialize_field(
                    "children",
                    &ChildrenView {
                        document: self.document,
                        ids: node.children(),
                    },
                )?;
            }
            state.end()
        })
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter().map(|id| NodeView {
            document: self.document,
            id: *id,
        }))
    }
}

#[derive(Deserialize)]
struct NodeText {
    name: String,
    #[serde(default)]
    attributes: IndexMap<String, String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    children: Vec<NodeText>,
}

/// Renders `document` into `writer`.
pub fn write_document<W: Write>(document: &Document, writer: W, pretty: bool) -> Result<(), Error> {
    let view = NodeView {
        document,
        id: document.root(),
    };
    if pretty {
        serde_json::to_writer_pretty(writer, &view)?;
    } else {
        serde_json::to_writer(writer, &view)?;
    }
    Ok(())
}

pub fn render(document: &Document, pretty: bool) -> Result<String, Error> {
    let view = NodeView {
        document,
        id: document.root(),
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    Ok(rendered)
}

/// Parses a document from `reader`.
pub fn read_document<R: Read>(reader: R) -> Result<Document, Error> {
    let mut json = serde_json::Deserializer::from_reader(reader);
    let text = parse_unbounded(&mut json)?;
    Ok(build(text))
}

pub fn parse(source: &str) -> Result<Document, Error> {
    let mut json = serde_json::Deserializer::from_str(source);
    let text = parse_unbounded(&mut json)?;
    Ok(build(text))
}

fn parse_unbounded<'de, R: serde_json::de::Read<'de>>(
    json: &mut serde_json::Deserializer<R>,
) -> Result<NodeText, Error> {
    json.disable_recursion_limit();
    let text = NodeText::deserialize(serde_stacker::Deserializer::new(&mut *json))?;
    json.end()?;
    Ok(text)
}

/// Builds the tree without recursion; nodes are created in document order.
fn build(text: NodeText) -> Document {
    let mut document = Document::new(&text.name);
    let root = document.root();
    let mut stack = Vec::new();
    fill(&mut document, root, text, &mut stack);
    while let Some((parent, child)) = stack.pop() {
        let id = document.create_child(parent, &child.name);
        fill(&mut document, id, child, &mut stack);
    }
    document
}

fn fill(document: &mut Document, id: NodeId, text: NodeText, stack: &mut Vec<(NodeId, NodeText)>) {
    for (key, value) in text.attributes {
        document.set_attribute(id, &key, value);
    }
    if let Some(content) = text.text {
        document.set_text(id, content);
    }
    stack.extend(text.children.into_iter().rev().map(|child| (id, child)));
}
