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

//! Hierarchical document tree.
//!
//! A [`Document`] is an ordered tree of named nodes. Each node owns an ordered
//! attribute map, an ordered list of children and optional literal text.
//! Nodes live in one vector and are addressed by [`NodeId`], so the
//! serializer can hold on to a node (for example a pointer node waiting for
//! its reference id) while the tree keeps growing.

pub mod text;

use std::fmt;

use indexmap::IndexMap;

use crate::error::Error;
use crate::types::{ROOT_NODE, VERSION_ATTRIBUTE};

/// Identity of a node inside one [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    name: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(name: &str) -> Self {
        Node {
            name: name.to_string(),
            ..Node::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// A node without attributes, text and children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.text.is_none() && self.children.is_empty()
    }
}

/// An ordered tree of named nodes with a single root.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(ROOT_NODE)
    }
}

impl Document {
    /// Creates a document consisting of a root node named `root_name`.
    pub fn new(root_name: &str) -> Self {
        Document {
            nodes: vec![Node::new(root_name)],
            root: NodeId(0),
        }
    }

    /// Creates a graph document root stamped with `version`.
    pub fn with_version(version: &str) -> Self {
        let mut document = Document::new(ROOT_NODE);
        let root = document.root();
        document.set_attribute(root, VERSION_ATTRIBUTE, version);
        document
    }

    #[inline(always)]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].is_empty()
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline(always)]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Creates a detached node; link it with [`Document::append`].
    pub fn create(&mut self, name: &str) -> NodeId {
        self.nodes.push(Node::new(name));
        NodeId(self.nodes.len() - 1)
    }

    /// Links a detached node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if self.node(child).parent.is_some() || child == self.root {
            return Err(Error::invalid_operation(format!(
                "node {} is already linked into the document",
                child
            )));
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        Ok(())
    }

    /// Creates a node and links it as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let mut node = Node::new(name);
        node.parent = Some(parent);
        self.nodes.push(node);
        let child = NodeId(self.nodes.len() - 1);
        self.node_mut(parent).children.push(child);
        child
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id).attribute(key)
    }

    pub fn has_attribute(&self, id: NodeId, key: &str) -> bool {
        self.node(id).attributes.contains_key(key)
    }

    /// Sets an attribute, keeping its position if it already exists.
    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        self.node_mut(id)
            .attributes
            .insert(key.to_string(), value.into());
    }

    /// Sets an attribute and moves it in front of all others.
    pub fn set_first_attribute(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        let attributes = &mut self.node_mut(id).attributes;
        attributes.shift_remove(key);
        attributes.shift_insert(0, key.to_string(), value.into());
    }

    pub fn remove_attribute(&mut self, id: NodeId, key: &str) -> Option<String> {
        self.node_mut(id).attributes.shift_remove(key)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text()
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.node_mut(id).text = Some(text.into());
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Children of `id` named `name`, in document order.
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(move |child| self.node(*child).name == name)
    }

    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children_named(id, name).next()
    }

    /// Every node of the subtree rooted at `id`, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    /// Renames a node in place, used by document processors.
    pub fn rename(&mut self, id: NodeId, name: &str) {
        self.node_mut(id).name = name.to_string();
    }
}

/// Hook run by the deserializer on a freshly parsed document.
///
/// Processors upgrade documents written by older layouts before any value is
/// read, for example by renaming nodes or filling in attributes.
pub trait DocumentProcessor {
    fn process(&mut self, document: &mut Document) -> Result<(), Error>;
}

impl<F> DocumentProcessor for F
where
    F: FnMut(&mut Document) -> Result<(), Error>,
{
    fn process(&mut self, document: &mut Document) -> Result<(), Error> {
        self(document)
    }
}
