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

#![allow(dead_code)]

use graphdoc::{Arena, Deserializer, Document, Field, GraphDoc};
use graphdoc_core::document::text;

/// Routes `log` output of the engine through the test harness.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Round trip of a pointer-free value through its text form.
pub fn roundtrip<T: Field>(graphdoc: &GraphDoc, value: &T) -> T {
    let mut arena = Arena::new();
    graphdoc.clone_value(&mut arena, value).unwrap()
}

/// Compact text of `document`, for whole-document comparisons.
pub fn compact(document: &Document) -> String {
    text::render(document, false).unwrap()
}

/// Deserializer over `source`, already read.
pub fn reader<'a>(graphdoc: &'a GraphDoc, arena: &'a mut Arena, source: &str) -> Deserializer<'a> {
    let mut de = graphdoc.deserializer(arena);
    de.read_str(source).unwrap();
    de
}

/// Child `name` of the document root.
pub fn top(document: &Document, name: &str) -> graphdoc_core::NodeId {
    document.first_child_named(document.root(), name).unwrap()
}
