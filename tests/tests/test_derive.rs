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

mod test_helpers;

use std::collections::BTreeMap;

use graphdoc::{Arena, Deserializer, Encoding, Error, GraphDoc, Ptr, Serializable, Serializer};
use pretty_assertions::assert_eq;
use test_helpers::{reader, roundtrip, top};

#[derive(Serializable, Default, Debug, PartialEq, Clone)]
struct Address {
    street: String,
    #[graphdoc(rename = "zip-code")]
    zip: u32,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Customer {
    name: String,
    address: Address,
    #[graphdoc(skip)]
    session: u64,
    #[graphdoc(default)]
    tags: Vec<String>,
    scores: BTreeMap<String, f32>,
}

fn customer() -> Customer {
    Customer {
        name: "Ada".to_string(),
        address: Address {
            street: "Main St. 1".to_string(),
            zip: 12345,
        },
        session: 77,
        tags: vec!["vip".to_string()],
        scores: [("math".to_string(), 9.5)].into_iter().collect(),
    }
}

#[test]
fn test_derived_struct_roundtrip() {
    for encoding in [Encoding::Nodes, Encoding::Attributes] {
        let graphdoc = GraphDoc::default().encoding(encoding);
        let back = roundtrip(&graphdoc, &customer());
        assert_eq!(back.session, 0);
        assert_eq!(
            back,
            Customer {
                session: 0,
                ..customer()
            }
        );
    }
}

#[test]
fn test_rename_and_skip_layout() {
    let graphdoc = GraphDoc::default().encoding(Encoding::Attributes);
    let arena = Arena::new();
    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("customer", &customer()).unwrap();
    let document = ser.into_document().unwrap();

    let node = top(&document, "customer");
    assert_eq!(document.attribute(node, "name"), Some("Ada"));
    assert_eq!(document.attribute(node, "session"), None);
    let address = document.first_child_named(node, "address").unwrap();
    assert_eq!(document.attribute(address, "zip-code"), Some("12345"));
    assert_eq!(document.attribute(address, "zip"), None);
}

#[test]
fn test_skipped_field_keeps_its_value() {
    let graphdoc = GraphDoc::default();
    let arena = Arena::new();
    let text = graphdoc.to_text(&arena, &customer()).unwrap();

    let mut arena = Arena::new();
    let mut back = Customer {
        session: 5,
        ..Customer::default()
    };
    graphdoc.from_text(&mut arena, &text, &mut back).unwrap();
    assert_eq!(back.session, 5);
    assert_eq!(back.name, "Ada");
}

#[test]
fn test_default_field_may_be_missing() {
    let graphdoc = GraphDoc::default().encoding(Encoding::Attributes);
    let source = concat!(
        r#"{"name":"GraphDocument","attributes":{"version":"1.0"},"children":["#,
        r#"{"name":"c","attributes":{"name":"Bo"},"children":["#,
        r#"{"name":"address","attributes":{"street":"Elm","zip-code":"1"}},"#,
        r#"{"name":"scores"}]}]}"#
    );
    let mut arena = Arena::new();
    let mut de = reader(&graphdoc, &mut arena, source);
    let mut back = Customer {
        tags: vec!["stale".to_string()],
        ..Customer::default()
    };
    de.deserialize("c", &mut back).unwrap();
    assert_eq!(back.name, "Bo");
    assert!(back.tags.is_empty());
    assert!(back.scores.is_empty());
}

#[test]
fn test_required_field_must_be_present() {
    let graphdoc = GraphDoc::default().encoding(Encoding::Attributes);
    let source = concat!(
        r#"{"name":"GraphDocument","attributes":{"version":"1.0"},"children":["#,
        r#"{"name":"c","attributes":{"name":"Bo"}}]}"#
    );
    let mut arena = Arena::new();
    let mut de = reader(&graphdoc, &mut arena, source);
    let mut back = Customer::default();
    assert!(matches!(
        de.deserialize("c", &mut back),
        Err(Error::NoSuchData(_))
    ));
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Wrapper<T> {
    inner: T,
    count: usize,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Marker;

#[test]
fn test_generic_and_unit_structs() {
    let graphdoc = GraphDoc::default();
    let wrapped = Wrapper {
        inner: Address {
            street: "Side".to_string(),
            zip: 9,
        },
        count: 2,
    };
    assert_eq!(roundtrip(&graphdoc, &wrapped), wrapped);

    let numbers = Wrapper {
        inner: vec![1i8, -1],
        count: 2,
    };
    assert_eq!(roundtrip(&graphdoc, &numbers), numbers);

    let nested = Wrapper {
        inner: Wrapper {
            inner: Marker,
            count: 0,
        },
        count: 1,
    };
    assert_eq!(roundtrip(&graphdoc, &nested), nested);
}

#[derive(Serializable, Default, Debug)]
struct Team {
    name: String,
    lead: Ptr<Address>,
    members: Vec<Ptr<Address>>,
}

#[test]
fn test_derived_struct_with_pointers() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let lead = arena.insert(Address {
        street: "Lead Lane".to_string(),
        zip: 1,
    });
    let other = arena.insert(Address {
        street: "Other Road".to_string(),
        zip: 2,
    });
    let team = Team {
        name: "core".to_string(),
        lead: lead.into(),
        members: vec![other.into(), lead.into()],
    };

    let copy = graphdoc.clone_value(&mut arena, &team).unwrap();
    assert_eq!(copy.name, "core");
    assert!(arena.same(copy.lead, copy.members[1]));
    assert!(!arena.same(copy.lead, team.lead));
    assert_eq!(
        arena.deref(copy.members[0]).map(|address| address.street.as_str()),
        Some("Other Road")
    );
}

#[derive(Debug, PartialEq)]
struct Volume {
    level: u8,
}

impl Default for Volume {
    fn default() -> Self {
        Volume { level: 50 }
    }
}

impl Serializable for Volume {
    fn serialize(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        ser.serialize_unless("level", &self.level, &50)
    }

    fn deserialize(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        de.deserialize_or("level", &mut self.level, 50)
    }
}

graphdoc::composite!(Volume);

#[test]
fn test_default_values_are_omitted() {
    let graphdoc = GraphDoc::default().encoding(Encoding::Attributes);
    let arena = Arena::new();
    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("quiet", &Volume { level: 10 }).unwrap();
    ser.serialize("normal", &Volume::default()).unwrap();
    let document = ser.into_document().unwrap();
    assert_eq!(document.attribute(top(&document, "quiet"), "level"), Some("10"));
    assert!(document.node(top(&document, "normal")).is_empty());

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_document(document).unwrap();
    let mut quiet = Volume::default();
    let mut normal = Volume { level: 99 };
    de.deserialize("quiet", &mut quiet).unwrap();
    de.deserialize("normal", &mut normal).unwrap();
    assert_eq!(quiet, Volume { level: 10 });
    assert_eq!(normal, Volume::default());
}
