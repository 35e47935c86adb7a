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

use graphdoc::{Arena, Encoding, GraphDoc, Handle, Object, Ptr, Serializable};
use pretty_assertions::assert_eq;
use test_helpers::{init_logger, top};

#[test]
fn test_pointer_to_negative_integer() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let ip: Ptr<i32> = arena.insert(-7i32).into();

    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("ip", &ip).unwrap();
    let document = ser.into_document().unwrap();
    let node = top(&document, "ip");
    assert_eq!(document.attribute(node, "id"), Some("1"));
    assert_eq!(document.attribute(node, "value"), Some("-7"));

    let mut de = graphdoc.deserializer(&mut arena);
    de.read_document(document).unwrap();
    let mut back = Ptr::<i32>::null();
    de.deserialize("ip", &mut back).unwrap();
    assert!(de.finish().unwrap().is_empty());

    assert!(!arena.same(back, ip));
    assert_eq!(arena.deref(back), Some(&-7));
    assert_eq!(arena.len(), 2);
}

fn write_var_and_ptr(graphdoc: &GraphDoc, arena: &Arena, handle: Handle<i32>, ptr_first: bool) -> String {
    let var = arena.get(handle).unwrap();
    let ptr = Ptr::from(handle);
    let mut ser = graphdoc.serializer(arena);
    if ptr_first {
        ser.serialize("ptr", &ptr).unwrap();
        ser.serialize("var", var).unwrap();
    } else {
        ser.serialize("var", var).unwrap();
        ser.serialize("ptr", &ptr).unwrap();
    }
    ser.write_to_string().unwrap()
}

#[test]
fn test_pointer_to_embedded_value_in_any_order() {
    init_logger();
    let graphdoc = GraphDoc::default();
    for ptr_written_first in [true, false] {
        for ptr_read_first in [true, false] {
            let mut source = Arena::new();
            let handle = source.insert(42i32);
            let text = write_var_and_ptr(&graphdoc, &source, handle, ptr_written_first);

            let mut arena = Arena::new();
            let mut de = graphdoc.deserializer(&mut arena);
            de.read_str(&text).unwrap();
            let mut var = 0i32;
            let mut ptr = Ptr::<i32>::null();
            if ptr_read_first {
                de.deserialize("ptr", &mut ptr).unwrap();
                de.deserialize("var", &mut var).unwrap();
            } else {
                de.deserialize("var", &mut var).unwrap();
                de.deserialize("ptr", &mut ptr).unwrap();
            }
            assert!(de.finish().unwrap().is_empty());

            assert_eq!(var, 42);
            assert_eq!(arena.deref(ptr), Some(&42));
            assert_eq!(arena.len(), 1);
        }
    }
}

#[test]
fn test_embedded_value_gets_the_id() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let handle = arena.insert(42i32);
    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("ptr", &Ptr::from(handle)).unwrap();
    ser.serialize("var", arena.get(handle).unwrap()).unwrap();
    let document = ser.into_document().unwrap();

    let ptr = top(&document, "ptr");
    let var = top(&document, "var");
    assert_eq!(document.attribute(var, "id"), Some("1"));
    assert_eq!(document.attribute(var, "value"), Some("42"));
    assert_eq!(document.attribute(ptr, "ref"), Some("1"));
    assert_eq!(document.attribute(ptr, "value"), None);
}

#[derive(Serializable, Default)]
struct Shared {
    left: Ptr<String>,
    right: Ptr<String>,
    other: Ptr<String>,
}

#[test]
fn test_shared_target_keeps_identity() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let text: Ptr<String> = arena.insert("shared".to_string()).into();
    let other: Ptr<String> = arena.insert("other".to_string()).into();
    let value = Shared {
        left: text,
        right: text,
        other,
    };

    let copy = graphdoc.clone_value(&mut arena, &value).unwrap();
    assert!(arena.same(copy.left, copy.right));
    assert!(!arena.same(copy.left, copy.other));
    assert!(!arena.same(copy.left, value.left));
    assert_eq!(arena.deref(copy.right).map(String::as_str), Some("shared"));
    assert_eq!(arena.deref(copy.other).map(String::as_str), Some("other"));
    assert_eq!(arena.len(), 4);
}

#[derive(Serializable, Default, Debug)]
struct RingNode {
    name: String,
    next: Ptr<RingNode>,
}

#[test]
fn test_three_node_ring() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let a = arena.insert(RingNode {
        name: "a".to_string(),
        next: Ptr::null(),
    });
    let b = arena.insert(RingNode {
        name: "b".to_string(),
        next: Ptr::null(),
    });
    let c = arena.insert(RingNode {
        name: "c".to_string(),
        next: a.into(),
    });
    arena.get_mut(a).unwrap().next = b.into();
    arena.get_mut(b).unwrap().next = c.into();

    let start = graphdoc.clone_value(&mut arena, &Ptr::from(a)).unwrap();
    let mut names = Vec::new();
    let mut current = start;
    for _ in 0..3 {
        let node = arena.deref(current).unwrap();
        names.push(node.name.clone());
        current = node.next;
    }
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(arena.same(current, start));
    assert!(!arena.same(start, Ptr::from(a)));
    assert_eq!(arena.len(), 6);
}

#[test]
fn test_self_reference() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let node = arena.insert(RingNode {
        name: "self".to_string(),
        next: Ptr::null(),
    });
    arena.get_mut(node).unwrap().next = node.into();

    let text = graphdoc.to_text(&arena, &Ptr::from(node)).unwrap();
    let mut back = Ptr::<RingNode>::null();
    graphdoc.from_text(&mut arena, &text, &mut back).unwrap();
    let copy = arena.deref(back).unwrap();
    assert_eq!(copy.name, "self");
    assert!(arena.same(copy.next, back));
}

#[test]
fn test_null_and_dangling_pointers() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let gone = arena.insert(1u8);
    assert!(arena.release(gone).is_some());

    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("null", &Ptr::<u8>::null()).unwrap();
    ser.serialize("dangling", &Ptr::from(gone)).unwrap();
    let document = ser.into_document().unwrap();
    assert!(document.node(top(&document, "null")).is_empty());
    assert!(document.node(top(&document, "dangling")).is_empty());

    let mut null: Ptr<u8> = arena.insert(2u8).into();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_document(document).unwrap();
    let mut dangling = Ptr::<u8>::null();
    de.deserialize("null", &mut null).unwrap();
    de.deserialize("dangling", &mut dangling).unwrap();
    assert!(null.is_unset());
    assert!(dangling.is_unset());
    assert!(de.arena().is_null(dangling));
}

#[test]
fn test_pointer_to_pointer() {
    let graphdoc = GraphDoc::default();
    let mut arena = Arena::new();
    let inner = arena.insert(5i32);
    let outer = arena.insert(Ptr::from(inner));

    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("outer", &Ptr::from(outer)).unwrap();
    ser.serialize("inner", &Ptr::from(inner)).unwrap();
    let text = ser.write_to_string().unwrap();

    let mut copy = Arena::new();
    let mut de = graphdoc.deserializer(&mut copy);
    de.read_str(&text).unwrap();
    let mut outer_back = Ptr::<Ptr<i32>>::null();
    let mut inner_back = Ptr::<i32>::null();
    de.deserialize("outer", &mut outer_back).unwrap();
    de.deserialize("inner", &mut inner_back).unwrap();

    let through_outer = *copy.deref(outer_back).unwrap();
    assert!(copy.same(through_outer, inner_back));
    assert_eq!(copy.deref(inner_back), Some(&5));
}

#[derive(Serializable, Default)]
struct Holder {
    label: String,
    item: Ptr<i32>,
}

#[test]
fn test_embedded_composite_target() {
    let graphdoc = GraphDoc::default();
    let mut source = Arena::new();
    let item = source.insert(9i32);
    let holder = source.insert(Holder {
        label: "box".to_string(),
        item: item.into(),
    });

    let mut ser = graphdoc.serializer(&source);
    ser.serialize("copy", source.get(holder).unwrap()).unwrap();
    ser.serialize("ptr", &Ptr::from(holder)).unwrap();
    let text = ser.write_to_string().unwrap();

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_str(&text).unwrap();
    let mut local = Holder::default();
    let mut ptr = Ptr::<Holder>::null();
    de.deserialize("copy", &mut local).unwrap();
    de.deserialize("ptr", &mut ptr).unwrap();
    assert!(de.finish().unwrap().is_empty());

    let target = arena.deref(ptr).unwrap();
    assert_eq!(local.label, "box");
    assert_eq!(target.label, "box");
    assert!(arena.same(local.item, target.item));
    assert_eq!(arena.deref(local.item), Some(&9));
    assert_eq!(arena.len(), 2);
}

#[test]
fn test_free_pointer() {
    let graphdoc = GraphDoc::default();
    let mut source = Arena::new();
    let target: Ptr<String> = source.insert("shared".to_string()).into();
    let mut ser = graphdoc.serializer(&source);
    ser.serialize("a", &target).unwrap();
    ser.serialize("b", &target).unwrap();
    let text = ser.write_to_string().unwrap();

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_str(&text).unwrap();
    let mut a = Ptr::<String>::null();
    let mut b = Ptr::<String>::null();
    de.deserialize("a", &mut a).unwrap();
    let handle = de.arena().resolve(a).unwrap();
    let freed = de.free_pointer(handle).unwrap();
    assert_eq!(
        freed.as_any().downcast_ref::<String>().map(String::as_str),
        Some("shared")
    );
    de.deserialize("b", &mut b).unwrap();
    assert!(de.arena().is_null(b));
    assert!(de.arena().resolve(a).is_none());
}

#[test]
fn test_finish_reports_waiting_references() {
    let graphdoc = GraphDoc::default();
    let mut source = Arena::new();
    let target: Ptr<u32> = source.insert(3u32).into();
    let mut ser = graphdoc.serializer(&source);
    ser.serialize("a", &target).unwrap();
    ser.serialize("b", &target).unwrap();
    let text = ser.write_to_string().unwrap();

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_str(&text).unwrap();
    let mut b = Ptr::<u32>::null();
    de.deserialize("b", &mut b).unwrap();
    assert!(!b.is_unset());
    assert!(de.arena().is_null(b));
    assert_eq!(de.finish().unwrap(), vec!["1".to_string()]);
}

#[test]
fn test_reference_read_before_its_id() {
    let graphdoc = GraphDoc::default();
    let mut source = Arena::new();
    let target: Ptr<String> = source.insert("shared".to_string()).into();
    let mut ser = graphdoc.serializer(&source);
    ser.serialize("a", &target).unwrap();
    ser.serialize("b", &target).unwrap();
    let document = ser.into_document().unwrap();
    assert_eq!(document.attribute(top(&document, "a"), "id"), Some("1"));
    assert_eq!(document.attribute(top(&document, "b"), "ref"), Some("1"));

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_document(document).unwrap();
    let mut a = Ptr::<String>::null();
    let mut b = Ptr::<String>::null();
    de.deserialize("b", &mut b).unwrap();
    assert!(de.arena().is_null(b));
    de.deserialize("a", &mut a).unwrap();
    assert!(de.finish().unwrap().is_empty());

    assert!(!arena.is_null(b));
    assert!(arena.same(a, b));
    assert_eq!(arena.deref(b).map(String::as_str), Some("shared"));
    assert_eq!(arena.len(), 1);
}

#[derive(Serializable, Default)]
struct Neighbour {
    name: String,
    prev: Ptr<Neighbour>,
    next: Ptr<Neighbour>,
}

const RING: [&str; 3] = ["a", "b", "c"];

#[test]
fn test_doubly_linked_ring() {
    for graphdoc in [
        GraphDoc::default(),
        GraphDoc::default().encoding(Encoding::Attributes),
    ] {
        let mut arena = Arena::new();
        let handles: Vec<Handle<Neighbour>> = RING
            .iter()
            .map(|name| {
                arena.insert(Neighbour {
                    name: name.to_string(),
                    ..Neighbour::default()
                })
            })
            .collect();
        for (index, handle) in handles.iter().enumerate() {
            let node = arena.get_mut(*handle).unwrap();
            node.next = handles[(index + 1) % 3].into();
            node.prev = handles[(index + 2) % 3].into();
        }

        let mut ser = graphdoc.serializer(&arena);
        for (key, handle) in RING.iter().zip(&handles) {
            ser.serialize(key, &Ptr::from(*handle)).unwrap();
        }
        let text = ser.write_to_string().unwrap();

        let mut copy = Arena::new();
        let mut de = graphdoc.deserializer(&mut copy);
        de.read_str(&text).unwrap();
        let mut back = [Ptr::<Neighbour>::null(); 3];
        for index in [2, 0, 1] {
            de.deserialize(RING[index], &mut back[index]).unwrap();
        }
        assert!(de.finish().unwrap().is_empty());
        assert!(de.warnings().is_empty());

        for index in 0..3 {
            let node = copy.deref(back[index]).unwrap();
            assert_eq!(node.name, RING[index]);
            assert!(copy.same(node.next, back[(index + 1) % 3]));
            assert!(copy.same(node.prev, back[(index + 2) % 3]));
        }
        assert_eq!(copy.len(), 3);
    }
}

#[derive(Serializable, Default)]
struct Link {
    label: String,
    next: Ptr<Link>,
}

#[test]
fn test_long_chain_round_trip() {
    for graphdoc in [
        GraphDoc::default().pretty(false),
        GraphDoc::default().encoding(Encoding::Attributes).pretty(false),
    ] {
        let mut arena = Arena::new();
        let mut head = Ptr::<Link>::null();
        for index in (0..1000).rev() {
            head = arena
                .insert(Link {
                    label: format!("link {}", index),
                    next: head,
                })
                .into();
        }
        let text = graphdoc.to_text(&arena, &head).unwrap();

        let mut copy = Arena::new();
        let mut back = Ptr::<Link>::null();
        graphdoc.from_text(&mut copy, &text, &mut back).unwrap();

        let mut count = 0;
        let mut current = back;
        while let Some(link) = copy.deref(current) {
            assert_eq!(link.label, format!("link {}", count));
            count += 1;
            current = link.next;
        }
        assert_eq!(count, 1000);
        assert!(current.is_unset());
        assert_eq!(copy.len(), 1000);
    }
}
