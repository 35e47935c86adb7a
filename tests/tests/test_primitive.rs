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

use graphdoc::{
    composite, Arena, Deserializer, Encoding, Error, GraphDoc, Serializable, Serializer,
};
use pretty_assertions::assert_eq;
use test_helpers::{init_logger, roundtrip, top};

#[derive(Serializable, Debug, Default, PartialEq)]
struct Primitives {
    flag: bool,
    letter: char,
    tiny: i8,
    small: i16,
    medium: i32,
    large: i64,
    size: isize,
    byte: u8,
    word: u16,
    dword: u32,
    qword: u64,
    usize_value: usize,
    single: f32,
    double: f64,
    text: String,
}

fn extremes() -> Primitives {
    Primitives {
        flag: true,
        letter: 'ß',
        tiny: i8::MIN,
        small: i16::MAX,
        medium: -7,
        large: i64::MIN,
        size: isize::MAX,
        byte: u8::MAX,
        word: 0,
        dword: u32::MAX,
        qword: u64::MAX,
        usize_value: 12345,
        single: 0.1,
        double: -1.0 / 3.0,
        text: "hello world".to_string(),
    }
}

#[test]
fn test_primitives_node_encoding() {
    init_logger();
    let graphdoc = GraphDoc::default();
    let value = extremes();
    assert_eq!(roundtrip(&graphdoc, &value), value);
}

#[test]
fn test_primitives_attribute_encoding() {
    let graphdoc = GraphDoc::default().encoding(Encoding::Attributes);
    let value = extremes();
    assert_eq!(roundtrip(&graphdoc, &value), value);
}

#[test]
fn test_primitive_layout() {
    let graphdoc = GraphDoc::default();
    let arena = Arena::new();
    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("answer", &42u8).unwrap();
    ser.serialize("pi", &3.5f64).unwrap();
    let document = ser.into_document().unwrap();

    let answer = top(&document, "answer");
    assert_eq!(document.attribute(answer, "value"), Some("42"));
    assert!(document.children(answer).is_empty());
    let pi = top(&document, "pi");
    assert_eq!(document.attribute(pi, "value"), Some("3.5"));
}

#[test]
fn test_strings() {
    for graphdoc in [
        GraphDoc::default(),
        GraphDoc::default().encoding(Encoding::Attributes),
    ] {
        for text in ["", " padded ", "two\nlines", "windows\r\nline", "ünïcödé ✓", "<tag attr=\"x\"/>"] {
            let text = text.to_string();
            assert_eq!(roundtrip(&graphdoc, &text), text);
        }
    }
}

#[test]
fn test_special_chars() {
    let graphdoc = GraphDoc::default();
    for letter in [' ', '\n', '"', '\u{1F600}'] {
        assert_eq!(roundtrip(&graphdoc, &letter), letter);
    }
}

#[test]
fn test_float_precision() {
    let graphdoc = GraphDoc::default().encoding(Encoding::Attributes);
    for value in [f64::MAX, f64::MIN_POSITIVE, 1e-300, 123456.789012345, -0.0] {
        let back = roundtrip(&graphdoc, &value);
        assert_eq!(back.to_bits(), value.to_bits());
    }
    assert_eq!(roundtrip(&graphdoc, &f32::EPSILON), f32::EPSILON);
}

#[derive(Default, Debug, PartialEq)]
struct Ordered {
    a: i32,
    b: String,
    c: bool,
}

impl Serializable for Ordered {
    fn serialize(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        ser.serialize("a", &self.a)?;
        ser.serialize("b", &self.b)?;
        ser.serialize("c", &self.c)
    }

    fn deserialize(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        de.deserialize("c", &mut self.c)?;
        de.deserialize("a", &mut self.a)?;
        de.deserialize("b", &mut self.b)
    }
}

composite!(Ordered);

#[test]
fn test_order_independence() {
    let value = Ordered {
        a: -3,
        b: "middle".to_string(),
        c: true,
    };
    for graphdoc in [
        GraphDoc::default(),
        GraphDoc::default().encoding(Encoding::Attributes),
    ] {
        assert_eq!(roundtrip(&graphdoc, &value), value);
    }
}

#[test]
fn test_top_level_keys_in_any_order() {
    let graphdoc = GraphDoc::default();
    let arena = Arena::new();
    let mut ser = graphdoc.serializer(&arena);
    ser.serialize("first", &1i64).unwrap();
    ser.serialize("second", &"two".to_string()).unwrap();
    ser.serialize("third", &3.0f32).unwrap();
    let text = ser.write_to_string().unwrap();

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_str(&text).unwrap();
    let (mut first, mut second, mut third) = (0i64, String::new(), 0f32);
    de.deserialize("third", &mut third).unwrap();
    de.deserialize("first", &mut first).unwrap();
    de.deserialize("second", &mut second).unwrap();
    assert_eq!((first, second.as_str(), third), (1, "two", 3.0));
}

#[test]
fn test_blob() {
    let graphdoc = GraphDoc::default();
    let bytes: Vec<u8> = (0..=255).collect();
    let arena = Arena::new();
    let mut ser = graphdoc.serializer(&arena);
    ser.serialize_blob("data", &bytes).unwrap();
    ser.serialize_blob("empty", &[]).unwrap();
    let text = ser.write_to_string().unwrap();

    let mut arena = Arena::new();
    let mut de = graphdoc.deserializer(&mut arena);
    de.read_str(&text).unwrap();
    assert_eq!(de.deserialize_blob("empty").unwrap(), Vec::<u8>::new());
    assert_eq!(de.deserialize_blob("data").unwrap(), bytes);
}
