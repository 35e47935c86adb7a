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

//! Maps are written as a flat run of `key`/`value` sibling nodes. With
//! attribute encoding a primitive key instead becomes the first attribute of
//! its value node.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::{Entries, Field};
use crate::serializer::Serializer;
use crate::types::{KEY_NODE, VALUE_NODE};

macro_rules! impl_map {
    ($map:ident, $($bound:path),+) => {
        impl<K, V> Entries for $map<K, V>
        where
            K: Field $(+ $bound)+,
            V: Field,
        {
            fn write_entries(
                &self,
                value_key: &str,
                key_key: &str,
                ser: &mut Serializer<'_>,
            ) -> Result<(), Error> {
                for (key, value) in self.iter() {
                    ser.write_entry(key_key, key, value_key, value)?;
                }
                Ok(())
            }

            fn read_entries(
                &mut self,
                value_key: &str,
                key_key: &str,
                de: &mut Deserializer<'_>,
            ) -> Result<(), Error> {
                if de.options().is_pointer_content() {
                    loop {
                        let mut key = K::default();
                        match de.read_entry_key(key_key, &mut key, value_key) {
                            Ok(()) => {}
                            Err(err) if err.is_no_such_data() => return Ok(()),
                            Err(err) => return Err(err),
                        }
                        match self.get_mut(&key) {
                            Some(value) => de.read_item(value_key, value)?,
                            None => {
                                de.warn(format!(
                                    "no entry allocated for a serialized '{}', skipping its '{}'",
                                    key_key, value_key
                                ));
                                de.skip(value_key)?;
                            }
                        }
                    }
                }
                self.clear();
                loop {
                    let mut key = K::default();
                    let mut value = V::default();
                    match de.read_entry(key_key, &mut key, value_key, &mut value) {
                        Ok(()) => {
                            self.insert(key, value);
                        }
                        Err(err) if err.is_no_such_data() => return Ok(()),
                        Err(err) if err.is_memory_allocation() => {
                            de.warn(format!("dropping map entry: {}", err));
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }

        impl<K, V> Field for $map<K, V>
        where
            K: Field $(+ $bound)+,
            V: Field,
        {
            fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
                self.write_entries(VALUE_NODE, KEY_NODE, ser)
            }

            fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                self.read_entries(VALUE_NODE, KEY_NODE, de)
            }
        }
    };
}

impl_map!(HashMap, Eq, Hash);
impl_map!(BTreeMap, Ord);
