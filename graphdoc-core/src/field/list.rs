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

use std::collections::{LinkedList, VecDeque};

use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::{Field, Items};
use crate::serializer::Serializer;
use crate::types::ITEM_NODE;

/// Sequences keep their element order. In pointer-content mode existing
/// elements are read in place instead of being replaced.
macro_rules! impl_sequence {
    ($($seq:ident => $push:ident),+ $(,)?) => {
        $(
            impl<T: Field> Items for $seq<T> {
                fn write_items(&self, item_key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
                    for item in self.iter() {
                        ser.write_item(item_key, item)?;
                    }
                    Ok(())
                }

                fn read_items(&mut self, item_key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
                    if de.options().is_pointer_content() {
                        return de.read_items_in_place(item_key, self.iter_mut());
                    }
                    self.clear();
                    de.read_each_item(item_key, |item: T| self.$push(item))
                }
            }

            impl<T: Field> Field for $seq<T> {
                fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
                    self.write_items(ITEM_NODE, ser)
                }

                fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                    self.read_items(ITEM_NODE, de)
                }
            }
        )+
    };
}

impl_sequence!(Vec => push, VecDeque => push_back, LinkedList => push_back);
