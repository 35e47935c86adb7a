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

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::{Field, Items};
use crate::invalid_operation;
use crate::serializer::Serializer;
use crate::types::ITEM_NODE;

// Reading elements in place could change where they belong in the set, so
// pointer-content mode refuses sets in both directions.
fn reject_pointer_content(pointer_content: bool, key: &str) -> Result<(), Error> {
    if pointer_content {
        invalid_operation!(
            "sets cannot be serialized in pointer-content mode (item key '{}')",
            key
        );
    }
    Ok(())
}

impl<T: Field + Eq + Hash> Items for HashSet<T> {
    fn write_items(&self, item_key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
        reject_pointer_content(ser.options().is_pointer_content(), item_key)?;
        for item in self.iter() {
            ser.write_item(item_key, item)?;
        }
        Ok(())
    }

    fn read_items(&mut self, item_key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
        reject_pointer_content(de.options().is_pointer_content(), item_key)?;
        self.clear();
        de.read_each_item(item_key, |item: T| {
            self.insert(item);
        })
    }
}

impl<T: Field + Eq + Hash> Field for HashSet<T> {
    fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        self.write_items(ITEM_NODE, ser)
    }

    fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.read_items(ITEM_NODE, de)
    }
}

impl<T: Field + Ord> Items for BTreeSet<T> {
    fn write_items(&self, item_key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
        reject_pointer_content(ser.options().is_pointer_content(), item_key)?;
        for item in self.iter() {
            ser.write_item(item_key, item)?;
        }
        Ok(())
    }

    fn read_items(&mut self, item_key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
        reject_pointer_content(de.options().is_pointer_content(), item_key)?;
        self.clear();
        de.read_each_item(item_key, |item: T| {
            self.insert(item);
        })
    }
}

impl<T: Field + Ord> Field for BTreeSet<T> {
    fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        self.write_items(ITEM_NODE, ser)
    }

    fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.read_items(ITEM_NODE, de)
    }
}
