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

use crate::arena::Ptr;
use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::{Field, Pointee};
use crate::serializer::Serializer;
use crate::types::ITEM_NODE;

impl<T: ?Sized + Pointee> Field for Ptr<T> {
    fn write_field(&self, key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
        ser.write_pointer(key, self)
    }

    fn read_field(&mut self, key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
        de.read_pointer(key, self)
    }

    // A pointer stored behind another pointer is the single item of its
    // target node.
    fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        ser.write_pointer(ITEM_NODE, self)
    }

    fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        de.read_pointer(ITEM_NODE, self)
    }
}
