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

use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::Field;
use crate::serializer::Serializer;
use crate::types::{FIRST_NODE, SECOND_NODE};

/// Pairs are a node with `first` and `second` members. In attribute encoding
/// primitive members become attributes of the pair node.
impl<A: Field, B: Field> Field for (A, B) {
    fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        self.0.write_field(FIRST_NODE, ser)?;
        self.1.write_field(SECOND_NODE, ser)
    }

    fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.0.read_field(FIRST_NODE, de)?;
        self.1.read_field(SECOND_NODE, de)
    }
}
