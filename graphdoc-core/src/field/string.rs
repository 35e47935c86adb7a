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
use crate::types::needs_text_node;

// Multi-line strings always get a node of their own with the string as text.
impl Field for String {
    fn write_field(&self, key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
        if ser.options().is_attributes() && !needs_text_node(self) {
            ser.write_attribute(key, self.clone())
        } else {
            ser.write_node(key, self)
        }
    }

    fn read_field(&mut self, key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
        if de.options().is_attributes() {
            if let Some(text) = de.try_read_attribute(key) {
                *self = text;
                return Ok(());
            }
        }
        de.read_node(key, self)
    }

    fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        if needs_text_node(self) {
            ser.write_text_content(self.clone());
        } else {
            ser.write_value_content(self.clone());
        }
        Ok(())
    }

    fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        *self = de.read_text_content()?;
        Ok(())
    }

    #[inline(always)]
    fn is_primitive() -> bool {
        true
    }
}
