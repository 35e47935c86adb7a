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

use std::str::FromStr;

use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::field::Field;
use crate::serializer::Serializer;

pub(crate) fn parse_value<T>(text: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.trim().parse::<T>().map_err(|err| {
        Error::format(format!(
            "cannot convert '{}' to {}: {}",
            text,
            std::any::type_name::<T>(),
            err
        ))
    })
}

fn parse_char(text: &str) -> Result<char, Error> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::format(format!("cannot convert '{}' to char", text))),
    }
}

fn parse_bool(text: &str) -> Result<bool, Error> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::format(format!("cannot convert '{}' to bool", other))),
    }
}

macro_rules! impl_primitive {
    ($parse:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Field for $ty {
                fn write_field(&self, key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
                    if ser.options().is_attributes() {
                        ser.write_attribute(key, self.to_string())
                    } else {
                        ser.write_node(key, self)
                    }
                }

                fn read_field(&mut self, key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
                    if de.options().is_attributes() {
                        let text = de.read_attribute(key)?;
                        *self = $parse(&text)?;
                        Ok(())
                    } else {
                        de.read_node(key, self)
                    }
                }

                fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
                    ser.write_value_content(self.to_string());
                    Ok(())
                }

                fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                    let text = de.read_value_content()?;
                    *self = $parse(&text)?;
                    Ok(())
                }

                #[inline(always)]
                fn is_primitive() -> bool {
                    true
                }
            }
        )+
    };
}

impl_primitive!(parse_bool => bool);
impl_primitive!(parse_char => char);
impl_primitive!(parse_value::<i8> => i8);
impl_primitive!(parse_value::<i16> => i16);
impl_primitive!(parse_value::<i32> => i32);
impl_primitive!(parse_value::<i64> => i64);
impl_primitive!(parse_value::<isize> => isize);
impl_primitive!(parse_value::<u8> => u8);
impl_primitive!(parse_value::<u16> => u16);
impl_primitive!(parse_value::<u32> => u32);
impl_primitive!(parse_value::<u64> => u64);
impl_primitive!(parse_value::<usize> => usize);
impl_primitive!(parse_value::<f32> => f32);
impl_primitive!(parse_value::<f64> => f64);
