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

//! Per-type encoding of keyed values.
//!
//! - [`Serializable`] is the contract user composites implement; it only
//!   talks to the key-based API of the serializer and deserializer.
//! - [`Field`] is implemented by everything that can occupy a keyed slot:
//!   primitives, strings, containers, pairs, pointers and composites. The
//!   derive macro and [`composite!`](crate::composite) implement it for
//!   `Serializable` types.
//! - [`Object`] is the object-safe face of a `Field`, used for values owned
//!   by the [`Arena`](crate::arena::Arena).
//! - [`Pointee`] describes the static type behind a [`Ptr`](crate::arena::Ptr).

mod list;
mod map;
mod number;
mod ptr;
mod set;
mod string;
mod tuple;

use std::any::Any;

use crate::deserializer::Deserializer;
use crate::error::Error;
use crate::serializer::Serializer;

/// User-facing serialization contract.
///
/// Implementations call `serialize`/`deserialize` with keys in any order;
/// keys only need to be distinct at one level.
///
/// ```rust
/// use graphdoc_core::{composite, Deserializer, Error, Serializable, Serializer};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Serializable for Point {
///     fn serialize(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
///         ser.serialize("x", &self.x)?;
///         ser.serialize("y", &self.y)
///     }
///
///     fn deserialize(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
///         de.deserialize("y", &mut self.y)?;
///         de.deserialize("x", &mut self.x)
///     }
/// }
///
/// composite!(Point);
/// ```
pub trait Serializable {
    fn serialize(&self, ser: &mut Serializer<'_>) -> Result<(), Error>;
    fn deserialize(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error>;
}

/// A value that can be stored under a key.
///
/// `write_field`/`read_field` place the value below the current node under
/// `key`; the defaults create (or look up) a child node and delegate to
/// `write_content`/`read_content` with the cursor moved into it.
pub trait Field: Default + 'static {
    fn write_field(&self, key: &str, ser: &mut Serializer<'_>) -> Result<(), Error> {
        ser.write_node(key, self)
    }

    fn read_field(&mut self, key: &str, de: &mut Deserializer<'_>) -> Result<(), Error> {
        de.read_node(key, self)
    }

    /// Writes the value into the node under the cursor.
    fn write_content(&self, ser: &mut Serializer<'_>) -> Result<(), Error>;

    /// Reads the value from the node under the cursor.
    fn read_content(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error>;

    /// Primitives become attributes in attribute encoding.
    fn is_primitive() -> bool {
        false
    }
}

/// Object-safe view of a [`Field`].
pub trait Object: Any {
    fn write_object(&self, ser: &mut Serializer<'_>) -> Result<(), Error>;
    fn read_object(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Field> Object for T {
    fn write_object(&self, ser: &mut Serializer<'_>) -> Result<(), Error> {
        self.write_content(ser)
    }

    fn read_object(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
        self.read_content(de)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Static type behind a pointer.
///
/// Every [`Field`] is a concrete pointee. Abstract families such as
/// `dyn Shape` are declared with [`abstract_pointee!`](crate::abstract_pointee)
/// and can only be read back through a registered factory.
pub trait Pointee: 'static {
    /// Default instance for a pointer without a usable type tag, or `None`
    /// for abstract types.
    fn instantiate() -> Option<Box<dyn Object>>;

    /// Whether a factory-made `object` may be stored behind this pointer type.
    fn admits(object: &dyn Object) -> bool {
        let _ = object;
        true
    }
}

impl<T: Field> Pointee for T {
    fn instantiate() -> Option<Box<dyn Object>> {
        Some(Box::new(T::default()))
    }

    fn admits(object: &dyn Object) -> bool {
        object.as_any().is::<T>()
    }
}

impl Pointee for dyn Object {
    fn instantiate() -> Option<Box<dyn Object>> {
        None
    }
}

/// Collections whose elements share one item key.
pub trait Items: Field {
    /// Writes every element below the cursor as `item_key`.
    fn write_items(&self, item_key: &str, ser: &mut Serializer<'_>) -> Result<(), Error>;

    /// Reads elements named `item_key` below the cursor.
    fn read_items(&mut self, item_key: &str, de: &mut Deserializer<'_>) -> Result<(), Error>;
}

/// Maps written as alternating key and value nodes.
pub trait Entries: Field {
    fn write_entries(
        &self,
        value_key: &str,
        key_key: &str,
        ser: &mut Serializer<'_>,
    ) -> Result<(), Error>;

    fn read_entries(
        &mut self,
        value_key: &str,
        key_key: &str,
        de: &mut Deserializer<'_>,
    ) -> Result<(), Error>;
}

/// Implements [`Field`] for types implementing [`Serializable`].
#[macro_export]
macro_rules! composite {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::field::Field for $ty {
                fn write_content(
                    &self,
                    ser: &mut $crate::serializer::Serializer<'_>,
                ) -> ::std::result::Result<(), $crate::error::Error> {
                    $crate::field::Serializable::serialize(self, ser)
                }

                fn read_content(
                    &mut self,
                    de: &mut $crate::deserializer::Deserializer<'_>,
                ) -> ::std::result::Result<(), $crate::error::Error> {
                    $crate::field::Serializable::deserialize(self, de)
                }
            }
        )+
    };
}

/// Declares an abstract pointee family, optionally listing its members.
///
/// ```rust
/// use graphdoc_core::abstract_pointee;
///
/// trait Shape {}
/// abstract_pointee!(dyn Shape);
///
/// trait Animal {}
/// #[derive(Default)]
/// struct Cat;
/// impl Animal for Cat {}
/// # impl graphdoc_core::Serializable for Cat {
/// #     fn serialize(&self, _: &mut graphdoc_core::Serializer<'_>) -> Result<(), graphdoc_core::Error> { Ok(()) }
/// #     fn deserialize(&mut self, _: &mut graphdoc_core::Deserializer<'_>) -> Result<(), graphdoc_core::Error> { Ok(()) }
/// # }
/// # graphdoc_core::composite!(Cat);
/// abstract_pointee!(dyn Animal => Cat);
/// ```
#[macro_export]
macro_rules! abstract_pointee {
    ($ty:ty => $($member:ty),+ $(,)?) => {
        impl $crate::field::Pointee for $ty {
            fn instantiate() -> ::std::option::Option<::std::boxed::Box<dyn $crate::field::Object>> {
                ::std::option::Option::None
            }

            fn admits(object: &dyn $crate::field::Object) -> bool {
                let any = $crate::field::Object::as_any(object);
                false $(|| any.is::<$member>())+
            }
        }
    };
    ($ty:ty) => {
        impl $crate::field::Pointee for $ty {
            fn instantiate() -> ::std::option::Option<::std::boxed::Box<dyn $crate::field::Object>> {
                ::std::option::Option::None
            }
        }
    };
}
