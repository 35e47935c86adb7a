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

//! Error taxonomy shared by the serializer and the deserializer.
//!
//! Every failure a document walk can run into maps onto exactly one variant.
//! [`Error::NoSuchData`] is special: besides reporting a missing key to the
//! caller it is the signal collections use to detect their last item, so it
//! is expected to be caught and handled locally. All other variants are meant
//! to propagate to the top-level caller.

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if GRAPHDOC_PANIC_ON_ERROR environment variable is set at compile time.
/// Set GRAPHDOC_PANIC_ON_ERROR=1 at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("GRAPHDOC_PANIC_ON_ERROR").is_some();

/// Check if GRAPHDOC_PANIC_ON_ERROR environment variable is set.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for graph serialization and deserialization.
///
/// # Always use the constructor functions
///
/// Build errors through [`Error::no_such_data`], [`Error::format`] and the
/// other associated functions rather than the variants. The functions accept
/// anything convertible into `Cow<'static, str>` and honour the
/// `GRAPHDOC_PANIC_ON_ERROR` debug switch.
///
/// ```rust
/// use graphdoc_core::error::Error;
///
/// let err = Error::format("value attribute is missing");
/// let err = Error::duplicate_id(format!("id '{}' is defined twice", 3));
/// ```
///
/// ## Debug Mode: GRAPHDOC_PANIC_ON_ERROR
///
/// Compiling with `GRAPHDOC_PANIC_ON_ERROR` set makes every constructor panic
/// at the call site, which together with `RUST_BACKTRACE=1` points straight at
/// the code that produced the error:
///
/// ```bash
/// RUST_BACKTRACE=1 GRAPHDOC_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// [`Error::no_such_data`] is exempt, since end-of-collection detection
/// creates it on every successful collection read.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested key does not exist below the current node.
    ///
    /// Do not construct this variant directly; use [`Error::no_such_data`] instead.
    #[error("{0}")]
    NoSuchData(Cow<'static, str>),

    /// A node exists but its content cannot be converted.
    ///
    /// Do not construct this variant directly; use [`Error::format`] instead.
    #[error("{0}")]
    Format(Cow<'static, str>),

    /// Two nodes of one document carry the same reference id.
    ///
    /// Do not construct this variant directly; use [`Error::duplicate_id`] instead.
    #[error("{0}")]
    DuplicateId(Cow<'static, str>),

    /// An attribute key is reserved or already present on the node.
    ///
    /// Do not construct this variant directly; use [`Error::attribute_naming`] instead.
    #[error("{0}")]
    AttributeNaming(Cow<'static, str>),

    /// The document was written by an incompatible format version.
    ///
    /// Do not construct this variant directly; use [`Error::version_mismatch`] instead.
    #[error("document version '{found}' does not match expected version '{expected}'")]
    VersionMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },

    /// The document's references are structurally inconsistent.
    ///
    /// Do not construct this variant directly; use [`Error::reference_resolving`] instead.
    #[error("{0}")]
    ReferenceResolving(Cow<'static, str>),

    /// No factory could produce an instance for an abstract pointer type.
    ///
    /// Do not construct this variant directly; use [`Error::memory_allocation`] instead.
    #[error("{0}")]
    MemoryAllocation(Cow<'static, str>),

    /// The requested operation is not supported in the current state or mode.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_operation`] instead.
    #[error("{0}")]
    InvalidOperation(Cow<'static, str>),

    /// Reading or writing the document text failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The document text is not well formed.
    #[error("malformed document: {0}")]
    Syntax(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new [`Error::NoSuchData`].
    ///
    /// Never panics, even with `GRAPHDOC_PANIC_ON_ERROR` set.
    #[inline(always)]
    #[cold]
    pub fn no_such_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::NoSuchData(s.into())
    }

    /// Creates a new [`Error::Format`] from a string or static message.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn format<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Format(s.into());
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DuplicateId`] from a string or static message.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn duplicate_id<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DuplicateId(s.into());
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::AttributeNaming`] from a string or static message.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn attribute_naming<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::AttributeNaming(s.into());
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::VersionMismatch`] from the expected and the found version.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use graphdoc_core::error::Error;
    ///
    /// let err = Error::version_mismatch("1.0", "0.9");
    /// assert!(err.to_string().contains("0.9"));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn version_mismatch<E, F>(expected: E, found: F) -> Self
    where
        E: Into<Cow<'static, str>>,
        F: Into<Cow<'static, str>>,
    {
        let err = Error::VersionMismatch {
            expected: expected.into(),
            found: found.into(),
        };
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::ReferenceResolving`] from a string or static message.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn reference_resolving<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::ReferenceResolving(s.into());
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::MemoryAllocation`] from a string or static message.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn memory_allocation<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::MemoryAllocation(s.into());
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidOperation`] from a string or static message.
    ///
    /// If `GRAPHDOC_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
    ///
    /// # Example
    /// ```
    /// use graphdoc_core::error::Error;
    ///
    /// let err = Error::invalid_operation("read() was already called");
    /// let err = Error::invalid_operation(format!("cannot {} a set", "inline"));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_operation<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidOperation(s.into());
        if PANIC_ON_ERROR {
            panic!("GRAPHDOC_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Whether this error reports a missing key.
    #[inline(always)]
    pub fn is_no_such_data(&self) -> bool {
        matches!(self, Error::NoSuchData(_))
    }

    /// Whether this error reports a failed allocation of an abstract type.
    #[inline(always)]
    pub fn is_memory_allocation(&self) -> bool {
        matches!(self, Error::MemoryAllocation(_))
    }
}

/// Ensures a condition is true; otherwise returns the given [`enum@Error`].
///
/// # Examples
/// ```
/// use graphdoc_core::ensure;
/// use graphdoc_core::error::Error;
///
/// fn check_key(key: &str) -> Result<(), Error> {
///     ensure!(!key.is_empty(), Error::attribute_naming("empty key"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with the given [`enum@Error`].
///
/// # Examples
/// ```
/// use graphdoc_core::bail;
/// use graphdoc_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!(Error::format("something went wrong"));
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($err)
    };
}

/// Returns early with an [`Error::InvalidOperation`].
///
/// # Examples
/// ```
/// use graphdoc_core::invalid_operation;
/// use graphdoc_core::error::Error;
///
/// fn check_state(done: bool) -> Result<(), Error> {
///     if done {
///         invalid_operation!("deserializer already finished");
///     }
///     Ok(())
/// }
///
/// fn check_mode(mode: &str) -> Result<(), Error> {
///     invalid_operation!("mode {} not supported", mode);
/// }
/// ```
#[macro_export]
macro_rules! invalid_operation {
    ($err:expr) => {
        return Err($crate::error::Error::invalid_operation($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_operation(format!($fmt, $($arg)*)))
    };
}
