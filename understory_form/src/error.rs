// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors.
//!
//! These are precondition violations: asking for a field that does not exist,
//! or handing a field a value of the wrong kind. Validation failures are not
//! errors; they live on the fields as messages.

use alloc::string::String;
use core::fmt;

use crate::value::FieldKind;

/// A structural error raised by a form operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    /// The requested key is not registered.
    FieldNotFound {
        /// The key that was looked up.
        name: String,
    },
    /// A value's kind does not match the field's declared kind.
    TypeMismatch {
        /// The field key.
        name: String,
        /// The declared kind.
        expected: FieldKind,
        /// The kind that was supplied.
        found: FieldKind,
    },
    /// Two descriptors resolved to the same key.
    DuplicateField {
        /// The duplicated key.
        name: String,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound { name } => write!(f, "field `{name}` not found"),
            Self::TypeMismatch {
                name,
                expected,
                found,
            } => write!(f, "field `{name}` holds {expected} values, got {found}"),
            Self::DuplicateField { name } => write!(f, "field `{name}` is declared twice"),
        }
    }
}

impl core::error::Error for FormError {}
