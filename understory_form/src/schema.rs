// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declaring the shape of a form.
//!
//! A form is declared as a list of [`FieldDescriptor`]s: leaves carry a name,
//! a [`FieldKind`] and the initial value; groups carry a name and nested
//! descriptors. Groups are flattened into dotted keys when the registry is
//! built, so a `city` leaf inside an `address` group becomes `.address.city`.
//!
//! [`FormSchema`] is a builder over descriptors, and [`FormData`] lets an
//! application type describe itself so a registry can be built straight from
//! a value.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::FormError;
use crate::registry::FormRegistry;
use crate::value::{FieldKind, FieldValue};

/// One declared entry of a form.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldDescriptor {
    /// A single input.
    Leaf {
        /// Property name, without the leading `.`.
        name: String,
        /// Declared kind.
        kind: FieldKind,
        /// Initial value; must fit `kind`.
        value: FieldValue,
    },
    /// A nested object whose children become dotted sub-keys.
    Group {
        /// Property name, without the leading `.`.
        name: String,
        /// Nested entries, in declaration order.
        children: Vec<FieldDescriptor>,
    },
}

impl FieldDescriptor {
    /// Declares a single input.
    #[must_use]
    pub fn leaf(name: impl Into<String>, kind: FieldKind, value: impl Into<FieldValue>) -> Self {
        Self::Leaf {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }

    /// Declares a nested group.
    #[must_use]
    pub fn group(name: impl Into<String>, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Group {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    /// The declared property name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf { name, .. } | Self::Group { name, .. } => name,
        }
    }
}

/// A flattened leaf: registered key, kind and seed value.
pub(crate) struct FlatField {
    pub(crate) key: String,
    pub(crate) kind: FieldKind,
    pub(crate) value: FieldValue,
}

/// Flattens descriptors depth-first, preserving declaration order.
pub(crate) fn flatten(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Vec<FlatField> {
    let mut out = Vec::new();
    flatten_into(descriptors, "", &mut out);
    out
}

fn flatten_into(
    descriptors: impl IntoIterator<Item = FieldDescriptor>,
    prefix: &str,
    out: &mut Vec<FlatField>,
) {
    for descriptor in descriptors {
        match descriptor {
            FieldDescriptor::Leaf { name, kind, value } => out.push(FlatField {
                key: join(prefix, &name),
                kind,
                value,
            }),
            FieldDescriptor::Group { name, children } => {
                let prefix = join(prefix, &name);
                flatten_into(children, &prefix, out);
            }
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    format!("{prefix}.{}", name.trim_start_matches('.'))
}

/// Builder for a list of [`FieldDescriptor`]s.
///
/// ```rust
/// use understory_form::{FieldValue, FormSchema};
///
/// let registry = FormSchema::new()
///     .text("firstName", "")
///     .text("lastName", "Doe")
///     .integer("age", None::<i64>)
///     .group("address", |address| address.text("city", "Berlin"))
///     .build()
///     .unwrap();
///
/// let keys: Vec<_> = registry.keys().collect();
/// assert_eq!(keys, [".firstName", ".lastName", ".age", ".address.city"]);
/// assert_eq!(registry.value(".address.city").unwrap(), &FieldValue::from("Berlin"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf of any kind.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.fields.push(FieldDescriptor::leaf(name, kind, value));
        self
    }

    /// Adds a text leaf.
    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, FieldKind::Text, value)
    }

    /// Adds an integer leaf.
    #[must_use]
    pub fn integer(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, FieldKind::Integer, value)
    }

    /// Adds a float leaf.
    #[must_use]
    pub fn float(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, FieldKind::Float, value)
    }

    /// Adds a boolean leaf.
    #[must_use]
    pub fn boolean(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, FieldKind::Bool, value)
    }

    /// Adds a date leaf.
    #[must_use]
    pub fn date(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, FieldKind::Date, value)
    }

    /// Adds a nested group built by `build`.
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, build: impl FnOnce(Self) -> Self) -> Self {
        let children = build(Self::new()).fields;
        self.fields.push(FieldDescriptor::group(name, children));
        self
    }

    /// Adds an already built descriptor.
    #[must_use]
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// The declared entries.
    #[must_use]
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Consumes the schema, returning its entries.
    #[must_use]
    pub fn into_descriptors(self) -> Vec<FieldDescriptor> {
        self.fields
    }

    /// Builds a registry from this schema.
    ///
    /// # Errors
    ///
    /// See [`FormRegistry::new`].
    pub fn build(self) -> Result<FormRegistry, FormError> {
        FormRegistry::new(self.fields)
    }
}

impl IntoIterator for FormSchema {
    type Item = FieldDescriptor;
    type IntoIter = alloc::vec::IntoIter<FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// A value that can describe itself as a form.
///
/// Implement this on the type holding a form's initial values; each property
/// becomes a descriptor, in declaration order.
///
/// ```rust
/// use understory_form::{FormData, FormRegistry, FormSchema};
///
/// struct SignUp {
///     email: String,
///     newsletter: bool,
/// }
///
/// impl FormData for SignUp {
///     fn describe(&self) -> FormSchema {
///         FormSchema::new()
///             .text("email", self.email.as_str())
///             .boolean("newsletter", self.newsletter)
///     }
/// }
///
/// let data = SignUp { email: String::new(), newsletter: true };
/// let registry = FormRegistry::from_data(&data).unwrap();
/// assert_eq!(registry.len(), 2);
/// assert!(registry.get(".newsletter").unwrap().is_dirty());
/// ```
pub trait FormData {
    /// Describes the form's fields seeded with this value's properties.
    fn describe(&self) -> FormSchema;
}
