// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validator seams and validation results.
//!
//! The crate does not decide what makes a value valid. It consumes the output
//! of a validator: an ordered list of `{path, message}` failures. Two seams are
//! provided:
//!
//! - [`Validator`] checks a single field value. Attach one per field with
//!   [`Field::set_validator`](crate::Field::set_validator).
//! - [`SchemaValidator`] checks the whole set of form values at once, keyed by
//!   field path. Feed it through
//!   [`FormRegistry::apply_schema`](crate::FormRegistry::apply_schema).
//!
//! Both are implemented for plain closures, so ad-hoc checks need no new type.
//! [`Rules`](crate::Rules) offers a handful of common constraints.

use alloc::string::String;
use alloc::vec::Vec;

use crate::registry::FormValues;
use crate::value::FieldValue;

/// A single validation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Path of the failing value.
    ///
    /// Empty when the failure refers to the validated value itself, which is
    /// the case for per-field validators. Schema validators use field keys.
    pub path: String,
    /// Human readable message.
    pub message: String,
}

impl ValidationError {
    /// Creates a failure for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a failure for the validated value itself.
    #[must_use]
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }
}

/// The outcome of running a validator: zero or more failures, in the order
/// the validator reported them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A result with no failures.
    #[must_use]
    pub const fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// A result with a single failure on the validated value itself.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            errors: alloc::vec![ValidationError::root(message)],
        }
    }

    /// Returns `true` if there are no failures.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if there are no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failures in reported order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the result, returning the failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Appends a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Messages reported for `path`, in reported order.
    pub fn field_errors<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.path == path)
            .map(|e| e.message.as_str())
    }

    /// Regroups failures by `order`.
    ///
    /// All failures for `order[0]` come first (keeping their relative order),
    /// then those for `order[1]`, and so on. Failures whose path does not
    /// appear in `order` are dropped.
    ///
    /// ```rust
    /// use understory_form::{ValidationError, ValidationResult};
    ///
    /// let result: ValidationResult = [
    ///     ValidationError::new(".b", "too short"),
    ///     ValidationError::new(".a", "required"),
    ///     ValidationError::new(".c", "ignored"),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let ordered = result.reorder_by([".a", ".b"]);
    /// let paths: Vec<_> = ordered.errors().iter().map(|e| e.path.as_str()).collect();
    /// assert_eq!(paths, [".a", ".b"]);
    /// ```
    #[must_use]
    pub fn reorder_by<I, S>(&self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut errors = Vec::with_capacity(self.errors.len());
        for key in order {
            let key = key.as_ref();
            errors.extend(self.errors.iter().filter(|e| e.path == key).cloned());
        }
        Self { errors }
    }

    /// Keeps only the failures for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&ValidationError) -> bool) {
        self.errors.retain(keep);
    }
}

impl FromIterator<ValidationError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ValidationError> for ValidationResult {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationError;
    type IntoIter = alloc::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Checks a single field value.
pub trait Validator {
    /// Validates `value`, reporting failures in a stable order.
    fn validate(&self, value: &FieldValue) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&FieldValue) -> ValidationResult,
{
    fn validate(&self, value: &FieldValue) -> ValidationResult {
        self(value)
    }
}

/// Checks all form values together.
///
/// Failures should carry the registered field key as their path so they can
/// be routed back to fields.
pub trait SchemaValidator {
    /// Validates the snapshot of form values.
    fn validate(&self, values: &FormValues) -> ValidationResult;
}

impl<F> SchemaValidator for F
where
    F: Fn(&FormValues) -> ValidationResult,
{
    fn validate(&self, values: &FormValues) -> ValidationResult {
        self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> ValidationResult {
        [
            ValidationError::new(".last", "required"),
            ValidationError::new(".first", "too short"),
            ValidationError::new(".last", "letters only"),
            ValidationError::new(".first", "letters only"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn field_errors_keeps_reported_order() {
        let result = sample();
        let msgs: Vec<_> = result.field_errors(".last").collect();
        assert_eq!(msgs, vec!["required", "letters only"]);
        assert_eq!(result.field_errors(".none").count(), 0);
    }

    #[test]
    fn reorder_groups_by_key_order() {
        let ordered = sample().reorder_by([".first", ".last"]);
        let pairs: Vec<_> = ordered
            .errors()
            .iter()
            .map(|e| (e.path.as_str(), e.message.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (".first", "too short"),
                (".first", "letters only"),
                (".last", "required"),
                (".last", "letters only"),
            ]
        );
    }

    #[test]
    fn reorder_drops_unknown_paths() {
        let ordered = sample().reorder_by([".last"]);
        assert_eq!(ordered.len(), 2);
        assert!(ordered.errors().iter().all(|e| e.path == ".last"));
    }

    #[test]
    fn closures_are_validators() {
        let non_empty = |value: &FieldValue| {
            if value.is_filled() {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid("required")
            }
        };
        assert!(Validator::validate(&non_empty, &FieldValue::from("x")).is_valid());
        let result = Validator::validate(&non_empty, &FieldValue::Null);
        assert_eq!(result.errors(), &[ValidationError::root("required")]);
    }
}
