// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form registry: a fixed set of fields for one form session.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::error::FormError;
use crate::field::Field;
use crate::schema::{FieldDescriptor, FormData, flatten};
use crate::validation::{SchemaValidator, ValidationResult};
use crate::value::FieldValue;

/// A keyed, ordered collection of [`Field`]s.
///
/// The set of fields is fixed at construction; afterwards fields are only
/// mutated in place.
///
/// Two orders are tracked:
///
/// - **Declaration order**: the order descriptors were declared in. Used by
///   [`keys`](Self::keys), [`values`](Self::values) and
///   [`validate`](Self::validate).
/// - **Access order**: the order fields were first requested through
///   [`field`](Self::field). Hosts request fields as they render them, so this
///   matches on-screen order and decides which error is "first" for
///   [`first_error_bounds`](Self::first_error_bounds).
///
/// ```rust
/// use kurbo::Rect;
/// use understory_form::{FormSchema, Rules};
///
/// let mut form = FormSchema::new()
///     .text("firstName", "")
///     .text("lastName", "Doe")
///     .build()
///     .unwrap();
///
/// // Render pass: fetch each field, attach validators, report layout.
/// let first = form.field(".firstName").unwrap();
/// first.set_validator(Rules::new().min_length(3));
/// first.set_bounds(Rect::new(0.0, 0.0, 200.0, 40.0));
/// form.field(".lastName").unwrap().set_bounds(Rect::new(0.0, 50.0, 200.0, 90.0));
///
/// // Submit.
/// let submitted = form.handle_submit(|_values| unreachable!());
/// assert!(!submitted);
/// assert_eq!(form.first_error_bounds(), Rect::new(0.0, 0.0, 200.0, 40.0));
/// ```
#[derive(Debug)]
pub struct FormRegistry {
    fields: HashMap<String, Field>,
    keys: Vec<String>,
    field_order: Vec<String>,
}

impl FormRegistry {
    /// Builds a registry from descriptors.
    ///
    /// Each leaf becomes a field keyed by its dotted path; groups are flattened
    /// depth-first in declaration order.
    ///
    /// # Errors
    ///
    /// - [`FormError::TypeMismatch`] if a seed value does not fit its kind.
    /// - [`FormError::DuplicateField`] if two entries resolve to the same key.
    pub fn new(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Result<Self, FormError> {
        let flat = flatten(descriptors);
        let mut fields = HashMap::with_capacity(flat.len());
        let mut keys = Vec::with_capacity(flat.len());

        for entry in flat {
            if fields.contains_key(&entry.key) {
                return Err(FormError::DuplicateField { name: entry.key });
            }
            let field = Field::new(entry.key.clone(), entry.kind, entry.value)?;
            tracing::debug!(field = %entry.key, kind = %entry.kind, "registered field");
            keys.push(entry.key.clone());
            fields.insert(entry.key, field);
        }

        tracing::debug!(fields = keys.len(), "form registry built");
        Ok(Self {
            fields,
            keys,
            field_order: Vec::new(),
        })
    }

    /// Builds a registry from a value that describes itself.
    ///
    /// # Errors
    ///
    /// See [`FormRegistry::new`].
    pub fn from_data<T: FormData + ?Sized>(data: &T) -> Result<Self, FormError> {
        Self::new(data.describe())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> + '_ {
        self.keys.iter().filter_map(|k| self.fields.get(k))
    }

    /// Keys in the order they were first requested through
    /// [`field`](Self::field).
    #[must_use]
    pub fn field_order(&self) -> &[String] {
        &self.field_order
    }

    /// Returns `true` if `name` is a registered key.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Looks up a field for the host to drive.
    ///
    /// The first successful request for a key records it in
    /// [`field_order`](Self::field_order).
    ///
    /// # Errors
    ///
    /// [`FormError::FieldNotFound`] if `name` is not registered.
    pub fn field(&mut self, name: &str) -> Result<&mut Field, FormError> {
        let Some(field) = self.fields.get_mut(name) else {
            return Err(FormError::FieldNotFound { name: name.into() });
        };
        if !self.field_order.iter().any(|k| k == name) {
            self.field_order.push(name.into());
        }
        Ok(field)
    }

    /// Looks up a field without recording access order.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Current value of a field.
    ///
    /// # Errors
    ///
    /// [`FormError::FieldNotFound`] if `name` is not registered.
    pub fn value(&self, name: &str) -> Result<&FieldValue, FormError> {
        self.fields
            .get(name)
            .map(Field::value)
            .ok_or_else(|| FormError::FieldNotFound { name: name.into() })
    }

    /// Snapshot of all values, keyed by field key, in declaration order.
    #[must_use]
    pub fn values(&self) -> FormValues {
        self.iter()
            .map(|f| (String::from(f.name()), f.value().clone()))
            .collect()
    }

    /// Validates every field.
    ///
    /// Returns `true` if no field has errors afterwards.
    pub fn validate(&mut self) -> bool {
        for key in &self.keys {
            if let Some(field) = self.fields.get_mut(key) {
                field.validate();
            }
        }
        let valid = !self.has_errors();
        tracing::debug!(valid, "form validated");
        valid
    }

    /// Returns `true` if any field has errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.fields.values().any(Field::has_error)
    }

    /// Key of the first field, in access order, that has errors.
    #[must_use]
    pub fn first_error_field(&self) -> Option<&str> {
        self.field_order
            .iter()
            .find(|k| self.fields.get(k.as_str()).is_some_and(Field::has_error))
            .map(String::as_str)
    }

    /// Bounds of the first field, in access order, that has errors.
    ///
    /// [`Rect::ZERO`] if there is none. Hosts scroll here after a failed
    /// submit.
    #[must_use]
    pub fn first_error_bounds(&self) -> Rect {
        self.first_error_field()
            .and_then(|k| self.fields.get(k))
            .map_or(Rect::ZERO, Field::bounds)
    }

    /// Validates and, if valid, hands the values to `on_success`.
    ///
    /// Returns whether the form was valid. On failure `on_success` is not
    /// called; use [`first_error_bounds`](Self::first_error_bounds) to bring
    /// the offending field into view.
    pub fn handle_submit(&mut self, on_success: impl FnOnce(FormValues)) -> bool {
        let valid = self.validate();
        if valid {
            on_success(self.values());
        }
        valid
    }

    /// Merges externally computed errors into the fields.
    ///
    /// Each `(key, message)` pair is added to the field's errors (skipping
    /// duplicates) and marks it invalid. Unknown keys are skipped. Returns
    /// `true` if no field has errors afterwards.
    pub fn handle_validation<I, K, M>(&mut self, errors: I) -> bool
    where
        I: IntoIterator<Item = (K, M)>,
        K: AsRef<str>,
        M: AsRef<str>,
    {
        for (key, message) in errors {
            let key = key.as_ref();
            match self.fields.get_mut(key) {
                Some(field) => field.push_error(message.as_ref()),
                None => tracing::warn!(field = key, "dropping error for unknown field"),
            }
        }
        !self.has_errors()
    }

    /// Runs a whole-form validator and merges its failures.
    ///
    /// Failure paths are matched against field keys. Returns the same as
    /// [`handle_validation`](Self::handle_validation).
    pub fn apply_schema<S: SchemaValidator + ?Sized>(&mut self, schema: &S) -> bool {
        let result = schema.validate(&self.values());
        self.handle_validation(
            result
                .errors()
                .iter()
                .map(|e| (e.path.as_str(), e.message.as_str())),
        )
    }

    /// Keeps only failures for fields the user has already left.
    ///
    /// A field qualifies when it has been touched and is not focused. Useful
    /// for showing whole-form validation results without flagging fields the
    /// user has not reached yet.
    #[must_use]
    pub fn blurred_errors(&self, result: &ValidationResult) -> ValidationResult {
        let mut result = result.clone();
        result.retain(|e| {
            self.fields
                .get(e.path.as_str())
                .is_some_and(|f| f.is_touched() && !f.has_focus())
        });
        result
    }
}

/// A snapshot of form values keyed by field key, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
    entries: Vec<(String, FieldValue)>,
}

impl FormValues {
    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FormValues {
    type Item = (String, FieldValue);
    type IntoIter = alloc::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use crate::schema::FormSchema;
    use crate::validation::ValidationError;
    use crate::value::FieldKind;
    use alloc::vec;

    fn names() -> FormRegistry {
        FormSchema::new()
            .text("firstName", "")
            .text("lastName", "Doe")
            .build()
            .unwrap()
    }

    #[test]
    fn construction_seeds_fields() {
        let form = names();
        assert_eq!(form.len(), 2);
        let first = form.get(".firstName").unwrap();
        assert!(!first.is_dirty());
        assert!(!first.is_touched());
        assert!(first.errors().is_empty());
        assert!(form.get(".lastName").unwrap().is_dirty());
        assert!(form.field_order().is_empty());
    }

    #[test]
    fn construction_rejects_mismatched_seed() {
        let err = FormSchema::new()
            .field("age", FieldKind::Integer, "12")
            .build()
            .unwrap_err();
        assert!(matches!(err, FormError::TypeMismatch { ref name, .. } if name == ".age"));
    }

    #[test]
    fn construction_rejects_duplicate_keys() {
        let err = FormSchema::new()
            .text("a", "")
            .text(".a", "")
            .build()
            .unwrap_err();
        assert_eq!(err, FormError::DuplicateField { name: ".a".into() });
    }

    #[test]
    fn field_records_first_access_once() {
        let mut form = names();
        form.field(".lastName").unwrap();
        form.field(".firstName").unwrap();
        form.field(".lastName").unwrap();
        assert_eq!(form.field_order(), &[".lastName", ".firstName"]);
    }

    #[test]
    fn missing_field_is_an_error() {
        let mut form = names();
        assert_eq!(
            form.field("missing").unwrap_err(),
            FormError::FieldNotFound {
                name: "missing".into()
            }
        );
        assert!(form.field_order().is_empty());
        assert!(form.value("missing").is_err());
    }

    #[test]
    fn values_round_trip_seed() {
        let form = names();
        let values: Vec<_> = form.values().into_iter().collect();
        assert_eq!(
            values,
            vec![
                (String::from(".firstName"), FieldValue::from("")),
                (String::from(".lastName"), FieldValue::from("Doe")),
            ]
        );
    }

    #[test]
    fn validate_reports_per_field_errors() {
        let mut form = names();
        form.field(".firstName")
            .unwrap()
            .set_validator(Rules::new().min_length(3));
        assert!(!form.validate());
        assert_eq!(
            form.get(".firstName").unwrap().errors(),
            &["must be at least 3 characters"]
        );
        assert!(form.get(".lastName").unwrap().errors().is_empty());
        assert!(form.get(".lastName").unwrap().is_valid());
    }

    #[test]
    fn first_error_uses_access_order() {
        let mut form = FormSchema::new()
            .text("a", "ok")
            .text("b", "")
            .text("c", "")
            .build()
            .unwrap();
        for (key, y) in [(".c", 100.0), (".a", 0.0), (".b", 50.0)] {
            let field = form.field(key).unwrap();
            field.set_validator(Rules::new().required());
            field.set_bounds(Rect::new(0.0, y, 10.0, y + 10.0));
        }
        assert!(!form.validate());
        assert_eq!(form.first_error_field(), Some(".c"));
        assert_eq!(form.first_error_bounds(), Rect::new(0.0, 100.0, 10.0, 110.0));
    }

    #[test]
    fn first_error_bounds_zero_without_errors() {
        let mut form = names();
        form.field(".firstName").unwrap();
        assert!(form.validate());
        assert_eq!(form.first_error_bounds(), Rect::ZERO);
    }

    #[test]
    fn handle_validation_merges_and_skips_unknown() {
        let mut form = names();
        let valid = form.handle_validation([
            (".firstName", "required"),
            (".firstName", "required"),
            (".nope", "ignored"),
        ]);
        assert!(!valid);
        let first = form.get(".firstName").unwrap();
        assert_eq!(first.errors(), &["required"]);
        assert!(!first.is_valid());
        assert!(!form.handle_validation(Vec::<(&str, &str)>::new()));
    }

    #[test]
    fn apply_schema_routes_by_path() {
        let mut form = names();
        let schema = |values: &FormValues| {
            let mut result = ValidationResult::valid();
            if values.get(".firstName").is_some_and(|v| !v.is_filled()) {
                result.push(ValidationError::new(".firstName", "required"));
            }
            result
        };
        assert!(!form.apply_schema(&schema));
        assert_eq!(form.get(".firstName").unwrap().errors(), &["required"]);

        form.field(".firstName").unwrap().on_value_change("Ann").unwrap();
        // No validator attached: validation clears the merged error.
        assert!(form.validate());
        assert!(form.apply_schema(&schema));
    }

    #[test]
    fn blurred_errors_filters_untouched_and_focused() {
        let mut form = FormSchema::new()
            .text("a", "")
            .text("b", "")
            .text("c", "")
            .build()
            .unwrap();
        let a = form.field(".a").unwrap();
        a.on_focus_change(true);
        a.on_focus_change(false);
        form.field(".b").unwrap().on_focus_change(true);

        let result: ValidationResult = [".a", ".b", ".c", ".zzz"]
            .into_iter()
            .map(|k| ValidationError::new(k, "required"))
            .collect();
        let blurred = form.blurred_errors(&result);
        assert_eq!(blurred.errors(), &[ValidationError::new(".a", "required")]);
    }
}
