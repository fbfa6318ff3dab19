// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-field state: value, interaction flags, errors, and layout bounds.
//!
//! A [`Field`] is driven by three kinds of host events:
//!
//! - [`Field::on_value_change`] when the user edits the input,
//! - [`Field::on_focus_change`] when the input gains or loses focus,
//! - [`Field::set_bounds`] when layout places the input on screen.
//!
//! ## Interaction state
//!
//! ```text
//! Untouched --focus--> Touched+Focused --blur--> Touched+Blurred
//!                            ^                        |
//!                            +---------focus----------+
//! ```
//!
//! Validation runs on every Focused→Blurred edge, on every value change while
//! errors are showing, and on explicit [`Field::validate`] calls.
//!
//! ## Errors
//!
//! Failing validations accumulate messages (de-duplicated by text) until a
//! validation passes, which clears them. A field without a validator is
//! considered valid: validating it clears any errors.
//!
//! ## Observation
//!
//! Every state change bumps [`Field::revision`] and is reported to listeners
//! registered with [`Field::subscribe`], once per host event, after the event
//! has been fully applied.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::error::FormError;
use crate::validation::{ValidationResult, Validator};
use crate::value::{FieldKind, FieldValue};

bitflags::bitflags! {
    /// Which parts of a field's state changed during one host event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FieldChanges: u8 {
        /// The value was replaced.
        const VALUE     = 0b0000_0001;
        /// The field became dirty.
        const DIRTY     = 0b0000_0010;
        /// Focus was gained or lost.
        const FOCUS     = 0b0000_0100;
        /// The field became touched.
        const TOUCHED   = 0b0000_1000;
        /// The error list changed.
        const ERRORS    = 0b0001_0000;
        /// The validity flag flipped.
        const VALIDITY  = 0b0010_0000;
        /// New layout bounds were recorded.
        const BOUNDS    = 0b0100_0000;
        /// The validator was replaced or removed.
        const VALIDATOR = 0b1000_0000;
    }
}

/// A change callback: receives the field key and what changed.
pub type FieldListener = Box<dyn FnMut(&str, FieldChanges)>;

/// The state of a single form input.
pub struct Field {
    name: String,
    kind: FieldKind,
    value: FieldValue,
    is_dirty: bool,
    is_touched: bool,
    has_focus: bool,
    is_valid: bool,
    errors: SmallVec<[String; 2]>,
    bounds: Rect,
    validator: Option<Box<dyn Validator>>,
    revision: u64,
    listeners: SmallVec<[FieldListener; 1]>,
}

impl Field {
    /// Creates a field seeded with `value`.
    ///
    /// The field starts dirty if `value` is filled (see
    /// [`FieldValue::is_filled`]), untouched, unfocused, not yet valid, with no
    /// errors, zero bounds and no validator.
    ///
    /// # Errors
    ///
    /// [`FormError::TypeMismatch`] if `value` does not fit `kind`.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        value: impl Into<FieldValue>,
    ) -> Result<Self, FormError> {
        let name = name.into();
        let value = value.into();
        check_kind(&name, kind, &value)?;
        Ok(Self {
            name,
            kind,
            is_dirty: value.is_filled(),
            value,
            is_touched: false,
            has_focus: false,
            is_valid: false,
            errors: SmallVec::new(),
            bounds: Rect::ZERO,
            validator: None,
            revision: 0,
            listeners: SmallVec::new(),
        })
    }

    /// The registered key, e.g. `.email`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// `true` once something has been entered. Never reset.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// `true` once the field has gained focus.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.is_touched
    }

    /// `true` while the field is focused.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Result of the last validation. `false` until the first one.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// `true` if any error is recorded.
    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Recorded error messages, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Last bounds reported by layout, or [`Rect::ZERO`].
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// `true` if a validator is attached.
    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Counter bumped on every state change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Handles a user edit.
    ///
    /// Marks the field dirty for good. If errors are showing, re-validates
    /// right away so they clear as soon as the input is fixed; otherwise
    /// validation waits for blur or submit.
    ///
    /// # Errors
    ///
    /// [`FormError::TypeMismatch`] if `value` does not fit the field's kind.
    /// The field is left untouched in that case.
    pub fn on_value_change(&mut self, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into();
        check_kind(&self.name, self.kind, &value)?;

        let mut changes = FieldChanges::empty();
        if self.value != value {
            self.value = value;
            changes |= FieldChanges::VALUE;
        }
        if !self.is_dirty {
            self.is_dirty = true;
            changes |= FieldChanges::DIRTY;
        }
        if self.has_error() {
            changes |= self.run_validation();
        }
        self.commit(changes);
        Ok(())
    }

    /// Handles a focus report from the host.
    ///
    /// Gaining focus marks the field touched. Losing focus validates, once per
    /// blur. Repeated reports of the current state do nothing.
    pub fn on_focus_change(&mut self, focused: bool) {
        if self.has_focus == focused {
            return;
        }
        self.has_focus = focused;
        let mut changes = FieldChanges::FOCUS;
        if focused {
            if !self.is_touched {
                self.is_touched = true;
                changes |= FieldChanges::TOUCHED;
            }
        } else if self.is_touched {
            changes |= self.run_validation();
        }
        self.commit(changes);
    }

    /// Runs the attached validator against the current value.
    ///
    /// Without a validator the field is treated as valid and its errors are
    /// cleared.
    pub fn validate(&mut self) {
        let changes = self.run_validation();
        self.commit(changes);
    }

    /// Records the field's on-screen rectangle. The latest report wins.
    pub fn set_bounds(&mut self, rect: Rect) {
        if self.bounds != rect {
            self.bounds = rect;
            self.commit(FieldChanges::BOUNDS);
        }
    }

    /// Attaches `validator`, replacing any previous one. Does not validate.
    pub fn set_validator(&mut self, validator: impl Validator + 'static) {
        self.validator = Some(Box::new(validator));
        self.commit(FieldChanges::VALIDATOR);
    }

    /// Detaches the validator. Does not validate.
    pub fn clear_validator(&mut self) {
        if self.validator.take().is_some() {
            self.commit(FieldChanges::VALIDATOR);
        }
    }

    /// Registers a change callback.
    ///
    /// Listeners run synchronously, in registration order, after each host
    /// event that changed something.
    pub fn subscribe(&mut self, listener: impl FnMut(&str, FieldChanges) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Records an externally computed error.
    pub(crate) fn push_error(&mut self, message: &str) {
        let mut changes = FieldChanges::empty();
        if self.add_error(message) {
            changes |= FieldChanges::ERRORS;
        }
        if self.is_valid {
            self.is_valid = false;
            changes |= FieldChanges::VALIDITY;
        }
        self.commit(changes);
    }

    fn add_error(&mut self, message: &str) -> bool {
        if self.errors.iter().any(|e| e == message) {
            return false;
        }
        self.errors.push(message.into());
        true
    }

    fn run_validation(&mut self) -> FieldChanges {
        let mut changes = FieldChanges::empty();
        let result = match &self.validator {
            Some(validator) => validator.validate(&self.value),
            None => ValidationResult::valid(),
        };

        if result.is_valid() {
            if !self.errors.is_empty() {
                self.errors.clear();
                changes |= FieldChanges::ERRORS;
            }
        } else {
            for error in result.errors() {
                if self.add_error(&error.message) {
                    changes |= FieldChanges::ERRORS;
                }
            }
        }

        let valid = self.errors.is_empty();
        if self.is_valid != valid {
            self.is_valid = valid;
            changes |= FieldChanges::VALIDITY;
        }
        tracing::trace!(field = %self.name, valid, errors = self.errors.len(), "validated");
        changes
    }

    fn commit(&mut self, changes: FieldChanges) {
        if changes.is_empty() {
            return;
        }
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&self.name, changes);
        }
    }
}

fn check_kind(name: &str, kind: FieldKind, value: &FieldValue) -> Result<(), FormError> {
    match value.kind() {
        Some(found) if found != kind => Err(FormError::TypeMismatch {
            name: name.into(),
            expected: kind,
            found,
        }),
        _ => Ok(()),
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("is_dirty", &self.is_dirty)
            .field("is_touched", &self.is_touched)
            .field("has_focus", &self.has_focus)
            .field("is_valid", &self.is_valid)
            .field("errors", &self.errors)
            .field("bounds", &self.bounds)
            .field("has_validator", &self.validator.is_some())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
