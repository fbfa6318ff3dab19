// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_form --heading-base-level=0

//! Understory Form: form state primitives.
//!
//! This crate does the _bookkeeping_ of a form: what each input holds, whether
//! the user has edited or visited it, which validation messages it shows, and
//! where it sits on screen. It does not render anything and does not decide
//! what makes a value valid; hosts feed it UI events and plug validators in.
//!
//! The two core types are:
//!
//! - [`Field`]: one input's state (value, dirty/touched/focus flags, validity,
//!   error messages, layout bounds, and an optional [`Validator`]).
//! - [`FormRegistry`]: the fixed set of fields for one form session, built
//!   from a declared [`FormSchema`] (or any [`FormData`] value), with bulk
//!   validation, value extraction, submission, and first-error lookup for
//!   scroll-to-error.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_form::{FieldValue, FormSchema, Rules};
//!
//! let mut form = FormSchema::new()
//!     .text("firstName", "")
//!     .text("lastName", "Doe")
//!     .build()
//!     .unwrap();
//!
//! // While rendering, the host fetches fields in on-screen order.
//! let first = form.field(".firstName").unwrap();
//! first.set_validator(Rules::new().min_length(3));
//! first.set_bounds(Rect::new(0.0, 0.0, 300.0, 48.0));
//! form.field(".lastName").unwrap().set_validator(Rules::new().min_length(3));
//!
//! // The user visits the first input and leaves it empty.
//! let first = form.field(".firstName").unwrap();
//! first.on_focus_change(true);
//! first.on_focus_change(false);
//! assert_eq!(first.errors(), ["must be at least 3 characters"]);
//!
//! // Fixing the input clears the message immediately.
//! first.on_value_change("Jane").unwrap();
//! assert!(first.errors().is_empty());
//!
//! let mut submitted = None;
//! assert!(form.handle_submit(|values| submitted = Some(values)));
//! let values = submitted.unwrap();
//! assert_eq!(values.get(".firstName"), Some(&FieldValue::from("Jane")));
//! ```
//!
//! ## Keys
//!
//! Field keys are property paths with a leading `.`: a `firstName` property
//! becomes `.firstName`, and a `city` property inside an `address` group
//! becomes `.address.city`. Keys are fixed when the registry is built.
//!
//! ## Validation
//!
//! Per-field validators run on blur, on edits while errors are showing, and
//! on [`FormRegistry::validate`] / [`FormRegistry::handle_submit`]. Whole-form
//! validators ([`SchemaValidator`]) can be applied with
//! [`FormRegistry::apply_schema`], or their output merged by hand with
//! [`FormRegistry::handle_validation`]. Failing validations accumulate
//! messages until one passes; a field without a validator counts as valid.
//!
//! ## Observation
//!
//! There is no reactive runtime. Hosts either poll [`Field::revision`] or
//! register a listener with [`Field::subscribe`], which reports a
//! [`FieldChanges`] set after each event.
//!
//! ## Errors
//!
//! Structural misuse (unknown keys, values of the wrong kind, duplicate
//! declarations) is reported as [`FormError`]. Validation failures are data
//! on the fields, never errors.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod field;
mod registry;
mod rules;
mod schema;
mod validation;
mod value;

pub use error::FormError;
pub use field::{Field, FieldChanges, FieldListener};
pub use registry::{FormRegistry, FormValues};
pub use rules::Rules;
pub use schema::{FieldDescriptor, FormData, FormSchema};
pub use validation::{SchemaValidator, ValidationError, ValidationResult, Validator};
pub use value::{Date, FieldKind, FieldValue};
