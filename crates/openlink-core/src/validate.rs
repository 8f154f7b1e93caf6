//! Validation plumbing shared by every builder.
//!
//! A builder implements [`Build::validate`] once, generic over an
//! [`ErrorSink`]. The sink decides what a missing field means:
//! - [`FailFast`] stops at the first problem with a [`BuildError`]
//! - `Vec<String>` records the diagnostic and carries on
//!
//! Because both modes run the same routine, the check order is identical.

use std::convert::Infallible;

use crate::error::BuildError;

/// A mandatory-field rule and the two ways of reporting its absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Strict-mode message, e.g. `The call id has not been set`.
    pub not_set: &'static str,
    /// Diagnostic-mode message, e.g. `Invalid call status; missing call id is mandatory`.
    pub missing: &'static str,
}

impl Requirement {
    /// Creates a requirement from its strict and diagnostic messages.
    pub const fn new(not_set: &'static str, missing: &'static str) -> Self {
        Self { not_set, missing }
    }
}

/// Receives unmet requirements during validation.
pub trait ErrorSink {
    /// The error that aborts validation; `Infallible` for collecting sinks.
    type Error;

    /// Reports one unmet requirement.
    fn report(&mut self, requirement: &Requirement) -> Result<(), Self::Error>;

    /// Reports `requirement` unless `present` holds.
    fn check(&mut self, present: bool, requirement: &Requirement) -> Result<(), Self::Error> {
        if present {
            Ok(())
        } else {
            self.report(requirement)
        }
    }
}

/// Sink that fails on the first unmet requirement.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl ErrorSink for FailFast {
    type Error = BuildError;

    fn report(&mut self, requirement: &Requirement) -> Result<(), BuildError> {
        Err(BuildError::NotSet(requirement.not_set))
    }
}

impl ErrorSink for Vec<String> {
    type Error = Infallible;

    fn report(&mut self, requirement: &Requirement) -> Result<(), Infallible> {
        self.push(requirement.missing.to_string());
        Ok(())
    }
}

/// The two-mode finalization surface of every builder.
///
/// Implementors provide the validation routine and an `assemble` step that
/// copies the current builder state into a new value, so later builder
/// mutation never reaches an already built value.
pub trait Build {
    /// The value produced by this builder.
    type Output;

    /// Checks mandatory fields in declaration order.
    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error>;

    /// Copies the builder state into a value without validating it.
    fn assemble(&self) -> Self::Output;

    /// Builds the value, failing on the first missing mandatory field.
    fn build(&self) -> Result<Self::Output, BuildError> {
        self.validate(&mut FailFast)?;
        Ok(self.assemble())
    }

    /// Builds a best-effort value, appending one message per missing field.
    fn build_with_diagnostics(&self, diagnostics: &mut Vec<String>) -> Self::Output {
        let Ok(()) = self.validate(diagnostics);
        self.assemble()
    }
}
