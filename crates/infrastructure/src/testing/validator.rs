//! Response validator implementation.
//!
//! Compares a [`RequestResult`] against a stored [`ExpectationDocument`] in
//! three steps: status code, headers, body schema. The first failing step
//! ends the validation.

use std::collections::{BTreeMap, HashMap};

use jsonschema::Validator;
use serde_json::Value;
use trackprobe_application::ports::{ExpectationError, ExpectationStore};
use trackprobe_application::ApplicationResult;
use trackprobe_domain::{
    ExpectationDocument, HeaderCheckMode, RequestResult, ValidationCheck, ValidationFailure,
};

const INLINE_EXPECTATION: &str = "<inline>";

/// Validates results against named expectations.
///
/// Holds no per-call state, so validating the same input twice gives the
/// same outcome.
#[derive(Debug, Clone)]
pub struct ResponseValidator<S> {
    store: S,
    header_mode: HeaderCheckMode,
}

impl<S: ExpectationStore> ResponseValidator<S> {
    /// Creates a validator with subset header semantics.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            header_mode: HeaderCheckMode::default(),
        }
    }

    /// Sets the header check semantics.
    #[must_use]
    pub const fn with_header_mode(mut self, mode: HeaderCheckMode) -> Self {
        self.header_mode = mode;
        self
    }

    /// Header check semantics in use.
    #[must_use]
    pub const fn header_mode(&self) -> HeaderCheckMode {
        self.header_mode
    }

    /// Loads the expectation `name` and checks `actual` against it.
    ///
    /// # Errors
    /// Returns `ApplicationError::Expectation` if the expectation cannot be
    /// loaded or its schema does not compile, and
    /// `ApplicationError::Validation` on the first mismatching check.
    pub fn validate(&self, actual: &RequestResult, name: &str) -> ApplicationResult<()> {
        let expected = self.store.load(name)?;
        self.check_named(actual, &expected, name)
    }

    /// Checks `actual` against an already loaded expectation.
    ///
    /// # Errors
    /// Same as [`Self::validate`], minus loading.
    pub fn check(&self, actual: &RequestResult, expected: &ExpectationDocument) -> ApplicationResult<()> {
        self.check_named(actual, expected, INLINE_EXPECTATION)
    }

    fn check_named(
        &self,
        actual: &RequestResult,
        expected: &ExpectationDocument,
        name: &str,
    ) -> ApplicationResult<()> {
        let schema = compile_schema(name, &expected.body)?;
        check_status_code(actual, expected.status_code)?;
        self.check_headers(actual, expected)?;
        check_body(actual, &expected.body, &schema)?;
        Ok(())
    }

    fn check_headers(
        &self,
        actual: &RequestResult,
        expected: &ExpectationDocument,
    ) -> Result<(), ValidationFailure> {
        tracing::debug!("Actual headers: {:?}", actual.headers);
        tracing::debug!("Expected headers: {:?}", expected.headers);

        match self.header_mode {
            HeaderCheckMode::SelfCompare => {
                tracing::debug!("header check skipped: mode is {}", self.header_mode);
                Ok(())
            }
            HeaderCheckMode::Subset => {
                let all_present = expected
                    .headers
                    .iter()
                    .all(|(name, value)| actual.header(name) == Some(value.as_str()));
                if all_present {
                    Ok(())
                } else {
                    Err(ValidationFailure::new(
                        ValidationCheck::Headers,
                        to_value(&expected.headers),
                        to_value(&actual.headers),
                    ))
                }
            }
        }
    }
}

fn compile_schema(name: &str, schema: &Value) -> Result<Validator, ExpectationError> {
    jsonschema::validator_for(schema).map_err(|e| ExpectationError::InvalidSchema {
        name: name.to_string(),
        message: e.to_string(),
    })
}

fn check_status_code(actual: &RequestResult, expected: u16) -> Result<(), ValidationFailure> {
    tracing::debug!("Actual status code: {}", actual.status_display());
    tracing::debug!("Expected status code: {expected}");

    if actual.status_code == Some(expected) {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCheck::StatusCode,
            Value::from(expected),
            actual.status_code.map_or(Value::Null, Value::from),
        ))
    }
}

fn check_body(actual: &RequestResult, schema: &Value, validator: &Validator) -> Result<(), ValidationFailure> {
    tracing::debug!("Actual body: {}", actual.body);
    tracing::debug!("Expected body: {schema}");

    let mut valid = true;
    for error in validator.iter_errors(&actual.body) {
        tracing::debug!("JSON validator error: {error}");
        valid = false;
    }
    if valid {
        Ok(())
    } else {
        Err(ValidationFailure::new(
            ValidationCheck::Body,
            schema.clone(),
            actual.body.clone(),
        ))
    }
}

fn to_value(headers: &HashMap<String, String>) -> Value {
    let sorted: BTreeMap<_, _> = headers.iter().collect();
    serde_json::to_value(sorted).unwrap_or(Value::Null)
}
