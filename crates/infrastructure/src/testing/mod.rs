//! Response validation infrastructure.
//!
//! This module provides the validator that checks results against stored expectations.

mod validator;

pub use validator::ResponseValidator;
