//! HTTP Response domain types

mod result;

pub use result::{
    CONNECTION_ERROR, HTTP_ERROR, NO_BODY_CONTENT, Outcome, REQUEST_FAILED, RequestResult,
    sentinel,
};
