//! HTTP Request domain types

mod auth;
mod method;
mod spec;

pub use auth::BasicAuth;
pub use method::HttpMethod;
pub use spec::ApiRequest;
