//! CSRF-aware dispatch for partial page updates.
//!
//! The update flow follows the server-rendered model: the client fetches
//! HTML fragments and posts urlencoded forms, and every request passes
//! through an explicitly registered interceptor chain before transmission.
//! The anti-forgery interceptor is one such link; hosts register their own
//! alongside it.

mod client;
mod csrf;
mod request;

pub use client::{Fragment, UpdateClient};
pub use csrf::{CSRF_FIELD, CSRF_HEADER, CsrfInterceptor, CsrfToken};
pub use request::{PendingRequest, RequestInterceptor, RequestMethod};
