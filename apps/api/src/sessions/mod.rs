//! Session persistence endpoints — thin handlers over the `SessionStore`.

pub mod handlers;
