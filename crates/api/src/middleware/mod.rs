//! Request extractors shared by the handlers.
//!
//! - [`auth::CurrentUser`] -- the request's [`newsroom_core::identity::Identity`],
//!   taken from a Bearer token or the access-token cookie.

pub mod auth;
