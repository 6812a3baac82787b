//! Domain core for the news and notes sites.
//!
//! Everything here is pure: no I/O, no shared state. The store and HTTP
//! layers call into these modules to decide visibility, ownership, and
//! payload acceptance.

pub mod error;
pub mod guard;
pub mod identity;
pub mod listing;
pub mod policy;
pub mod slug;
pub mod types;
pub mod validation;
