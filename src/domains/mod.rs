//! Domains module containing business logic organized by bounded contexts.
//!
//! - **augment**: rewrites Python tool declarations to accept per-call credentials
//! - **auth**: builds validated authentication configurations from those credentials
//! - **docs**: generates the tool reference from exported schemas

pub mod augment;
pub mod auth;
pub mod docs;
