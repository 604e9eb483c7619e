//! Quotagate - Rate-Limited Registration Client
//!
//! This crate implements a client for document-registration APIs that enforce
//! a request quota per time window. Submissions pass through an admission
//! controller that blocks once the window's capacity is exhausted; a periodic
//! ticker restores full capacity at the start of each window.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod submit;
