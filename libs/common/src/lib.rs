//! Common library for the hoots workspace
//!
//! This crate provides the wire models shared by the client and the stub
//! API, durable token storage for the client session, client configuration,
//! and the error types that go with them.

pub mod config;
pub mod error;
pub mod models;
pub mod storage;
