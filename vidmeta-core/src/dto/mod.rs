//! Data Transfer Objects for the metadata backend
//!
//! These are the shapes that travel over HTTP. Responses are decoded into
//! permissive raw structs first and then normalized into domain types, since
//! the backend is not consistent about field names.

pub mod job;
pub mod transcript;
