//! Vidmeta Core
//!
//! Core types and helpers for the vidmeta client.
//!
//! This crate contains:
//! - Domain types: Jobs, generated outputs, preferences, usage
//! - DTOs: Wire shapes exchanged with the metadata backend
//! - Validation: Input checks applied before any request is made
//! - Export: Rendering generated outputs for copy/download

pub mod domain;
pub mod dto;
pub mod export;
pub mod validation;
