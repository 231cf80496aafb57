//! `themeconf` core: configuration schema and error types
//!
//! This crate provides the theme configuration types and error types shared
//! by the loader and CLI (`themeconf`) and by downstream build tooling that
//! only needs to consume an already-resolved configuration.

pub mod config;
pub mod error;
