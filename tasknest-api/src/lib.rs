//! # TaskNest API Server Library
//!
//! This library provides the core functionality for the TaskNest API
//! server: a JSON HTTP API for user profiles and the tasks they own,
//! with signed-cookie authentication.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
