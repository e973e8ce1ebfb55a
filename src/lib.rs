//! Drinks API Library
//!
//! This library provides the core functionality for the Drinks API,
//! including the drink domain, repositories, token validation and the
//! HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
