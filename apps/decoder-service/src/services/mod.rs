//! HTTP handler implementations.
//!
//! This module contains the route handlers for the decoder service.

pub mod decode_service;
pub mod health_service;
