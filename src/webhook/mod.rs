//! Webhook transport layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Transport settings ([`TransportOptions`], [`CertificateVerification`])

mod client;
mod error;
mod http;


pub use client::{CertificateVerification, ReqwestClient, TransportOptions};
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
