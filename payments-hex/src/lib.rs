//! # Payments Hex
//!
//! Application service layer and HTTP adapter for the payments service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates the store and the Order service)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: PaymentRepository` and `O: OrderGateway`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{Enrichment, PaymentService};
