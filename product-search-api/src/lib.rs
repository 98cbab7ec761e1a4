//! # Product Search API
//!
//! HTTP surface for product search: an Axum router exposing
//! `GET /api/v1/products/search` and `GET /health` on top of
//! [`product_search_repository::ProductSearchService`].

pub mod config;
pub mod server;
