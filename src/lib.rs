//! Typed Discord REST client
//!
//! Remote resources are modeled as entities bound to a shared
//! [`ClientContext`]. Every operation compiles a [`route::Route`] template
//! and dispatches it through a [`rest::RestClient`].

pub mod adapters;
pub mod cache;
pub mod context;
pub mod entity;
pub mod model;
pub mod params;
pub mod rest;
pub mod route;

pub use context::ClientContext;
