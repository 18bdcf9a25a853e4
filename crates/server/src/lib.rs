// taskboard-server: in-memory task store served over a small JSON API.

pub mod api;
pub mod app;
pub mod config;
pub mod cors;
pub mod error;
pub mod store;
pub mod validation;
