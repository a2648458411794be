//! Mergington High School activities service
//!
//! HTTP API for listing extracurricular activities and signing students up
//! or off, plus the static front-end that drives it.

pub mod activities;
pub mod api;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod mirror;
pub mod server;
