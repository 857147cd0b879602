//! bdcv library
//!
//! Exposes the cache, dictionary client, renderer and lookup pipeline so the
//! binary and the integration tests share them.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod ui;
