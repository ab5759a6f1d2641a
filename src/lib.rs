pub mod auth;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod sections;
pub mod seed;
pub mod server;
pub mod storage;
