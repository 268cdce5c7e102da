//! Domain Models

pub mod config;
