// src/handlers/mod.rs
pub mod commodities;
pub mod error;
pub mod explorer;
pub mod filtered;
pub mod metrics;
pub mod navigation;
pub mod sentiment;
