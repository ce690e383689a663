// src/services/mod.rs
pub mod aggregate;
pub mod calculations;
pub mod formatter;
pub mod loader;
pub mod sentiment;
pub mod store;
pub mod views;
