pub mod config;
pub mod errors;
pub mod models;
pub mod fixture;
pub mod banner;
pub mod api;
