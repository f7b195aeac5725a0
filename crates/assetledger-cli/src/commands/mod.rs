pub mod asset;
pub mod config;
