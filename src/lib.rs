pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod geolocation;
pub mod photo;
pub mod store;
pub mod wizard;
