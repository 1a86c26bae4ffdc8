pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod interactive;
pub mod middleware;
pub mod models;
pub mod services;
