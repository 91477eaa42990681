// Public API - what other modules can use
pub use handlers::handle_action;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod rest;
pub mod service;
pub mod types;
