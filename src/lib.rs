pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod planner;
pub mod state;
