pub mod compound;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod mortgage;
pub mod output;
pub mod state;
pub mod strategies;
