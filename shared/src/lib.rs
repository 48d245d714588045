pub mod adapters;
pub mod configuration;
pub mod core;
pub mod error;
pub mod item;
pub mod record;
pub mod utils;
