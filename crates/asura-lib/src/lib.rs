pub mod error;
pub mod models;
pub mod reader;
pub mod utils;
