pub mod components;
pub mod config;
pub mod content;
pub mod error;
pub mod model;
pub mod state;
pub mod util;
