pub mod commands;
mod context;
pub mod steps;

pub use context::AppContext;
