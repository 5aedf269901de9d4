pub mod config;
pub mod renderer;
pub mod replay;
pub mod terminal;
