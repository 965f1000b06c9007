pub mod cli;
pub mod config;
pub mod data_paths;
pub mod exchange;
pub mod logging;
pub mod positions;
pub mod session;
