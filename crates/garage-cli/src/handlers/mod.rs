pub mod backup;
pub mod config;
pub mod daemon;
pub mod export;
pub mod import;
