pub mod errors;
pub mod filesystem;
pub mod polling;
pub mod requests;
pub mod settings;
pub mod types;

pub mod description;
pub mod puzzle;
pub mod telemetry;
