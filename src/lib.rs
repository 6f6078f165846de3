pub mod azure;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod util;
