pub mod args;
pub mod config;
pub mod currency;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod report;
