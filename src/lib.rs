pub mod analyzers;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod report;
pub mod services;
pub mod stations;
pub mod web;
