// homescout - server core
//
// Serves the curated whitelist and the blacklist mutation endpoint. The
// one-shot scrape binary shares the same environment configuration.

pub mod config;
pub mod server;

pub use config::*;
