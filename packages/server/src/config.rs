use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub sources_file: String,
    pub listings_file: String,
    pub cities: Vec<String>,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            sources_file: env::var("SOURCES_FILE")
                .unwrap_or_else(|_| "websites.json".to_string()),
            listings_file: env::var("LISTINGS_FILE")
                .unwrap_or_else(|_| "list.json".to_string()),
            cities: env::var("CITIES")
                .map(|raw| parse_cities(&raw))
                .unwrap_or_default(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }
}

fn parse_cities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
