use anyhow::Context;
use std::env;

#[derive(Debug)]
pub struct Config {
    pub database_url: String,
    pub http_address: String,
}

impl Config {
    pub fn new() -> anyhow::Result<Config> {
        _ = dotenvy::dotenv();

        Ok(Config {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL is required.")?,
            http_address: env::var("HTTP_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }
}
