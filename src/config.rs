use serde::Deserialize;
use anyhow::Result;
use dotenvy::dotenv;

const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub max_file_size: usize,
    pub port: u16,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let max_file_size = match std::env::var("MAX_FILE_SIZE") {
            Ok(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid MAX_FILE_SIZE: {}", e))?,
            Err(_) => DEFAULT_MAX_FILE_SIZE,
        };

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT: {}", e))?,
            Err(_) => 3000,
        };

        Ok(Config {
            max_file_size,
            port,
        })
    }
}
