use std::env;
use std::fs;
use std::path::Path;

use crate::domain::{default_config, validate_config, DeckConfig};
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Runtime settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by CORS; empty means localhost only.
    pub cors_allowed_origins: Vec<String>,
    /// Deck used for games created without an explicit deck.
    pub default_deck: DeckConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: Vec::new(),
            default_deck: default_config(),
        }
    }
}

impl ServerConfig {
    /// Reads `BACKEND_HOST`, `BACKEND_PORT`, `CORS_ALLOWED_ORIGINS` and
    /// `TILEGAME_DECK_FILE`.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };
        let cors_allowed_origins =
            parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
        let default_deck = match env::var("TILEGAME_DECK_FILE") {
            Ok(path) if !path.trim().is_empty() => load_deck_file(Path::new(path.trim()))?,
            _ => default_config(),
        };

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            default_deck,
        })
    }
}

/// Comma-separated origins; empty entries, `null` and non-http(s) values
/// are dropped.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// JSON object of tile code to count, e.g. `{"CFRF": 3, "RRFF": 5}`.
pub fn load_deck_file(path: &Path) -> Result<DeckConfig, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("cannot read deck file {}: {e}", path.display()))
    })?;
    let deck: DeckConfig = serde_json::from_str(&raw).map_err(|e| {
        AppError::config(format!("deck file {} is not valid: {e}", path.display()))
    })?;
    validate_config(&deck).map_err(|e| AppError::config(e.to_string()))?;
    Ok(deck)
}
