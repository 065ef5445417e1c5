use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

use crate::{
    dictionary::http::DEFAULT_API_URL,
    game::{GameRules, ScoringScope, BOARD_SIZE, DEFAULT_RACK_SIZE},
};

/// A rack never needs to hold more tiles than fit across the board
pub const MAX_RACK_SIZE: usize = BOARD_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dictionary: DictionaryConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub api_url: String,
    /// Without a key the offline word list is used
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub word_list_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub rack_size: usize,
    pub scoring_scope: ScoringScope,
    pub session_idle_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let dictionary = DictionaryConfig {
            api_url: env::var("DICTIONARY_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: env::var("DICTIONARY_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            timeout_secs: env::var("DICTIONARY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DICTIONARY_TIMEOUT_SECS must be a number")?,
            word_list_path: env::var("DICTIONARY_PATH")
                .unwrap_or_else(|_| "./dictionary.txt".to_string()),
        };

        let game = GameConfig {
            rack_size: parse_rack_size(
                &env::var("RACK_SIZE").unwrap_or_else(|_| DEFAULT_RACK_SIZE.to_string()),
            )?,
            scoring_scope: env::var("SCORING_SCOPE")
                .unwrap_or_else(|_| "whole_board".to_string())
                .parse::<ScoringScope>()
                .map_err(anyhow::Error::msg)
                .context("SCORING_SCOPE must be whole_board or new_words")?,
            session_idle_secs: env::var("SESSION_IDLE_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse()
                .context("SESSION_IDLE_SECS must be a number")?,
        };

        Ok(Config {
            server,
            dictionary,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            rack_size: self.game.rack_size,
            scoring_scope: self.game.scoring_scope,
        }
    }
}

fn parse_rack_size(raw: &str) -> Result<usize> {
    let size: usize = raw.trim().parse().context("RACK_SIZE must be a number")?;
    if !(1..=MAX_RACK_SIZE).contains(&size) {
        bail!("RACK_SIZE must be between 1 and {}, got {}", MAX_RACK_SIZE, size);
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            dictionary: DictionaryConfig {
                api_url: DEFAULT_API_URL.to_string(),
                api_key: None,
                timeout_secs: 10,
                word_list_path: "./dictionary.txt".to_string(),
            },
            game: GameConfig {
                rack_size: 7,
                scoring_scope: ScoringScope::NewWords,
                session_idle_secs: 60,
            },
        }
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(config().server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_rules_from_config() {
        let rules = config().rules();
        assert_eq!(rules.rack_size, 7);
        assert_eq!(rules.scoring_scope, ScoringScope::NewWords);
    }

    #[test]
    fn test_rack_size_range() {
        assert_eq!(parse_rack_size("7").unwrap(), 7);
        assert_eq!(parse_rack_size(" 15 ").unwrap(), MAX_RACK_SIZE);
        assert!(parse_rack_size("0").is_err());
        assert!(parse_rack_size("16").is_err());
        assert!(parse_rack_size("100000000000").is_err());
        assert!(parse_rack_size("seven").is_err());
    }
}
