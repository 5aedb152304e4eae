//! Server configuration from the environment.
//!
//! The API key comes from `DEEPSEEK_API_KEY`, or failing that from a file
//! named `APIKEY` next to the process working directory. Everything else
//! has a sensible default; malformed numeric values are reported rather
//! than silently replaced.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_STACK: u32 = 2000;
pub const DEFAULT_SMALL_BLIND: u32 = 10;
pub const DEFAULT_BIG_BLIND: u32 = 20;
pub const DEFAULT_MAX_ROOMS: usize = 128;

const API_KEY_FILE: &str = "APIKEY";

#[derive(Clone, Debug)]
pub struct Settings {
    pub deepseek_api_key: Option<String>,
    pub deepseek_model: String,
    pub deepseek_url: String,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub max_rooms: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            deepseek_api_key: None,
            deepseek_model: DEFAULT_MODEL.to_string(),
            deepseek_url: DEFAULT_URL.to_string(),
            starting_stack: DEFAULT_STACK,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            max_rooms: DEFAULT_MAX_ROOMS,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let api_key = env::var("DEEPSEEK_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| read_api_key_file(Path::new(API_KEY_FILE)));
        Ok(Settings {
            deepseek_api_key: api_key,
            deepseek_model: env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            deepseek_url: env::var("DEEPSEEK_API_URL").unwrap_or_else(|_| DEFAULT_URL.into()),
            starting_stack: env_parsed("DEFAULT_STACK", DEFAULT_STACK)?,
            small_blind: env_parsed("DEFAULT_SMALL_BLIND", DEFAULT_SMALL_BLIND)?,
            big_blind: env_parsed("DEFAULT_BIG_BLIND", DEFAULT_BIG_BLIND)?,
            max_rooms: env_parsed("MAX_ROOMS", DEFAULT_MAX_ROOMS)?,
        })
    }
}

fn env_parsed<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("parsing environment variable {}='{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn read_api_key_file(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
