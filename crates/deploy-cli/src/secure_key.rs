use eyre::{Context, Result};
use std::env;

#[derive(Debug, PartialEq, Eq)]
pub enum KeySource {
    Environment(String),
    File(String),
    Literal(String),
    Interactive,
}

impl KeySource {
    pub fn from_arg(key_arg: Option<String>) -> Self {
        match key_arg {
            Some(key) => {
                if let Some(var_name) = key.strip_prefix("env:") {
                    Self::Environment(var_name.to_string())
                } else if let Some(path) = key.strip_prefix("file:") {
                    Self::File(path.to_string())
                } else {
                    log::warn!("Using a plain private key; prefer 'env:VAR_NAME' or 'file:/path/to/key'");
                    Self::Literal(key)
                }
            }
            None => Self::Interactive,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::Environment(var_name) => env::var(var_name)
                .with_context(|| format!("Environment variable {var_name} not found")),
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read private key from file: {path}"))
                .map(|s| s.trim().to_string()),
            Self::Literal(key) => Ok(key.clone()),
            Self::Interactive => rpassword::prompt_password("Enter private key (hidden): ")
                .context("Failed to read private key"),
        }
    }
}

pub fn get_private_key(key_arg: Option<String>) -> Result<String> {
    KeySource::from_arg(key_arg).resolve()
}
