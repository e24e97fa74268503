//! Sale vocabulary loading from config.toml
//!
//! The sale form offers a closed list of sector names and payment methods. Both lists
//! live under `[catalog]` in config.toml; when the file is absent the built-in lists
//! are used. Stored sales are never validated against the catalog, it only feeds the
//! form defaults and the filter choices.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_SECTORS: [&str; 8] = [
    "SETOR PRETO",
    "SETOR VERMELHO",
    "VERMELHO SUPERIOR",
    "SETOR MARROM",
    "SETOR LARANJA",
    "SETOR AMARELO",
    "SETOR VERDE",
    "SETOR AZUL",
];

const DEFAULT_PAYMENT_METHODS: [&str; 12] = [
    "Nubank",
    "Infinite",
    "Itaú",
    "Bradesco",
    "Santander",
    "Caixa",
    "Banco do Brasil",
    "Inter",
    "C6 Bank",
    "PicPay",
    "Mercado Pago",
    "Outro",
];

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Sector and payment vocabularies
    #[serde(default)]
    pub catalog: Catalog,
}

/// The closed vocabularies offered by the sale form
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Sector names, in display order
    #[serde(default = "default_sectors")]
    pub sectors: Vec<String>,
    /// Payment method names, in display order
    #[serde(default = "default_payment_methods")]
    pub payment_methods: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            sectors: default_sectors(),
            payment_methods: default_payment_methods(),
        }
    }
}

impl Catalog {
    /// Sector preselected on a fresh sale form
    #[must_use]
    pub fn default_sector(&self) -> &str {
        self.sectors.first().map_or("", String::as_str)
    }

    /// Payment method preselected on a fresh sale form
    #[must_use]
    pub fn default_payment_method(&self) -> &str {
        self.payment_methods.first().map_or("", String::as_str)
    }

    /// Whether `sector` is one of the configured names (exact match)
    #[must_use]
    pub fn knows_sector(&self, sector: &str) -> bool {
        self.sectors.iter().any(|s| s == sector)
    }

    /// Whether `method` is one of the configured names (exact match)
    #[must_use]
    pub fn knows_payment_method(&self, method: &str) -> bool {
        self.payment_methods.iter().any(|m| m == method)
    }

    fn validate(&self) -> Result<()> {
        if self.sectors.is_empty() {
            return Err(Error::Config {
                message: "catalog.sectors cannot be empty".to_string(),
            });
        }
        if self.payment_methods.is_empty() {
            return Err(Error::Config {
                message: "catalog.payment_methods cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_sectors() -> Vec<String> {
    DEFAULT_SECTORS.iter().map(ToString::to_string).collect()
}

fn default_payment_methods() -> Vec<String> {
    DEFAULT_PAYMENT_METHODS.iter().map(ToString::to_string).collect()
}

/// Parses configuration from a TOML string
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a vocabulary list is empty
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.catalog.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A vocabulary list is present but empty
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path`, falling back to the built-in catalog when the file
/// does not exist. A file that exists but is invalid is still an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_config(path_ref)
    } else {
        info!(
            "No config file at {}, using built-in catalog",
            path_ref.display()
        );
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [catalog]
            sectors = ["NORTE", "SUL"]
            payment_methods = ["Pix", "Dinheiro"]
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.catalog.sectors, vec!["NORTE", "SUL"]);
        assert_eq!(config.catalog.default_sector(), "NORTE");
        assert_eq!(config.catalog.default_payment_method(), "Pix");
        assert!(config.catalog.knows_payment_method("Dinheiro"));
        assert!(!config.catalog.knows_payment_method("dinheiro"));
    }

    #[test]
    fn test_missing_lists_fall_back_to_defaults() {
        let config = parse_config("[catalog]\nsectors = [\"NORTE\"]\n").unwrap();
        assert_eq!(config.catalog.sectors, vec!["NORTE"]);
        assert_eq!(config.catalog.payment_methods.len(), 12);
        assert_eq!(config.catalog.default_payment_method(), "Nubank");

        let empty = parse_config("").unwrap();
        assert_eq!(empty.catalog, Catalog::default());
        assert_eq!(empty.catalog.default_sector(), "SETOR PRETO");
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let result = parse_config("[catalog]\nsectors = []\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = parse_config("[catalog\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("definitely/not/here/config.toml").unwrap();
        assert!(config.catalog.knows_sector("SETOR AZUL"));
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let result = load_config("definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
