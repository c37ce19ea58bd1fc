use rust_decimal::Decimal;

/// Report configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|--------|------|
/// | CATALOG_PATH | catalog.json | product/menu catalog file |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | (none) | log directory; daily rolling file when set |
/// | LOW_STOCK_THRESHOLD | 0 | default low stock threshold (stock unit) |
/// | ENVIRONMENT | development | runtime environment |
///
/// # Example
///
/// ```ignore
/// CATALOG_PATH=/data/catalog.json LOW_STOCK_THRESHOLD=500 cargo run --bin menu-report
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog file path
    pub catalog_path: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Used when a product has no threshold of its own
    pub low_stock_threshold: Decimal,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.json".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<Decimal>().ok())
                .filter(|v| !v.is_sign_negative())
                .unwrap_or(Decimal::ZERO),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override selected values
    ///
    /// Mostly used by tests
    pub fn with_overrides(catalog_path: impl Into<String>, low_stock_threshold: Decimal) -> Self {
        let mut config = Self::from_env();
        config.catalog_path = catalog_path.into();
        config.low_stock_threshold = low_stock_threshold;
        config
    }

    /// Running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
