//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

const DIR_PADRAO: &str = "./relatorios";
const BASE_URL_PADRAO: &str = "http://localhost:8080";

/// Where reports land on disk and how attachment links are prefixed.
#[derive(Debug, Clone)]
pub struct ReportsConfig {
    /// Directory where generated report files are written.
    pub reports_dir: PathBuf,
    /// Public base URL prepended to every attachment link.
    pub base_url: String,
}

impl ReportsConfig {
    /// Reads `RELATORIOS_DIR` and `RELATORIOS_BASE_URL`, falling back to
    /// the defaults. A `.env` file is honored when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            reports_dir: env::var("RELATORIOS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DIR_PADRAO)),
            base_url: env::var("RELATORIOS_BASE_URL")
                .unwrap_or_else(|_| BASE_URL_PADRAO.to_string()),
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from(DIR_PADRAO),
            base_url: BASE_URL_PADRAO.to_string(),
        }
    }
}
