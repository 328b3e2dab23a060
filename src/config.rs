use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// One selectable option in a single-choice group (stored value + label).
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub api: ApiConfig,
    pub profile: ProfileConfig,
    pub verification: VerificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    pub subtitle: String,
    /// Demo mode - simulates the platform with fixed delays and no traffic
    pub demo: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Vantage".to_string(),
            subtitle: "AI-powered financial analysis".to_string(),
            demo: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub dashboard_url: String,
    /// Per-action timeout; expiry is treated as an ordinary action failure
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.vantage.example".to_string(),
            dashboard_url: "https://app.vantage.example/dashboard".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Choice catalogs for the investment-profile step.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub experience: Vec<ChoiceOption>,
    pub risk_tolerance: Vec<ChoiceOption>,
    pub goals: Vec<String>,
    pub income_ranges: Vec<ChoiceOption>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            experience: vec![
                ChoiceOption::new("beginner", "Beginner (Less than 1 year)"),
                ChoiceOption::new("intermediate", "Intermediate (1-5 years)"),
                ChoiceOption::new("experienced", "Experienced (5+ years)"),
            ],
            risk_tolerance: vec![
                ChoiceOption::new("conservative", "Conservative - Minimal risk, stable returns"),
                ChoiceOption::new("moderate", "Moderate - Balanced risk and return"),
                ChoiceOption::new("aggressive", "Aggressive - Higher risk, higher potential returns"),
            ],
            goals: vec![
                "Retirement Planning".to_string(),
                "Wealth Building".to_string(),
                "Income Generation".to_string(),
                "Short-term Gains".to_string(),
                "Portfolio Diversification".to_string(),
            ],
            income_ranges: vec![
                ChoiceOption::new("under-50k", "Under $50,000"),
                ChoiceOption::new("50k-100k", "$50,000 - $100,000"),
                ChoiceOption::new("100k-250k", "$100,000 - $250,000"),
                ChoiceOption::new("250k-500k", "$250,000 - $500,000"),
                ChoiceOption::new("over-500k", "Over $500,000"),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    pub code_length: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self { code_length: 6 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, crate::error::VantageError> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::VantageError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vantage").join("signup.toml"))
    }
}
