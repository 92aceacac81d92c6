use contracts::domain::a002_kpi_targets::KpiTargets;
use contracts::system::users::TeamMember;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub admin_targets: AdminTargetsConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub admin_email: String,
    pub admin_id: String,
    pub admin_name: String,
    /// Used until a member (or the admin) stores a personal password
    pub default_password: String,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_min_password_length() -> usize {
    4
}

/// Per-seller targets used when nothing is stored yet
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TargetsConfig {
    pub mrr: f64,
    pub revenue: f64,
    pub conversion_rate: f64,
    pub deals_closed: u32,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        let t = KpiTargets::default();
        Self {
            mrr: t.mrr,
            revenue: t.revenue,
            conversion_rate: t.conversion_rate,
            deals_closed: t.deals_closed,
        }
    }
}

impl From<TargetsConfig> for KpiTargets {
    fn from(c: TargetsConfig) -> Self {
        KpiTargets {
            mrr: c.mrr,
            revenue: c.revenue,
            conversion_rate: c.conversion_rate,
            deals_closed: c.deals_closed,
        }
    }
}

/// Fields of the team aggregate that differ from the per-seller defaults
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AdminTargetsConfig {
    pub mrr: f64,
    pub revenue: f64,
    pub deals_closed: u32,
}

impl Default for AdminTargetsConfig {
    fn default() -> Self {
        Self {
            mrr: 25000.0,
            revenue: 150000.0,
            deals_closed: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    pub api_base: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_fallback_message() -> String {
    "Erro ao calcular métricas avançadas.".to_string()
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            api_base: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            fallback_message: default_fallback_message(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DemoConfig {
    /// Fill empty member stores with generated sales so charts are not blank
    #[serde(default)]
    pub seed_placeholder_data: bool,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/sales.db"

[auth]
admin_email = "gestao@sharks.com"
admin_id = "admin_master"
admin_name = "DIRETORIA SHARKS"
default_password = "12345678"
min_password_length = 4

[[team]]
id = "user_bruna"
name = "BRUNA MONTEIRO"
email = "bruna@sharks.com.br"

[[team]]
id = "user_alessandro"
name = "ALESSANDRO"
email = "alessandro@sharks.com"

[[team]]
id = "user_janaina"
name = "JANAINA"
email = "janaina@sharks.com"

[[team]]
id = "user_karoline"
name = "KAROLINE"
email = "karoline@sharks.com"

[[team]]
id = "user_anacarolise"
name = "ANA CAROLISE"
email = "anacarolise@sharks.com"

[[team]]
id = "user_lucas"
name = "LUCAS"
email = "lucas@sharks.com"

[[team]]
id = "user_davi"
name = "DAVI"
email = "davi@sharks.com"

[[team]]
id = "user_gika"
name = "GIKA"
email = "gika@sharks.com"

[targets]
mrr = 7200.0
revenue = 44200.0
conversion_rate = 0.65
deals_closed = 34

[admin_targets]
mrr = 25000.0
revenue = 150000.0
deals_closed = 100

[insights]
enabled = false
model = "gpt-4o-mini"
timeout_secs = 30

[demo]
seed_placeholder_data = true
"#;

impl Config {
    /// Targets of a seller with no stored configuration
    pub fn default_targets(&self) -> KpiTargets {
        self.targets.into()
    }

    /// Synthesized aggregate for the admin view; conversion target is inherited
    pub fn team_targets(&self) -> KpiTargets {
        KpiTargets {
            mrr: self.admin_targets.mrr,
            revenue: self.admin_targets.revenue,
            conversion_rate: self.targets.conversion_rate,
            deals_closed: self.admin_targets.deals_closed,
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}
