use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStoreKind {
    Mongo,
    Memory,
}

impl AuditStoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mongo => "mongo",
            Self::Memory => "memory",
        }
    }

    fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("invalid AUDIT_STORE: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_env: String,
    pub api_host: String,
    pub api_port: u16,
    pub audit_store: AuditStoreKind,
    pub mongodb_url: Option<String>,
    pub mongodb_database: String,
    pub model_dir: String,
    pub engine_command: Option<String>,
    pub engine_java_bin: String,
    pub engine_main_class: String,
    /// Zero keeps engine runs unbounded.
    pub engine_timeout_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        load_dotenv_layers();
        Ok(Self {
            rust_env: read_optional_string("RUST_ENV", "development"),
            api_host: read_optional_string("API_HOST", "0.0.0.0"),
            api_port: read_optional_string("API_PORT", "8080")
                .parse::<u16>()
                .map_err(|e| format!("invalid API_PORT: {e}"))?,
            audit_store: AuditStoreKind::parse(&read_optional_string("AUDIT_STORE", "mongo"))?,
            mongodb_url: read_non_empty("MONGODB_URL"),
            mongodb_database: read_optional_string("MONGODB_DATABASE", "oil_model"),
            model_dir: read_optional_string("MODEL_DIR", "../model"),
            engine_command: read_non_empty("ENGINE_COMMAND"),
            engine_java_bin: read_optional_string("ENGINE_JAVA_BIN", "java"),
            engine_main_class: read_optional_string("ENGINE_MAIN_CLASS", "ModelRunner"),
            engine_timeout_seconds: read_optional_u64("ENGINE_TIMEOUT_SECONDS", 0)?,
        })
    }
}

fn read_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_optional_u64(key: &str, default: u64) -> Result<u64, String> {
    match env::var(key) {
        Ok(v) => v.trim().parse::<u64>().map_err(|e| format!("invalid {key}: {e}")),
        Err(_) => Ok(default),
    }
}

fn read_optional_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn load_dotenv_layers() {
    for path in [".env", "../.env", "../../.env"] {
        let _ = dotenvy::from_path(path);
    }
}
