use super::environment::AppConfig;

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub url: String,
    pub database: String,
}

impl MongoConfig {
    pub fn from_app(config: &AppConfig) -> Option<Self> {
        let url = config.mongodb_url.clone()?;
        Some(Self {
            url,
            database: config.mongodb_database.clone(),
        })
    }
}
