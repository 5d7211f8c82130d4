use crate::config::db::MongoConfig;
use crate::config::environment::{AppConfig, AuditStoreKind};
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::Client as MongoClient;
use mongodb::{Database, IndexModel};

pub const REQUEST_LOGS_COLLECTION: &str = "request_logs";

#[derive(Debug, Clone)]
pub struct InfraClients {
    pub mongo_db: Database,
}

/// Connects the audit database. `Ok(None)` means no store was configured;
/// an error means one was configured but could not be reached.
pub async fn init_infra(config: &AppConfig) -> Result<Option<InfraClients>, String> {
    if config.audit_store != AuditStoreKind::Mongo {
        return Ok(None);
    }
    let Some(mongo) = MongoConfig::from_app(config) else {
        return Ok(None);
    };

    let mongo_client = MongoClient::with_uri_str(&mongo.url)
        .await
        .map_err(|e| format!("mongodb client init failed: {e}"))?;
    let mongo_db = mongo_client.database(&mongo.database);
    mongo_db
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| format!("mongodb ping failed: {e}"))?;
    ensure_indexes(&mongo_db).await?;

    Ok(Some(InfraClients { mongo_db }))
}

async fn ensure_indexes(db: &Database) -> Result<(), String> {
    let collection = db.collection::<mongodb::bson::Document>(REQUEST_LOGS_COLLECTION);
    let index = IndexModel::builder()
        .keys(doc! { "username": 1, "timestamp": -1 })
        .options(
            IndexOptions::builder()
                .name("username_timestamp".to_string())
                .build(),
        )
        .build();

    collection
        .create_index(index)
        .await
        .map_err(|e| format!("mongodb index creation failed: {e}"))?;
    Ok(())
}
