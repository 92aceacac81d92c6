use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, EntityTrait, Set, Statement,
};
use std::path::Path;

use super::record_store::RecordStore;

mod kv_entry {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "kv_store")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub record_key: String,
        pub record_value: String,
        pub updated_at: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

const CREATE_KV_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS kv_store (
        record_key TEXT PRIMARY KEY NOT NULL,
        record_value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
"#;

/// Record store backed by a single SQLite key-value table
pub struct SqliteRecordStore {
    conn: DatabaseConnection,
}

impl SqliteRecordStore {
    /// Open (creating if needed) the database file and bootstrap the schema
    pub async fn connect(db_file: &Path) -> Result<Self> {
        if let Some(parent) = db_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let absolute_path = if db_file.is_absolute() {
            db_file.to_path_buf()
        } else {
            std::env::current_dir()?.join(db_file)
        };
        // Normalize path separators and ensure proper URL form on Windows
        let normalized = absolute_path.to_string_lossy().replace('\\', "/");
        let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
        let prefix = if needs_leading_slash { "/" } else { "" };
        let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

        let conn = Database::connect(&db_url).await?;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            CREATE_KV_TABLE.to_string(),
        ))
        .await?;

        tracing::info!("Record store ready at {}", absolute_path.display());
        Ok(Self { conn })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = kv_entry::Entity::find_by_id(key.to_string())
            .one(&self.conn)
            .await?;
        tracing::debug!("kv get {} -> {}", key, if row.is_some() { "hit" } else { "miss" });
        Ok(row.map(|m| m.record_value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let active = kv_entry::ActiveModel {
            record_key: Set(key.to_string()),
            record_value: Set(value.to_string()),
            updated_at: Set(Utc::now().to_rfc3339()),
        };

        kv_entry::Entity::insert(active)
            .on_conflict(
                OnConflict::column(kv_entry::Column::RecordKey)
                    .update_columns([kv_entry::Column::RecordValue, kv_entry::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        tracing::debug!("kv set {} ({} bytes)", key, value.len());
        Ok(())
    }
}
