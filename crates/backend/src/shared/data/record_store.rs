use anyhow::Result;
use async_trait::async_trait;

/// Per-user key-value persistence. Every `set` fully replaces the value.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Key layout shared by every backend
pub mod keys {
    pub fn sales(user_id: &str) -> String {
        format!("sales:{}", user_id)
    }

    pub fn targets(user_id: &str) -> String {
        format!("targets:{}", user_id)
    }

    pub fn password(user_id: &str) -> String {
        format!("password:{}", user_id)
    }
}
