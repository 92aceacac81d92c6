use anyhow::Result;
use contracts::domain::a002_kpi_targets::KpiTargets;
use contracts::system::users::User;

use crate::shared::data::{decode_or_warn, keys, RecordStore};

/// Stored targets, or `default` when absent or unreadable
pub async fn load(store: &dyn RecordStore, user_id: &str, default: KpiTargets) -> Result<KpiTargets> {
    let key = keys::targets(user_id);
    Ok(store
        .get(&key)
        .await?
        .and_then(|raw| decode_or_warn(&key, &raw))
        .unwrap_or(default))
}

pub async fn save(store: &dyn RecordStore, user: &User, targets: &KpiTargets) -> Result<()> {
    if user.is_admin {
        tracing::debug!("Skipping targets save for admin view");
        return Ok(());
    }
    let payload = serde_json::to_string(targets)?;
    store.set(&keys::targets(&user.id), &payload).await?;
    tracing::info!("Saved targets for {}", user.id);
    Ok(())
}
