use anyhow::Result;
use contracts::domain::a001_sale::Sale;
use contracts::system::users::User;

use crate::shared::data::{decode_or_warn, keys, RecordStore};

/// Stored sale list of one member.
///
/// `None` means the member never saved anything. A payload that is not a
/// JSON array is reported as an empty list; inside an array, records are
/// decoded one by one and only unreadable ones are skipped.
pub async fn load(store: &dyn RecordStore, user_id: &str) -> Result<Option<Vec<Sale>>> {
    let key = keys::sales(user_id);
    let Some(raw) = store.get(&key).await? else {
        return Ok(None);
    };
    let records: Vec<serde_json::Value> = decode_or_warn(&key, &raw).unwrap_or_default();
    let sales = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<Sale>(record) {
            Ok(sale) => Some(sale),
            Err(e) => {
                tracing::warn!("Skipping unreadable sale #{} at {}: {}", i, key, e);
                None
            }
        })
        .collect();
    Ok(Some(sales))
}

/// Replace the member's stored list. The admin view is read-only, so saving
/// as admin does nothing.
pub async fn save(store: &dyn RecordStore, user: &User, sales: &[Sale]) -> Result<()> {
    if user.is_admin {
        tracing::debug!("Skipping sales save for admin view");
        return Ok(());
    }
    let payload = serde_json::to_string(sales)?;
    store.set(&keys::sales(&user.id), &payload).await?;
    tracing::info!("Saved {} sales for {}", sales.len(), user.id);
    Ok(())
}
