use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a001_sale::Sale;
use contracts::domain::a002_kpi_targets::KpiTargets;
use contracts::system::users::{TeamMember, User};

use super::placeholder::placeholder_sales;
use crate::domain::{a001_sale, a002_kpi_targets};
use crate::shared::config::Config;
use crate::shared::data::RecordStore;

/// Sales and targets shown to one identity
#[derive(Debug, Clone, PartialEq)]
pub struct SalesView {
    pub sales: Vec<Sale>,
    pub targets: KpiTargets,
}

/// Stored sales of a member, or demo records when the member never saved
async fn member_sales(
    store: &dyn RecordStore,
    member: &TeamMember,
    seed_placeholder: bool,
    today: NaiveDate,
) -> Result<Vec<Sale>> {
    match a001_sale::repository::load(store, &member.id).await? {
        Some(sales) => Ok(sales),
        None if seed_placeholder => {
            let sales = placeholder_sales(member, today, &mut rand::thread_rng());
            tracing::debug!("Generated {} placeholder sales for {}", sales.len(), member.id);
            Ok(sales)
        }
        None => Ok(Vec::new()),
    }
}

/// Union of every roster member's sales with the team targets.
///
/// Read-only: nothing is written back to member stores.
pub async fn load_aggregate_view(
    roster: &[TeamMember],
    store: &dyn RecordStore,
    config: &Config,
    today: NaiveDate,
) -> Result<SalesView> {
    let mut sales = Vec::new();
    for member in roster {
        sales.extend(member_sales(store, member, config.demo.seed_placeholder_data, today).await?);
    }
    tracing::info!("Aggregate view loaded: {} members, {} sales", roster.len(), sales.len());
    Ok(SalesView {
        sales,
        targets: config.team_targets(),
    })
}

/// View of the logged-in identity: its own data, or the team union for admin
pub async fn load_view(
    user: &User,
    store: &dyn RecordStore,
    config: &Config,
    today: NaiveDate,
) -> Result<SalesView> {
    if user.is_admin {
        return load_aggregate_view(&config.team, store, config, today).await;
    }

    let member = config
        .team
        .iter()
        .find(|m| m.id == user.id)
        .cloned()
        .unwrap_or_else(|| TeamMember {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        });

    let sales = member_sales(store, &member, config.demo.seed_placeholder_data, today).await?;
    let targets = a002_kpi_targets::repository::load(store, &user.id, config.default_targets()).await?;
    tracing::info!("View loaded for {}: {} sales", user.id, sales.len());

    Ok(SalesView { sales, targets })
}
