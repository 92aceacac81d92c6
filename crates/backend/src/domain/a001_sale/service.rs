use chrono::NaiveDate;
use contracts::domain::a001_sale::{Periodicity, Sale, SaleDto, SalesStatus};
use contracts::system::users::User;
use thiserror::Error;
use uuid::Uuid;

use super::mrr::apply_mrr_rule;
use crate::shared::validation::{non_negative, ValidationError};

const DEFAULT_CUSTOMER_NAME: &str = "Desconhecido";
const DEFAULT_PLAN: &str = "Essencial";
const DEFAULT_PAYMENT_METHOD: &str = "Outro";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaleError {
    #[error("Sale not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Blank edit buffer as the form opens it
pub fn new_buffer(today: NaiveDate) -> SaleDto {
    SaleDto {
        date: Some(today),
        revenue: Some(0.0),
        mrr: Some(0.0),
        plan: Some(DEFAULT_PLAN.to_string()),
        periodicity: Some(Periodicity::Monthly),
        payment_method: Some("Cartão de Crédito".to_string()),
        status: Some(SalesStatus::Open),
        ..Default::default()
    }
}

/// Commit the edit buffer into the sale list.
///
/// Without an `id` a new record is appended under a fresh id and attributed
/// to `acting_user`. With an `id` the matching record is replaced as a whole,
/// keeping whatever seller the buffer carries. Returns the record id.
pub fn submit(
    sales: &mut Vec<Sale>,
    mut dto: SaleDto,
    acting_user: &User,
    today: NaiveDate,
) -> Result<String, SaleError> {
    non_negative(dto.revenue.unwrap_or(0.0), "revenue")?;
    apply_mrr_rule(&mut dto);

    match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let slot = sales
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| SaleError::NotFound(id.clone()))?;
            let seller_name = dto.seller_name.clone();
            *slot = build_sale(id.clone(), dto, seller_name, today);
            tracing::info!("Sale {} updated", id);
            Ok(id)
        }
        None => {
            let id = Uuid::new_v4().to_string();
            let sale = build_sale(id.clone(), dto, Some(acting_user.name.clone()), today);
            sales.push(sale);
            tracing::info!("Sale {} created by {}", id, acting_user.name);
            Ok(id)
        }
    }
}

fn build_sale(id: String, dto: SaleDto, seller_name: Option<String>, today: NaiveDate) -> Sale {
    let date = dto.date.unwrap_or(today);
    Sale {
        id,
        customer_id: dto.customer_id.unwrap_or_default(),
        customer_name: dto
            .customer_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string()),
        date,
        revenue: dto.revenue.unwrap_or(0.0),
        mrr: dto.mrr.unwrap_or(0.0),
        plan: dto
            .plan
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLAN.to_string()),
        periodicity: dto.periodicity.unwrap_or_default(),
        payment_method: dto
            .payment_method
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        purchase_date: date,
        status: dto.status.unwrap_or(SalesStatus::Open),
        hub_link: dto.hub_link.unwrap_or_default(),
        notes: dto.notes.unwrap_or_default(),
        seller_name,
    }
}

/// Remove the record with `id`. Returns whether anything was removed.
pub fn delete(sales: &mut Vec<Sale>, id: &str) -> bool {
    let before = sales.len();
    sales.retain(|s| s.id != id);
    before != sales.len()
}

/// Quick-edit path: only the status changes
pub fn update_status(sales: &mut [Sale], id: &str, status: SalesStatus) -> Result<(), SaleError> {
    let sale = sales
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| SaleError::NotFound(id.to_string()))?;
    sale.status = status;
    Ok(())
}

/// Case-insensitive filter over customer name, customer id, plan and seller
pub fn search<'a>(sales: &'a [Sale], term: &str) -> Vec<&'a Sale> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return sales.iter().collect();
    }
    sales
        .iter()
        .filter(|s| {
            s.customer_name.to_lowercase().contains(&needle)
                || s.customer_id.to_lowercase().contains(&needle)
                || s.plan.to_lowercase().contains(&needle)
                || s
                    .seller_name
                    .as_deref()
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}
