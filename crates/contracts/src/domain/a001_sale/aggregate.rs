use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Plan label that carries no recurring revenue.
pub const CERTIFICATE_PLAN: &str = "Certificado";

/// Label used when a sale has no plan or no seller.
pub const NOT_INFORMED: &str = "Não Informado";
pub const UNKNOWN_SELLER: &str = "Desconhecido";

/// Lifecycle state of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalesStatus {
    #[serde(rename = "Em Aberto")]
    Open,
    #[serde(rename = "Vendido")]
    Sold,
    #[serde(rename = "Vendido Pago")]
    SoldPaid,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl SalesStatus {
    /// Display order used by the funnel chart.
    pub const FUNNEL_ORDER: [SalesStatus; 4] = [
        SalesStatus::SoldPaid,
        SalesStatus::Sold,
        SalesStatus::Open,
        SalesStatus::Cancelled,
    ];

    /// Sold and SoldPaid count towards revenue and conversion.
    pub fn is_closed(&self) -> bool {
        matches!(self, SalesStatus::Sold | SalesStatus::SoldPaid)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalesStatus::Open => "Em Aberto",
            SalesStatus::Sold => "Vendido",
            SalesStatus::SoldPaid => "Vendido Pago",
            SalesStatus::Cancelled => "Cancelado",
        }
    }

    pub fn from_label(label: &str) -> Option<SalesStatus> {
        Self::FUNNEL_ORDER.into_iter().find(|s| s.label() == label)
    }
}

/// Billing periodicity of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    #[serde(rename = "Mensal")]
    Monthly,
    #[serde(rename = "Trimestral")]
    Quarterly,
    #[serde(rename = "Semestral")]
    Semiannual,
    #[serde(rename = "Anual")]
    Annual,
}

impl Periodicity {
    /// Number of months covered by one payment.
    pub fn months(&self) -> u32 {
        match self {
            Periodicity::Monthly => 1,
            Periodicity::Quarterly => 3,
            Periodicity::Semiannual => 6,
            Periodicity::Annual => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "Mensal",
            Periodicity::Quarterly => "Trimestral",
            Periodicity::Semiannual => "Semestral",
            Periodicity::Annual => "Anual",
        }
    }

    pub fn from_label(label: &str) -> Option<Periodicity> {
        [
            Periodicity::Monthly,
            Periodicity::Quarterly,
            Periodicity::Semiannual,
            Periodicity::Annual,
        ]
        .into_iter()
        .find(|p| p.label() == label)
    }
}

impl Default for Periodicity {
    fn default() -> Self {
        Periodicity::Monthly
    }
}

/// Product catalogue offered by the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plan {
    ClickNfe,
    Essential,
    Control,
    Complete,
    IntegratedManagement,
    Certificate,
}

impl Plan {
    pub const ALL: [Plan; 6] = [
        Plan::ClickNfe,
        Plan::Essential,
        Plan::Control,
        Plan::Complete,
        Plan::IntegratedManagement,
        Plan::Certificate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Plan::ClickNfe => "Click NF-e",
            Plan::Essential => "Essencial",
            Plan::Control => "Controle",
            Plan::Complete => "Completo",
            Plan::IntegratedManagement => "Gestão Integrada",
            Plan::Certificate => CERTIFICATE_PLAN,
        }
    }

    pub fn from_label(label: &str) -> Option<Plan> {
        Plan::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// One tracked sales opportunity.
///
/// `plan` is kept as free text: stored records may carry a blank or a
/// retired plan name, and both must survive a load/save cycle.
///
/// Reading is lenient (see [`StoredSale`]) so one incomplete record never
/// invalidates the rest of a stored list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSale")]
pub struct Sale {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(serialize_with = "serde_date::serialize")]
    pub date: NaiveDate,
    pub revenue: f64,
    pub mrr: f64,
    pub plan: String,
    pub periodicity: Periodicity,
    pub payment_method: String,
    #[serde(serialize_with = "serde_date::serialize")]
    pub purchase_date: NaiveDate,
    pub status: SalesStatus,
    #[serde(default)]
    pub hub_link: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
}

impl Sale {
    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn plan_kind(&self) -> Option<Plan> {
        Plan::from_label(&self.plan)
    }

    /// Seller label used for ranking attribution.
    pub fn seller_label(&self) -> &str {
        match self.seller_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_SELLER,
        }
    }
}

/// Stored shape of a sale as older or hand-edited records may carry it.
///
/// Missing text fields read as empty, a missing purchase date takes the
/// sale date, and unknown or missing periodicity and status read as
/// Monthly and Open.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSale {
    id: String,
    #[serde(default)]
    customer_id: String,
    #[serde(default)]
    customer_name: String,
    #[serde(default, deserialize_with = "serde_date::deserialize_lenient")]
    date: Option<NaiveDate>,
    #[serde(default)]
    revenue: f64,
    #[serde(default)]
    mrr: f64,
    #[serde(default)]
    plan: String,
    #[serde(default, deserialize_with = "lenient_label")]
    periodicity: Option<String>,
    #[serde(default)]
    payment_method: String,
    #[serde(default, deserialize_with = "serde_date::deserialize_lenient")]
    purchase_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_label")]
    status: Option<String>,
    #[serde(default)]
    hub_link: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    seller_name: Option<String>,
}

/// Any JSON value; only strings are kept
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrOther {
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accepts a string label; null or any other value reads as absent
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<TextOrOther>::deserialize(deserializer)? {
        Some(TextOrOther::Text(s)) => Some(s),
        Some(TextOrOther::Other(_)) | None => None,
    })
}

impl From<StoredSale> for Sale {
    fn from(raw: StoredSale) -> Self {
        let date = raw.date.or(raw.purchase_date).unwrap_or_default();
        Sale {
            id: raw.id,
            customer_id: raw.customer_id,
            customer_name: raw.customer_name,
            date,
            revenue: raw.revenue,
            mrr: raw.mrr,
            plan: raw.plan,
            periodicity: raw
                .periodicity
                .as_deref()
                .and_then(Periodicity::from_label)
                .unwrap_or_default(),
            payment_method: raw.payment_method,
            purchase_date: raw.purchase_date.unwrap_or(date),
            status: raw
                .status
                .as_deref()
                .and_then(SalesStatus::from_label)
                .unwrap_or(SalesStatus::Open),
            hub_link: raw.hub_link,
            notes: raw.notes,
            seller_name: raw.seller_name,
        }
    }
}

// =============================================================================
// DTO
// =============================================================================

/// Edit buffer of the sale form. `id == None` means a new record.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub revenue: Option<f64>,
    pub mrr: Option<f64>,
    pub plan: Option<String>,
    pub periodicity: Option<Periodicity>,
    pub payment_method: Option<String>,
    pub status: Option<SalesStatus>,
    pub hub_link: Option<String>,
    pub notes: Option<String>,
    pub seller_name: Option<String>,
}

impl From<&Sale> for SaleDto {
    fn from(sale: &Sale) -> Self {
        Self {
            id: Some(sale.id.clone()),
            customer_id: Some(sale.customer_id.clone()),
            customer_name: Some(sale.customer_name.clone()),
            date: Some(sale.date),
            revenue: Some(sale.revenue),
            mrr: Some(sale.mrr),
            plan: Some(sale.plan.clone()),
            periodicity: Some(sale.periodicity),
            payment_method: Some(sale.payment_method.clone()),
            status: Some(sale.status),
            hub_link: Some(sale.hub_link.clone()),
            notes: Some(sale.notes.clone()),
            seller_name: sale.seller_name.clone(),
        }
    }
}

// NaiveDate as YYYY-MM-DD on the wire
mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.format(FORMAT).to_string();
        serializer.serialize_str(&s)
    }

    /// Blank or unparseable dates read as absent
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = super::lenient_label(deserializer)?;
        Ok(s.and_then(|s| NaiveDate::parse_from_str(s.trim(), FORMAT).ok()))
    }
}
