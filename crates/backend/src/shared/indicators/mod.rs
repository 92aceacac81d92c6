pub mod compute;
pub mod metadata;

pub use compute::sales::{achievement, compute_kpis, compute_metrics};
