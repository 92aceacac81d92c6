pub mod placeholder;
pub mod report;
pub mod repository;
pub mod service;

pub use report::render_report;
pub use repository::{load_aggregate_view, load_view, SalesView};
pub use service::build_dashboard;
