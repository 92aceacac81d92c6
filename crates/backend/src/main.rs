use anyhow::Context;
use backend::dashboards::d400_sales_summary::{build_dashboard, load_view, render_report};
use backend::shared::config::{get_database_path, load_config};
use backend::shared::data::{RecordStore, SqliteRecordStore};
use backend::shared::llm::openai_provider::OpenAiProvider;
use backend::shared::llm::InsightGenerator;
use backend::system::auth::AuthService;
use contracts::system::auth::LoginRequest;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    backend::system::tracing::initialize()?;

    let config = load_config()?;
    let db_path = get_database_path(&config)?;
    let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::connect(&db_path).await?);

    let request = LoginRequest {
        email: std::env::var("SALES_EMAIL").context("SALES_EMAIL is not set")?,
        password: std::env::var("SALES_PASSWORD").context("SALES_PASSWORD is not set")?,
    };
    let auth = AuthService::new(config.auth.clone(), config.team.clone(), store.clone());
    let user = auth.login(&request).await?;

    let now = chrono::Local::now().naive_local();
    let view = load_view(&user, store.as_ref(), &config, now.date()).await?;
    let dashboard = build_dashboard(&user, &view.sales, &view.targets);

    print!("{}", render_report(&dashboard, &view.sales, now));

    if config.insights.enabled {
        let provider = Arc::new(OpenAiProvider::from_config(&config.insights));
        let generator = InsightGenerator::new(
            provider,
            Duration::from_secs(config.insights.timeout_secs),
            config.insights.fallback_message.clone(),
        );
        let text = generator.generate_insights(&view.sales, &view.targets).await;
        println!();
        println!("| ANÁLISE SHARKS AI");
        println!("{}", "-".repeat(100));
        println!("{}", text);
    }

    auth.logout(&user);
    Ok(())
}
