// Main entry point - Dependency injection and command dispatch
use std::sync::Arc;

use anyhow::Context;
use equipviz::application::session::Session;
use equipviz::domain::credentials::Credentials;
use equipviz::domain::csv_file::CsvFile;
use equipviz::domain::history::RecordId;
use equipviz::infrastructure::config::load_client_config;
use equipviz::infrastructure::http_repository::HttpAnalysisRepository;
use equipviz::infrastructure::report_store::DirectoryReportSink;
use equipviz::presentation::dashboard_view::DashboardView;
use equipviz::presentation::history_view::{history_notice, to_history_rows};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: equipviz upload <file.csv> | equipviz history | equipviz report <id> <file_name>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_client_config()?;

    // Create repository and report sink (infrastructure layer)
    let repository = Arc::new(HttpAnalysisRepository::new(&config.api)?);
    let sink = Arc::new(DirectoryReportSink::new(config.downloads.directory.clone()));

    // Create session (application layer)
    let session = Session::new(repository, sink);
    session.set_credentials(Credentials::new(
        config.auth.username.clone(),
        config.auth.password.clone(),
    ));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["upload", path] => upload(&session, path).await,
        ["history"] => history(&session).await,
        ["report", id, file_name] => report(&session, id, file_name).await,
        _ => anyhow::bail!(USAGE),
    }
}

async fn upload(session: &Session, path: &str) -> anyhow::Result<()> {
    let file = CsvFile::load(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;

    let summary = match session.upload(Some(&file)).await {
        Ok(summary) => summary,
        Err(e) => anyhow::bail!(e.user_message()),
    };
    if let Some(message) = session.uploads().status().message() {
        println!("{}", message);
    }

    if let Some(view) = DashboardView::build(Some(&summary)) {
        println!("{}: {}", view.total.label, view.total.value);
        for card in &view.averages {
            println!("{}: {} {}", card.label, card.value, card.unit.as_deref().unwrap_or(""));
        }
        println!("{}", view.chart.title);
        for row in &view.table {
            println!("  {:<20} {}", row.equipment_type, row.count);
        }
    }

    history(session).await
}

async fn history(session: &Session) -> anyhow::Result<()> {
    if let Err(e) = session.refresh_history().await {
        tracing::warn!("{}", e.user_message());
    }

    let view = session.history().view();
    if let Some(notice) = history_notice(&view) {
        println!("{}", notice);
    }
    for row in to_history_rows(&view) {
        println!("[{}] {}  {}", row.id, row.file_name, row.uploaded_label);
    }
    Ok(())
}

async fn report(session: &Session, id: &str, file_name: &str) -> anyhow::Result<()> {
    let credentials = session.credentials().current();
    match session
        .history()
        .download_report(&RecordId::from(id), file_name, &credentials)
        .await
    {
        Ok(path) => {
            println!("Report PDF saved to {}", path.display());
            Ok(())
        }
        Err(e) => anyhow::bail!(e.user_message()),
    }
}
