use migration::{Migrator, MigratorTrait};
use server::ServerState;
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitbill={level},server={level},engine={level},ocr={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let mut state = ServerState::new(db, &settings.server.public_url);

    match settings.ocr {
        Some(ocr) => {
            tracing::info!("Found OCR settings...");
            let client = ocr::OcrSpaceClient::with_endpoint(&ocr.api_key, &ocr.endpoint)?
                .engine(ocr.engine);
            state = state.extractor(client);
        }
        None => tracing::warn!("no OCR settings, receipt extraction is disabled"),
    }

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(state, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
