use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;

use civicconnect_backend::api::{AdminApi, AuthApi, HealthApi, IssuesApi};
use civicconnect_backend::app_data::AppData;
use civicconnect_backend::cli::{execute_command, Cli, Commands};
use civicconnect_backend::config::{init_database, init_logging, migrate_database, AppSettings};
use civicconnect_backend::services::{AdminService, IssueService, VoteService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let settings = AppSettings::from_env()?;

    let db = init_database(&settings.database_url).await?;
    migrate_database(&db).await?;

    let app_data = AppData::init(db, settings.jwt_secret.clone());

    match cli.command {
        None | Some(Commands::Serve) => run_server(&settings, app_data).await,
        Some(command) => execute_command(command, &app_data).await,
    }
}

async fn run_server(
    settings: &AppSettings,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    let issue_service = Arc::new(IssueService::new(&app_data));
    let vote_service = Arc::new(VoteService::new(&app_data));
    let admin_service = Arc::new(AdminService::new(&app_data));

    let auth_api = AuthApi::new(
        app_data.user_store.clone(),
        app_data.token_service.clone(),
    );
    let issues_api = IssuesApi::new(
        issue_service,
        vote_service,
        app_data.token_service.clone(),
    );
    let admin_api = AdminApi::new(admin_service, app_data.token_service.clone());

    let api_service = OpenApiService::new(
        (HealthApi, auth_api, issues_api, admin_api),
        "CivicConnect API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.bind_addr));

    // Generate Swagger UI from the OpenAPI service
    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", settings.bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger", settings.bind_addr);

    Server::new(TcpListener::bind(settings.bind_addr.clone()))
        .run(app)
        .await?;

    Ok(())
}
