/// Lyra Server - Personal media library backend
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use clap::{Parser, Subcommand};
use lyra_server::{
    api,
    config::ServerConfig,
    middleware,
    services::{AuthService, MediaStore, OpenAiAssistant},
    state::AppState,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lyra-server")]
#[command(about = "Lyra personal media library server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Contact email
        #[arg(short, long, default_value = "")]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyra_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser {
            username,
            email,
            password,
        } => {
            add_user(&username, &email, &password).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Lyra Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = lyra_storage::create_pool(&config.storage.database_url).await?;
    lyra_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // The reserved assistant user must exist before any chat is created
    let assistant_user_id =
        lyra_storage::users::ensure_reserved(&pool, &config.assistant.reserved_username).await?;
    tracing::info!(
        "Reserved assistant user '{}' ready (id {})",
        config.assistant.reserved_username,
        assistant_user_id
    );

    // Initialize media store
    let media_store = MediaStore::new(config.storage.media_storage_path.clone());
    media_store.initialize().await?;
    let media_store = Arc::new(media_store);
    tracing::info!("Media store initialized");

    // Initialize auth service
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );
    let auth_service = Arc::new(auth_service);

    // Initialize assistant gateway
    let assistant = Arc::new(OpenAiAssistant::new(&config.assistant)?);

    // Build application state
    let app_state = AppState::new(
        pool,
        Arc::clone(&auth_service),
        media_store,
        assistant,
        assistant_user_id,
    );

    // Build router
    let app = create_router(app_state, auth_service);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState, auth_service: Arc<AuthService>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/sign-up", post(api::auth::sign_up))
        .route("/auth/sign-in", post(api::auth::sign_in))
        .route("/auth/refresh", post(api::auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Profile
        .route("/users", put(api::users::update_profile))
        // Songs
        .route("/songs", get(api::songs::list_songs))
        .route("/songs", post(api::songs::create_song))
        .route("/songs", put(api::songs::update_song))
        .route("/songs/:id", get(api::songs::get_song))
        .route("/songs/:id", delete(api::songs::delete_song))
        // Playlists
        .route("/playlists", get(api::playlists::list_playlists))
        .route("/playlists", post(api::playlists::create_playlist))
        .route("/playlists", put(api::playlists::update_playlist))
        .route("/playlists/:id", get(api::playlists::get_playlist))
        .route("/playlists/:id", delete(api::playlists::delete_playlist))
        .route("/playlists/:id/songs", get(api::playlists::get_playlist_songs))
        // Files
        .route("/files", get(api::files::list_files))
        .route("/files", post(api::files::upload_file))
        .route("/files/:id", get(api::files::get_file))
        .route("/files/:id", delete(api::files::delete_file))
        // Chats
        .route("/chats", get(api::chats::list_chats))
        .route("/chats", post(api::chats::create_chat))
        .route("/chats", put(api::chats::update_chat))
        .route("/chats/:id", get(api::chats::get_chat))
        .route("/chats/:id", delete(api::chats::delete_chat))
        // Messages
        .route("/messages", post(api::messages::create_message))
        .route("/messages", put(api::messages::update_message))
        .route("/messages/:id", delete(api::messages::delete_message))
        // Streaming
        .route("/stream/:file_id", get(api::stream::stream_file))
        // Assistant one-shot
        .route("/assistant/ask", post(api::assistant::ask))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(username: &str, email: &str, password: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = lyra_storage::create_pool(&config.storage.database_url).await?;
    lyra_storage::run_migrations(&pool).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    if lyra_storage::users::find_by_username(&pool, username)
        .await?
        .is_some()
    {
        anyhow::bail!("User '{username}' already exists");
    }

    let user = lyra_storage::users::create(&pool, username, email).await?;
    let password_hash = auth_service.hash_password(password)?;
    lyra_storage::users::set_password_hash(&pool, user.id, &password_hash).await?;

    println!("Created user {} (id {})", user.username, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = lyra_storage::create_pool(&config.storage.database_url).await?;
    lyra_storage::run_migrations(&pool).await?;

    let users = lyra_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.username);
    }

    Ok(())
}
