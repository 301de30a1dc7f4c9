use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use host::maze_core::MazeError;
use host::{generate_maze, random_seed, solve_maze, MazeSnapshot, SearchMode, SolveReport};
use serde::{Deserialize, Serialize};

// Configuration

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_JSON_LIMIT: usize = 1_048_576; // 1MB

#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerConfig {
    bind_address: String,
    json_limit: usize,
}

impl ServerConfig {
    /// Read `MAZE_API_BIND` and `MAZE_API_JSON_LIMIT`, falling back to defaults.
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_address = lookup("MAZE_API_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let json_limit = match lookup("MAZE_API_JSON_LIMIT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid MAZE_API_JSON_LIMIT '{}'", raw);
                DEFAULT_JSON_LIMIT
            }),
            None => DEFAULT_JSON_LIMIT,
        };
        Self { bind_address, json_limit }
    }
}

// Request/Response types

#[derive(Debug, Deserialize)]
struct MazeForm {
    width: usize,
    height: usize,
    seed: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateMazeRequest {
    width: usize,
    height: usize,
    seed: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerateMazeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    maze: Option<MazeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SolveMazeRequest {
    width: usize,
    height: usize,
    seed: u32,
    #[serde(default)]
    mode: SearchMode,
}

#[derive(Debug, Serialize, Deserialize)]
struct SolveResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<SolveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn error_status(e: &MazeError) -> actix_web::HttpResponseBuilder {
    match e {
        MazeError::InvalidDimensions { .. } => HttpResponse::BadRequest(),
        _ => HttpResponse::InternalServerError(),
    }
}

fn solve_response(result: Result<SolveReport, MazeError>) -> HttpResponse {
    match result {
        Ok(report) => {
            tracing::info!(
                "Solved maze seed {}: {} path cells",
                report.snapshot.seed,
                report.path.len()
            );
            HttpResponse::Ok().json(SolveResponse {
                success: true,
                solution: Some(report),
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Failed to solve maze: {}", e);
            error_status(&e).json(SolveResponse {
                success: false,
                solution: None,
                error: Some(e.to_string()),
            })
        }
    }
}

// API Handlers

/// POST /maze
/// Form submission with the maze size; builds a maze and returns it solved
async fn maze_form(form: web::Form<MazeForm>) -> impl Responder {
    tracing::info!("Received maze form: {}x{}", form.width, form.height);

    let seed = form.seed.unwrap_or_else(random_seed);
    solve_response(solve_maze(form.width, form.height, seed, SearchMode::FirstMatch))
}

/// POST /api/generate-maze
/// Generate a maze from its dimensions and an optional seed
async fn generate(req: web::Json<GenerateMazeRequest>) -> impl Responder {
    tracing::info!(
        "Received generate-maze request: {}x{} seed {:?}",
        req.width,
        req.height,
        req.seed
    );

    match generate_maze(req.width, req.height, req.seed) {
        Ok(maze) => {
            tracing::info!("Generated maze with seed: {}", maze.seed);
            HttpResponse::Ok().json(GenerateMazeResponse {
                success: true,
                maze: Some(maze),
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Failed to generate maze: {}", e);
            error_status(&e).json(GenerateMazeResponse {
                success: false,
                maze: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// POST /api/solve-maze
/// Regenerate a maze from its seed and solve it
async fn solve(req: web::Json<SolveMazeRequest>) -> impl Responder {
    tracing::info!(
        "Received solve-maze request: {}x{} seed {} ({})",
        req.width,
        req.height,
        req.seed,
        req.mode
    );

    solve_response(solve_maze(req.width, req.height, req.seed, req.mode))
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "maze-api"
    }))
}

fn configure(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.app_data(web::JsonConfig::default().limit(json_limit))
        .route("/health", web::get().to(health))
        .route("/maze", web::post().to(maze_form))
        .route("/api/generate-maze", web::post().to(generate))
        .route("/api/solve-maze", web::post().to(solve));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Maze API Server");

    let config = ServerConfig::from_env();
    tracing::info!("Binding to {} (JSON limit {} bytes)", config.bind_address, config.json_limit);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .configure(|cfg| configure(cfg, json_limit))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
