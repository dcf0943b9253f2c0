use axum::{
    extract::{Json, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Router,
};
use chrono::Utc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    error::DiscoveryError,
    models::{
        DiscoveryResult, ErrorBody, HealthStatus, ResourceKind, WidgetDiscovery, WidgetNameList,
    },
    scanner,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<T>)>;

// --- Router ---

/// Tabla de rutas del servicio. Lo que no está aquí lo sirve `ServeDir`
/// desde `static_root`, salvo `/api/*`, que responde 404 en JSON.
pub fn create_router(app_state: AppState) -> Router {
    let static_files = ServeDir::new(&app_state.config.static_root);

    Router::new()
        .route("/api/discover-csv", get(discover_csv_handler).fallback(method_not_allowed_handler))
        .route(
            "/api/discover-widgets",
            get(discover_widgets_handler).fallback(method_not_allowed_handler),
        )
        .route("/list-widgets", get(list_widgets_handler).fallback(method_not_allowed_handler))
        .route("/health", get(health_handler).fallback(method_not_allowed_handler))
        // `/api/*rest` no cubre un segmento vacío.
        .route("/api", any(api_not_found_handler))
        .route("/api/", any(api_not_found_handler))
        .route("/api/*rest", any(api_not_found_handler))
        .with_state(app_state)
        .fallback_service(static_files)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Todas las respuestas llevan `Access-Control-Allow-Origin: *`; cualquier
/// OPTIONS se contesta como preflight con cuerpo vacío.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// --- Handlers ---

#[axum::debug_handler]
async fn discover_csv_handler(State(state): State<AppState>) -> ApiResult<DiscoveryResult> {
    let kind = ResourceKind::DataFiles;
    match run_discovery(&state, kind).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err(failure(kind, e)),
    }
}

#[axum::debug_handler]
async fn discover_widgets_handler(State(state): State<AppState>) -> ApiResult<WidgetDiscovery> {
    let kind = ResourceKind::ScriptWidgets;
    match run_discovery(&state, kind).await {
        Ok(result) => Ok(Json(WidgetDiscovery::from(result))),
        Err(e) => Err(failure(kind, e)),
    }
}

#[axum::debug_handler]
async fn list_widgets_handler(State(state): State<AppState>) -> ApiResult<WidgetNameList> {
    let kind = ResourceKind::ScriptWidgets;
    match run_discovery(&state, kind).await {
        Ok(result) => {
            let mut names = WidgetNameList::from(&result);
            names.timestamp = Some(now_epoch_seconds());
            Ok(Json(names))
        }
        Err(e) => Err(failure(kind, e)),
    }
}

#[axum::debug_handler]
async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: state.config.service_name.clone(),
        timestamp: now_epoch_seconds(),
    })
}

async fn api_not_found_handler() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Endpoint not found".to_string(),
        }),
    )
}

async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, OPTIONS")],
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
        }),
    )
}

// --- Utilidades ---

fn now_epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Ejecuta escaneo + metadatos + ordenación fuera del runtime async.
async fn run_discovery(
    state: &AppState,
    kind: ResourceKind,
) -> Result<DiscoveryResult, DiscoveryError> {
    let spec = state.directories.spec(kind).clone();
    let result = tokio::task::spawn_blocking(move || scanner::discover(&spec)).await??;
    info!("🔍 Descubiertos {} ficheros ({})", result.count(), kind.label());
    Ok(result)
}

/// Único punto donde un `DiscoveryError` se convierte en respuesta HTTP.
fn failure<T: From<DiscoveryResult>>(kind: ResourceKind, err: DiscoveryError) -> (StatusCode, Json<T>) {
    error!("❌ Error descubriendo {} ({:?}): {}", kind.label(), err.kind(), err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(T::from(DiscoveryResult::failure(err.to_string()))),
    )
}
