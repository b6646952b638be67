// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;
mod storage;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State as AxumState, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use participium::AssignmentPolicy;
use participium_api::{
    AddressResolver, ApiError, ApproveReportRequest, AssignExternalRequest,
    AssignableExternalsResponse, AssignableTechnicalsResponse, CreateCompanyRequest,
    CreateCompanyResponse, CreateReportRequest, CreateReportResponse, CreateUserRequest,
    CreateUserResponse, FallbackAddressResolver, ListInternalNotesResponse, ListMessagesResponse,
    ListNotificationsRequest, ListNotificationsResponse, ListReportsResponse, PhotoStorage,
    PhotoUpload, PostContentRequest, RegisterMaintainerCategoryRequest,
    RegisterMaintainerCategoryResponse, RejectReportRequest, ReportInfo, SendMessageResponse,
    TransitionResponse, UnreadCountResponse, UpdateStatusRequest, add_internal_note,
    approve_report, assign_external, create_company, create_report, create_user, get_report,
    list_assignable_externals, list_assignable_technicals, list_assigned_reports,
    list_internal_notes, list_messages, list_my_reports, list_notifications,
    list_pending_reports, list_public_reports, mark_notification_read,
    register_maintainer_category, reject_report, send_message, unread_notification_count,
    update_status,
};
use participium_domain::{InternalNote, Notification, ServiceArea};
use participium_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::{OptionalSessionUser, SessionUser};
use crate::storage::DiskPhotoStorage;

/// Participium Server - HTTP server for the Participium reporting system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL/MariaDB connection URL. Takes precedence over `--database`.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory uploaded photos are written to
    #[arg(long, default_value = "uploads")]
    upload_dir: String,

    /// URL prefix under which stored photos are served
    #[arg(long, default_value = "/uploads")]
    public_base_url: String,

    /// JSON file with the municipal boundary polygon. Defaults to Turin.
    #[arg(long)]
    boundary: Option<String>,

    /// Let an external maintainer re-delegate a report they hold
    #[arg(long)]
    allow_maintainer_redelegation: bool,

    /// Also offer officers who handled reports of the same category before
    #[arg(long)]
    include_previous_handlers: bool,
}

/// Application state shared across handlers.
///
/// Every request locks the persistence adapter for its whole read, decide
/// and write sequence, so transitions on one report never interleave.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<Persistence>>,
    pub photo_storage: Arc<dyn PhotoStorage>,
    pub address_resolver: Arc<dyn AddressResolver>,
    pub service_area: Arc<ServiceArea>,
    pub policy: AssignmentPolicy,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Stable machine-readable error kind.
    pub kind: String,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::IneligibleAssignee { .. } | ApiError::GeofenceRejection { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

fn bad_form(field: &str, message: impl Into<String>) -> HttpError {
    HttpError::from(ApiError::Validation {
        field: field.to_string(),
        message: message.into(),
    })
}

fn multipart_error(err: &MultipartError) -> HttpError {
    warn!(error = %err, "Malformed multipart body");
    bad_form("body", err.body_text())
}

#[derive(Debug, Deserialize)]
struct PublicReportsQuery {
    category: Option<String>,
}

/// Reads the report form. Photo parts are named `photos`.
async fn read_report_form(multipart: &mut Multipart) -> Result<CreateReportRequest, HttpError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut category: Option<String> = None;
    let mut latitude: Option<String> = None;
    let mut longitude: Option<String> = None;
    let mut is_anonymous: Option<String> = None;
    let mut photos: Vec<PhotoUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name: String = field.name().unwrap_or_default().to_string();
        if name == "photos" {
            let original_name: String = field.file_name().unwrap_or("photo").to_string();
            let content_type: Option<String> = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
            photos.push(PhotoUpload {
                original_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let slot: &mut Option<String> = match name.as_str() {
            "title" => &mut title,
            "description" => &mut description,
            "category" => &mut category,
            "latitude" => &mut latitude,
            "longitude" => &mut longitude,
            "is_anonymous" => &mut is_anonymous,
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(|e| multipart_error(&e))?);
    }

    let parse_coordinate = |field: &str, value: Option<String>| -> Result<f64, HttpError> {
        value
            .ok_or_else(|| bad_form(field, "is required"))?
            .trim()
            .parse::<f64>()
            .map_err(|_| bad_form(field, "must be a number"))
    };

    Ok(CreateReportRequest {
        title: title.ok_or_else(|| bad_form("title", "is required"))?,
        description: description.ok_or_else(|| bad_form("description", "is required"))?,
        category: category.ok_or_else(|| bad_form("category", "is required"))?,
        latitude: parse_coordinate("latitude", latitude)?,
        longitude: parse_coordinate("longitude", longitude)?,
        is_anonymous: is_anonymous
            .is_some_and(|value| matches!(value.trim(), "true" | "1" | "on")),
        photos,
    })
}

// ============================================================================
// Reports
// ============================================================================

/// Handler for POST `/reports` (multipart).
async fn handle_create_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateReportResponse>), HttpError> {
    info!(user_id = actor.user_id, "Handling create_report request");
    let request: CreateReportRequest = read_report_form(&mut multipart).await?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateReportResponse = create_report(
        &mut persistence,
        &actor,
        request,
        &app_state.service_area,
        app_state.photo_storage.as_ref(),
        app_state.address_resolver.as_ref(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/reports`.
async fn handle_list_public_reports(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PublicReportsQuery>,
) -> Result<Json<ListReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_public_reports(&mut persistence, query.category.as_deref())?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/pending`.
async fn handle_list_pending_reports(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<ListReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_pending_reports(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/mine`.
async fn handle_list_my_reports(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<ListReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_my_reports(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/assigned`.
async fn handle_list_assigned_reports(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<ListReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_assigned_reports(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/{id}`. The caller may be anonymous.
async fn handle_get_report(
    AxumState(app_state): AxumState<AppState>,
    OptionalSessionUser(actor): OptionalSessionUser,
    Path(report_id): Path<i64>,
) -> Result<Json<ReportInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_report(&mut persistence, actor.as_ref(), report_id)?;
    drop(persistence);
    Ok(Json(response))
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Handler for POST `/reports/{id}/approve`.
async fn handle_approve_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
    Json(request): Json<ApproveReportRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        report_id,
        actor_id = actor.user_id,
        assigned_technical_id = request.assigned_technical_id,
        "Handling approve request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response = approve_report(&mut persistence, &actor, report_id, request, app_state.policy)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/reports/{id}/reject`.
async fn handle_reject_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
    Json(request): Json<RejectReportRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(report_id, actor_id = actor.user_id, "Handling reject request");
    let mut persistence = app_state.persistence.lock().await;
    let response = reject_report(&mut persistence, &actor, report_id, request)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/reports/{id}/external`.
async fn handle_assign_external(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
    Json(request): Json<AssignExternalRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        report_id,
        actor_id = actor.user_id,
        handler = %request.handler,
        "Handling assign_external request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response = assign_external(&mut persistence, &actor, report_id, request, app_state.policy)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/reports/{id}/status`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        report_id,
        actor_id = actor.user_id,
        status = %request.status,
        "Handling update_status request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response = update_status(&mut persistence, &actor, report_id, request, app_state.policy)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/{id}/assignable/technicals`.
async fn handle_assignable_technicals(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
) -> Result<Json<AssignableTechnicalsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_assignable_technicals(
        &mut persistence,
        &actor,
        report_id,
        app_state.policy,
    )?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/reports/{id}/assignable/externals`.
async fn handle_assignable_externals(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
) -> Result<Json<AssignableExternalsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_assignable_externals(
        &mut persistence,
        &actor,
        report_id,
        app_state.policy,
    )?;
    drop(persistence);
    Ok(Json(response))
}

// ============================================================================
// Conversation and notes
// ============================================================================

/// Handler for POST `/reports/{id}/messages`.
async fn handle_send_message(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
    Json(request): Json<PostContentRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = send_message(&mut persistence, &actor, report_id, request)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/reports/{id}/messages`.
async fn handle_list_messages(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
) -> Result<Json<ListMessagesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_messages(&mut persistence, &actor, report_id)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/reports/{id}/notes`.
async fn handle_add_internal_note(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
    Json(request): Json<PostContentRequest>,
) -> Result<(StatusCode, Json<InternalNote>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let note = add_internal_note(&mut persistence, &actor, report_id, request)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(note)))
}

/// Handler for GET `/reports/{id}/notes`.
async fn handle_list_internal_notes(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(report_id): Path<i64>,
) -> Result<Json<ListInternalNotesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_internal_notes(&mut persistence, &actor, report_id)?;
    drop(persistence);
    Ok(Json(response))
}

// ============================================================================
// Notifications
// ============================================================================

/// Handler for GET `/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Query(query): Query<ListNotificationsRequest>,
) -> Result<Json<ListNotificationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_notifications(&mut persistence, &actor, query)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/notifications/unread_count`.
async fn handle_unread_count(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<UnreadCountResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = unread_notification_count(&mut persistence, &actor)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/notifications/{id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<Notification>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = mark_notification_read(&mut persistence, &actor, notification_id)?;
    drop(persistence);
    Ok(Json(response))
}

// ============================================================================
// Administration
// ============================================================================

/// Handler for POST `/admin/users`.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = create_user(&mut persistence, &actor, request)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/admin/companies`.
async fn handle_create_company(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CreateCompanyResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = create_company(&mut persistence, &actor, request)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/admin/maintainers/{id}/categories`.
async fn handle_register_maintainer_category(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(user_id): Path<i64>,
    Json(request): Json<RegisterMaintainerCategoryRequest>,
) -> Result<Json<RegisterMaintainerCategoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = register_maintainer_category(&mut persistence, &actor, user_id, request)?;
    drop(persistence);
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/reports",
            post(handle_create_report).get(handle_list_public_reports),
        )
        .route("/reports/pending", get(handle_list_pending_reports))
        .route("/reports/mine", get(handle_list_my_reports))
        .route("/reports/assigned", get(handle_list_assigned_reports))
        .route("/reports/{id}", get(handle_get_report))
        .route("/reports/{id}/approve", post(handle_approve_report))
        .route("/reports/{id}/reject", post(handle_reject_report))
        .route("/reports/{id}/external", post(handle_assign_external))
        .route("/reports/{id}/status", post(handle_update_status))
        .route(
            "/reports/{id}/assignable/technicals",
            get(handle_assignable_technicals),
        )
        .route(
            "/reports/{id}/assignable/externals",
            get(handle_assignable_externals),
        )
        .route(
            "/reports/{id}/messages",
            get(handle_list_messages).post(handle_send_message),
        )
        .route(
            "/reports/{id}/notes",
            get(handle_list_internal_notes).post(handle_add_internal_note),
        )
        .route("/notifications", get(handle_list_notifications))
        .route("/notifications/unread_count", get(handle_unread_count))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route("/admin/users", post(handle_create_user))
        .route("/admin/companies", post(handle_create_company))
        .route(
            "/admin/maintainers/{id}/categories",
            post(handle_register_maintainer_category),
        )
        .with_state(app_state)
}

fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    let persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
}

fn load_service_area(args: &Args) -> Result<ServiceArea, Box<dyn std::error::Error>> {
    match &args.boundary {
        Some(path) => {
            info!("Loading municipal boundary from: {}", path);
            let json: String = std::fs::read_to_string(path)?;
            Ok(ServiceArea::from_json(&json)?)
        }
        None => Ok(ServiceArea::turin()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Participium server");

    let persistence: Persistence = open_persistence(&args)?;
    let service_area: ServiceArea = load_service_area(&args)?;
    let photo_storage = DiskPhotoStorage::new(&args.upload_dir, &args.public_base_url)?;
    info!(
        directory = %photo_storage.directory().display(),
        "Storing uploaded photos"
    );

    let policy = AssignmentPolicy {
        include_previous_handlers: args.include_previous_handlers,
        allow_maintainer_redelegation: args.allow_maintainer_redelegation,
    };
    info!(?policy, "Assignment policy");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        photo_storage: Arc::new(photo_storage),
        address_resolver: Arc::new(FallbackAddressResolver),
        service_area: Arc::new(service_area),
        policy,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
