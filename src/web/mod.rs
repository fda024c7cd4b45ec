//! HTTP surface: the home page, the generation workflow endpoints, and the
//! per-stamp download / print / QR / share views.

use std::num::NonZeroU16;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_DISPOSITION;
use axum::response::{Redirect, Response};
use base64::Engine;
use base64::engine::general_purpose;
use image::ImageEncoder;
use qrcode::QrCode;
use tokio::sync::RwLock;
use url::Url;

use crate::constants::{QR_MIN_DIMENSIONS, SUGGESTIONS};
use crate::generate::StampGenerator;
use crate::state::{Submission, ViewState};
use crate::store::CollectionStore;

mod prelude;
mod views;

use prelude::*;
use views::{HomeTemplate, PrintTemplate, ViewTemplate};

#[derive(Clone)]
pub(crate) struct AppState {
    base_url: Url,
    generator: Arc<dyn StampGenerator>,
    store: Arc<RwLock<CollectionStore>>,
    view: Arc<RwLock<ViewState>>,
}

impl AppState {
    fn new(base_url: Url, store: CollectionStore, generator: Arc<dyn StampGenerator>) -> Self {
        Self {
            base_url,
            generator,
            store: Arc::new(RwLock::new(store)),
            view: Arc::new(RwLock::new(ViewState::new())),
        }
    }
}

async fn home_handler(State(state): State<AppState>) -> HomeTemplate {
    let stamps = state.store.read().await.stamps().to_vec();
    HomeTemplate {
        has_stamps: !stamps.is_empty(),
        stamps,
        suggestions: &SUGGESTIONS,
    }
}

#[derive(Deserialize)]
pub(crate) struct GenerateRequest {
    theme: String,
}

#[derive(Serialize)]
pub(crate) struct StatusResponse {
    status: AppStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stamp: Option<Stamp>,
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<StatusResponse>, StampError> {
    let submission = state.view.write().await.submit(&request.theme);
    let theme = match submission {
        Submission::Rejected => {
            // Validation boundary: whitespace-only themes never reach the
            // generator and leave the state untouched.
            let view = state.view.read().await;
            return Ok(Json(StatusResponse {
                status: view.status(),
                message: view.error_message(),
                stamp: None,
            }));
        }
        Submission::Busy => return Err(StampError::Busy),
        Submission::Accepted(theme) => theme,
    };

    // Detached: hyper drops this handler future when the client disconnects,
    // so the workflow runs in its own task to guarantee the state machine
    // always leaves Generating.
    let workflow = tokio::spawn(run_generation(state.clone(), theme));
    match workflow.await {
        Ok(result) => result,
        Err(err) => Err(StampError::InternalServerError(format!(
            "generation workflow panicked: {err}"
        ))),
    }
}

async fn run_generation(
    state: AppState,
    theme: String,
) -> Result<Json<StatusResponse>, StampError> {
    // The one suspension point; no locks are held while the request is out.
    match state.generator.generate(&theme).await {
        Ok(image_url) => {
            let stamp = Stamp::new(theme, image_url);
            if let Err(err) = state.store.write().await.add(stamp.clone()) {
                state.view.write().await.resolve_error();
                return Err(StampError::from(err));
            }
            state.view.write().await.resolve_success();
            info!("Generated stamp {} for theme {:?}", stamp.id, stamp.theme);
            Ok(Json(StatusResponse {
                status: AppStatus::Success,
                message: None,
                stamp: Some(stamp),
            }))
        }
        Err(failure) => {
            // Logged in full; users only ever see the fixed copy.
            error!("Stamp generation failed: {}", failure);
            state.view.write().await.resolve_error();
            Ok(Json(StatusResponse {
                status: AppStatus::Error,
                message: Some(GENERATION_ERROR_MESSAGE),
                stamp: None,
            }))
        }
    }
}

async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let view = state.view.read().await;
    Json(StatusResponse {
        status: view.status(),
        message: view.loading_message().or_else(|| view.error_message()),
        stamp: None,
    })
}

async fn delete_stamp_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, StampError> {
    state.store.write().await.delete(&id)?;
    Ok(Redirect::to("/"))
}

async fn reset_handler(State(state): State<AppState>) -> Result<Redirect, StampError> {
    state.store.write().await.reset()?;
    info!("Collection reset");
    Ok(Redirect::to("/"))
}

async fn download_stamp_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, StampError> {
    let store = state.store.read().await;
    let stamp = store
        .get(&id)
        .ok_or_else(|| StampError::NotFound(id.clone()))?;
    let (content_type, bytes) = decode_data_uri(&stamp.image_url)?;

    Response::builder()
        .header(CONTENT_TYPE, content_type)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", stamp.download_filename()),
        )
        .body(Body::from(bytes))
        .map_err(StampError::from)
}

async fn print_stamp_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<PrintTemplate, StampError> {
    let store = state.store.read().await;
    let stamp = store.get(&id).ok_or(StampError::NotFound(id))?;
    Ok(PrintTemplate {
        theme: stamp.theme.clone(),
        image_url: stamp.image_url.clone(),
    })
}

async fn qr_stamp_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, StampError> {
    let theme = {
        let store = state.store.read().await;
        store
            .get(&id)
            .ok_or(StampError::NotFound(id))?
            .theme
            .clone()
    };
    let url = share_url(&state.base_url, &theme)?;
    let png = qr_png(url.as_str())?;

    Response::builder()
        .header(CONTENT_TYPE, "image/png")
        .body(Body::from(png))
        .map_err(StampError::from)
}

#[derive(Deserialize)]
pub(crate) struct ViewParams {
    theme: Option<String>,
}

async fn view_handler(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<ViewTemplate, StampError> {
    let theme = params.theme.unwrap_or_default();
    if theme.trim().is_empty() {
        return Err(StampError::BadRequest);
    }
    let store = state.store.read().await;
    let stamp = store
        .stamps()
        .iter()
        .find(|stamp| stamp.theme.eq_ignore_ascii_case(&theme));
    Ok(ViewTemplate {
        theme,
        has_stamp: stamp.is_some(),
        image_url: stamp.map(|stamp| stamp.image_url.clone()).unwrap_or_default(),
    })
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

/// The QR share link for a theme: `{base_url}/view?theme=<encoded>`.
fn share_url(base_url: &Url, theme: &str) -> Result<Url, url::ParseError> {
    let mut url = base_url.join("view")?;
    url.query_pairs_mut().append_pair("theme", theme);
    Ok(url)
}

fn qr_png(contents: &str) -> Result<Vec<u8>, StampError> {
    let code = QrCode::new(contents)
        .map_err(|err| StampError::InternalServerError(format!("QR encoding failed: {err}")))?;
    let rendered = code
        .render::<image::Luma<u8>>()
        .min_dimensions(QR_MIN_DIMENSIONS, QR_MIN_DIMENSIONS)
        .build();
    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png).write_image(
        rendered.as_raw(),
        rendered.width(),
        rendered.height(),
        image::ExtendedColorType::L8,
    )?;
    Ok(png)
}

fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), StampError> {
    let rest = uri.strip_prefix("data:").ok_or_else(|| {
        StampError::InternalServerError("stored image is not a data URI".to_string())
    })?;
    let (content_type, encoded) = rest.split_once(";base64,").ok_or_else(|| {
        StampError::InternalServerError("stored image is not base64-encoded".to_string())
    })?;
    let bytes = general_purpose::STANDARD.decode(encoded).map_err(|err| {
        StampError::InternalServerError(format!("stored image is not valid base64: {err}"))
    })?;
    Ok((content_type.to_string(), bytes))
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(home_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/api/generate", axum::routing::post(generate_handler))
        .route("/api/status", axum::routing::get(status_handler))
        .route(
            "/stamps/{id}/delete",
            axum::routing::post(delete_stamp_handler),
        )
        .route("/reset", axum::routing::post(reset_handler))
        .route(
            "/stamps/{id}/download",
            axum::routing::get(download_stamp_handler),
        )
        .route(
            "/stamps/{id}/print",
            axum::routing::get(print_stamp_handler),
        )
        .route("/stamps/{id}/qr", axum::routing::get(qr_stamp_handler))
        .route("/view", axum::routing::get(view_handler))
}

/// Starts the HTTP server with the given collection and generation client.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    base_url: Url,
    store: CollectionStore,
    generator: Arc<dyn StampGenerator>,
) -> Result<(), anyhow::Error> {
    let app = create_router().with_state(AppState::new(base_url, store, generator));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}
