pub(crate) use crate::constants::GENERATION_ERROR_MESSAGE;
pub(crate) use crate::error::StampError;
pub(crate) use crate::state::AppStatus;
pub(crate) use crate::store::Stamp;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Path, Query, State};
pub(crate) use axum::http::header::CONTENT_TYPE;
pub(crate) use axum::response::IntoResponse;
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use std::sync::Arc;
pub(crate) use tracing::{error, info};
