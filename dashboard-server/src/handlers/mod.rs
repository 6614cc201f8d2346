//! HTTP handlers

pub mod health;
pub mod model;
pub mod content;
pub mod predict;

use axum::http::Uri;

use crate::AppError;

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
