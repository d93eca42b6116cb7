//! Axum route handlers for the Scoring API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extractor_for;
use crate::scoring::models::{AnalysisResult, SectionLabel};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    #[serde(default)]
    pub job_profile: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub job_profile: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub filename: String,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub description: String,
    pub required_sections: Vec<SectionLabel>,
    pub keyword_categories: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/score
///
/// Scores already-extracted resume text against a job profile.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let analysis = state
        .scorer
        .score(&request.text, request.job_profile.as_deref())?;
    Ok(Json(analysis))
}

/// POST /upload-resume/
///
/// Multipart upload: `file` (.pdf, .docx or .txt) and an optional `job_profile`
/// field. The profile may also be passed as a query parameter; the form field wins.
pub async fn handle_upload(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut job_profile = query.job_profile;

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(invalid_multipart)?;
                upload = Some((filename, data));
            }
            "job_profile" => {
                let value = field.text().await.map_err(invalid_multipart)?;
                if !value.trim().is_empty() {
                    job_profile = Some(value);
                }
            }
            _ => {}
        }
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let extractor = extractor_for(&filename)?;
    let text = extractor.extract(data).await?;
    info!(
        filename = %filename,
        format = extractor.format(),
        chars = text.len(),
        "Extracted resume text"
    );

    let analysis = state.scorer.score(&text, job_profile.as_deref())?;

    Ok(Json(UploadResponse {
        status: "success",
        filename,
        analysis,
    }))
}

/// GET /api/v1/profiles
pub async fn handle_list_profiles(State(state): State<AppState>) -> Json<Vec<ProfileSummary>> {
    let profiles = state
        .profiles
        .iter()
        .map(|p| ProfileSummary {
            name: p.name.clone(),
            description: p.description.clone(),
            required_sections: p.required_sections.clone(),
            keyword_categories: p.keyword_categories.iter().map(|c| c.name.clone()).collect(),
        })
        .collect();
    Json(profiles)
}

fn invalid_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {err}"))
}
