use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use recall_core::{ArticleAnalysisResult, FiveW1H, NewVocabulary, PodcastCorrectionResult, ViewState, VocabularyItem};
use recall_dashboard::DashboardState;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: ViewState,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub inputs: Option<FiveW1H>,
}

#[derive(Debug, Serialize)]
pub struct VocabResponse {
    pub total: usize,
    pub pending: usize,
    pub items: Vec<VocabularyItem>,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model": state.dashboard.model_name(),
    }))
}

pub async fn get_state(State(state): State<AppState>) -> Json<DashboardState> {
    Json(state.dashboard.snapshot().await)
}

pub async fn list_feed(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.resources().await)
}

pub async fn reload_feed(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.load_feed().await)
}

pub async fn set_view(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> Json<DashboardState> {
    state.dashboard.navigate(request.view).await;
    Json(state.dashboard.snapshot().await)
}

pub async fn open_manual(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> Json<DashboardState> {
    state.dashboard.open_manual(request.view).await;
    Json(state.dashboard.snapshot().await)
}

pub async fn process_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardState>, ApiError> {
    state.dashboard.process_resource(&id).await?;
    Ok(Json(state.dashboard.snapshot().await))
}

pub async fn analyze_article(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ArticleAnalysisResult>, ApiError> {
    let result = state.dashboard.analyze_article(request.text).await?;
    Ok(Json(result))
}

pub async fn review_podcast(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<PodcastCorrectionResult>, ApiError> {
    let result = state.dashboard.review_podcast(request.topic, request.inputs).await?;
    Ok(Json(result))
}

pub async fn list_vocab(State(state): State<AppState>) -> Json<VocabResponse> {
    let items = state.dashboard.vocab().await;
    Json(VocabResponse {
        total: items.len(),
        pending: items.iter().filter(|item| item.is_new()).count(),
        items,
    })
}

pub async fn save_vocab(
    State(state): State<AppState>,
    Json(entry): Json<NewVocabulary>,
) -> impl IntoResponse {
    let item = state.dashboard.save_vocab(entry).await;
    (StatusCode::CREATED, Json(item))
}

pub async fn save_from_analysis(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.dashboard.save_from_analysis(index).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn sync_vocab(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let synced = state.dashboard.sync_vocab().await?;
    Ok(Json(json!({
        "synced": synced,
        "message": format!("Pushed {} new words downstream", synced),
    })))
}

pub async fn export_vocab(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.dashboard.export_vocab().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
