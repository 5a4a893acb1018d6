//! HTTP 핸들러와 요청 DTO.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use super::error::{ApiError, ApiResult};
use super::identity::CallerIdentity;
use crate::application::usecases::feedback::FeedbackRequest;
use crate::domain::review::{FeedbackAction, LineAnchor, PullRequestRef};
use crate::interface::composition::AppComposition;

type AppState = State<Arc<AppComposition>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub owner: String,
    pub repo: String,
    #[serde(deserialize_with = "pr_number")]
    pub pr_number: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackBody {
    pub owner: String,
    pub repo: String,
    #[serde(deserialize_with = "pr_number")]
    pub pr_number: u64,
    #[serde(default)]
    pub comment: String,
    pub action: Option<String>,
    pub line_info: Option<LineAnchor>,
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: Option<String>,
    pub context: Option<Value>,
    pub history: Option<Value>,
}

/// UI가 PR 번호를 숫자나 문자열로 보낸다.
fn pr_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn pull_ref(owner: String, repo: String, number: u64) -> PullRequestRef {
    PullRequestRef {
        owner,
        repo,
        number,
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn submit_review(
    State(app): AppState,
    CallerIdentity(identity): CallerIdentity,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let pull = pull_ref(body.owner, body.repo, body.pr_number);

    let outcome = app.review_usecase().execute(&identity, &pull).await?;
    Ok(Json(json!({ "review": outcome.review, "files": outcome.files })))
}

pub async fn get_history(
    State(app): AppState,
    CallerIdentity(identity): CallerIdentity,
) -> Json<Value> {
    let history = app.history_usecase().list(&identity).await;
    Json(json!({ "history": history }))
}

pub async fn clear_history(
    State(app): AppState,
    CallerIdentity(identity): CallerIdentity,
) -> Json<Value> {
    app.history_usecase().clear(&identity).await;
    Json(json!({ "success": true }))
}

pub async fn submit_feedback(
    State(app): AppState,
    CallerIdentity(_identity): CallerIdentity,
    body: Result<Json<FeedbackBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let request = FeedbackRequest {
        pull: pull_ref(body.owner, body.repo, body.pr_number),
        comment: body.comment,
        action: FeedbackAction::from_action(body.action.as_deref()),
        anchor: body.line_info,
    };

    let result = app.feedback_usecase().execute(&request).await?;
    Ok(Json(json!({ "success": true, "result": result })))
}

pub async fn chat(
    State(app): AppState,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body?;
    let message = body.message.filter(|m| !m.is_empty());
    let context = body.context.filter(|c| !c.is_null());
    let (Some(message), Some(context)) = (message, context) else {
        return Err(ApiError::bad_request("Missing message or context"));
    };

    let response = app
        .chat_usecase()
        .execute(&message, context, body.history.as_ref())
        .await?;
    Ok(Json(json!({ "response": response })))
}

pub async fn chat_history(State(app): AppState) -> Json<Value> {
    let history = app.chat_usecase().list().await;
    Json(json!({ "history": history }))
}
