//! prlens library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::ports::ConfigRepository;
use domain::review::{Identity, RunOptions};
use domain::target::ReviewTarget;
use infrastructure::adapters::JsonConfigRepository;
use infrastructure::render::render_review_markdown;
use interface::composition::AppComposition;

/// CLI 단발 리뷰가 기록될 식별자.
pub const LOCAL_IDENTITY: &str = "local";

/// PR URL 하나를 리뷰하고 출력할 문자열(Markdown 또는 JSON)을 반환한다.
pub async fn run(options: RunOptions) -> Result<String> {
    let target = ReviewTarget::parse(&options.url)?;
    let config = JsonConfigRepository.load()?;

    let mut composition = AppComposition::for_host(&config, &target.host);
    if let Some(model) = options.model {
        composition = composition.with_review_model(model);
    }

    let identity = Identity::new(LOCAL_IDENTITY).context("local identity is blank")?;
    let outcome = composition
        .review_usecase()
        .execute(&identity, &target.pull)
        .await
        .with_context(|| format!("review failed for {}", target.url))?;

    if options.json {
        let body = json!({ "review": outcome.review, "files": outcome.files });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    Ok(render_review_markdown(
        &target.url,
        composition.review_model(),
        &outcome.review,
    ))
}

/// 설정 파일을 읽어 HTTP 서비스를 띄운다.
pub async fn serve(bind_override: Option<String>) -> Result<()> {
    let composition = AppComposition::load()?;
    let bind = bind_override.unwrap_or_else(|| composition.bind_address().to_string());
    interface::http::serve(Arc::new(composition), &bind).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let repo = JsonConfigRepository;
    application::usecases::inspect_config::InspectConfigUseCase { config_repo: &repo }.execute()
}
