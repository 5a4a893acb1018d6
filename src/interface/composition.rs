//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::{Config, GITHUB_HOST};
use crate::application::ports::{ConfigRepository, ModelRunner, VcsGateway};
use crate::application::usecases::chat::ChatUseCase;
use crate::application::usecases::feedback::SubmitFeedbackUseCase;
use crate::application::usecases::history::HistoryUseCase;
use crate::application::usecases::review_pr::{RecordIdSequence, ReviewPrUseCase};
use crate::infrastructure::adapters::JsonConfigRepository;
use crate::infrastructure::config::{resolve_host_token, resolve_review_model};
use crate::infrastructure::model::CommandModelRunner;
use crate::infrastructure::store::{InMemoryChatStore, InMemoryHistoryStore};
use crate::infrastructure::vcs::build_vcs_client;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
/// 서버에서는 요청 간에 공유되므로 저장소/세마포어를 직접 소유한다.
pub struct AppComposition {
    vcs: Arc<dyn VcsGateway>,
    model_runner: Arc<dyn ModelRunner>,
    history: InMemoryHistoryStore,
    chat_store: InMemoryChatStore,
    record_ids: RecordIdSequence,
    review_model: String,
    chat_model: String,
    identity_header: String,
    bind: String,
}

impl AppComposition {
    /// 병합된 설정 파일로 github.com 대상 조합을 만든다.
    pub fn load() -> Result<Self> {
        let config = JsonConfigRepository.load()?;
        Ok(Self::for_host(&config, GITHUB_HOST))
    }

    /// 지정한 VCS 호스트용 조합을 만든다.
    pub fn for_host(config: &Config, host: &str) -> Self {
        let host_cfg = config.host_config(host);
        let token = resolve_host_token(host_cfg).token;
        if token.is_none() {
            tracing::warn!(host, "VCS token not found; feedback posting will fail");
        }

        let vcs = build_vcs_client(host, host_cfg, token);
        let model_runner = CommandModelRunner::new(config.model_command_spec());
        Self::from_parts(config, Arc::new(vcs), Arc::new(model_runner))
    }

    /// 외부에서 만든 게이트웨이/모델 실행기로 조합한다.
    pub fn from_parts(
        config: &Config,
        vcs: Arc<dyn VcsGateway>,
        model_runner: Arc<dyn ModelRunner>,
    ) -> Self {
        Self {
            vcs,
            model_runner,
            history: InMemoryHistoryStore::new(config.history_capacity()),
            chat_store: InMemoryChatStore::default(),
            record_ids: RecordIdSequence::default(),
            review_model: resolve_review_model(config).model,
            chat_model: config.chat_model(),
            identity_header: config.identity_header(),
            bind: config.bind_address(),
        }
    }

    /// 리뷰 모델을 덮어쓴다(CLI `--model`).
    pub fn with_review_model(mut self, model: impl Into<String>) -> Self {
        self.review_model = model.into();
        self
    }

    pub fn review_model(&self) -> &str {
        &self.review_model
    }

    pub fn identity_header(&self) -> &str {
        &self.identity_header
    }

    pub fn bind_address(&self) -> &str {
        &self.bind
    }

    /// 리뷰 실행 유스케이스를 생성한다.
    pub fn review_usecase(&self) -> ReviewPrUseCase<'_> {
        ReviewPrUseCase {
            vcs: self.vcs.as_ref(),
            model_runner: self.model_runner.as_ref(),
            history: &self.history,
            record_ids: &self.record_ids,
            model: &self.review_model,
        }
    }

    pub fn history_usecase(&self) -> HistoryUseCase<'_> {
        HistoryUseCase {
            history: &self.history,
        }
    }

    pub fn feedback_usecase(&self) -> SubmitFeedbackUseCase<'_> {
        SubmitFeedbackUseCase {
            vcs: self.vcs.as_ref(),
        }
    }

    pub fn chat_usecase(&self) -> ChatUseCase<'_> {
        ChatUseCase {
            model_runner: self.model_runner.as_ref(),
            chat_store: &self.chat_store,
            model: &self.chat_model,
        }
    }
}
