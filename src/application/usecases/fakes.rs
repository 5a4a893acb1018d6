//! 유스케이스 테스트용 포트 대역.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{ModelRunner, VcsGateway};
use crate::domain::error::ReviewError;
use crate::domain::review::{DiffBundle, FileChange, LineAnchor, PullRequestRef};

#[derive(Default)]
pub struct FakeVcs {
    pub files: Vec<FileChange>,
    pub fail_fetch: bool,
    pub missing_token: bool,
    pub posted: Mutex<Vec<(String, Option<LineAnchor>)>>,
}

#[async_trait]
impl VcsGateway for FakeVcs {
    async fn fetch_diff(&self, _pull: &PullRequestRef) -> Result<DiffBundle, ReviewError> {
        if self.fail_fetch {
            return Err(ReviewError::Fetch);
        }
        Ok(DiffBundle::from_files(self.files.clone()))
    }

    async fn post_comment(
        &self,
        _pull: &PullRequestRef,
        body: &str,
        anchor: Option<&LineAnchor>,
    ) -> Result<Value, ReviewError> {
        if self.missing_token {
            return Err(ReviewError::MissingCredential {
                host: "github.com".to_string(),
            });
        }
        self.posted
            .lock()
            .unwrap()
            .push((body.to_string(), anchor.cloned()));
        Ok(json!({ "id": 1, "body": body }))
    }
}

pub struct FakeModel {
    pub output: String,
    pub fail: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeModel {
    pub fn answering(output: &str) -> Self {
        Self {
            output: output.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 프로세스를 띄우지 못한 것처럼 실패한다.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::answering("")
        }
    }
}

#[async_trait]
impl ModelRunner for FakeModel {
    async fn run(&self, prompt: &str, model: &str) -> Result<String, ReviewError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), model.to_string()));
        if self.fail {
            return Err(ReviewError::ModelInvocation(std::io::Error::other(
                "model binary not found",
            )));
        }
        Ok(self.output.clone())
    }
}

pub fn sample_pull() -> PullRequestRef {
    PullRequestRef {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: 7,
    }
}
