//! GitHub API 연동 구현.

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::LINK;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Value, json};

use crate::application::ports::VcsGateway;
use crate::domain::error::ReviewError;
use crate::domain::review::{DiffBundle, FileChange, LineAnchor, PullRequestRef};

/// owner/repo 경로 세그먼트 인코딩 규칙.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const FILES_PER_PAGE: &str = "100";
/// GitHub는 PR 파일 목록을 최대 3000개(100개 x 30페이지)까지만 돌려준다.
const MAX_FILE_PAGES: usize = 30;

impl From<reqwest::Error> for ReviewError {
    fn from(err: reqwest::Error) -> Self {
        ReviewError::Transport(err.to_string())
    }
}

pub struct GitHubClient {
    client: Client,
    host: String,
    token: Option<String>,
    api_base: Option<String>,
}

impl GitHubClient {
    pub fn new(host: String, token: Option<String>, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            host,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }

    fn repo_endpoint(&self, pull: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base(),
            utf8_percent_encode(&pull.owner, PATH_SEGMENT),
            utf8_percent_encode(&pull.repo, PATH_SEGMENT),
        )
    }

    fn files_endpoint(&self, pull: &PullRequestRef) -> String {
        format!("{}/pulls/{}/files", self.repo_endpoint(pull), pull.number)
    }

    fn review_comments_endpoint(&self, pull: &PullRequestRef) -> String {
        format!("{}/pulls/{}/comments", self.repo_endpoint(pull), pull.number)
    }

    fn issue_comments_endpoint(&self, pull: &PullRequestRef) -> String {
        format!("{}/issues/{}/comments", self.repo_endpoint(pull), pull.number)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prlens")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    /// 파일 목록 한 페이지와 `Link` 헤더의 다음 페이지 URL.
    async fn fetch_files_page(
        &self,
        url: String,
        first: bool,
    ) -> Result<(Vec<FileChange>, Option<String>), ReviewError> {
        let mut req = self.request(Method::GET, url);
        if first {
            req = req.query(&[("per_page", FILES_PER_PAGE)]);
        }
        let resp = req.send().await.map_err(|err| {
            tracing::warn!(error = %err, "github: failed to request PR files");
            ReviewError::Fetch
        })?;

        let status = resp.status();
        let next = resp
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_page_url);
        let body = resp.text().await.map_err(|err| {
            tracing::warn!(error = %err, "github: failed to read PR files body");
            ReviewError::Fetch
        })?;

        let parsed: Value = serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(%status, error = %err, "github: invalid PR files JSON");
            ReviewError::Fetch
        })?;

        // 배열이 아니면 오류 객체로 보고 부분 결과 없이 실패한다.
        let Value::Array(items) = parsed else {
            tracing::warn!(%status, %body, "github: PR files response is not a list");
            return Err(ReviewError::Fetch);
        };

        let files = items
            .into_iter()
            .map(serde_json::from_value::<FileChange>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                tracing::warn!(error = %err, "github: unexpected file entry shape");
                ReviewError::Fetch
            })?;

        Ok((files, next))
    }
}

#[async_trait]
impl VcsGateway for GitHubClient {
    async fn fetch_diff(&self, pull: &PullRequestRef) -> Result<DiffBundle, ReviewError> {
        let mut files = Vec::new();
        let (first, mut next) = self.fetch_files_page(self.files_endpoint(pull), true).await?;
        files.extend(first);

        let mut pages = 1;
        while let Some(url) = next {
            if pages >= MAX_FILE_PAGES {
                tracing::warn!(pages, files = files.len(), "github: PR file list truncated");
                break;
            }
            let (page, following) = self.fetch_files_page(url, false).await?;
            files.extend(page);
            next = following;
            pages += 1;
        }

        Ok(DiffBundle::from_files(files))
    }

    async fn post_comment(
        &self,
        pull: &PullRequestRef,
        body: &str,
        anchor: Option<&LineAnchor>,
    ) -> Result<Value, ReviewError> {
        if self.token.is_none() {
            tracing::error!(host = %self.host, "github: token is not configured; comment not posted");
            return Err(ReviewError::MissingCredential {
                host: self.host.clone(),
            });
        }

        let (url, payload) = match anchor {
            Some(anchor) => (
                self.review_comments_endpoint(pull),
                json!({
                    "body": body,
                    "commit_id": anchor.commit_id,
                    "path": anchor.path,
                    "line": anchor.line,
                    "side": "RIGHT",
                }),
            ),
            None => (self.issue_comments_endpoint(pull), json!({ "body": body })),
        };

        let resp = self
            .request(Method::POST, url)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(%status, "github: comment was not accepted");
        }

        // 성공 여부(id 필드 유무) 판단은 호출자에게 맡긴다.
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(text)),
        }
    }
}

/// `Link` 헤더에서 `rel="next"` 대상을 꺼낸다.
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| param.trim() == "rel=\"next\"");
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(ToString::to_string)
    })
}
