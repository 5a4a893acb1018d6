//! 입력 URL을 GitHub PR 대상으로 해석하는 모듈.

use anyhow::{Result, bail};
use url::Url;

use crate::domain::review::PullRequestRef;

#[derive(Debug, Clone)]
pub struct ReviewTarget {
    pub host: String,
    pub pull: PullRequestRef,
    pub url: String,
}

impl ReviewTarget {
    /// `https://<host>/<owner>/<repo>/pull/<number>` 형식만 받는다.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim())?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("URL host is missing"))?
            .to_string();

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 4 || segments[2] != "pull" {
            bail!("unsupported URL format: {input}");
        }

        let Ok(number) = segments[3].parse::<u64>() else {
            bail!("invalid pull request number in URL: {input}");
        };

        Ok(Self {
            host,
            pull: PullRequestRef {
                owner: segments[0].to_string(),
                repo: segments[1].to_string(),
                number,
            },
            url: input.trim().to_string(),
        })
    }
}
