//! VCS 연동 계층.

pub mod github;

use crate::application::config::HostConfig;

pub use github::GitHubClient;

/// 호스트 설정과 해석된 토큰으로 GitHub 클라이언트를 만든다.
pub fn build_vcs_client(
    host: &str,
    host_cfg: Option<&HostConfig>,
    token: Option<String>,
) -> GitHubClient {
    let api_base = host_cfg.and_then(|h| h.api_base.clone());
    GitHubClient::new(host.to_string(), token, api_base)
}
