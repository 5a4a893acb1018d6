//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::{resolve_host_token, resolve_review_model};
use super::utils::command_exists;
use crate::application::config::{Config, DefaultsConfig, GITHUB_HOST, HostConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective: EffectiveSettings,
    pub hosts: BTreeMap<String, HostInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub review_model: String,
    pub review_model_source: String,
    pub chat_model: String,
    pub model_command: String,
    pub model_args: Vec<String>,
    pub model_command_available: bool,
    pub max_concurrent_models: usize,
    pub model_timeout_secs: Option<u64>,
    pub history_capacity: usize,
    pub bind: String,
    pub identity_header: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;

        let mut hosts: BTreeMap<String, HostInspection> = config
            .hosts
            .iter()
            .map(|(host, cfg)| (host.clone(), host_inspection(Some(cfg))))
            .collect();
        // github.com은 설정이 없어도 기본 환경변수로 동작하므로 항상 보여준다.
        hosts
            .entry(GITHUB_HOST.to_string())
            .or_insert_with(|| host_inspection(None));

        Self {
            searched_paths: display_all(&loaded.searched_paths),
            loaded_paths: display_all(&loaded.loaded_paths),
            defaults: config.defaults.clone(),
            effective: EffectiveSettings::from_config(config),
            hosts,
        }
    }
}

impl EffectiveSettings {
    fn from_config(config: &Config) -> Self {
        let review_model = resolve_review_model(config);
        let spec = config.model_command_spec();

        Self {
            review_model: review_model.model,
            review_model_source: review_model.source,
            chat_model: config.chat_model(),
            model_command_available: command_exists(&spec.command),
            model_command: spec.command,
            model_args: spec.args,
            max_concurrent_models: spec.max_concurrent,
            model_timeout_secs: spec.timeout.map(|t| t.as_secs()),
            history_capacity: config.history_capacity(),
            bind: config.bind_address(),
            identity_header: config.identity_header(),
        }
    }
}

fn host_inspection(cfg: Option<&HostConfig>) -> HostInspection {
    let resolution = resolve_host_token(cfg);
    HostInspection {
        token_source: resolution.source,
        token_resolved: resolution.token.is_some(),
        api_base: cfg.and_then(|c| c.api_base.clone()),
    }
}

fn display_all(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn inspection_always_lists_github_and_never_exposes_tokens() {
        let mut config = Config::default();
        config.hosts.insert(
            "git.corp.example".into(),
            HostConfig {
                token: Some("secret-value".into()),
                api_base: Some("https://git.corp.example/api/v3".into()),
                ..HostConfig::default()
            },
        );
        let loaded = LoadedConfig {
            config,
            searched_paths: vec![PathBuf::from("/etc/prlens/config.json")],
            loaded_paths: vec![],
        };

        let inspection = ConfigInspection::from_loaded(loaded);
        let json = serde_json::to_string(&inspection).unwrap();

        assert!(inspection.hosts.contains_key(GITHUB_HOST));
        let corp = &inspection.hosts["git.corp.example"];
        assert!(corp.token_resolved);
        assert_eq!(corp.token_source.as_deref(), Some("inline"));
        assert!(!json.contains("secret-value"));
        assert_eq!(inspection.effective.model_command, "ollama");
        assert_eq!(inspection.effective.history_capacity, 50);
    }
}
