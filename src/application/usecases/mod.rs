//! 리뷰 파이프라인 유스케이스 모음.

pub mod chat;
pub mod feedback;
pub mod history;
pub mod inspect_config;
pub mod review_pr;

#[cfg(test)]
pub(crate) mod fakes;
