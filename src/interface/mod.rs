//! Interface layer
//! CLI/HTTP 입력을 받아 유스케이스를 호출한다.

pub mod cli;
pub mod composition;
pub mod http;
