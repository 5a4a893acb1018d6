//! 호출자 식별자 추출기.
//! 인증은 앞단 협력자가 수행하고, 여기서는 설정된 헤더 값만 읽는다.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::ApiError;
use crate::domain::review::Identity;
use crate::interface::composition::AppComposition;

pub struct CallerIdentity(pub Identity);

impl FromRequestParts<Arc<AppComposition>> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &Arc<AppComposition>,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(app.identity_header())
            .and_then(|value| value.to_str().ok())
            .and_then(Identity::new)
            .map(CallerIdentity)
            .ok_or_else(ApiError::unauthorized)
    }
}
