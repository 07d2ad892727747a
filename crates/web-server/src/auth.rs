use crate::{error::AppError, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

// Create a type alias for the HMAC-SHA256 implementation.
type HmacSha256 = Hmac<Sha256>;

/// Header carrying the shared secret of the scraper.
pub const SCRAPER_KEY_HEADER: &str = "scraper-key";

/// Middleware guarding the write endpoints.
///
/// The request goes through only if the `SCRAPER-KEY` header matches the
/// configured key exactly. Without a configured key every request is rejected.
pub async fn require_scraper_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.scraper_key.as_deref() else {
        tracing::warn!("No scraper key configured, rejecting write request.");
        return Err(AppError::Unauthorized);
    };

    let provided = request
        .headers()
        .get(SCRAPER_KEY_HEADER)
        .map(|value| value.as_bytes())
        .ok_or(AppError::Unauthorized)?;

    if !keys_match(expected.as_bytes(), provided) {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Compares the keys in constant time.
///
/// Both values are tagged with HMAC-SHA256 under the expected key and the tags
/// are compared with `verify_slice`, so the running time does not depend on
/// where the inputs first differ, nor on the length of the provided key.
fn keys_match(expected: &[u8], provided: &[u8]) -> bool {
    let (Ok(mut reference), Ok(mut candidate)) =
        (HmacSha256::new_from_slice(expected), HmacSha256::new_from_slice(expected))
    else {
        return false;
    };

    reference.update(expected);
    candidate.update(provided);

    let tag = reference.finalize().into_bytes();
    candidate.verify_slice(&tag).is_ok()
}
