//! Maps transport outcomes to account errors.
//!
//! Classification is a pure function of the operation, the status code and
//! the transport error. Nothing here retries or touches the session.

use petland_domain::{ApiOperation, ResponseSpec};

use crate::error::{AccountError, AccountResult, UnderlyingError};
use crate::ports::HttpClientError;

/// Longest response body kept in an [`UnderlyingError::UnexpectedStatus`].
const MAX_BODY_CHARS: usize = 512;

/// Classifies the outcome of a single call.
///
/// A 2xx response is returned as-is. Any other status either has a specific
/// meaning for `operation` or falls through to [`AccountError::Unknown`];
/// transport failures are always `Unknown`.
///
/// # Errors
///
/// Returns the classified [`AccountError`] for every non-2xx outcome.
pub fn classify(
    operation: ApiOperation,
    outcome: Result<ResponseSpec, HttpClientError>,
) -> AccountResult<ResponseSpec> {
    let response = outcome.map_err(|e| AccountError::Unknown(UnderlyingError::Transport(e)))?;
    if response.is_success() {
        return Ok(response);
    }

    Err(
        known_failure(operation, response.status.as_u16()).unwrap_or_else(|| {
            AccountError::Unknown(UnderlyingError::UnexpectedStatus {
                status: response.status,
                body: truncated_body(&response),
            })
        }),
    )
}

/// Status codes with a documented meaning per operation.
fn known_failure(operation: ApiOperation, status: u16) -> Option<AccountError> {
    match (operation, status) {
        (ApiOperation::Login | ApiOperation::SubmitEmailCode, 400) => {
            Some(AccountError::InvalidCredentials)
        }
        (ApiOperation::Register, 409) => Some(AccountError::AccountAlreadyExists),
        (ApiOperation::GetUser, 401) => Some(AccountError::Unauthorized),
        (_, 500) => Some(AccountError::ServerUnavailable),
        _ => None,
    }
}

fn truncated_body(response: &ResponseSpec) -> String {
    response
        .body_as_string_lossy()
        .chars()
        .take(MAX_BODY_CHARS)
        .collect()
}
