//! Send/parse/retry loop for one signed request.

use log::{debug, warn};

use super::MwsResponse;
use crate::config::HTTP_STATUS_OK;
use crate::error_handling::{get_retry_strategy, is_retryable_status, report_error, ApiError};
use crate::response::parse_raw_response;
use crate::transport::{Transport, TransportRequest};

/// Drives transport attempts for an already signed request.
///
/// A 200 returns immediately. A 500 is re-sent unchanged after the next
/// backoff delay while the schedule has delays left; every other status, and
/// a 500 once the schedule is spent, becomes the error reported from that
/// attempt's body. Transport and parse failures are returned without retry.
pub(crate) async fn send_with_retry<T: Transport>(
    transport: &T,
    request: &TransportRequest,
    max_error_retry: u32,
) -> Result<MwsResponse, ApiError> {
    let mut backoff = get_retry_strategy(max_error_retry);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        debug!("POST {} (attempt {})", request.url, attempt);

        let raw = transport.send(request).await?;
        let response = parse_raw_response(&raw)?;
        let metadata = response.metadata();
        debug!(
            "Attempt {} returned status {} ({} body bytes)",
            attempt,
            response.status,
            response.body.len()
        );

        if response.status == HTTP_STATUS_OK {
            return Ok(MwsResponse {
                body: response.body,
                metadata,
                status: response.status,
            });
        }

        if is_retryable_status(response.status) {
            if let Some(delay) = backoff.next() {
                warn!(
                    "Status {} from {}, retrying in {}ms (retry {} of {})",
                    response.status,
                    request.url,
                    delay.as_millis(),
                    attempt,
                    max_error_retry
                );
                tokio::time::sleep(delay).await;
                continue;
            }
        }

        return Err(report_error(response.status, &response.body, metadata));
    }
}
