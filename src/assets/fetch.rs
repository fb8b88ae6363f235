use std::time::Duration;

use reqwest::blocking::Client;

use crate::foundation::error::{ReelError, ReelResult};

/// Timeout applied to source downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GET `url` and return the body. Any non-2xx status is reported as unavailable input.
pub fn get_bytes(url: &str, timeout: Duration) -> ReelResult<Vec<u8>> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
        .map_err(|e| ReelError::input_unavailable(format!("http client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| ReelError::input_unavailable(format!("GET {url}: {e}")))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ReelError::input_unavailable(format!(
            "GET {url}: status {status}"
        )));
    }
    let body = resp
        .bytes()
        .map_err(|e| ReelError::input_unavailable(format!("GET {url}: read body: {e}")))?;
    tracing::debug!(url, bytes = body.len(), "fetched remote source");
    Ok(body.to_vec())
}
