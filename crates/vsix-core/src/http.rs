//! Blocking HTTP transfers over the curl easy interface.
//!
//! Both marketplace calls (query POST, asset GET) go through here so that
//! proxy, TLS-verification and timeout handling stay in one place. Bodies
//! are buffered in memory; VSIX packages are small enough that streaming
//! to disk is not worth the complexity.

use curl::easy::{Easy, List};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("vsixget/", env!("CARGO_PKG_VERSION"));

/// Transport settings shared by both calls, taken from the download config.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportOptions<'a> {
    /// Proxy URL applied to the transfer, if any.
    pub proxy: Option<&'a str>,
    /// Disable TLS peer/host verification (self-signed corporate proxies).
    pub ignore_ssl: bool,
}

/// A completed HTTP exchange. Any status code is a valid response here;
/// callers decide what non-200 means for their step.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Error from a single transfer attempt.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Curl reported a transport failure (DNS, connect, timeout, TLS).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response arrived with a non-200 status the caller treats as failure.
    #[error("HTTP {0}")]
    Http(u32),
}

fn configure(
    easy: &mut Easy,
    url: &str,
    opts: &TransportOptions<'_>,
    timeout: Duration,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(timeout)?;
    easy.useragent(USER_AGENT)?;
    if let Some(proxy) = opts.proxy {
        easy.proxy(proxy)?;
    }
    if opts.ignore_ssl {
        easy.ssl_verify_peer(false)?;
        easy.ssl_verify_host(false)?;
    }
    Ok(())
}

fn perform(easy: &mut Easy) -> Result<HttpResponse, TransferError> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    Ok(HttpResponse { status, body })
}

/// POST `payload` to `url` with the given extra headers.
pub fn post_json(
    url: &str,
    headers: &[(&str, &str)],
    payload: &[u8],
    opts: &TransportOptions<'_>,
    timeout: Duration,
) -> Result<HttpResponse, TransferError> {
    let mut easy = Easy::new();
    configure(&mut easy, url, opts, timeout)?;
    easy.post(true)?;
    easy.post_fields_copy(payload)?;

    let mut list = List::new();
    for (name, value) in headers {
        list.append(&format!("{name}: {value}"))?;
    }
    easy.http_headers(list)?;

    perform(&mut easy)
}

/// GET `url`, buffering the full body.
pub fn get(
    url: &str,
    opts: &TransportOptions<'_>,
    timeout: Duration,
) -> Result<HttpResponse, TransferError> {
    let mut easy = Easy::new();
    configure(&mut easy, url, opts, timeout)?;
    perform(&mut easy)
}

/// Treats any non-200 response as a `TransferError::Http`, so retry
/// classification and outcome mapping see the status code.
pub fn ok_status(resp: HttpResponse) -> Result<HttpResponse, TransferError> {
    if resp.status == 200 {
        Ok(resp)
    } else {
        Err(TransferError::Http(resp.status))
    }
}
