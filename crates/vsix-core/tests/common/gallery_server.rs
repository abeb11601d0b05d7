//! Minimal HTTP/1.1 server standing in for the marketplace gallery.
//!
//! Routes POSTs to `.../extensionquery` and GETs to `.../vspackage`,
//! serving canned status/body pairs and counting hits so tests can assert
//! which calls were (not) made. Runs until the process exits.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct GalleryOptions {
    pub query_status: u32,
    pub query_body: Vec<u8>,
    pub asset_status: u32,
    pub asset_body: Vec<u8>,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            query_status: 200,
            query_body: br#"{"results":[{"extensions":[{"versions":[{"version":"2024.1.0"}]}]}]}"#
                .to_vec(),
            asset_status: 200,
            asset_body: b"VSIX-PACKAGE-BYTES".to_vec(),
        }
    }
}

pub struct GalleryServer {
    /// Gallery API base served by this instance, e.g.
    /// `http://127.0.0.1:12345/gallery`.
    pub base_url: String,
    query_hits: Arc<AtomicUsize>,
    asset_hits: Arc<AtomicUsize>,
}

impl GalleryServer {
    pub fn query_hits(&self) -> usize {
        self.query_hits.load(Ordering::SeqCst)
    }

    pub fn asset_hits(&self) -> usize {
        self.asset_hits.load(Ordering::SeqCst)
    }

    /// Endpoints pointing at this server. The CDN host is deliberately
    /// unusable: tests always request a target platform, so the asset URL
    /// stays under `base_url`.
    pub fn endpoints(&self) -> vsix_core::marketplace::Endpoints {
        vsix_core::marketplace::Endpoints {
            gallery_base: self.base_url.clone(),
            cdn_host: "invalid.localdomain".to_string(),
        }
    }
}

pub fn start(opts: GalleryOptions) -> GalleryServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let query_hits = Arc::new(AtomicUsize::new(0));
    let asset_hits = Arc::new(AtomicUsize::new(0));

    let q = Arc::clone(&query_hits);
    let a = Arc::clone(&asset_hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = opts.clone();
            let q = Arc::clone(&q);
            let a = Arc::clone(&a);
            thread::spawn(move || handle(stream, &opts, &q, &a));
        }
    });

    GalleryServer {
        base_url: format!("http://127.0.0.1:{}/gallery", port),
        query_hits,
        asset_hits,
    }
}

fn handle(
    mut stream: TcpStream,
    opts: &GalleryOptions,
    query_hits: &AtomicUsize,
    asset_hits: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");

    let (status, body) = if method.eq_ignore_ascii_case("POST") && path.ends_with("/extensionquery")
    {
        query_hits.fetch_add(1, Ordering::SeqCst);
        (opts.query_status, opts.query_body.as_slice())
    } else if method.eq_ignore_ascii_case("GET") && path.contains("/vspackage") {
        asset_hits.fetch_add(1, Ordering::SeqCst);
        (opts.asset_status, opts.asset_body.as_slice())
    } else {
        (404, b"not found".as_slice())
    };

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Reads headers plus (for POST) the Content-Length-declared body.
fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(header_end) = find_header_end(&data) {
            let headers = String::from_utf8_lossy(&data[..header_end]).to_string();
            let content_length = headers
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                return Some(String::from_utf8_lossy(&data).to_string());
            }
        }
    }
    if data.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&data).to_string())
    }
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
