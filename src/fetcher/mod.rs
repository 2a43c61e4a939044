use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect;
use reqwest::StatusCode;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:95.0) Gecko/20100101 Firefox/95.0";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid user agent {value:?}")]
    UserAgent { value: String },

    #[error("HTTP error: {status}")]
    Status { status: u16 },

    #[error("{source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not setup proxy, err: {source}")]
    Proxy {
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub proxy: Option<String>,
    pub insecure: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            insecure: false,
        }
    }
}

/// Cheap pre-flight check that `url` points at a script resource.
pub fn looks_like_script_url(url: &str) -> bool {
    url.contains("://") && url.contains(".js")
}

/// Blocking HTTP client shared by every input in a run.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let ua = reqwest::header::HeaderValue::from_str(&opts.user_agent).map_err(|_| {
            FetchError::UserAgent {
                value: opts.user_agent.clone(),
            }
        })?;
        headers.insert(reqwest::header::USER_AGENT, ua);

        let mut builder = Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::limited(10))
            .timeout(Duration::from_secs(opts.timeout_secs));
        if opts.insecure {
            builder = builder
                .danger_accept_invalid_hostnames(true)
                .danger_accept_invalid_certs(true);
        }
        if let Some(proxy) = opts.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy = reqwest::Proxy::all(proxy).map_err(|source| FetchError::Proxy { source })?;
            builder = builder.proxy(proxy);
        } else {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|source| FetchError::Client { source })?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns its body. Anything but a 200 is an error.
    /// Bodies are decoded as lossy UTF-8.
    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request { source })?;
        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
            });
        }
        let body = resp
            .bytes()
            .map_err(|source| FetchError::Request { source })?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    // Serves a single canned HTTP response and returns the base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let response = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn script_url_check() {
        assert!(looks_like_script_url("https://cdn.test/app.js"));
        assert!(looks_like_script_url("https://cdn.test/app.json"));
        assert!(!looks_like_script_url("cdn.test/app.js"));
        assert!(!looks_like_script_url("https://cdn.test/app.css"));
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let opts = FetchOptions {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Fetcher::new(&opts),
            Err(FetchError::UserAgent { .. })
        ));
    }

    #[test]
    fn ok_response_returns_body() {
        let base = serve_once("HTTP/1.1 200 OK", "var apiToken = 1;");
        let fetcher = Fetcher::new(&FetchOptions::default()).unwrap();
        let body = fetcher.fetch_text(&format!("{base}/main.js")).unwrap();
        assert_eq!(body, "var apiToken = 1;");
    }

    #[test]
    fn non_200_status_is_an_error() {
        let base = serve_once("HTTP/1.1 404 Not Found", "missing");
        let fetcher = Fetcher::new(&FetchOptions::default()).unwrap();
        let err = fetcher.fetch_text(&format!("{base}/main.js")).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404 }));
        assert_eq!(err.to_string(), "HTTP error: 404");
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        let opts = FetchOptions {
            proxy: Some("http://[::1".to_string()),
            ..Default::default()
        };
        assert!(matches!(Fetcher::new(&opts), Err(FetchError::Proxy { .. })));
    }
}
