//! Fetching raw CSV text.
//!
//! The `CsvFetcher` trait abstracts over the transport so the Treasury
//! source can be driven by canned responses in tests.

use crate::error::{Result, TreasuryError};

/// Retrieve the body of a URL as text.
pub trait CsvFetcher: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher.
///
/// One attempt per call. Connection failures and non-success statuses
/// become [`TreasuryError::Request`].
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| TreasuryError::Request {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl CsvFetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<String> {
        let request_error = |e: reqwest::Error| TreasuryError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        tracing::info!(%url, "fetching");
        let resp = self.client.get(url).send().map_err(request_error)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TreasuryError::Request {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        resp.text().map_err(request_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response on a local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        format!("http://{addr}/curves.csv")
    }

    fn fetcher() -> HttpFetcher {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        HttpFetcher { client }
    }

    #[test]
    fn success_returns_body() {
        let url = serve_once("HTTP/1.1 200 OK", "Date,1 Yr\n");
        assert_eq!(fetcher().get(&url).unwrap(), "Date,1 Yr\n");
    }

    #[test]
    fn error_status_is_request_error() {
        let url = serve_once("HTTP/1.1 404 Not Found", "");
        match fetcher().get(&url).unwrap_err() {
            TreasuryError::Request { url: failed, reason } => {
                assert_eq!(failed, url);
                assert!(reason.contains("404"), "{reason}");
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[test]
    fn refused_connection_is_request_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = fetcher().get(&format!("http://{addr}/")).unwrap_err();
        assert!(matches!(err, TreasuryError::Request { .. }));
    }
}
