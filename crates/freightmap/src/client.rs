use std::path::PathBuf;

use tracing::debug;

use crate::model::{Algorithm, LocationId, RawRouteResponse};

/// Seed used when the seed field is blank or not a number.
pub const DEFAULT_SEED: i64 = 42;

/// Why a route query produced no usable response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Route service returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Failed to read route response: {0}")]
    Decode(String),
}

/// Parameters for `GET /route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub algorithm: Algorithm,
    pub seed: i64,
    pub start: Option<LocationId>,
    pub goal: Option<LocationId>,
}

impl Default for RouteQuery {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            seed: DEFAULT_SEED,
            start: None,
            goal: None,
        }
    }
}

impl RouteQuery {
    /// Query parameters in request order. `start`/`goal` only when set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("algorithm", self.algorithm.as_query().to_string()),
            ("seed", self.seed.to_string()),
        ];
        if let Some(start) = &self.start {
            pairs.push(("start", start.clone()));
        }
        if let Some(goal) = &self.goal {
            pairs.push(("goal", goal.clone()));
        }
        pairs
    }
}

/// Parse the free-text seed field. Blank or non-numeric input gives
/// [`DEFAULT_SEED`].
pub fn parse_seed(text: &str) -> i64 {
    text.trim().parse().unwrap_or(DEFAULT_SEED)
}

/// Something that answers route queries.
pub trait RouteSource: Send + Sync {
    fn fetch(&self, query: &RouteQuery) -> Result<RawRouteResponse, FetchError>;

    /// Short description for logs and status lines.
    fn describe(&self) -> String;
}

/// Queries the routing service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteSource {
    base_url: String,
}

impl HttpRouteSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn route_url(&self) -> String {
        format!("{}/route", self.base_url)
    }
}

impl RouteSource for HttpRouteSource {
    fn fetch(&self, query: &RouteQuery) -> Result<RawRouteResponse, FetchError> {
        let url = self.route_url();
        debug!(%url, ?query, "requesting route");

        let mut request = ureq::get(&url).header("Accept", "application/json");
        for (key, value) in query.query_pairs() {
            request = request.query(key, value);
        }

        let mut response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => FetchError::HttpStatus(code),
            other => FetchError::Network(other.to_string()),
        })?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode(&body)
    }

    fn describe(&self) -> String {
        self.route_url()
    }
}

/// Serves a saved response from disk, ignoring the query.
#[derive(Debug, Clone)]
pub struct FileRouteSource {
    path: PathBuf,
}

impl FileRouteSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RouteSource for FileRouteSource {
    fn fetch(&self, query: &RouteQuery) -> Result<RawRouteResponse, FetchError> {
        debug!(path = %self.path.display(), ?query, "loading saved route response");
        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| FetchError::Decode(format!("{}: {e}", self.path.display())))?;
        decode(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn decode(body: &str) -> Result<RawRouteResponse, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    /// Serve exactly one HTTP response on a local port and return the base URL
    /// plus a handle yielding the request line.
    fn serve_once(status: &str, body: &str) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            request_line
        });
        (base, handle)
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("7"), 7);
        assert_eq!(parse_seed("  123 "), 123);
        assert_eq!(parse_seed(""), DEFAULT_SEED);
        assert_eq!(parse_seed("   "), DEFAULT_SEED);
        assert_eq!(parse_seed("abc"), DEFAULT_SEED);
        assert_eq!(parse_seed("4.5"), DEFAULT_SEED);
        assert_eq!(parse_seed("-3"), -3);
    }

    #[test]
    fn test_query_pairs() {
        let q = RouteQuery::default();
        assert_eq!(
            q.query_pairs(),
            vec![("algorithm", "dijkstra".to_string()), ("seed", "42".to_string())]
        );

        let q = RouteQuery {
            algorithm: Algorithm::Greedy,
            seed: 9,
            start: Some("El Paso, TX".to_string()),
            goal: Some("Houston, TX".to_string()),
        };
        let pairs = q.query_pairs();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[2], ("start", "El Paso, TX".to_string()));
        assert_eq!(pairs[3], ("goal", "Houston, TX".to_string()));
    }

    #[test]
    fn test_route_url_trims_slash() {
        assert_eq!(
            HttpRouteSource::new("http://localhost:8000/").route_url(),
            "http://localhost:8000/route"
        );
    }

    #[test]
    fn test_http_success() {
        let body = r#"{"api_version":"v1","nodes":[{"id":"A","x":1.0,"y":2.0}],"edges":[],"route":{"path":["A"]}}"#;
        let (base, handle) = serve_once("200 OK", body);
        let source = HttpRouteSource::new(&base);
        let query = RouteQuery {
            start: Some("A".to_string()),
            ..RouteQuery::default()
        };
        let resp = source.fetch(&query).unwrap();
        assert_eq!(resp.nodes.len(), 1);

        let request_line = handle.join().unwrap();
        assert!(request_line.starts_with("GET /route?"));
        assert!(request_line.contains("algorithm=dijkstra"));
        assert!(request_line.contains("seed=42"));
        assert!(request_line.contains("start=A"));
        assert!(!request_line.contains("goal="));
    }

    #[test]
    fn test_http_status_failure() {
        let (base, handle) = serve_once("503 Service Unavailable", "");
        let err = HttpRouteSource::new(&base)
            .fetch(&RouteQuery::default())
            .unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(503));
        handle.join().unwrap();
    }

    #[test]
    fn test_malformed_body() {
        let (base, handle) = serve_once("200 OK", "<html>not json</html>");
        let err = HttpRouteSource::new(&base)
            .fetch(&RouteQuery::default())
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        handle.join().unwrap();
    }

    #[test]
    fn test_network_failure() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = HttpRouteSource::new(&format!("http://127.0.0.1:{port}"))
            .fetch(&RouteQuery::default())
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileRouteSource::new(PathBuf::from("/nonexistent/route.json"));
        assert!(matches!(
            source.fetch(&RouteQuery::default()),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_file_source_reads_saved_response() {
        let path = std::env::temp_dir().join(format!("freightmap-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"nodes":[],"edges":[],"route":{"path":[]}}"#).unwrap();
        let resp = FileRouteSource::new(path.clone())
            .fetch(&RouteQuery::default())
            .unwrap();
        assert!(resp.nodes.is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::HttpStatus(500).to_string(),
            "Route service returned HTTP 500"
        );
        assert!(FetchError::Network("refused".into()).to_string().contains("refused"));
    }
}
