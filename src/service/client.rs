//! HTTP client for the matching service.

use anyhow::Result;
use reqwest::{header, Url};
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::types::{preview, FlatResponse, LookupError, LookupResponse};
use crate::config::MatchConfig;
use crate::TARGET_WEB_REQUEST;

const USER_AGENT: &str = concat!("simkey/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client shared by every lookup of a run
pub fn create_http_client(request_timeout: Duration) -> Result<reqwest::Client> {
    debug!(target: TARGET_WEB_REQUEST, "Creating HTTP client with {:?} timeout", request_timeout);

    reqwest::Client::builder()
        .gzip(true)
        .connect_timeout(request_timeout)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Client for one endpoint of the matching service.
///
/// Every variant of the service takes one value in a query parameter and
/// answers with a flat JSON object, so a single client covers all of them.
#[derive(Clone, Debug)]
pub struct MatchingService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    endpoint: Endpoint,
    algorithm: Option<String>,
    extra_params: Vec<(String, String)>,
    request_timeout: Duration,
}

impl MatchingService {
    pub fn new(config: &MatchConfig) -> Result<Self> {
        let client = create_http_client(config.timeout)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &MatchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint,
            algorithm: config.algorithm.clone(),
            extra_params: Vec::new(),
            request_timeout: config.timeout,
        }
    }

    /// Adds a query parameter sent with every request
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((name.into(), value.into()));
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Algorithm chosen in the configuration, before endpoint defaults apply
    pub fn configured_algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// Algorithm actually sent for this endpoint, if any
    pub fn effective_algorithm<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        if !self.endpoint.accepts_algorithm() {
            if let Some(alg) = requested {
                warn!(
                    target: TARGET_WEB_REQUEST,
                    "Endpoint {} does not take an algorithm, ignoring '{}'", self.endpoint, alg
                );
            }
            return None;
        }
        requested.or(self.endpoint.default_algorithm())
    }

    /// Builds the request URL. Values are form-encoded (space becomes `+`).
    pub fn build_url(&self, input: &str, algorithm: Option<&str>) -> Result<Url, LookupError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("license", self.api_key.as_str()),
            (self.endpoint.input_param(), input),
        ];
        if let Some(alg) = self.effective_algorithm(algorithm) {
            params.push(("algorithm", alg));
        }
        for (name, value) in &self.extra_params {
            params.push((name.as_str(), value.as_str()));
        }

        let base = format!("{}/{}", self.base_url, self.endpoint.path());
        Url::parse_with_params(&base, &params).map_err(|e| LookupError::InvalidUrl(e.to_string()))
    }

    /// Fetches the full flat response for one value.
    pub async fn fetch(&self, input: &str) -> Result<FlatResponse, LookupError> {
        let url = self.build_url(input, self.algorithm.as_deref())?;
        self.get(url).await
    }

    /// Looks up the similarity key for one value.
    pub async fn lookup(
        &self,
        input: &str,
        algorithm: Option<&str>,
    ) -> Result<LookupResponse, LookupError> {
        let key_field = self
            .endpoint
            .key_field()
            .ok_or_else(|| LookupError::NoKeyField(self.endpoint.to_string()))?;
        let url = self.build_url(input, algorithm)?;
        self.get(url).await?.into_lookup(key_field)
    }

    async fn get(&self, url: Url) -> Result<FlatResponse, LookupError> {
        let shown = redact_license(&url);
        debug!(target: TARGET_WEB_REQUEST, "GET {}", shown);

        // The time limit covers the whole exchange, body included
        let exchange = async {
            let response = self
                .client
                .get(url)
                .header(header::USER_AGENT, USER_AGENT)
                .header(header::ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match timeout(self.request_timeout, exchange).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => {
                debug!(target: TARGET_WEB_REQUEST, "Request to {} failed: {}", shown, err);
                return Err(LookupError::Transport(err.to_string()));
            }
            Err(_) => {
                debug!(target: TARGET_WEB_REQUEST, "Request to {} timed out", shown);
                return Err(LookupError::Timeout(self.request_timeout.as_secs()));
            }
        };
        debug!(target: TARGET_WEB_REQUEST, "Response {} from {}: {}", status, shown, body);

        classify_response(status.as_u16(), &body)
    }
}

/// Turns an HTTP status and body into a decoded response or an error.
pub fn classify_response(status: u16, body: &str) -> Result<FlatResponse, LookupError> {
    if !(200..300).contains(&status) {
        return Err(LookupError::HttpStatus {
            status,
            body: preview(body),
        });
    }
    FlatResponse::from_body(body)
}

/// URL for logging with the license key blanked out
pub fn redact_license(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "license" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn service(endpoint: Endpoint) -> MatchingService {
        let config = MatchConfig {
            api_key: "KEY123".to_string(),
            endpoint,
            ..MatchConfig::default()
        };
        MatchingService::with_client(reqwest::Client::new(), &config)
    }

    #[test]
    fn test_company_url_uses_default_algorithm() {
        let url = service(Endpoint::CompanyMatch)
            .build_url("Acme Inc.", None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.interzoid.com/getcompanymatchadvanced?license=KEY123&company=Acme+Inc.&algorithm=model-v4-wide"
        );
    }

    #[test]
    fn test_explicit_algorithm_overrides_default() {
        let url = service(Endpoint::AddressMatch)
            .build_url("400 East Broadway St", Some("model-v3-wide"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.interzoid.com/getaddressmatchadvanced?license=KEY123&address=400+East+Broadway+St&algorithm=model-v3-wide"
        );
    }

    #[test]
    fn test_algorithm_dropped_for_name_match() {
        let url = service(Endpoint::IndividualNameMatch)
            .build_url("James Johnston", Some("model-v4-wide"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.interzoid.com/getfullnamematch?license=KEY123&fullname=James+Johnston"
        );
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let url = service(Endpoint::OrgStandard)
            .build_url("AT&T = b.o.a.?", None)
            .unwrap();
        assert!(url
            .as_str()
            .ends_with("getorgstandard?license=KEY123&org=AT%26T+%3D+b.o.a.%3F"));
        let (_, value) = url.query_pairs().find(|(k, _)| k == "org").unwrap();
        assert_eq!(value, "AT&T = b.o.a.?");
    }

    #[test]
    fn test_extra_params_follow_input() {
        let url = service(Endpoint::CustomEnrichment)
            .with_param("topic", "companies")
            .with_param("model", "default")
            .build_url("IBM", None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.interzoid.com/getcustom?license=KEY123&lookup=IBM&topic=companies&model=default"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = MatchConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:9000/api/".to_string(),
            ..MatchConfig::default()
        };
        let service = MatchingService::with_client(reqwest::Client::new(), &config);
        let url = service.build_url("x", None).unwrap();
        assert!(url
            .as_str()
            .starts_with("http://localhost:9000/api/getcompanymatchadvanced?"));
    }

    #[test]
    fn test_redact_license() {
        let url = service(Endpoint::CompanyMatch)
            .build_url("ibm", None)
            .unwrap();
        let shown = redact_license(&url);
        assert!(!shown.contains("KEY123"));
        assert!(shown.contains("company=ibm"));
    }

    #[test]
    fn test_classify_response() {
        let ok = classify_response(200, r#"{"SimKey":"k","Code":"Success","Credits":"9"}"#);
        assert!(ok.unwrap().is_success());

        match classify_response(403, "forbidden") {
            Err(LookupError::HttpStatus { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(classify_response(200, "not json").unwrap_err().kind(), "decode");
    }

    /// Serves one connection: sends `head` and `body`, then keeps the socket
    /// open without writing anything else.
    async fn serve_once(head: String, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        format!("http://{}", addr)
    }

    fn local_service(base_url: String, timeout_secs: u64) -> MatchingService {
        let config = MatchConfig::new()
            .with_api_key(Some("KEY123".to_string()))
            .with_base_url(Some(base_url))
            .with_timeout_secs(Some(timeout_secs));
        MatchingService::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n"
                .to_string(),
            "{\"SimKey\":".to_string(),
        )
        .await;
        let err = local_service(base_url, 1)
            .lookup("ibm", None)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Timeout(1)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_lookup_against_local_server() {
        let body = r#"{"SimKey":"K-IBM","Code":"Success","Credits":"41"}"#;
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let base_url = serve_once(head, body.to_string()).await;
        let response = local_service(base_url, 5).lookup("ibm", None).await.unwrap();
        assert_eq!(response.key, "K-IBM");
        assert_eq!(response.credits, "41");
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_service(format!("http://{}", addr), 5)
            .lookup("ibm", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn test_lookup_rejects_info_endpoint() {
        let err = service(Endpoint::BusinessInfo)
            .lookup("Cisco", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "no-key-field");
    }
}
