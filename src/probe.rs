//! Live check of the GET endpoints of a REST surface.

use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};

use crate::{
    constants::PROBE_TIMEOUT,
    error::Result,
    surface::{Category, RestEndpoint},
};

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(json) => Self::Json(json),
            Err(_) => Self::Text(text),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(json) => write!(f, "{}", json),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Success(ResponseBody),
    HttpError { status: u16, body: String },
    Timeout,
    ConnectionError(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn from_transport_error(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionError(error.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResult {
    pub category: Category,
    pub entity_name: String,
    pub url: String,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<EndpointResult>,
    /// Per request timeout the endpoints were checked with
    pub timeout: Duration,
}

impl ProbeReport {
    pub fn tested(&self) -> usize {
        self.results.len()
    }

    fn record(&mut self, result: EndpointResult) {
        if result.outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }
}

/// Issues one GET request per readable endpoint, strictly one after another.
pub struct Prober {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Prober {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, PROBE_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub async fn probe(&self, endpoints: &[RestEndpoint]) -> ProbeReport {
        let mut report = ProbeReport {
            timeout: self.timeout,
            ..Default::default()
        };

        for endpoint in endpoints.iter().filter(|ep| ep.supports_get()) {
            let url = endpoint.url(&self.base_url);
            let outcome = self.get(&url).await;
            match &outcome {
                ProbeOutcome::Success(_) => log::debug!("GET {} succeeded", url),
                ProbeOutcome::HttpError { status, .. } => {
                    log::warn!("GET {} failed with status {}", url, status)
                }
                ProbeOutcome::Timeout => {
                    log::warn!("GET {} timed out after {:?}", url, self.timeout)
                }
                ProbeOutcome::ConnectionError(e) => log::warn!("GET {} failed: {}", url, e),
            }

            report.record(EndpointResult {
                category: endpoint.category,
                entity_name: endpoint.entity_name.clone(),
                url,
                outcome,
            });
        }

        report
    }

    async fn get(&self, url: &str) -> ProbeOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::from_transport_error(e),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) if status == StatusCode::OK => {
                ProbeOutcome::Success(ResponseBody::parse(body))
            }
            Ok(body) => ProbeOutcome::HttpError {
                status: status.as_u16(),
                body,
            },
            Err(e) if status == StatusCode::OK => ProbeOutcome::from_transport_error(e),
            Err(_) => ProbeOutcome::HttpError {
                status: status.as_u16(),
                body: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{
        constants::PROBE_TIMEOUT,
        surface::{synthesize, Category, Entity, RestEndpoint},
    };

    use super::{ProbeOutcome, Prober, ResponseBody};

    fn endpoints(ids: &[&str]) -> Vec<RestEndpoint> {
        let entities = ids
            .iter()
            .enumerate()
            .map(|(i, id)| Entity::new(i as u32, "SensorInfo", id, id))
            .collect::<Vec<_>>();
        synthesize(&entities).endpoints
    }

    #[tokio::test]
    async fn test_success_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sensor/water"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "sensor-water",
                "value": 21.5,
                "state": "21.5 °C"
            })))
            .mount(&server)
            .await;

        let prober = Prober::new(server.uri()).unwrap();
        let report = prober.probe(&endpoints(&["water"])).await;

        assert_eq!(report.tested(), 1);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 0);
        let result = &report.results[0];
        assert_eq!(result.category, Category::Sensor);
        assert_eq!(result.url, format!("{}/sensor/water", server.uri()));
        match &result.outcome {
            ProbeOutcome::Success(ResponseBody::Json(json)) => {
                assert_eq!(json["state"], "21.5 °C")
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sensor/water"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ON"))
            .mount(&server)
            .await;

        let report = Prober::new(server.uri())
            .unwrap()
            .probe(&endpoints(&["water"]))
            .await;
        assert_eq!(
            report.results[0].outcome,
            ProbeOutcome::Success(ResponseBody::Text("ON".into()))
        );
        assert_eq!(report.succeeded, 1);
    }

    #[tokio::test]
    async fn test_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sensor/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sensor/created"))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .mount(&server)
            .await;

        let report = Prober::new(server.uri())
            .unwrap()
            .probe(&endpoints(&["missing", "created"]))
            .await;
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 2);
        assert_eq!(
            report.results[0].outcome,
            ProbeOutcome::HttpError {
                status: 201,
                body: "{}".into()
            }
        );
        assert_eq!(
            report.results[1].outcome,
            ProbeOutcome::HttpError {
                status: 404,
                body: "Not Found".into()
            }
        );
    }

    #[tokio::test]
    async fn test_timeout_does_not_stop_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sensor/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sensor/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1"))
            .mount(&server)
            .await;

        let prober = Prober::with_timeout(server.uri(), Duration::from_millis(200)).unwrap();
        let report = prober.probe(&endpoints(&["slow", "fast"])).await;

        assert_eq!(report.tested(), 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.timeout, Duration::from_millis(200));
        let slow = report
            .results
            .iter()
            .find(|r| r.entity_name == "slow")
            .unwrap();
        assert_eq!(slow.outcome, ProbeOutcome::Timeout);
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Grab a free port and close it again
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let prober = Prober::new(format!("http://127.0.0.1:{}", port)).unwrap();
        let report = prober.probe(&endpoints(&["a", "b"])).await;

        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 2);
        assert!(report
            .results
            .iter()
            .all(|r| matches!(r.outcome, ProbeOutcome::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_skips_endpoints_without_get() {
        let server = MockServer::start().await;
        let mut eps = endpoints(&["a"]);
        eps[0].methods = &["POST"];

        let report = Prober::new(server.uri()).unwrap().probe(&eps).await;
        assert_eq!(report.tested(), 0);
        assert_eq!(report.succeeded + report.failed, 0);
    }

    #[tokio::test]
    async fn test_reports_are_independent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let prober = Prober::new(server.uri()).unwrap();
        let eps = endpoints(&["a", "b"]);
        let first = prober.probe(&eps).await;
        let second = prober.probe(&eps).await;
        assert_eq!(first.succeeded, 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_default_timeout() {
        assert_eq!(PROBE_TIMEOUT, Duration::from_secs(5));
        let prober = Prober::new("http://127.0.0.1").unwrap();
        assert_eq!(prober.timeout, PROBE_TIMEOUT);
        assert_eq!(prober.probe(&[]).await.timeout, PROBE_TIMEOUT);
    }

    #[test]
    fn test_response_body_display() {
        assert_eq!(
            ResponseBody::parse(r#"{"value": 1}"#.into()).to_string(),
            r#"{"value":1}"#
        );
        assert_eq!(ResponseBody::parse("plain".into()).to_string(), "plain");
    }
}
