use crate::decode::decode;
use crate::error::ForecastError;
use crate::logger::{LogFacade, Logger};
use crate::model::Forecast;
use crate::request::{ApiRequest, BASE_URL, build_url};

use reqwest::blocking::{Client, ClientBuilder, Response};

use serde::de::Error as _;
use serde_json::error::Category;

use std::io::{self, BufReader};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a whole request, from connecting through reading the last byte of the body.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// A client for the DarkSky forecast API.
///
/// Holds no state between calls besides the connection pool, so one client can be shared freely
/// between threads.
pub struct DarkSkyClient {
    base_url: String,
    http_client: Client,
    logger: Arc<dyn Logger>,
}

impl DarkSkyClient {
    /// Construct a client that talks to the public DarkSky endpoint
    pub fn new() -> Result<DarkSkyClient, ForecastError> {
        DarkSkyClient::with_base_url(BASE_URL)
    }

    /// Construct a client that talks to an API-compatible endpoint at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Result<DarkSkyClient, ForecastError> {
        DarkSkyClient::build(base_url.into(), TIMEOUT)
    }

    pub(crate) fn build(
        base_url: String,
        timeout: Duration,
    ) -> Result<DarkSkyClient, ForecastError> {
        let http_client = ClientBuilder::new()
            .gzip(true)
            .timeout(timeout)
            .build()
            .map_err(|err| {
                error!("Unable to construct HTTP client: {}", err);
                err
            })?;

        Ok(DarkSkyClient {
            base_url,
            http_client,
            logger: Arc::new(LogFacade),
        })
    }

    /// Send this client's log lines to `logger` instead of the `log` facade
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> DarkSkyClient {
        self.logger = logger;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode the forecast described by `req`.
    ///
    /// The first failure ends the call: nothing is retried and no partial forecast is returned.
    /// The HTTP status is not checked, so an error page that happens to be JSON decodes into a
    /// (mostly empty) forecast.
    pub fn get_forecast(&self, req: &ApiRequest) -> Result<Forecast, ForecastError> {
        let url = build_url(&self.base_url, req);
        let response = self.fetch(&url)?;

        // The body is consumed by the decoder and dropped here whether or not decoding succeeds
        decode(BufReader::new(response))
            .map_err(body_read_as_transport)
            .inspect_err(|err| match err {
                ForecastError::Transport(_) => {
                    self.logger
                        .error(&format!("Unable to read body from {}: {}", url, err));
                }
                ForecastError::Decode(_) => {
                    self.logger
                        .error(&format!("Unable to decode forecast from {}: {}", url, err));
                }
            })
    }

    /// Issue the GET for `url`, handing back the response with its body still unread
    fn fetch(&self, url: &str) -> Result<Response, ForecastError> {
        self.logger.info(&format!("Calling DarkSky: {}", url));

        self.http_client.get(url).send().map_err(|err| {
            self.logger.error(&format!("Unable to GET {}: {}", url, err));
            ForecastError::Transport(err)
        })
    }
}

/// Hand back the HTTP error behind a failed body read (e.g. the timeout expiring mid-body), so it
/// is reported as a transport failure rather than bad JSON.
fn body_read_as_transport(err: ForecastError) -> ForecastError {
    let ForecastError::Decode(json_err) = err else {
        return err;
    };
    if json_err.classify() != Category::Io {
        return ForecastError::Decode(json_err);
    }

    match io::Error::from(json_err).into_inner() {
        Some(inner) => match inner.downcast::<reqwest::Error>() {
            Ok(http_err) => ForecastError::Transport(*http_err),
            Err(other) => ForecastError::Decode(serde_json::Error::custom(other)),
        },
        None => ForecastError::Decode(serde_json::Error::custom("unable to read response body")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::logger::NoopLogger;

    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Instant;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"latitude": 40.0}"#)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let base_url = format!("{}/forecast", server.uri());
        let (elapsed, result) = tokio::task::spawn_blocking(move || {
            let client = DarkSkyClient::build(base_url, Duration::from_millis(250))?;
            let start = Instant::now();
            let result = client.get_forecast(&ApiRequest::new("key", "40.0", "-105.0"));
            Ok::<_, ForecastError>((start.elapsed(), result))
        })
        .await
        .unwrap()
        .unwrap();

        let err = result.unwrap_err();
        assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
        assert!(matches!(err, ForecastError::Transport(_)));
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    }

    #[test]
    fn stalled_body_times_out_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).unwrap();
            stream
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"latitude\":",
                )
                .unwrap();
            stream.flush().unwrap();
            thread::sleep(Duration::from_secs(2));
        });

        let client =
            DarkSkyClient::build(format!("http://{}/forecast", addr), Duration::from_millis(300))
                .unwrap()
                .with_logger(Arc::new(NoopLogger));
        let start = Instant::now();
        let err = client
            .get_forecast(&ApiRequest::new("key", "40.0", "-105.0"))
            .unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, ForecastError::Transport(_)), "got {:?}", err);
        assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);

        server.join().unwrap();
    }

    #[test]
    fn bad_json_stays_a_decode_error() {
        let json_err = serde_json::from_str::<Forecast>("{").unwrap_err();
        let err = body_read_as_transport(ForecastError::Decode(json_err));
        assert!(matches!(err, ForecastError::Decode(_)));
    }

    #[test]
    fn default_client_targets_public_endpoint() {
        let client = DarkSkyClient::new().unwrap();
        assert_eq!(client.base_url(), "https://api.darksky.net/forecast");
    }
}
