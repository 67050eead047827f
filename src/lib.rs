//! A blocking client for the DarkSky forecast API.
//!
//! ```no_run
//! use darksky::ApiRequest;
//!
//! let req = ApiRequest::new("my-secret-key", "42.3601", "-71.0589")
//!     .exclude(["minutely", "flags"])
//!     .units("si");
//! let forecast = darksky::get_forecast(&req)?;
//! println!("{}: {}", forecast.timezone, forecast.currently.summary);
//! # Ok::<(), darksky::ForecastError>(())
//! ```
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod client;
mod decode;
mod error;
mod logger;
mod model;
mod request;

pub use client::{DarkSkyClient, TIMEOUT};
pub use decode::decode;
pub use error::ForecastError;
pub use logger::{LogFacade, Logger, NoopLogger};
pub use model::*;
pub use request::{ApiRequest, BASE_URL, build_url};

/// Fetch the forecast described by `req` from the public DarkSky endpoint.
///
/// Builds a fresh client for the call; hold on to a [`DarkSkyClient`] instead when making several
/// requests.
pub fn get_forecast(req: &ApiRequest) -> Result<Forecast, ForecastError> {
    DarkSkyClient::new()?.get_forecast(req)
}
