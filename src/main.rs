//! Command-line front end for the `darksky` library.
//!
//! Only this binary reads the environment, and only `DARKSKY_LOG_LEVEL` to pick the log level.
//! The library takes everything it needs from the `ApiRequest` it is handed.
#![forbid(unsafe_code)]

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;

mod config;
#[macro_use]
mod timed;

use crate::config::Config;

use clap::{Arg, ArgMatches, Command};
use darksky::{ApiRequest, DarkSkyClient, Forecast};
use env_logger::Env;
use time::format_description::well_known::Rfc3339;

use std::process;

fn main() {
    let env = Env::default().filter_or("DARKSKY_LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let matches = Command::new("darksky")
        .version("0.1")
        .author("Chris Lieb")
        .about("Fetch a weather forecast from the DarkSky API")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("JSON file holding api_key, latitude, longitude and options"),
        )
        .arg(Arg::new("key").short('k').long("key"))
        .arg(Arg::new("lat").long("lat").allow_hyphen_values(true))
        .arg(Arg::new("long").long("long").allow_hyphen_values(true))
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_delimiter(',')
                .num_args(1..)
                .help("Blocks to leave out, e.g. minutely,flags"),
        )
        .arg(Arg::new("lang").short('l').long("lang"))
        .arg(Arg::new("units").short('u').long("units"))
        .get_matches();

    let req = match build_request(&matches) {
        Ok(req) => req,
        Err(msg) => {
            error!("{}", msg);
            process::exit(2);
        }
    };

    let forecast = timed!(
        "Fetching forecast for {},{}",
        req.lat,
        req.long => (|| DarkSkyClient::new().and_then(|client| client.get_forecast(&req)))
    );

    match forecast {
        Ok(forecast) => print_forecast(&forecast),
        Err(err) => {
            error!("Unable to fetch forecast: {}", err);
            process::exit(1);
        }
    }
}

/// Assemble the request from the config file (if any), letting command-line flags win
fn build_request(matches: &ArgMatches) -> Result<ApiRequest, String> {
    let mut req = match matches.get_one::<String>("config") {
        Some(path) => {
            info!("Reading config from {}", path);
            Config::from_file(path)
                .map_err(|err| err.to_string())?
                .into_request()
        }
        None => ApiRequest::default(),
    };

    if let Some(key) = matches.get_one::<String>("key") {
        req.key = key.clone();
    }
    if let Some(lat) = matches.get_one::<String>("lat") {
        req.lat = lat.clone();
    }
    if let Some(long) = matches.get_one::<String>("long") {
        req.long = long.clone();
    }
    if let Some(exclude) = matches.get_many::<String>("exclude") {
        req.exclude = exclude.cloned().collect();
    }
    if let Some(lang) = matches.get_one::<String>("lang") {
        req.lang = Some(lang.clone());
    }
    if let Some(units) = matches.get_one::<String>("units") {
        req.units = Some(units.clone());
    }

    for (name, value) in [("key", &req.key), ("lat", &req.lat), ("long", &req.long)] {
        if value.is_empty() {
            return Err(format!("--{} is required when the config does not set it", name));
        }
    }

    Ok(req)
}

fn print_forecast(forecast: &Forecast) {
    let as_of = forecast
        .currently
        .time()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| "unknown time".to_string());
    info!(
        "{} as of {}: {} with {} hourly and {} daily points, {} alerts",
        forecast.timezone,
        as_of,
        forecast.currently.summary,
        forecast.hourly.data.len(),
        forecast.daily.data.len(),
        forecast.alerts.len()
    );

    match serde_json::to_string_pretty(forecast) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            error!("Unable to render forecast: {}", err);
            process::exit(1);
        }
    }
}
