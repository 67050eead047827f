use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Read a list, replacing any `null` entries with the default value.
fn null_items_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let items = Vec::<Option<T>>::deserialize(deserializer)?;
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

/// Convert a UNIX timestamp sent by the API into a date-time.
///
/// The API leaves timestamps out rather than sending zero, so zero (the value an absent field
/// decodes to) maps to `None`, as does anything outside the range `time` can represent.
fn unix_time(timestamp: i64) -> Option<OffsetDateTime> {
    if timestamp == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(timestamp).ok()
}

/// API responses consist of a UTF-8-encoded, JSON-formatted object.
///
/// Every field falls back to its zero value when the response leaves it out, so a block that was
/// excluded from the request shows up here as an empty struct rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Forecast {
    /// The requested latitude.
    pub latitude: f64,
    /// The requested longitude.
    pub longitude: f64,
    /// The IANA timezone name for the requested location.
    pub timezone: String,
    /// The current timezone offset in hours. A float rather than an integer, so fractional
    /// offsets such as `5.5` decode instead of failing.
    pub offset: f64,
    /// The current weather conditions at the requested location.
    pub currently: Currently,
    /// Minute-by-minute conditions for the next hour.
    pub minutely: Minutely,
    /// Hour-by-hour conditions for the next two days.
    pub hourly: Hourly,
    /// Day-by-day conditions for the next week.
    pub daily: Daily,
    /// Severe weather alerts pertinent to the requested location.
    #[serde(deserialize_with = "null_items_as_default")]
    pub alerts: Vec<AlertData>,
    /// Miscellaneous metadata about the request.
    pub flags: Flags,
}

/// The weather conditions at the moment of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Currently {
    /// The UNIX time of this data point.
    pub time: i64,
    /// A human-readable text summary. Don't match on this, use `icon` instead.
    pub summary: String,
    /// A machine-readable summary, suitable for selecting an icon for display (`clear-day`,
    /// `rain`, `partly-cloudy-night`, ...).
    pub icon: String,
    pub temperature: f64,
    /// The "feels like" temperature.
    pub apparent_temperature: f64,
    pub dew_point: f64,
    /// Relative humidity, between 0 and 1 inclusive.
    pub humidity: f64,
    /// Sea-level air pressure in millibars.
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    /// The direction the wind is coming from in degrees, with true north at 0°.
    pub wind_bearing: f64,
    /// Fraction of the sky occluded by clouds, between 0 and 1 inclusive.
    pub cloud_cover: f64,
    pub uv_index: f64,
    /// Average visibility, capped at 10 miles.
    pub visibility: f64,
    /// Columnar density of atmospheric ozone in Dobson units.
    pub ozone: f64,
    pub precip_intensity: f64,
    /// Probability of precipitation, between 0 and 1 inclusive.
    pub precip_probability: f64,
    pub precip_type: String,
    /// Direction of the nearest storm in degrees, with true north at 0°.
    pub nearest_storm_bearing: f64,
    /// Distance to the nearest storm. Zero does not necessarily mean a storm is overhead.
    pub nearest_storm_distance: f64,
}

impl Currently {
    pub fn time(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }
}

/// Hour-by-hour conditions, ordered by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hourly {
    /// A human-readable summary of the whole block.
    pub summary: String,
    pub icon: String,
    #[serde(deserialize_with = "null_items_as_default")]
    pub data: Vec<HourlyData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HourlyData {
    /// The UNIX time at which this hour begins.
    pub time: i64,
    pub summary: String,
    pub icon: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub dew_point: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_bearing: f64,
    pub cloud_cover: f64,
    pub uv_index: f64,
    pub visibility: f64,
    pub ozone: f64,
    pub precip_intensity: f64,
    pub precip_probability: f64,
    pub precip_type: String,
    /// Expected snowfall accumulation. Zero when no snow is expected.
    pub precip_accumulation: f64,
}

impl HourlyData {
    pub fn time(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }
}

/// Day-by-day conditions, ordered by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Daily {
    pub summary: String,
    pub icon: String,
    #[serde(deserialize_with = "null_items_as_default")]
    pub data: Vec<DailyData>,
}

/// Conditions over a single day.
///
/// The `*_time` fields are independent UNIX timestamps for the moment the matching extreme (or
/// event) happens during the day. None of them are derived from `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyData {
    /// The UNIX time of local midnight at the start of the day.
    pub time: i64,
    pub summary: String,
    pub icon: String,
    pub sunrise_time: i64,
    pub sunset_time: i64,
    /// Fractional part of the lunation number: 0 is a new moon, 0.5 a full moon.
    pub moon_phase: f64,
    pub temperature_high: f64,
    pub temperature_high_time: i64,
    pub temperature_low: f64,
    pub temperature_low_time: i64,
    pub temperature_max: f64,
    pub temperature_max_time: i64,
    pub temperature_min: f64,
    pub temperature_min_time: i64,
    pub apparent_temperature_max: f64,
    pub apparent_temperature_max_time: i64,
    pub apparent_temperature_min: f64,
    pub apparent_temperature_min_time: i64,
    pub dew_point: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_gust_time: i64,
    pub wind_bearing: f64,
    pub cloud_cover: f64,
    pub uv_index: f64,
    pub uv_index_time: i64,
    pub visibility: f64,
    pub ozone: f64,
    pub precip_intensity: f64,
    /// The heaviest precipitation intensity during the day.
    pub precip_intensity_max: f64,
    pub precip_intensity_max_time: i64,
    pub precip_probability: f64,
    pub precip_type: String,
    pub precip_accumulation: f64,
}

impl DailyData {
    pub fn time(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }

    pub fn sunrise_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.sunrise_time)
    }

    pub fn sunset_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.sunset_time)
    }

    /// When the daytime high occurs.
    pub fn temperature_high_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.temperature_high_time)
    }

    /// When the overnight low occurs.
    pub fn temperature_low_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.temperature_low_time)
    }

    pub fn temperature_max_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.temperature_max_time)
    }

    pub fn temperature_min_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.temperature_min_time)
    }

    pub fn apparent_temperature_max_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.apparent_temperature_max_time)
    }

    pub fn apparent_temperature_min_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.apparent_temperature_min_time)
    }

    pub fn precip_intensity_max_time(&self) -> Option<OffsetDateTime> {
        unix_time(self.precip_intensity_max_time)
    }
}

/// Minute-by-minute precipitation for the next hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Minutely {
    // Wire key is "string", not "summary".
    #[serde(rename = "string")]
    pub summary: String,
    pub icon: String,
    #[serde(deserialize_with = "null_items_as_default")]
    pub data: Vec<MinutelyData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinutelyData {
    pub time: i64,
    pub precip_intensity: f64,
    pub precip_probability: f64,
}

impl MinutelyData {
    pub fn time(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }
}

/// A severe weather warning issued for the requested location by a governmental authority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertData {
    /// A brief description of the alert.
    pub title: String,
    /// A detailed description of the alert.
    pub description: String,
    /// One of `advisory`, `watch` or `warning`.
    pub severity: String,
    /// The UNIX time at which the alert was issued.
    pub time: i64,
    /// The UNIX time at which the alert will expire, or zero when the API did not say.
    pub expires: i64,
    /// Where to find more detailed information about the alert.
    pub uri: String,
    /// Names of the regions covered by the alert.
    #[serde(deserialize_with = "null_items_as_default")]
    pub regions: Vec<String>,
}

impl AlertData {
    /// The time at which the alert was issued.
    pub fn time(&self) -> Option<OffsetDateTime> {
        unix_time(self.time)
    }

    /// The time at which the alert will expire, if it was given one.
    pub fn expires(&self) -> Option<OffsetDateTime> {
        unix_time(self.expires)
    }
}

/// Metadata about how the request was serviced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// IDs of every data source used to answer the request.
    #[serde(deserialize_with = "null_items_as_default")]
    pub sources: Vec<String>,
    /// Distance to the nearest contributing station, in miles or kilometers depending on `units`.
    #[serde(rename = "nearest-station")]
    pub nearest_station: f64,
    /// The unit system the response was expressed in.
    pub units: String,
}
