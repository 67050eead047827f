/// The forecast endpoint of the DarkSky API.
pub const BASE_URL: &str = "https://api.darksky.net/forecast";

/// Units used when the request does not ask for any in particular.
const DEFAULT_UNITS: &str = "auto";

/// Everything needed to ask the API for a forecast at a single location.
///
/// None of the values are validated or escaped: they are placed into the URL exactly as given, so
/// callers must hand over strings that are already URL-safe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    /// The secret key the API uses to identify the account.
    pub key: String,
    /// The latitude of the location, in decimal degrees.
    pub lat: String,
    /// The longitude of the location, in decimal degrees.
    pub long: String,
    /// Data blocks to leave out of the response (e.g. `minutely`, `flags`), in the order they
    /// should appear in the URL.
    pub exclude: Vec<String>,
    /// Language to use for text summaries.
    pub lang: Option<String>,
    /// Unit system for the response. The API picks based on location when this is unset.
    pub units: Option<String>,
}

impl ApiRequest {
    /// Construct a request for the given location with every option left at its default
    pub fn new(key: impl Into<String>, lat: impl Into<String>, long: impl Into<String>) -> Self {
        ApiRequest {
            key: key.into(),
            lat: lat.into(),
            long: long.into(),
            ..Default::default()
        }
    }

    /// Leave the named data blocks out of the response, replacing any set earlier.
    pub fn exclude<I, S>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = blocks.into_iter().map(Into::into).collect();
        self
    }

    /// Ask for text summaries in the given language.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Ask for the given unit system instead of letting the API choose.
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}

/// Build the full request URL for `req` against the endpoint at `base`.
///
/// The layout is `{base}/{key}/{lat},{long}?units={units}[&exclude=a,b][&lang=xx]`.
pub fn build_url(base: &str, req: &ApiRequest) -> String {
    let units = non_empty(&req.units).unwrap_or(DEFAULT_UNITS);

    let mut url = format!(
        "{}/{}/{},{}?units={}",
        base, req.key, req.lat, req.long, units
    );

    if !req.exclude.is_empty() {
        url.push_str("&exclude=");
        url.push_str(&req.exclude.join(","));
    }

    if let Some(lang) = non_empty(&req.lang) {
        url.push_str("&lang=");
        url.push_str(lang);
    }

    url
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
