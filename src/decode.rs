use crate::error::ForecastError;
use crate::model::Forecast;

use serde::Deserialize;
use serde_json::Value;

use std::io::Read;

/// Read a single forecast document from `reader`.
///
/// Fields missing from the document, or sent as `null`, keep their zero value and unknown fields
/// are skipped. When a key is repeated the last value wins. Only the first JSON value is read;
/// whatever follows it in the stream is left alone.
pub fn decode<R: Read>(reader: R) -> Result<Forecast, ForecastError> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let mut value = Value::deserialize(&mut de)?;
    if value.is_null() {
        return Ok(Forecast::default());
    }

    strip_nulls(&mut value);
    let forecast = Forecast::deserialize(value)?;
    Ok(forecast)
}

/// Drop every `null` object member so the field falls back to its default.
///
/// `null` array elements are left in place; the list fields of the model turn them into default
/// entries.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
