use serde_json::Value;

use crate::config::{MPS_TO_MPH, WEATHER_DESCRIPTIONS};
use crate::snapshot::value::{as_i64, text};
use crate::types::Environment;

/// Build the output environment block. Source strings pass through; a
/// numeric temperature (°C) and wind speed (m/s) also get °F / mph
/// variants. Absent or unparseable inputs leave the field null.
pub fn enrich_environment(raw: Option<&Value>) -> Environment {
    let Some(raw) = raw.filter(|r| r.is_object()) else {
        return Environment::default();
    };

    let weather = raw
        .get("weather")
        .filter(|w| text(w).is_some())
        .cloned();
    let weather_description = weather.as_ref().and_then(as_i64).and_then(describe_weather);

    let temperature = raw.get("temperature").and_then(text);
    let temperature_fahrenheit = temperature
        .as_deref()
        .and_then(|t| strip_unit(t, &["°C", "C"]))
        .map(|c| format!("{:.1}°F", c * 9.0 / 5.0 + 32.0));

    let wind_speed = raw
        .get("wind")
        .or_else(|| raw.get("wind_speed"))
        .and_then(text);
    let wind_speed_mph = wind_speed
        .as_deref()
        .and_then(|w| strip_unit(w, &["m/s"]))
        .map(|mps| format!("{:.1}mph", mps * MPS_TO_MPH));

    Environment {
        weather,
        weather_description,
        temperature,
        temperature_fahrenheit,
        humidity: raw.get("humidity").and_then(text),
        wind_speed,
        wind_speed_mph,
        pressure: raw.get("pressure").and_then(text),
    }
}

pub fn describe_weather(code: i64) -> Option<String> {
    WEATHER_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, d)| d.to_string())
}

/// Numeric value of `s`, with one of `units` as an optional suffix.
fn strip_unit(s: &str, units: &[&str]) -> Option<f64> {
    let s = s.trim();
    let bare = units
        .iter()
        .find_map(|u| s.strip_suffix(u))
        .unwrap_or(s);
    bare.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_temperature_and_wind() {
        let env = enrich_environment(Some(&json!({
            "weather": 5, "temperature": "30°C", "wind": "7.0m/s",
            "humidity": "60%", "pressure": "1013hPa"
        })));
        assert_eq!(env.weather, Some(json!(5)));
        assert_eq!(env.weather_description.as_deref(), Some("Sunny"));
        assert_eq!(env.temperature.as_deref(), Some("30°C"));
        assert_eq!(env.temperature_fahrenheit.as_deref(), Some("86.0°F"));
        assert_eq!(env.wind_speed.as_deref(), Some("7.0m/s"));
        assert_eq!(env.wind_speed_mph.as_deref(), Some("15.7mph"));
        assert_eq!(env.humidity.as_deref(), Some("60%"));
        assert_eq!(env.pressure.as_deref(), Some("1013hPa"));
    }

    #[test]
    fn string_weather_code_and_bare_numbers() {
        let env = enrich_environment(Some(&json!({"weather": "13", "temperature": -5, "wind": 2})));
        assert_eq!(env.weather_description.as_deref(), Some("Fog"));
        assert_eq!(env.temperature_fahrenheit.as_deref(), Some("23.0°F"));
        assert_eq!(env.wind_speed_mph.as_deref(), Some("4.5mph"));
    }

    #[test]
    fn unknown_or_garbled_values_stay_null() {
        let env = enrich_environment(Some(&json!({"weather": 42, "temperature": "warm", "wind": ""})));
        assert_eq!(env.weather, Some(json!(42)));
        assert_eq!(env.weather_description, None);
        assert_eq!(env.temperature.as_deref(), Some("warm"));
        assert_eq!(env.temperature_fahrenheit, None);
        assert_eq!(env.wind_speed, None);
        assert_eq!(env.wind_speed_mph, None);
    }

    #[test]
    fn absent_payload_is_all_null_but_keyed() {
        let env = enrich_environment(None);
        assert_eq!(env, Environment::default());
        let v = serde_json::to_value(&env).unwrap();
        for key in ["weather", "weather_description", "temperature", "temperature_fahrenheit",
                    "humidity", "wind_speed", "wind_speed_mph", "pressure"] {
            assert_eq!(v.get(key), Some(&Value::Null), "{key}");
        }
    }
}
