use nws_core::WeatherEnvelope;
use serde_json::Value;

/// Human-readable summary of an envelope.
pub fn render(env: &WeatherEnvelope) -> String {
    let mut lines = Vec::new();

    let place = if env.resolved_city.is_empty() {
        env.location.clone()
    } else {
        let (city, state) = (&env.resolved_city, &env.resolved_state);
        format!("{city}, {state} ({}, {})", env.lat, env.lon)
    };
    lines.push(place);

    if !env.is_ok() {
        lines.push(format!("Error: {}", env.message));
    }

    if let Some(now) = current_line(env) {
        lines.push(now);
    }

    for period in env.forecast.periods.iter().flatten() {
        let field = |key: &str| period.fields.get(key).map(value_text).unwrap_or_default();
        lines.push(format!(
            "  {:<20} {:>4}°{}  {}",
            field("name"),
            field("temperature"),
            field("temperatureUnit"),
            field("shortForecast"),
        ));
    }

    lines.join("\n")
}

fn current_line(env: &WeatherEnvelope) -> Option<String> {
    let description = env.current.get("textDescription").and_then(Value::as_str);
    // Observations report Celsius; envelope units are Fahrenheit.
    let fahrenheit = env
        .current
        .get("temperature")
        .and_then(|t| t.get("value"))
        .and_then(Value::as_f64)
        .map(|c| c * 9.0 / 5.0 + 32.0);

    match (description, fahrenheit) {
        (None, None) => None,
        (Some(d), None) => Some(format!("Now: {d}")),
        (None, Some(f)) => Some(format!("Now: {f:.0}°F")),
        (Some(d), Some(f)) => Some(format!("Now: {d}, {f:.0}°F")),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(json: Value) -> WeatherEnvelope {
        serde_json::from_value(json).unwrap()
    }

    fn base() -> Value {
        json!({
            "location": "Boston,MA (42.3554,-71.0605)",
            "resolved_city": "Boston",
            "resolved_state": "Massachusetts",
            "lat": 42.3554,
            "lon": -71.0605,
            "units": {
                "temperature": "F",
                "wind_speed": "mph",
                "precipitation": "%",
                "distance": "mi"
            },
            "current": {"textDescription": "Clear", "temperature": {"value": 10.0}},
            "forecast": {"periods": [{
                "name": "Tonight",
                "startTime": "2026-10-19T18:00:00-04:00",
                "temperature": 44,
                "temperatureUnit": "F",
                "shortForecast": "Clear"
            }]},
            "status": "ok",
            "message": ""
        })
    }

    #[test]
    fn renders_place_current_and_periods() {
        let out = render(&envelope(base()));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Boston, Massachusetts (42.3554, -71.0605)");
        assert_eq!(lines[1], "Now: Clear, 50°F");
        assert!(lines[2].contains("Tonight"));
        assert!(lines[2].contains("44°F"));
        assert!(lines[2].ends_with("Clear"));
    }

    #[test]
    fn renders_error_message() {
        let mut raw = base();
        raw["resolved_city"] = json!("");
        raw["current"] = json!({});
        raw["forecast"] = json!({});
        raw["status"] = json!("error");
        raw["message"] = json!("Location not found in NWS API.");

        let out = render(&envelope(raw));
        let expected = "Boston,MA (42.3554,-71.0605)\nError: Location not found in NWS API.";
        assert_eq!(out, expected);
    }
}
