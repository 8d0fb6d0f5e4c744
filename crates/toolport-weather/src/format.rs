// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of alerts and forecast periods.

use crate::types::{AlertProperties, ForecastPeriod};

/// Separator between rendered alerts or periods.
pub const BLOCK_SEPARATOR: &str = "\n---\n";

pub const NO_ALERTS: &str = "No active alerts for this state.";
pub const NO_PERIODS: &str = "No forecast periods available for this location.";

const UNKNOWN: &str = "Unknown";

pub fn format_alert(alert: &AlertProperties) -> String {
    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
        or(&alert.event, UNKNOWN),
        or(&alert.area_desc, UNKNOWN),
        or(&alert.severity, UNKNOWN),
        or(&alert.description, "No description available"),
        or(&alert.instruction, "No specific instructions provided"),
    )
}

pub fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period
        .temperature
        .and_then(|t| t.value())
        .map_or_else(|| UNKNOWN.to_string(), |v| v.to_string());
    format!(
        "{}:\nTemperature: {}°{}\nWind: {} {}\nForecast: {}",
        or(&period.name, UNKNOWN),
        temperature,
        or(&period.temperature_unit, ""),
        or(&period.wind_speed, UNKNOWN),
        or(&period.wind_direction, ""),
        or(&period.detailed_forecast, UNKNOWN),
    )
}

/// Alerts joined by [`BLOCK_SEPARATOR`], or [`NO_ALERTS`].
pub fn alerts_report(alerts: &[AlertProperties]) -> String {
    if alerts.is_empty() {
        return NO_ALERTS.to_string();
    }
    alerts
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// The first `limit` periods joined by [`BLOCK_SEPARATOR`], or [`NO_PERIODS`].
pub fn forecast_report(periods: &[ForecastPeriod], limit: usize) -> String {
    if periods.is_empty() || limit == 0 {
        return NO_PERIODS.to_string();
    }
    periods
        .iter()
        .take(limit)
        .map(format_period)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Temperature;

    fn flood() -> AlertProperties {
        AlertProperties {
            event: Some("Flood Warning".into()),
            area_desc: Some("Sonoma; Napa".into()),
            severity: Some("Severe".into()),
            description: Some("River above flood stage.".into()),
            instruction: Some("Avoid low-lying roads.".into()),
        }
    }

    fn tonight() -> ForecastPeriod {
        ForecastPeriod {
            name: Some("Tonight".into()),
            temperature: Some(Temperature::Number(52.0)),
            temperature_unit: Some("F".into()),
            wind_speed: Some("5 mph".into()),
            wind_direction: Some("SW".into()),
            detailed_forecast: Some("Mostly clear.".into()),
        }
    }

    #[test]
    fn full_alert_layout() {
        assert_eq!(
            format_alert(&flood()),
            "Event: Flood Warning\nArea: Sonoma; Napa\nSeverity: Severe\n\
             Description: River above flood stage.\nInstructions: Avoid low-lying roads."
        );
    }

    #[test]
    fn empty_alert_uses_placeholders() {
        assert_eq!(
            format_alert(&AlertProperties::default()),
            "Event: Unknown\nArea: Unknown\nSeverity: Unknown\n\
             Description: No description available\n\
             Instructions: No specific instructions provided"
        );
    }

    #[test]
    fn full_period_layout() {
        assert_eq!(
            format_period(&tonight()),
            "Tonight:\nTemperature: 52°F\nWind: 5 mph SW\nForecast: Mostly clear."
        );
    }

    #[test]
    fn empty_period_uses_placeholders() {
        assert_eq!(
            format_period(&ForecastPeriod::default()),
            "Unknown:\nTemperature: Unknown°\nWind: Unknown \nForecast: Unknown"
        );
    }

    #[test]
    fn fractional_temperature_is_kept() {
        let period = ForecastPeriod {
            temperature: Some(Temperature::Quantity { value: Some(18.5) }),
            temperature_unit: Some("C".into()),
            ..tonight()
        };
        assert!(format_period(&period).contains("Temperature: 18.5°C"));
    }

    #[test]
    fn alerts_are_separated() {
        let report = alerts_report(&[flood(), AlertProperties::default()]);
        assert_eq!(report.matches(BLOCK_SEPARATOR).count(), 1);
        assert!(report.starts_with("Event: Flood Warning"));
        assert!(report.ends_with("Instructions: No specific instructions provided"));
    }

    #[test]
    fn no_alerts_message() {
        assert_eq!(alerts_report(&[]), NO_ALERTS);
    }

    #[test]
    fn forecast_is_truncated_to_limit() {
        let periods = vec![tonight(); 8];
        let report = forecast_report(&periods, 5);
        assert_eq!(report.split(BLOCK_SEPARATOR).count(), 5);
    }

    #[test]
    fn no_periods_message() {
        assert_eq!(forecast_report(&[], 5), NO_PERIODS);
    }
}
