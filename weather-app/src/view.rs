//! Terminal rendering of the view-model state.
//!
//! Mirrors the original screen: a list of forecast days with weekday
//! headings and three temperatures, a connectivity banner, and the
//! current alert when one is set.

use weather_core::ConsolidatedWeather;

use crate::app::AppViewModel;

pub fn render(view_model: &AppViewModel) {
    println!("{}", frame(view_model));
}

fn frame(view_model: &AppViewModel) -> String {
    let mut out = String::new();

    match &view_model.current_location {
        Some(location) => out.push_str(&format!("Weather - {}\n", location.title)),
        None => out.push_str("Weather\n"),
    }

    if view_model.weather_results.is_empty() {
        out.push_str("  (no forecast)\n");
    } else {
        for day in &view_model.weather_results {
            out.push_str(&forecast_entry(day));
        }
    }

    if !view_model.is_connected {
        out.push_str("! Not connected to internet\n");
    }

    if let Some(alert) = &view_model.alert {
        out.push_str(&format!("! {alert}\n"));
    }

    out
}

pub fn forecast_entry(day: &ConsolidatedWeather) -> String {
    format!(
        "  {}\n    Current temp: {:.1}°C\n    Max temp: {:.1}°C\n    Min temp: {:.1}°C\n",
        day.applicable_date.format("%A"),
        day.the_temp,
        day.max_temp,
        day.min_temp,
    )
}
