//! Pure rendering of a [`ViewState`] into terminal text. No I/O happens
//! here; the caller decides where the text goes.

use skycast_core::{ViewState, WeatherSample, icon_url};

pub fn render(state: &ViewState, icon_base_url: &str) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Error { message } => format!("Error: {message}"),
        ViewState::Loaded { current, forecast } => {
            let mut out = render_current(current, icon_base_url);
            if !forecast.is_empty() {
                out.push_str("\n5-day forecast\n");
                for day in forecast.iter() {
                    out.push_str(&render_day(day));
                    out.push('\n');
                }
            }
            out
        }
    }
}

fn render_current(current: &WeatherSample, icon_base_url: &str) -> String {
    let location = match (&current.location_name, &current.country) {
        (Some(name), Some(country)) if !country.is_empty() => format!("{name}, {country}"),
        (Some(name), _) => name.clone(),
        _ => "Unknown location".to_string(),
    };

    format!(
        "{location}\n{} {} {}°C\nHumidity: {}%  Wind: {} m/s\n{}\n",
        current.condition_kind().glyph(),
        current.condition,
        current.temperature_c.round(),
        current.humidity_pct,
        current.wind_speed_mps,
        icon_url(icon_base_url, &current.icon),
    )
}

fn render_day(day: &WeatherSample) -> String {
    let weekday = day.observation_time.format("%a");
    let max = day.temp_max_c.unwrap_or(day.temperature_c).round();
    let min = day.temp_min_c.unwrap_or(day.temperature_c).round();
    format!(
        "  {weekday}  {}  {max}° / {min}°  {}",
        day.condition_kind().glyph(),
        day.condition
    )
}
