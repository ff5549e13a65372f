//! Collapses the 3-hour-interval forecast list to one sample per day.

use chrono::NaiveDate;

use crate::model::{DailyForecast, WeatherSample};

/// At most this many distinct days are considered before trimming.
const MAX_CANDIDATE_DAYS: usize = 6;
/// Length cap on the emitted forecast.
const MAX_DAYS: usize = 5;
/// The representative sample is the one closest to this UTC hour.
const TARGET_HOUR: u32 = 12;

/// Reduce a chronological 3-hour forecast list to at most five samples, one
/// per distinct UTC calendar day in first-seen order.
///
/// Within a day the sample whose UTC hour is nearest to noon wins; exact
/// ties keep the earlier-encountered sample (strict `<` never replaces an
/// equally good best). An empty input yields an empty forecast, which
/// callers treat as "no forecast available" rather than an error.
pub fn reduce_to_daily(samples: &[WeatherSample]) -> DailyForecast {
    // (date, index of best-so-far sample), in first-seen date order.
    let mut days: Vec<(NaiveDate, usize)> = Vec::new();

    for (idx, sample) in samples.iter().enumerate() {
        let date = sample.utc_date();
        match days.iter().position(|(d, _)| *d == date) {
            Some(pos) => {
                let best = days[pos].1;
                if hour_distance(sample) < hour_distance(&samples[best]) {
                    days[pos].1 = idx;
                }
            }
            None if days.len() < MAX_CANDIDATE_DAYS => days.push((date, idx)),
            // Days beyond the candidate window are dropped entirely.
            None => {}
        }
    }

    DailyForecast(
        days.into_iter()
            .take(MAX_DAYS)
            .map(|(_, idx)| samples[idx].clone())
            .collect(),
    )
}

fn hour_distance(sample: &WeatherSample) -> u32 {
    sample.utc_hour().abs_diff(TARGET_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn sample_at(iso: &str) -> WeatherSample {
        let ts: DateTime<Utc> = iso.parse().expect("valid timestamp");
        WeatherSample {
            observation_time: ts,
            condition_id: 800,
            condition: "clear sky".into(),
            icon: "01d".into(),
            temperature_c: 20.0,
            temp_min_c: Some(15.0),
            temp_max_c: Some(25.0),
            humidity_pct: 40,
            wind_speed_mps: 3.0,
            location_name: None,
            country: None,
            coords: None,
        }
    }

    fn day_of_hours(date: &str, hours: &[u32]) -> Vec<WeatherSample> {
        hours
            .iter()
            .map(|h| sample_at(&format!("{date}T{h:02}:00:00Z")))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_forecast() {
        let daily = reduce_to_daily(&[]);
        assert!(daily.is_empty());
    }

    #[test]
    fn full_day_picks_noon() {
        let samples = day_of_hours("2026-08-30", &[0, 3, 6, 9, 12, 15, 18, 21]);
        let daily = reduce_to_daily(&samples);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily.0[0].utc_hour(), 12);
    }

    #[test]
    fn exact_tie_keeps_earlier_sample() {
        // |9-12| == |15-12|, so the first-encountered 09:00 sample wins.
        let samples = day_of_hours("2026-08-30", &[9, 15]);
        let daily = reduce_to_daily(&samples);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily.0[0].utc_hour(), 9);
    }

    #[test]
    fn one_sample_per_distinct_date_in_encounter_order() {
        let mut samples = Vec::new();
        for day in 1..=4 {
            samples.extend(day_of_hours(&format!("2026-09-0{day}"), &[0, 3, 6, 9, 12, 15]));
        }
        let daily = reduce_to_daily(&samples);
        assert_eq!(daily.len(), 4);
        let dates: Vec<_> = daily.iter().map(WeatherSample::utc_date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn truncates_to_five_days() {
        let mut samples = Vec::new();
        for day in 10..=17 {
            samples.extend(day_of_hours(&format!("2026-09-{day}"), &[12]));
        }
        let daily = reduce_to_daily(&samples);
        assert_eq!(daily.len(), 5);
        assert_eq!(daily.0[0].utc_date().to_string(), "2026-09-10");
        assert_eq!(daily.0[4].utc_date().to_string(), "2026-09-14");
    }

    #[test]
    fn partial_leading_day_is_represented() {
        // A forecast fetched in the evening starts with a stub of "today".
        let mut samples = day_of_hours("2026-08-30", &[18, 21]);
        samples.extend(day_of_hours("2026-08-31", &[0, 3, 6, 9, 12, 15, 18, 21]));
        let daily = reduce_to_daily(&samples);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.0[0].utc_hour(), 18);
        assert_eq!(daily.0[1].utc_hour(), 12);
    }

    #[test]
    fn chosen_sample_is_no_farther_from_noon_than_any_candidate() {
        let hours = [2, 5, 8, 11, 14, 17, 20, 23];
        let samples = day_of_hours("2026-08-30", &hours);
        let daily = reduce_to_daily(&samples);
        let picked = daily.0[0].utc_hour();
        for h in hours {
            assert!(picked.abs_diff(12) <= h.abs_diff(12));
        }
        assert_eq!(picked, 11);
    }
}
