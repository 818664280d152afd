use crate::forecast::ForecastPoint;

pub const DEFAULT_TOP_N: usize = 6;

/// Counts the most frequent normalized condition texts over a forecast.
///
/// Labels are trimmed and lower-cased, an empty description counts under
/// "unknown". The result is sorted descending on count only, so ties keep
/// the order in which a label was first seen, and truncated to 'top_n'.
///
/// # Arguments
///
/// * 'points' - the forecast points to count over
/// * 'top_n' - maximum number of labels to return
pub fn top_conditions(points: &[ForecastPoint], top_n: usize) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for p in points {
        let trimmed = p.condition_text.trim().to_lowercase();
        let label = if trimmed.is_empty() { "unknown".to_string() } else { trimmed };

        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn point(desc: &str) -> ForecastPoint {
        ForecastPoint {
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            temperature_c: 0.0,
            feels_like_c: 0.0,
            humidity_pct: 0,
            wind_speed_ms: 0.0,
            rain_mm_3h: 0.0,
            pressure_hpa: 0,
            condition_text: desc.to_string(),
        }
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let points: Vec<ForecastPoint> = ["rain", "rain", "clear", "clear", "clouds"]
            .iter()
            .map(|d| point(d))
            .collect();

        let top = top_conditions(&points, 2);

        assert_eq!(top, vec![("rain".to_string(), 2), ("clear".to_string(), 2)]);
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let points = vec![point("  Rain  "), point("rain"), point("RAIN")];

        let top = top_conditions(&points, DEFAULT_TOP_N);

        assert_eq!(top, vec![("rain".to_string(), 3)]);
    }

    #[test]
    fn empty_description_counts_as_unknown() {
        let points = vec![point(""), point("   "), point("mist")];

        let top = top_conditions(&points, DEFAULT_TOP_N);

        assert_eq!(top[0], ("unknown".to_string(), 2));
        assert_eq!(top[1], ("mist".to_string(), 1));
    }

    #[test]
    fn truncates_to_top_n() {
        let points: Vec<ForecastPoint> = ["a", "a", "a", "b", "b", "c", "d"]
            .iter()
            .map(|d| point(d))
            .collect();

        let top = top_conditions(&points, 2);

        assert_eq!(top, vec![("a".to_string(), 3), ("b".to_string(), 2)]);
    }
}
