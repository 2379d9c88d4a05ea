//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each item has an easiness factor (EF) that adjusts based on performance
//! - Quality grades 0-2: lapse, repetitions reset and the item comes back tomorrow
//! - Quality grades 3-5: interval grows progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after each review and has a minimum value of 1.3

use super::ReviewState;
use crate::config::SrsConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};

pub const MIN_EASINESS: f64 = 1.3;
pub const MAX_QUALITY: u8 = 5;

/// Longest interval ever scheduled, roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Quality at or above which a review counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// Rejects ratings outside 0-5.
pub fn validate_quality(quality: u8) -> Result<u8> {
    if quality > MAX_QUALITY {
        return Err(Error::InvalidRating(quality));
    }
    Ok(quality)
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3.
/// `quality` must already be validated.
fn next_easiness(easiness: f64, quality: u8) -> f64 {
    let d = MAX_QUALITY.saturating_sub(quality) as f64;
    (easiness + (0.1 - d * (0.08 + d * 0.02))).max(MIN_EASINESS)
}

/// Calculates the state after one review.
/// quality: 0-5 (0 = complete blackout, 5 = perfect response)
pub fn calculate_next_review(
    state: &ReviewState,
    quality: u8,
    now: DateTime<Utc>,
    config: &SrsConfig,
) -> Result<ReviewState> {
    let quality = validate_quality(quality)?;

    let easiness = next_easiness(state.easiness, quality);

    let (interval, repetitions) = if quality < PASSING_QUALITY {
        (1, 0)
    } else {
        let reps = state.repetitions.saturating_add(1);
        let interval = match reps {
            1 => 1,
            2 => 6,
            _ => ((state.interval as f64 * easiness).round() as u32).clamp(1, MAX_INTERVAL_DAYS),
        };
        (interval, reps)
    };

    let mut history = state.history.clone();
    history.push(quality);
    if let Some(limit) = config.history_limit {
        let excess = history.len().saturating_sub(limit);
        history.drain(..excess);
    }

    // Only fails for a `now` within a century of the end of chrono's range.
    let due_date = now
        .checked_add_signed(Duration::days(interval as i64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    Ok(ReviewState {
        repetitions,
        interval,
        easiness,
        due_date,
        last_reviewed: Some(now),
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state(easiness: f64, interval: u32, repetitions: u32) -> ReviewState {
        ReviewState {
            repetitions,
            interval,
            easiness,
            ..ReviewState::new(Utc::now())
        }
    }

    #[test]
    fn test_first_review() {
        let now = Utc::now();
        for quality in 3..=5 {
            let next =
                calculate_next_review(&ReviewState::new(now), quality, now, &SrsConfig::default())
                    .unwrap();
            assert_eq!(next.interval, 1);
            assert_eq!(next.repetitions, 1);
            assert_eq!(next.due_date, now + Duration::days(1));
            assert_eq!(next.last_reviewed, Some(now));
            assert_eq!(next.history, vec![quality]);
        }
    }

    #[test]
    fn test_second_review() {
        let next =
            calculate_next_review(&state(2.5, 1, 1), 4, Utc::now(), &SrsConfig::default()).unwrap();
        assert_eq!(next.interval, 6);
        assert_eq!(next.repetitions, 2);
    }

    #[test]
    fn test_third_review_multiplies_by_new_easiness() {
        let next =
            calculate_next_review(&state(2.5, 6, 2), 5, Utc::now(), &SrsConfig::default()).unwrap();
        // EF 2.5 -> 2.6, 6 * 2.6 = 15.6
        assert_eq!(next.interval, 16);
        assert_eq!(next.repetitions, 3);
    }

    #[test]
    fn test_quality_below_3_lapses() {
        for quality in 0..3 {
            let next =
                calculate_next_review(&state(2.5, 10, 5), quality, Utc::now(), &SrsConfig::default())
                    .unwrap();
            assert_eq!(next.interval, 1);
            assert_eq!(next.repetitions, 0);
            // EF should still be updated
            assert!(next.easiness < 2.5);
        }
    }

    #[test]
    fn test_easiness_formula() {
        assert!((next_easiness(2.5, 5) - 2.6).abs() < 1e-9);
        assert!((next_easiness(2.5, 4) - 2.5).abs() < 1e-9);
        assert!((next_easiness(2.5, 3) - 2.36).abs() < 1e-9);
        assert!((next_easiness(2.5, 0) - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_ef_floor() {
        let next =
            calculate_next_review(&state(1.3, 1, 1), 0, Utc::now(), &SrsConfig::default()).unwrap();
        assert_eq!(next.easiness, MIN_EASINESS);
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let result = calculate_next_review(&state(2.5, 1, 1), 6, Utc::now(), &SrsConfig::default());
        assert!(matches!(result, Err(Error::InvalidRating(6))));
    }

    #[test]
    fn test_same_day_perfect_grades_stay_bounded() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let config = SrsConfig::default();
        let mut current = ReviewState::new(now);

        for _ in 0..40 {
            current = calculate_next_review(&current, 5, now, &config).unwrap();
            assert!(current.interval <= MAX_INTERVAL_DAYS);
        }

        assert_eq!(current.interval, MAX_INTERVAL_DAYS);
        assert_eq!(current.due_date, now + Duration::days(MAX_INTERVAL_DAYS as i64));
    }

    #[test]
    fn test_due_date_clamped_at_end_of_time() {
        let now = DateTime::<Utc>::MAX_UTC - Duration::days(3);

        let next = calculate_next_review(&state(2.5, 1, 1), 5, now, &SrsConfig::default()).unwrap();

        assert_eq!(next.interval, 6);
        assert_eq!(next.due_date, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_history_limit_keeps_latest() {
        let config = SrsConfig {
            history_limit: Some(3),
            ..SrsConfig::default()
        };
        let mut current = state(2.5, 6, 2);
        current.history = vec![1, 2, 3];

        let next = calculate_next_review(&current, 5, Utc::now(), &config).unwrap();
        assert_eq!(next.history, vec![2, 3, 5]);
    }
}
