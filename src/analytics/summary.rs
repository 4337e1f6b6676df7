//! Assembles the per-user analytics summary: aggregate means, date-aligned
//! Pearson correlations, and per-metric trends. Pure over already-fetched
//! rows, so the dashboard, the patterns view and the AI prompt builder can
//! all consume it and tests need no database.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::analytics::stats::{mean, pearson, trend, Correlation, Trend};
use crate::performance::repo::PerformanceRecord;
use crate::sessions::repo::StudySession;
use crate::wellness::repo::WellnessEntry;

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub totals: Totals,
    pub averages: Averages,
    pub correlations: Correlations,
    pub trends: Trends,
}

#[derive(Debug, Serialize)]
pub struct Totals {
    pub study_sessions: usize,
    pub performance_records: usize,
    pub wellness_entries: usize,
    pub total_study_hours: f64,
    pub subjects: usize,
}

#[derive(Debug, Serialize)]
pub struct Averages {
    pub focus_rating: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub score_by_subject: Vec<SubjectAverage>,
}

#[derive(Debug, Serialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub average_percentage: f64,
    pub records: usize,
}

#[derive(Debug, Serialize)]
pub struct Correlations {
    /// Per-session pairing; the rest are date-aligned.
    pub duration_vs_focus: Correlation,
    pub study_minutes_vs_score: Correlation,
    pub focus_vs_score: Correlation,
    pub sleep_vs_focus: Correlation,
    pub sleep_vs_score: Correlation,
    pub stress_vs_score: Correlation,
}

#[derive(Debug, Serialize)]
pub struct Trends {
    pub focus_rating: Option<Trend>,
    pub study_minutes: Option<Trend>,
    pub score_percentage: Option<Trend>,
    pub sleep_hours: Option<Trend>,
    pub stress_level: Option<Trend>,
}

/// Per-day rollup of study sessions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DailyStudy {
    pub minutes: f64,
    pub focus: f64,
}

/// Collapse sessions to one sample per calendar day: total minutes and
/// mean focus rating.
pub(crate) fn study_by_day(sessions: &[StudySession]) -> BTreeMap<Date, DailyStudy> {
    let mut acc: BTreeMap<Date, (f64, f64, usize)> = BTreeMap::new();
    for s in sessions {
        let day = s.created_at.date();
        let e = acc.entry(day).or_insert((0.0, 0.0, 0));
        e.0 += s.duration_minutes as f64;
        e.1 += s.focus_rating as f64;
        e.2 += 1;
    }
    acc.into_iter()
        .map(|(day, (minutes, focus_sum, n))| {
            (
                day,
                DailyStudy {
                    minutes,
                    focus: focus_sum / n as f64,
                },
            )
        })
        .collect()
}

/// Mean score percentage per assessment date.
pub(crate) fn score_by_day(records: &[PerformanceRecord]) -> BTreeMap<Date, f64> {
    let mut acc: BTreeMap<Date, (f64, usize)> = BTreeMap::new();
    for r in records {
        let e = acc.entry(r.date).or_insert((0.0, 0));
        e.0 += r.percentage();
        e.1 += 1;
    }
    acc.into_iter()
        .map(|(day, (sum, n))| (day, sum / n as f64))
        .collect()
}

/// One wellness sample per date; duplicate dates are averaged.
pub(crate) fn wellness_by_day(entries: &[WellnessEntry]) -> BTreeMap<Date, (f64, f64)> {
    let mut acc: BTreeMap<Date, (f64, f64, usize)> = BTreeMap::new();
    for w in entries {
        let e = acc.entry(w.date).or_insert((0.0, 0.0, 0));
        e.0 += w.sleep_hours;
        e.1 += w.stress_level as f64;
        e.2 += 1;
    }
    acc.into_iter()
        .map(|(day, (sleep, stress, n))| (day, (sleep / n as f64, stress / n as f64)))
        .collect()
}

/// Pair two per-day series on their common dates.
fn align<A: Copy, B: Copy>(
    a: &BTreeMap<Date, A>,
    b: &BTreeMap<Date, B>,
    fa: impl Fn(A) -> f64,
    fb: impl Fn(B) -> f64,
) -> Vec<(f64, f64)> {
    a.iter()
        .filter_map(|(day, &va)| b.get(day).map(|&vb| (fa(va), fb(vb))))
        .collect()
}

fn subject_averages(records: &[PerformanceRecord]) -> Vec<SubjectAverage> {
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let e = acc.entry(r.subject.as_str()).or_insert((0.0, 0));
        e.0 += r.percentage();
        e.1 += 1;
    }
    acc.into_iter()
        .map(|(subject, (sum, n))| SubjectAverage {
            subject: subject.to_string(),
            average_percentage: sum / n as f64,
            records: n,
        })
        .collect()
}

pub fn build_summary(
    sessions: &[StudySession],
    records: &[PerformanceRecord],
    entries: &[WellnessEntry],
) -> AnalyticsSummary {
    let study_days = study_by_day(sessions);
    let score_days = score_by_day(records);
    let wellness_days = wellness_by_day(entries);

    let per_session: Vec<(f64, f64)> = sessions
        .iter()
        .map(|s| (s.duration_minutes as f64, s.focus_rating as f64))
        .collect();

    let correlations = Correlations {
        duration_vs_focus: pearson(&per_session),
        study_minutes_vs_score: pearson(&align(
            &study_days,
            &score_days,
            |d| d.minutes,
            |s| s,
        )),
        focus_vs_score: pearson(&align(&study_days, &score_days, |d| d.focus, |s| s)),
        sleep_vs_focus: pearson(&align(
            &wellness_days,
            &study_days,
            |(sleep, _)| sleep,
            |d| d.focus,
        )),
        sleep_vs_score: pearson(&align(
            &wellness_days,
            &score_days,
            |(sleep, _)| sleep,
            |s| s,
        )),
        stress_vs_score: pearson(&align(
            &wellness_days,
            &score_days,
            |(_, stress)| stress,
            |s| s,
        )),
    };

    let focus_series: Vec<f64> = study_days.values().map(|d| d.focus).collect();
    let minutes_series: Vec<f64> = study_days.values().map(|d| d.minutes).collect();
    let score_series: Vec<f64> = score_days.values().copied().collect();
    let sleep_series: Vec<f64> = wellness_days.values().map(|&(s, _)| s).collect();
    let stress_series: Vec<f64> = wellness_days.values().map(|&(_, s)| s).collect();

    let trends = Trends {
        focus_rating: trend(&focus_series),
        study_minutes: trend(&minutes_series),
        score_percentage: trend(&score_series),
        sleep_hours: trend(&sleep_series),
        stress_level: trend(&stress_series),
    };

    let focus_values: Vec<f64> = sessions.iter().map(|s| s.focus_rating as f64).collect();
    let sleep_values: Vec<f64> = entries.iter().map(|w| w.sleep_hours).collect();
    let total_minutes: f64 = sessions.iter().map(|s| s.duration_minutes as f64).sum();
    let subjects = {
        let mut names: Vec<&str> = sessions.iter().map(|s| s.subject.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    };

    AnalyticsSummary {
        totals: Totals {
            study_sessions: sessions.len(),
            performance_records: records.len(),
            wellness_entries: entries.len(),
            total_study_hours: (total_minutes / 60.0 * 10.0).round() / 10.0,
            subjects,
        },
        averages: Averages {
            focus_rating: mean(&focus_values),
            sleep_hours: mean(&sleep_values),
            score_by_subject: subject_averages(records),
        },
        correlations,
        trends,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use time::macros::{date, time};
    use time::{Date, OffsetDateTime, Time};
    use uuid::Uuid;

    use super::*;

    pub fn day(offset: i64) -> Date {
        date!(2026 - 03 - 01) + time::Duration::days(offset)
    }

    pub fn session(offset: i64, subject: &str, minutes: i32, focus: i32) -> StudySession {
        let created = day(offset)
            .with_time(Time::MIDNIGHT)
            .assume_utc()
            + time::Duration::hours(9);
        StudySession {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            subject: subject.to_string(),
            duration_minutes: minutes,
            start_time: time!(9:00),
            end_time: time!(10:00),
            study_method: "reading".to_string(),
            difficulty_level: 3,
            focus_rating: focus,
            notes: None,
            created_at: created,
        }
    }

    pub fn record(offset: i64, subject: &str, score: f64, max: f64) -> PerformanceRecord {
        PerformanceRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            subject: subject.to_string(),
            assessment_type: "quiz".to_string(),
            score,
            max_score: max,
            date: day(offset),
            topics_covered: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    pub fn wellness(offset: i64, sleep: f64, stress: i32) -> WellnessEntry {
        WellnessEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: day(offset),
            sleep_hours: sleep,
            stress_level: stress,
            mood_rating: 3,
            exercise_minutes: 0,
            caffeine_intake: 0,
            notes: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::analytics::stats::{Correlation, Trend};

    #[test]
    fn empty_data_yields_empty_summary() {
        let summary = build_summary(&[], &[], &[]);
        assert_eq!(summary.totals.study_sessions, 0);
        assert_eq!(summary.averages.focus_rating, None);
        assert_eq!(
            summary.correlations.duration_vs_focus,
            Correlation::InsufficientData
        );
        assert_eq!(summary.trends.focus_rating, None);
    }

    #[test]
    fn longer_sessions_with_rising_focus() {
        let sessions = vec![
            session(0, "Math", 30, 2),
            session(1, "Math", 45, 3),
            session(2, "Math", 60, 3),
            session(3, "Math", 90, 4),
            session(4, "Math", 120, 5),
        ];
        let summary = build_summary(&sessions, &[], &[]);
        let avg = summary.averages.focus_rating.unwrap();
        assert!((avg - 3.4).abs() < 1e-9);
        match summary.correlations.duration_vs_focus {
            Correlation::Defined(r) => assert!(r >= 0.95, "r was {r}"),
            other => panic!("expected defined correlation, got {other:?}"),
        }
        assert_eq!(summary.trends.focus_rating, Some(Trend::Up));
        assert_eq!(summary.totals.total_study_hours, 5.8);
        assert_eq!(summary.totals.subjects, 1);
    }

    #[test]
    fn sessions_on_same_day_collapse_to_one_sample() {
        let sessions = vec![
            session(0, "Math", 30, 2),
            session(0, "Math", 50, 4),
            session(1, "Math", 60, 5),
        ];
        let by_day = study_by_day(&sessions);
        assert_eq!(by_day.len(), 2);
        let first = by_day.get(&day(0)).unwrap();
        assert_eq!(first.minutes, 80.0);
        assert!((first.focus - 3.0).abs() < 1e-9);
    }

    #[test]
    fn correlations_align_on_common_dates_only() {
        // Wellness on days 0..3, scores only on days 0 and 2.
        let entries = vec![
            wellness(0, 6.0, 4),
            wellness(1, 7.0, 3),
            wellness(2, 8.0, 2),
            wellness(3, 9.0, 1),
        ];
        let records = vec![record(0, "Math", 60.0, 100.0), record(2, "Math", 90.0, 100.0)];
        let summary = build_summary(&[], &records, &entries);
        // Two aligned pairs is exactly enough for a defined coefficient.
        match summary.correlations.sleep_vs_score {
            Correlation::Defined(r) => assert!((r - 1.0).abs() < 1e-9),
            other => panic!("expected defined correlation, got {other:?}"),
        }
    }

    #[test]
    fn single_aligned_day_is_insufficient() {
        let entries = vec![wellness(0, 8.0, 2)];
        let records = vec![record(0, "Math", 80.0, 100.0)];
        let summary = build_summary(&[], &records, &entries);
        assert_eq!(
            summary.correlations.sleep_vs_score,
            Correlation::InsufficientData
        );
    }

    #[test]
    fn subject_averages_use_percentages() {
        let records = vec![
            record(0, "Math", 15.0, 20.0),
            record(1, "Math", 18.0, 20.0),
            record(2, "Physics", 40.0, 50.0),
        ];
        let summary = build_summary(&[], &records, &[]);
        let by_subject = &summary.averages.score_by_subject;
        assert_eq!(by_subject.len(), 2);
        let math = by_subject.iter().find(|s| s.subject == "Math").unwrap();
        assert!((math.average_percentage - 82.5).abs() < 1e-9);
        assert_eq!(math.records, 2);
    }

    #[test]
    fn declining_sleep_trend_detected() {
        let entries = vec![
            wellness(0, 9.0, 2),
            wellness(1, 8.0, 2),
            wellness(2, 7.0, 3),
            wellness(3, 5.5, 4),
        ];
        let summary = build_summary(&[], &[], &entries);
        assert_eq!(summary.trends.sleep_hours, Some(Trend::Down));
        assert_eq!(summary.trends.stress_level, Some(Trend::Up));
    }

    #[test]
    fn summary_serializes_insufficient_as_string() {
        let summary = build_summary(&[], &[], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json["correlations"]["sleep_vs_score"],
            serde_json::json!("insufficient data")
        );
    }
}
