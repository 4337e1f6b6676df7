//! Chart series for the dashboard: study hours totaled per subject, and a
//! dated daily series covering the last seven days.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::analytics::summary::study_by_day;
use crate::performance::dto::format_date;
use crate::sessions::repo::StudySession;

#[derive(Debug, Serialize)]
pub struct StudyData {
    pub subjects: Vec<SubjectHours>,
    pub daily: Vec<DailyHours>,
}

#[derive(Debug, Serialize)]
pub struct SubjectHours {
    pub subject: String,
    pub hours: f64,
}

#[derive(Debug, Serialize)]
pub struct DailyHours {
    pub date: String,
    pub hours: f64,
}

fn to_hours(minutes: f64) -> f64 {
    (minutes / 60.0 * 10.0).round() / 10.0
}

pub fn build_study_data(sessions: &[StudySession], today: Date) -> StudyData {
    let mut per_subject: BTreeMap<&str, f64> = BTreeMap::new();
    for s in sessions {
        *per_subject.entry(s.subject.as_str()).or_insert(0.0) += s.duration_minutes as f64;
    }
    let subjects = per_subject
        .into_iter()
        .map(|(subject, minutes)| SubjectHours {
            subject: subject.to_string(),
            hours: to_hours(minutes),
        })
        .collect();

    let daily = study_by_day(sessions)
        .into_iter()
        .filter(|(day, _)| *day <= today && (today - *day).whole_days() <= 7)
        .map(|(day, d)| DailyHours {
            date: format_date(day),
            hours: to_hours(d.minutes),
        })
        .collect();

    StudyData { subjects, daily }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summary::fixtures::{day, session};

    #[test]
    fn subject_hours_total_across_all_days() {
        let sessions = vec![
            session(0, "Math", 60, 3),
            session(9, "Math", 90, 4),
            session(0, "Physics", 30, 3),
        ];
        let data = build_study_data(&sessions, day(9));
        assert_eq!(data.subjects.len(), 2);
        let math = data.subjects.iter().find(|s| s.subject == "Math").unwrap();
        assert_eq!(math.hours, 2.5);
        let physics = data.subjects.iter().find(|s| s.subject == "Physics").unwrap();
        assert_eq!(physics.hours, 0.5);
    }

    #[test]
    fn daily_series_keeps_only_last_seven_days() {
        let sessions = vec![
            session(0, "Math", 60, 3),
            session(3, "Math", 45, 3),
            session(9, "Math", 90, 4),
        ];
        let data = build_study_data(&sessions, day(9));
        // Day 0 is nine days before "today" and falls outside the window.
        assert_eq!(data.daily.len(), 2);
        assert_eq!(data.daily[0].date, format_date(day(3)));
        assert_eq!(data.daily[1].hours, 1.5);
    }

    #[test]
    fn future_dated_rows_are_excluded_from_daily() {
        let sessions = vec![session(0, "Math", 60, 3), session(5, "Math", 60, 3)];
        let data = build_study_data(&sessions, day(0));
        assert_eq!(data.daily.len(), 1);
        assert_eq!(data.daily[0].date, format_date(day(0)));
        // Subject totals still count every session.
        assert_eq!(data.subjects[0].hours, 2.0);
    }

    #[test]
    fn same_day_sessions_sum_into_one_point() {
        let sessions = vec![session(0, "Math", 40, 3), session(0, "History", 50, 3)];
        let data = build_study_data(&sessions, day(0));
        assert_eq!(data.daily.len(), 1);
        assert_eq!(data.daily[0].hours, 1.5);
    }
}
