//! Human-readable pattern cards for the patterns view, derived from the
//! same rows the summary is built from.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::summary::{study_by_day, wellness_by_day};
use crate::sessions::repo::StudySession;
use crate::wellness::repo::WellnessEntry;

#[derive(Debug, Serialize, PartialEq)]
pub struct PatternCard {
    pub title: String,
    pub description: String,
    pub recommendation: String,
    pub kind: PatternKind,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Positive,
    Insight,
    Warning,
    Info,
}

struct SubjectStats {
    subject: String,
    avg_focus: f64,
    sessions: usize,
    total_minutes: f64,
}

fn per_subject(sessions: &[StudySession]) -> Vec<SubjectStats> {
    let mut acc: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
    for s in sessions {
        let e = acc.entry(s.subject.as_str()).or_insert((0.0, 0.0, 0));
        e.0 += s.focus_rating as f64;
        e.1 += s.duration_minutes as f64;
        e.2 += 1;
    }
    let mut stats: Vec<SubjectStats> = acc
        .into_iter()
        .filter(|(_, (_, _, n))| *n >= 2)
        .map(|(subject, (focus_sum, minutes, n))| SubjectStats {
            subject: subject.to_string(),
            avg_focus: focus_sum / n as f64,
            sessions: n,
            total_minutes: minutes,
        })
        .collect();
    stats.sort_by(|a, b| b.avg_focus.partial_cmp(&a.avg_focus).unwrap_or(std::cmp::Ordering::Equal));
    stats
}

pub fn detect_patterns(sessions: &[StudySession], entries: &[WellnessEntry]) -> Vec<PatternCard> {
    let mut cards = Vec::new();

    // Sessions with focus 4-5: what duration do they run at?
    let high_focus: Vec<f64> = sessions
        .iter()
        .filter(|s| s.focus_rating >= 4)
        .map(|s| s.duration_minutes as f64)
        .collect();
    if !high_focus.is_empty() {
        let avg = high_focus.iter().sum::<f64>() / high_focus.len() as f64;
        cards.push(PatternCard {
            title: "High Focus Sessions".into(),
            description: format!(
                "Your high-focus sessions (4-5 rating) average {avg:.0} minutes"
            ),
            recommendation: "Try to replicate conditions that lead to high focus sessions!".into(),
            kind: PatternKind::Positive,
        });
    }

    let subjects = per_subject(sessions);
    if let Some(best) = subjects.first() {
        cards.push(PatternCard {
            title: format!("Top Subject: {}", best.subject),
            description: format!(
                "Average focus rating: {:.1}/5 ({} sessions, {:.0} minutes total)",
                best.avg_focus, best.sessions, best.total_minutes
            ),
            recommendation: format!(
                "You focus well on {}. Apply similar techniques to other subjects.",
                best.subject
            ),
            kind: PatternKind::Insight,
        });

        if let Some(struggling) = subjects.last().filter(|_| subjects.len() > 1) {
            if struggling.avg_focus < 3.0 {
                cards.push(PatternCard {
                    title: format!("Needs Attention: {}", struggling.subject),
                    description: format!("Average focus rating: {:.1}/5", struggling.avg_focus),
                    recommendation: format!(
                        "Try different study methods for {} or study it when you're most alert.",
                        struggling.subject
                    ),
                    kind: PatternKind::Warning,
                });
            }
        }
    }

    // Focus on well-slept days, aligned by date.
    let study_days = study_by_day(sessions);
    let wellness_days = wellness_by_day(entries);
    let rested_focus: Vec<f64> = wellness_days
        .iter()
        .filter(|(_, &(sleep, _))| sleep >= 7.0)
        .filter_map(|(day, _)| study_days.get(day).map(|d| d.focus))
        .collect();
    if !rested_focus.is_empty() {
        let avg = rested_focus.iter().sum::<f64>() / rested_focus.len() as f64;
        cards.push(PatternCard {
            title: "Sleep & Focus Connection".into(),
            description: format!("With 7+ hours sleep, your average focus is {avg:.1}/5"),
            recommendation: "Prioritize getting enough sleep for better study sessions!".into(),
            kind: PatternKind::Insight,
        });
    }

    if cards.is_empty() {
        cards.push(PatternCard {
            title: "Getting Started".into(),
            description:
                "Keep logging your study sessions to discover your personal learning patterns!"
                    .into(),
            recommendation: "Try logging at least 5-10 study sessions to see meaningful insights."
                .into(),
            kind: PatternKind::Info,
        });
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summary::fixtures::{session, wellness};

    #[test]
    fn no_data_yields_getting_started_card() {
        let cards = detect_patterns(&[], &[]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].kind, PatternKind::Info);
    }

    #[test]
    fn high_focus_card_reports_average_duration() {
        let sessions = vec![
            session(0, "Math", 60, 4),
            session(1, "Math", 90, 5),
            session(2, "Math", 20, 2),
        ];
        let cards = detect_patterns(&sessions, &[]);
        let card = cards
            .iter()
            .find(|c| c.title == "High Focus Sessions")
            .expect("high focus card");
        assert!(card.description.contains("75 minutes"));
    }

    #[test]
    fn struggling_subject_flagged_below_three() {
        let sessions = vec![
            session(0, "Math", 60, 5),
            session(1, "Math", 60, 4),
            session(2, "History", 30, 2),
            session(3, "History", 30, 2),
        ];
        let cards = detect_patterns(&sessions, &[]);
        assert!(cards.iter().any(|c| c.title == "Top Subject: Math"));
        assert!(cards
            .iter()
            .any(|c| c.title == "Needs Attention: History" && c.kind == PatternKind::Warning));
    }

    #[test]
    fn sleep_card_uses_date_aligned_days() {
        let sessions = vec![session(0, "Math", 60, 5), session(1, "Math", 60, 3)];
        // Only day 0 has 7+ hours of sleep.
        let entries = vec![wellness(0, 8.0, 2), wellness(1, 5.0, 4)];
        let cards = detect_patterns(&sessions, &entries);
        let card = cards
            .iter()
            .find(|c| c.title == "Sleep & Focus Connection")
            .expect("sleep card");
        assert!(card.description.contains("5.0/5"));
    }
}
