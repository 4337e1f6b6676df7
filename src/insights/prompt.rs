//! Fixed-template prompt for the learning-coach call. The template embeds
//! the key figures of the analytics summary; the endpoint is asked for a
//! short, structured answer.

use std::fmt::Write;

use crate::analytics::stats::{Correlation, Trend};
use crate::analytics::summary::AnalyticsSummary;

fn fmt_correlation(c: &Correlation) -> String {
    match c {
        Correlation::Defined(r) => format!("{r:.2}"),
        Correlation::InsufficientData => "insufficient data".to_string(),
    }
}

fn fmt_trend(t: &Option<Trend>) -> &'static str {
    match t {
        Some(Trend::Up) => "trending up",
        Some(Trend::Down) => "trending down",
        Some(Trend::Stable) => "stable",
        None => "unknown",
    }
}

fn fmt_avg(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}"),
        None => "n/a".to_string(),
    }
}

pub fn build_prompt(summary: &AnalyticsSummary) -> String {
    let mut p = String::new();
    p.push_str(
        "You are an expert learning coach analyzing a student's academic \
         performance data. Be encouraging, specific, and actionable.\n\n",
    );

    let _ = writeln!(p, "Student data:");
    let _ = writeln!(
        p,
        "- {} study sessions across {} subjects, {:.1} hours total",
        summary.totals.study_sessions, summary.totals.subjects, summary.totals.total_study_hours
    );
    let _ = writeln!(
        p,
        "- Average focus rating: {}/5, average sleep: {} hours",
        fmt_avg(summary.averages.focus_rating),
        fmt_avg(summary.averages.sleep_hours)
    );
    for s in &summary.averages.score_by_subject {
        let _ = writeln!(
            p,
            "- {}: {:.1}% average over {} assessments",
            s.subject, s.average_percentage, s.records
        );
    }

    let c = &summary.correlations;
    let _ = writeln!(p, "\nCorrelations (Pearson r):");
    let _ = writeln!(p, "- session duration vs focus: {}", fmt_correlation(&c.duration_vs_focus));
    let _ = writeln!(p, "- study minutes vs score: {}", fmt_correlation(&c.study_minutes_vs_score));
    let _ = writeln!(p, "- focus vs score: {}", fmt_correlation(&c.focus_vs_score));
    let _ = writeln!(p, "- sleep vs focus: {}", fmt_correlation(&c.sleep_vs_focus));
    let _ = writeln!(p, "- sleep vs score: {}", fmt_correlation(&c.sleep_vs_score));
    let _ = writeln!(p, "- stress vs score: {}", fmt_correlation(&c.stress_vs_score));

    let t = &summary.trends;
    let _ = writeln!(p, "\nTrends over time:");
    let _ = writeln!(p, "- focus: {}", fmt_trend(&t.focus_rating));
    let _ = writeln!(p, "- study minutes: {}", fmt_trend(&t.study_minutes));
    let _ = writeln!(p, "- scores: {}", fmt_trend(&t.score_percentage));
    let _ = writeln!(p, "- sleep: {}", fmt_trend(&t.sleep_hours));
    let _ = writeln!(p, "- stress: {}", fmt_trend(&t.stress_level));

    p.push_str(
        "\nProvide insights in this format:\n\
         KEY PATTERNS DISCOVERED: the 2-3 most important patterns in the data.\n\
         PERFORMANCE CORRELATIONS: how wellness factors relate to academic performance.\n\
         STRENGTHS: what the student is doing well, with specific data points.\n\
         OPTIMIZATION OPPORTUNITIES: specific, actionable recommendations.\n\
         NEXT STEPS: concrete actions for this week.\n\
         Keep the response under 400 words and encouraging in tone.\n",
    );
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summary::{build_summary, fixtures::*};

    #[test]
    fn prompt_embeds_key_figures() {
        let sessions = vec![
            session(0, "Math", 30, 2),
            session(1, "Math", 45, 3),
            session(2, "Math", 60, 3),
            session(3, "Math", 90, 4),
            session(4, "Math", 120, 5),
        ];
        let records = vec![record(0, "Math", 80.0, 100.0), record(2, "Math", 90.0, 100.0)];
        let summary = build_summary(&sessions, &records, &[]);
        let prompt = build_prompt(&summary);

        assert!(prompt.contains("5 study sessions"));
        assert!(prompt.contains("Average focus rating: 3.4/5"));
        assert!(prompt.contains("Math: 85.0% average over 2 assessments"));
        assert!(prompt.contains("under 400 words"));
    }

    #[test]
    fn prompt_reports_missing_correlations_plainly() {
        let summary = build_summary(&[], &[], &[]);
        let prompt = build_prompt(&summary);
        assert!(prompt.contains("sleep vs score: insufficient data"));
        assert!(prompt.contains("focus: unknown"));
        assert!(!prompt.contains("NaN"));
    }
}
