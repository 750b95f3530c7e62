//! History aggregation.
//!
//! Reduces a fetched collection of past results into category counts and a
//! bounded recent-trend series. Deterministic: the same input always yields
//! the same output, with no simulated or randomized values.

use serde::Serialize;

use crate::models::{HistoryRecord, Verdict};

/// Upper bound on the recent-trend series length.
pub const TREND_WINDOW: usize = 10;

/// Display floor for a zero percentage, so the chart bar stays visible.
pub const TREND_DISPLAY_FLOOR: u32 = 2;

/// Exact per-verdict counts over a stable category set.
///
/// Every chart category is always present, zero included, so downstream
/// charts never see a shifting set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct VerdictCounts {
    pub informative: u64,
    pub non_informative: u64,
    pub ood: u64,
}

/// One point of the recent-trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    /// Floor-adjusted value for rendering. Never below the display floor.
    pub percentage: u32,
    /// True rounded percentage, shown on hover. Kept distinct from the
    /// display value, never collapsed into it.
    pub real_score: u32,
}

/// Summary statistics over a history collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub counts: VerdictCounts,
    pub recent_trend: Vec<TrendPoint>,
    pub total: u64,
    /// Non-informative plus out-of-distribution records.
    pub suspicious: u64,
    /// Mean credibility score across all records, as a percentage with one
    /// decimal.
    pub average_confidence: f64,
}

/// Compute summary statistics from a list of history records.
pub fn aggregate(records: &[HistoryRecord]) -> AggregateStats {
    let mut counts = VerdictCounts::default();
    let mut score_sum = 0.0;

    for record in records {
        match record.verdict {
            Verdict::Informative => counts.informative += 1,
            Verdict::NonInformative => counts.non_informative += 1,
            Verdict::Ood => counts.ood += 1,
            Verdict::Unknown => {}
        }
        score_sum += record.credibility_score;
    }

    let total = records.len() as u64;
    let average_confidence = if records.is_empty() {
        0.0
    } else {
        let mean = score_sum / records.len() as f64;
        (mean * 1000.0).round() / 10.0
    };

    AggregateStats {
        counts,
        recent_trend: recent_trend(records),
        total,
        suspicious: counts.non_informative + counts.ood,
        average_confidence,
    }
}

/// The last `TREND_WINDOW` records in arrival order, reversed to
/// chronological order, as labeled percentage points.
fn recent_trend(records: &[HistoryRecord]) -> Vec<TrendPoint> {
    let start = records.len().saturating_sub(TREND_WINDOW);
    records[start..]
        .iter()
        .rev()
        .enumerate()
        .map(|(i, record)| {
            let real_score = (record.credibility_score * 100.0).round() as u32;
            let percentage = if real_score == 0 {
                TREND_DISPLAY_FLOOR
            } else {
                real_score
            };
            TrendPoint {
                label: trend_label(record, i + 1),
                percentage,
                real_score,
            }
        })
        .collect()
}

/// Derive a short chart label for one record.
///
/// First two words of the snippet with an ellipsis when truncated; the fixed
/// image label when only an image exists; an index placeholder otherwise.
fn trend_label(record: &HistoryRecord, position: usize) -> String {
    if let Some(snippet) = record
        .text_snippet
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        let words: Vec<&str> = snippet.split_whitespace().collect();
        let head = words.iter().take(2).copied().collect::<Vec<_>>().join(" ");
        if words.len() > 2 {
            return format!("{}…", head);
        }
        return head;
    }

    if record.image_ref.is_some() {
        return "Image Content".to_string();
    }

    format!("Analysis #{}", position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(verdict: Verdict, score: f64) -> HistoryRecord {
        HistoryRecord {
            id: None,
            verdict,
            credibility_score: score,
            text_snippet: None,
            image_ref: None,
            created_at: None,
        }
    }

    fn with_text(mut r: HistoryRecord, text: &str) -> HistoryRecord {
        r.text_snippet = Some(text.to_string());
        r
    }

    #[test]
    fn test_counts_include_zero_categories() {
        let records = vec![
            record(Verdict::Informative, 0.9),
            record(Verdict::Informative, 0.8),
            record(Verdict::Informative, 0.7),
            record(Verdict::NonInformative, 0.3),
            record(Verdict::NonInformative, 0.2),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.counts.informative, 3);
        assert_eq!(stats.counts.non_informative, 2);
        assert_eq!(stats.counts.ood, 0);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.suspicious, 2);
    }

    #[test]
    fn test_unknown_records_stay_outside_chart_categories() {
        let records = vec![record(Verdict::Unknown, 0.5)];
        let stats = aggregate(&records);
        assert_eq!(stats.counts, VerdictCounts::default());
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.recent_trend.is_empty());
        assert_eq!(stats.average_confidence, 0.0);
    }

    #[test]
    fn test_trend_takes_last_ten_reversed() {
        let records: Vec<HistoryRecord> = (0..15)
            .map(|i| with_text(record(Verdict::Informative, 0.5), &format!("item {}", i)))
            .collect();
        let stats = aggregate(&records);
        assert_eq!(stats.recent_trend.len(), TREND_WINDOW);
        // Last record in arrival order comes first after the reverse
        assert_eq!(stats.recent_trend[0].label, "item 14");
        assert_eq!(stats.recent_trend[9].label, "item 5");
    }

    #[test]
    fn test_zero_score_gets_display_floor_and_keeps_real_value() {
        let records = vec![record(Verdict::NonInformative, 0.0)];
        let stats = aggregate(&records);
        let point = &stats.recent_trend[0];
        assert_eq!(point.percentage, TREND_DISPLAY_FLOOR);
        assert_eq!(point.real_score, 0);
    }

    #[test]
    fn test_nonzero_score_is_not_floored() {
        let records = vec![record(Verdict::Informative, 0.87)];
        let point = &aggregate(&records).recent_trend[0];
        assert_eq!(point.percentage, 87);
        assert_eq!(point.real_score, 87);
    }

    #[test]
    fn test_label_truncates_to_two_words_with_ellipsis() {
        let records = vec![with_text(
            record(Verdict::Informative, 0.5),
            "Massive flood hits the valley",
        )];
        assert_eq!(aggregate(&records).recent_trend[0].label, "Massive flood…");
    }

    #[test]
    fn test_label_short_snippet_has_no_ellipsis() {
        let records = vec![with_text(record(Verdict::Informative, 0.5), "Flood alert")];
        assert_eq!(aggregate(&records).recent_trend[0].label, "Flood alert");
    }

    #[test]
    fn test_label_falls_back_to_image_then_placeholder() {
        let mut with_image = record(Verdict::Informative, 0.5);
        with_image.image_ref = Some("photo.jpg".to_string());
        let bare = record(Verdict::Ood, 0.1);

        let stats = aggregate(&[with_image, bare]);
        // Chronological order puts the bare record first
        assert_eq!(stats.recent_trend[0].label, "Analysis #1");
        assert_eq!(stats.recent_trend[1].label, "Image Content");
    }

    #[test]
    fn test_average_confidence_rounds_to_one_decimal() {
        let records = vec![
            record(Verdict::Informative, 0.8),
            record(Verdict::Informative, 0.85),
        ];
        assert_eq!(aggregate(&records).average_confidence, 82.5);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let records = vec![
            with_text(record(Verdict::Informative, 0.61), "Dam burst upstream"),
            record(Verdict::Ood, 0.0),
        ];
        assert_eq!(aggregate(&records), aggregate(&records));
    }
}
