//! Verdict classifier.
//!
//! Converts a raw analysis result into a bounded presentation tier with
//! deterministic thresholds. Total over its input domain: never errors,
//! always returns a tier.

use crate::models::{AnalysisResult, Verdict};

/// Lower bound of the Positive band (inclusive).
pub const POSITIVE_THRESHOLD: f64 = 0.75;
/// Lower bound of the Warning band (inclusive).
pub const WARNING_THRESHOLD: f64 = 0.45;

/// Presentation-level bucket derived from verdict and score.
///
/// Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictTier {
    Positive,
    Warning,
    Critical,
    Neutral,
}

impl VerdictTier {
    /// Fixed presentation color for this tier.
    pub fn color(&self) -> &'static str {
        match self {
            VerdictTier::Positive => "#4ade80",
            VerdictTier::Warning => "#facc15",
            VerdictTier::Critical => "#f87171",
            VerdictTier::Neutral => "#9ca3af",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerdictTier::Positive => "Credible",
            VerdictTier::Warning => "Questionable",
            VerdictTier::Critical => "Likely Misinformation",
            VerdictTier::Neutral => "Out of Scope",
        }
    }
}

/// Classification of a full result for the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub tier: VerdictTier,
    /// Independent tier for the image modality, when an image score exists.
    pub image_tier: Option<VerdictTier>,
}

/// Classify a bare score against the three fixed bands.
///
/// Bands are inclusive at their lower bound, so no score falls in a gap or
/// overlap.
pub fn classify_score(score: f64) -> VerdictTier {
    if score >= POSITIVE_THRESHOLD {
        VerdictTier::Positive
    } else if score >= WARNING_THRESHOLD {
        VerdictTier::Warning
    } else {
        VerdictTier::Critical
    }
}

/// Classify an analysis result.
///
/// An OOD or unknown verdict is Neutral regardless of score; otherwise the
/// credibility score decides. The image score, when present, is classified
/// independently and is never influenced by the verdict.
pub fn classify(result: &AnalysisResult) -> Assessment {
    let tier = match result.verdict {
        Verdict::Ood | Verdict::Unknown => VerdictTier::Neutral,
        Verdict::Informative | Verdict::NonInformative => {
            classify_score(result.credibility_score)
        }
    };

    Assessment {
        tier,
        image_tier: result.image_score.map(classify_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(verdict: Verdict, score: f64) -> AnalysisResult {
        AnalysisResult {
            id: None,
            verdict,
            credibility_score: score,
            image_score: None,
            text_snippet: None,
            image_ref: None,
            xai_insights: Default::default(),
            created_at: None,
        }
    }

    #[test]
    fn test_band_lower_bounds_are_inclusive() {
        assert_eq!(classify_score(0.75), VerdictTier::Positive);
        assert_eq!(classify_score(0.45), VerdictTier::Warning);
        assert_eq!(classify_score(0.449999), VerdictTier::Critical);
        assert_eq!(classify_score(0.749999), VerdictTier::Warning);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify_score(1.0), VerdictTier::Positive);
        assert_eq!(classify_score(0.0), VerdictTier::Critical);
    }

    #[test]
    fn test_ood_is_neutral_regardless_of_score() {
        let assessment = classify(&result(Verdict::Ood, 0.99));
        assert_eq!(assessment.tier, VerdictTier::Neutral);
    }

    #[test]
    fn test_unknown_verdict_is_neutral() {
        let assessment = classify(&result(Verdict::Unknown, 0.99));
        assert_eq!(assessment.tier, VerdictTier::Neutral);
    }

    #[test]
    fn test_informative_follows_score() {
        assert_eq!(
            classify(&result(Verdict::Informative, 0.80)).tier,
            VerdictTier::Positive
        );
        assert_eq!(
            classify(&result(Verdict::Informative, 0.50)).tier,
            VerdictTier::Warning
        );
        assert_eq!(
            classify(&result(Verdict::NonInformative, 0.10)).tier,
            VerdictTier::Critical
        );
    }

    #[test]
    fn test_image_score_is_classified_independently() {
        let mut r = result(Verdict::Ood, 0.2);
        r.image_score = Some(0.9);
        let assessment = classify(&r);
        // Verdict drives the text tier but never the image tier
        assert_eq!(assessment.tier, VerdictTier::Neutral);
        assert_eq!(assessment.image_tier, Some(VerdictTier::Positive));
    }

    #[test]
    fn test_missing_image_score_yields_no_image_tier() {
        let assessment = classify(&result(Verdict::Informative, 0.8));
        assert!(assessment.image_tier.is_none());
    }

    #[test]
    fn test_tier_presentation_values() {
        assert_eq!(VerdictTier::Positive.color(), "#4ade80");
        assert_eq!(VerdictTier::Neutral.color(), "#9ca3af");
        assert_eq!(VerdictTier::Critical.label(), "Likely Misinformation");
    }
}
