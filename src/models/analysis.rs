//! Analysis result and history models matching the detection service wire format.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Categorical classification returned by the detection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    Informative,
    NonInformative,
    Ood,
    /// Missing, null, or unrecognized verdict strings land here.
    #[default]
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Informative => "Informative",
            Verdict::NonInformative => "Non-Informative",
            Verdict::Ood => "OOD",
            Verdict::Unknown => "Unknown",
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything the client does not recognize degrades to Unknown
        // rather than failing the whole response.
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("Informative") => Verdict::Informative,
            Some("Non-Informative") => Verdict::NonInformative,
            Some("OOD") => Verdict::Ood,
            _ => Verdict::Unknown,
        })
    }
}

/// Explainability payload attached to an analysis response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct XaiInsights {
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub text_weights: Vec<String>,
    #[serde(default)]
    pub heatmap_status: Option<String>,
}

/// A classification response from the detection service.
///
/// Immutable once received; a new submission replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub verdict: Verdict,
    /// Model confidence in [0, 1]. Absent on the wire means 0.
    #[serde(default)]
    pub credibility_score: f64,
    #[serde(default)]
    pub image_score: Option<f64>,
    #[serde(default)]
    pub text_snippet: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub xai_insights: XaiInsights,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A past analysis fetched from the archive. Read-only; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub verdict: Verdict,
    #[serde(default)]
    pub credibility_score: f64,
    #[serde(default)]
    pub text_snippet: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
