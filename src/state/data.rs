/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the classification service and the UI layer.

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Pixel dimensions reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// One ranked style guess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Architectural style name (e.g., "Gothic")
    pub style: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Body of a successful `POST /classify`
///
/// Immutable once received. A new successful request replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// Name of the uploaded file as seen by the service
    pub filename: String,
    pub image_size: ImageSize,
    /// Always equal to `predictions[0]`
    pub top_prediction: Prediction,
    /// Sorted by confidence, highest first
    pub predictions: Vec<Prediction>,
}

impl ClassificationResponse {
    /// Parse a response body and check its ranking invariants
    pub fn from_json(body: &str) -> Result<Self, ClassifyError> {
        let response: Self = serde_json::from_str(body)?;
        response.validate()?;
        Ok(response)
    }

    /// Check the invariants the renderer relies on
    ///
    /// - at least one prediction
    /// - every confidence is finite and within [0, 1]
    /// - predictions are non-increasing in confidence
    /// - top_prediction equals the first prediction
    pub fn validate(&self) -> Result<(), ClassifyError> {
        let first = self
            .predictions
            .first()
            .ok_or_else(|| ClassifyError::Malformed("no predictions".to_string()))?;

        if let Some(bad) = self
            .predictions
            .iter()
            .find(|p| !p.confidence.is_finite() || !(0.0..=1.0).contains(&p.confidence))
        {
            return Err(ClassifyError::Malformed(format!(
                "confidence {} for '{}' is outside [0, 1]",
                bad.confidence, bad.style
            )));
        }

        if self
            .predictions
            .windows(2)
            .any(|pair| pair[0].confidence < pair[1].confidence)
        {
            return Err(ClassifyError::Malformed(
                "predictions are not sorted by confidence".to_string(),
            ));
        }

        if self.top_prediction != *first {
            return Err(ClassifyError::Malformed(format!(
                "top prediction '{}' differs from first ranked '{}'",
                self.top_prediction.style, first.style
            )));
        }

        Ok(())
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
