//! Response envelopes for the factory demo endpoints.
//!
//! Every endpoint wraps its payload in `{ "success": bool, ... }`. The
//! payload field is optional so that a `success: false` body without it still
//! decodes and can be reported as an API failure.

use crate::{BackendAnalysis, Factory, Language, Readings};

/// Marker for envelopes that carry a `success` flag.
pub trait Envelope {
    fn success(&self) -> bool;
}

/// `GET /demo/bottle/factory`
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FactoryResponse {
    pub success: bool,
    pub factory: Option<Factory>,
}

/// `GET /demo/bottle/readings`
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadingsResponse {
    pub success: bool,
    pub readings: Option<Readings>,
}

/// `POST /demo/bottle/analyze`
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: Option<BackendAnalysis>,
}

/// Body of `POST /demo/bottle/analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyzeRequest {
    pub language: Language,
}

macro_rules! impl_envelope {
    ($($ty:ty),*) => {
        $(impl Envelope for $ty {
            fn success(&self) -> bool {
                self.success
            }
        })*
    };
}

impl_envelope!(
    FactoryResponse,
    ReadingsResponse,
    AnalysisResponse,
    crate::ChatResponse,
    crate::SuggestionsResponse
);
