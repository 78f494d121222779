//! Last-result session slot
//!
//! The host keeps the most recent recommendation on screen until the next
//! run replaces it: a single mutable slot keyed by nothing, owned by one
//! session and never shared across concurrent sessions.

use crate::summary::PredictionResult;

/// Single-slot holder for the most recent prediction result.
#[derive(Debug, Default)]
pub struct SessionSlot {
    current: Option<PredictionResult>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh result, returning the one it displaced.
    pub fn replace(&mut self, result: PredictionResult) -> Option<PredictionResult> {
        self.current.replace(result)
    }

    /// The result currently on display, if any run has completed.
    pub fn current(&self) -> Option<&PredictionResult> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
