use log::warn;
use std::fmt::Display;

use crate::{ExportFailure, ExportStage};

/// Collects per-operation failures of an export. Each failure is logged as it is recorded;
/// the export keeps going.
#[derive(Debug, Default)]
pub struct FailureLog {
    failures: Vec<ExportFailure>,
}

impl FailureLog {
    pub fn record(&mut self, image: Option<&str>, stage: ExportStage, err: impl Display) {
        let failure = ExportFailure {
            image: image.map(str::to_string),
            stage,
            message: format!("{:#}", err),
        };
        warn!("Export step failed: {}", failure);
        self.failures.push(failure);
    }

    pub fn push(&mut self, failure: ExportFailure) {
        warn!("Export step failed: {}", failure);
        self.failures.push(failure);
    }

    pub fn into_vec(self) -> Vec<ExportFailure> {
        self.failures
    }
}
