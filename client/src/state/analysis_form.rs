//! Analysis settings wizard: algorithm, parameters, then project and dataset.
//!
//! DESIGN
//! ======
//! The form edits a [`workflow::AnalysisDraft`] in place. Slider inputs are
//! clamped and snapped to the same bounds the controls advertise, so the
//! draft always holds values the controls could have produced. Final
//! validation stays with `AnalysisRequest::new`.

#[cfg(test)]
#[path = "analysis_form_test.rs"]
mod analysis_form_test;

use protocol::{
    Algorithm, AlgorithmParams, CLUSTER_COUNT_MAX, CLUSTER_COUNT_MIN, DatasetFile, EPSILON_MAX, EPSILON_MIN,
    EPSILON_STEP, Linkage, MAX_ITERATIONS_MAX, MAX_ITERATIONS_MIN, MAX_ITERATIONS_STEP,
};
use workflow::AnalysisDraft;

/// Wizard page. `Parameters` is skipped for algorithms without parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Algorithm,
    Parameters,
    Project,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisFormState {
    pub step: WizardStep,
    pub draft: AnalysisDraft,
    /// Inline validation message shown under the form.
    pub message: Option<String>,
}

impl AnalysisFormState {
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.draft.params.algorithm()
    }

    /// Pick an algorithm. Switching resets the parameters to its defaults.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        if self.algorithm() != algorithm {
            self.draft.params = AlgorithmParams::defaults_for(algorithm);
        }
    }

    pub fn next(&mut self) {
        self.step = match self.step {
            WizardStep::Algorithm if self.algorithm().has_params() => WizardStep::Parameters,
            WizardStep::Algorithm | WizardStep::Parameters | WizardStep::Project => WizardStep::Project,
        };
    }

    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Project if self.algorithm().has_params() => WizardStep::Parameters,
            WizardStep::Algorithm | WizardStep::Parameters | WizardStep::Project => WizardStep::Algorithm,
        };
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step == WizardStep::Project
    }

    /// 1-based page number and page count for the step indicator.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let total = if self.algorithm().has_params() { 3 } else { 2 };
        let current = match self.step {
            WizardStep::Algorithm => 1,
            WizardStep::Parameters => 2,
            WizardStep::Project => total,
        };
        (current, total)
    }

    pub fn set_cluster_count(&mut self, value: u32) {
        if let AlgorithmParams::Kmeans { cluster_count, .. } = &mut self.draft.params {
            *cluster_count = value.clamp(CLUSTER_COUNT_MIN, CLUSTER_COUNT_MAX);
        }
    }

    pub fn set_max_iterations(&mut self, value: u32) {
        if let AlgorithmParams::Kmeans { max_iterations, .. } = &mut self.draft.params {
            *max_iterations = snap_iterations(value);
        }
    }

    pub fn set_linkage(&mut self, value: Linkage) {
        if let AlgorithmParams::Agglomerative { linkage } = &mut self.draft.params {
            *linkage = value;
        }
    }

    pub fn set_epsilon(&mut self, value: f64) {
        if let AlgorithmParams::Dbscan { epsilon, .. } = &mut self.draft.params {
            *epsilon = snap_epsilon(value);
        }
    }

    pub fn set_min_samples(&mut self, value: u32) {
        if let AlgorithmParams::Dbscan { min_samples, .. } = &mut self.draft.params {
            *min_samples = value.max(1);
        }
    }

    pub fn set_project_name(&mut self, name: String) {
        self.draft.project_name = name;
        self.message = None;
    }

    /// Attach a picked file. Unsupported types are refused with a message
    /// and leave the previous selection in place.
    pub fn set_dataset(&mut self, dataset: DatasetFile) {
        if dataset.is_supported() {
            self.draft.dataset = Some(dataset);
            self.message = None;
        } else {
            self.message = Some(format!("{} is not a .csv, .xls, .xlsx or .txt file.", dataset.name()));
        }
    }

    #[must_use]
    pub fn dataset_name(&self) -> Option<&str> {
        self.draft.dataset.as_ref().map(DatasetFile::name)
    }
}

fn snap_iterations(value: u32) -> u32 {
    let clamped = value.clamp(MAX_ITERATIONS_MIN, MAX_ITERATIONS_MAX);
    let steps = (clamped - MAX_ITERATIONS_MIN + MAX_ITERATIONS_STEP / 2) / MAX_ITERATIONS_STEP;
    (MAX_ITERATIONS_MIN + steps * MAX_ITERATIONS_STEP).min(MAX_ITERATIONS_MAX)
}

fn snap_epsilon(value: f64) -> f64 {
    if !value.is_finite() {
        return EPSILON_MIN;
    }
    let snapped = (value / EPSILON_STEP).round() * EPSILON_STEP;
    // One decimal place, without binary noise such as 0.30000000000000004.
    ((snapped * 10.0).round() / 10.0).clamp(EPSILON_MIN, EPSILON_MAX)
}

/// Parse a slider or number input, ignoring malformed text.
#[must_use]
pub fn parse_u32_input(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = value.round().min(f64::from(u32::MAX)) as u32;
    Some(rounded)
}

#[must_use]
pub fn parse_f64_input(raw: &str) -> Option<f64> {
    raw.trim().parse().ok().filter(|value: &f64| value.is_finite())
}
