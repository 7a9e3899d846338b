//! Mapping Run Result Types
//!
//! ```text
//! MappingRun
//! ├── outcomes: Vec<RequestOutcome>   (one per mapper method, input order)
//! │   └── result: plan + build stats, or the configuration error
//! ├── diagnostics: Vec<Diagnostic>    (finalized: sorted, duplicate-free)
//! └── cached_plans: usize             (distinct plans built across the run)
//! ```

use crate::config::{ConfigError, ConfigResult};
use crate::errors::{MapgenError, Result};
use crate::features::diagnostics::{count_severity, Diagnostic, Severity};
use crate::features::mapping_plan::{BuildPlanOutput, BuildStats, MappingPlan};
use serde::Serialize;

#[derive(Debug)]
pub struct RequestOutcome {
    pub mapper: String,
    pub method: String,
    pub result: ConfigResult<BuildPlanOutput>,
}

impl RequestOutcome {
    pub fn plan(&self) -> Option<&MappingPlan> {
        self.result.as_ref().ok().map(|output| &output.plan)
    }

    pub fn error(&self) -> Option<&ConfigError> {
        self.result.as_ref().err()
    }

    pub fn stats(&self) -> BuildStats {
        self.result
            .as_ref()
            .map(|output| output.stats)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct MappingRun {
    pub outcomes: Vec<RequestOutcome>,
    pub diagnostics: Vec<Diagnostic>,
    pub cached_plans: usize,
}

impl MappingRun {
    pub fn outcome(&self, mapper: &str, method: &str) -> Option<&RequestOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.mapper == mapper && o.method == method)
    }

    pub fn plan(&self, mapper: &str, method: &str) -> Option<&MappingPlan> {
        self.outcome(mapper, method).and_then(RequestOutcome::plan)
    }

    pub fn plans(&self) -> impl Iterator<Item = &MappingPlan> {
        self.outcomes.iter().filter_map(RequestOutcome::plan)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&RequestOutcome, &ConfigError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error().map(|err| (o, err)))
    }

    pub fn error_count(&self) -> usize {
        count_severity(&self.diagnostics, Severity::Error)
    }

    /// Summed build statistics of every successful request
    pub fn stats(&self) -> BuildStats {
        self.outcomes.iter().fold(BuildStats::default(), |acc, o| {
            let s = o.stats();
            BuildStats {
                plans_built: acc.plans_built + s.plans_built,
                cache_hits: acc.cache_hits + s.cache_hits,
                cycles_closed: acc.cycles_closed + s.cycles_closed,
            }
        })
    }

    /// Fails on the first aborted request, then on error diagnostics
    pub fn ensure_usable(&self) -> Result<()> {
        if let Some((outcome, err)) = self.failures().next() {
            return Err(MapgenError::request_failed(
                outcome.mapper.as_str(),
                outcome.method.as_str(),
                err,
            ));
        }
        match self.error_count() {
            0 => Ok(()),
            count => Err(MapgenError::ErrorDiagnostics { count }),
        }
    }

    /// Serializable view for the code-emission backend
    pub fn report(&self) -> RunReport<'_> {
        RunReport {
            plans: self.plans().collect(),
            failures: self
                .failures()
                .map(|(o, err)| FailureReport {
                    mapper: &o.mapper,
                    method: &o.method,
                    error: err.to_string(),
                })
                .collect(),
            diagnostics: &self.diagnostics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub plans: Vec<&'a MappingPlan>,
    pub failures: Vec<FailureReport<'a>>,
    pub diagnostics: &'a [Diagnostic],
}

#[derive(Debug, Serialize)]
pub struct FailureReport<'a> {
    pub mapper: &'a str,
    pub method: &'a str,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::diagnostics::DiagnosticKind;

    fn failed(mapper: &str, method: &str) -> RequestOutcome {
        RequestOutcome {
            mapper: mapper.to_string(),
            method: method.to_string(),
            result: Err(ConfigError::UnknownType("Ghost".to_string())),
        }
    }

    #[test]
    fn test_failed_request_is_not_usable() {
        let run = MappingRun {
            outcomes: vec![failed("CarMapper", "ToDto")],
            diagnostics: Vec::new(),
            cached_plans: 0,
        };
        assert!(run.plan("CarMapper", "ToDto").is_none());
        assert_eq!(run.stats(), BuildStats::default());

        let err = run.ensure_usable().unwrap_err();
        assert!(matches!(
            err,
            MapgenError::RequestFailed { ref mapper, ref method, .. }
                if mapper == "CarMapper" && method == "ToDto"
        ));
        assert!(err.to_string().contains("Unknown type 'Ghost'"));
    }

    #[test]
    fn test_error_diagnostics_are_not_usable() {
        let run = MappingRun {
            outcomes: Vec::new(),
            diagnostics: vec![
                Diagnostic::new(DiagnosticKind::AmbiguousDefaultFormatProvider, "two defaults"),
                Diagnostic::new(DiagnosticKind::UnmappedTargetMember, "no source"),
            ],
            cached_plans: 0,
        };
        assert_eq!(run.error_count(), 1);
        assert!(matches!(
            run.ensure_usable(),
            Err(MapgenError::ErrorDiagnostics { count: 1 })
        ));
    }

    #[test]
    fn test_report_lists_failures() {
        let run = MappingRun {
            outcomes: vec![failed("CarMapper", "ToDto")],
            diagnostics: Vec::new(),
            cached_plans: 0,
        };
        let json = run.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["failures"][0]["mapper"], "CarMapper");
        assert_eq!(value["plans"].as_array().map(Vec::len), Some(0));
    }
}
