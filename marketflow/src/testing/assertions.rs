//! Test assertions for pipeline states.

use crate::core::{PipelineState, StageKind};

/// Asserts that `kind` was the last stage and it completed.
pub fn assert_stage_completed(state: &PipelineState, kind: StageKind) {
    assert_eq!(
        state.current_step,
        kind.completed_step(),
        "Expected {kind} to complete, error: {:?}",
        state.error
    );
    assert!(state.has_record(kind), "Expected the {kind} record to be set");
}

/// Asserts that `kind` was the last stage and it failed without a record.
pub fn assert_stage_failed(state: &PipelineState, kind: StageKind) {
    assert_eq!(state.current_step, kind.failed_step());
    assert!(state.error.is_some(), "Expected an error marker");
    assert!(!state.has_record(kind), "Expected no {kind} record after failure");
}

/// Asserts that every record is present and no error was recorded.
pub fn assert_run_succeeded(state: &PipelineState) {
    assert!(state.error.is_none(), "Unexpected error: {:?}", state.error);
    assert!(state.is_complete(), "Expected all four records");
    assert_eq!(state.current_step, StageKind::ContentCreation.completed_step());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_assert_run_succeeded() {
        let state = fixtures::completed_state();
        assert_run_succeeded(&state);
        assert_stage_completed(&state, StageKind::ContentCreation);
    }

    #[test]
    fn test_assert_stage_failed() {
        let mut state = fixtures::sample_state();
        state.record_failure(StageKind::MarketResearch, "boom");
        assert_stage_failed(&state, StageKind::MarketResearch);
    }

    #[test]
    #[should_panic(expected = "Expected all four records")]
    fn test_assert_run_succeeded_panics_on_partial_state() {
        assert_run_succeeded(&fixtures::sample_state());
    }
}
