//! Tests for error codes and conversions.

use std::collections::HashSet;

use sysdecomp_core::errors::*;

fn tensor_errors() -> Vec<TensorError> {
    vec![
        TensorError::InvalidMatrixShape {
            rows: 3,
            columns: 2,
            reason: "row count must be a power of two".into(),
        },
        TensorError::InvalidDistribution {
            value: "1x".into(),
            reason: "unexpected character 'x'".into(),
        },
        TensorError::DimensionMismatch {
            expected: 4,
            actual: 2,
            context: "emd".into(),
        },
        TensorError::IndexOutOfRange {
            index: 5,
            bound: 2,
            context: "effect column pair".into(),
        },
    ]
}

#[test]
fn test_codes_are_distinct_per_variant() {
    let mut codes: Vec<&str> = tensor_errors().iter().map(|e| e.error_code()).collect();
    codes.extend([
        GraphError::NotBipartite { node_id: "A".into() }.error_code(),
        GraphError::NodeNotFound { node_id: "A".into() }.error_code(),
        GraphError::EdgeNotFound {
            from: "A".into(),
            to: "A'".into(),
        }
        .error_code(),
        SearchError::NoPartitionFound { effects: 1, causes: 1 }.error_code(),
        ConfigError::FileNotFound { path: "/nope".into() }.error_code(),
    ]);
    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(unique.len(), codes.len());
}

#[test]
fn test_from_conversions_keep_inner_code() {
    let inner = SearchError::NoPartitionFound { effects: 1, causes: 0 };
    let outer: AnalysisError = inner.clone().into();
    assert!(matches!(
        outer,
        AnalysisError::Search(SearchError::NoPartitionFound { effects: 1, causes: 0 })
    ));
    assert_eq!(outer.error_code(), inner.error_code());

    let outer: AnalysisError = GraphError::NodeNotFound { node_id: "C'".into() }.into();
    assert_eq!(outer.error_code(), error_code::NODE_NOT_FOUND);

    for err in tensor_errors() {
        let code = err.error_code();
        let outer: AnalysisError = err.into();
        assert_eq!(outer.error_code(), code);
    }
}

#[test]
fn test_coded_string_prefixes_message() {
    let err = GraphError::EdgeNotFound {
        from: "A".into(),
        to: "B'".into(),
    };
    assert_eq!(err.coded_string(), "[EDGE_NOT_FOUND] edge not found: A -> B'");
}

#[test]
fn test_question_mark_lifts_into_engine_result() {
    fn check() -> TensorResult<()> {
        Err(TensorError::DimensionMismatch {
            expected: 2,
            actual: 1,
            context: "test".into(),
        })
    }
    fn lift() -> EngineResult<()> {
        check()?;
        Ok(())
    }
    let err = lift().unwrap_err();
    assert!(err.to_string().starts_with("Tensor error: dimension mismatch in test"));
}
