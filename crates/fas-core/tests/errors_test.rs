use fas_core::errors::*;

#[test]
fn invalid_depth_carries_value() {
    let err = FasError::InvalidDepth { depth: -7 };
    assert!(err.to_string().contains("-7"));
}

#[test]
fn unknown_variable_carries_name() {
    let err = FasError::UnknownVariable { name: "W".into() };
    assert!(err.to_string().contains('W'));
}

#[test]
fn knowledge_conflict_carries_edge() {
    let err = KnowledgeError::Conflict {
        from: "A".into(),
        to: "B".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("A -> B"));
}

#[test]
fn config_error_converts_transparently() {
    let inner = ConfigError::ValidationFailed {
        field: "search.depth".into(),
        message: "must be -1 or >= 0".into(),
    };
    let expected = inner.to_string();
    let err: FasError = inner.into();
    assert_eq!(err.to_string(), expected);
    assert!(matches!(err, FasError::Config(_)));
}

#[test]
fn knowledge_error_converts_transparently() {
    let err: FasError = KnowledgeError::UnknownTier {
        tier: 4,
        tier_count: 2,
    }
    .into();
    assert!(matches!(err, FasError::Knowledge(_)));
    assert!(err.to_string().contains('4'));
}
