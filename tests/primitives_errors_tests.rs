#![cfg(feature = "dev")]

use scalefactor_rs::internals::primitives::errors::SfError;

#[test]
fn test_sf_error_display() {
    // EmptyInput
    let err = SfError::EmptyInput;
    assert_eq!(format!("{}", err), "Input is empty");

    // InvalidNumericValue
    let err = SfError::InvalidNumericValue("point[0].value=NaN".to_string());
    assert_eq!(
        format!("{}", err),
        "Invalid numeric value: point[0].value=NaN"
    );

    // InvalidExtent
    let err = SfError::InvalidExtent {
        index: 3,
        low: 2.0,
        high: 1.0,
    };
    assert_eq!(
        format!("{}", err),
        "Invalid extent for point 3: low edge 2 is above high edge 1"
    );

    // MismatchedInputs
    let err = SfError::MismatchedInputs {
        expected: 4,
        got: 3,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch: expected 4 entries, got 3"
    );

    // InvalidIterationLimit
    let err = SfError::InvalidIterationLimit(0);
    assert_eq!(
        format!("{}", err),
        "Invalid max_passes: 0 (must be at least 1)"
    );

    // DuplicateParameter
    let err = SfError::DuplicateParameter {
        parameter: "sentinel",
    };
    assert_eq!(
        format!("{}", err),
        "Parameter 'sentinel' was set multiple times. Each parameter can only be configured once."
    );

    // NotConverged
    let err = SfError::NotConverged {
        passes: 10,
        bins: 42,
    };
    assert_eq!(
        format!("{}", err),
        "Overlap resolution did not converge after 10 passes (42 bins)"
    );

    // DegenerateOverlap
    let err = SfError::DegenerateOverlap {
        index: 1,
        high_edge: 2.5,
        next_low_edge: 2.0,
    };
    assert_eq!(
        format!("{}", err),
        "Resolved bins 1 and 2 are not contiguous: 2.5 != 2"
    );

    // ItemNotFound
    let err = SfError::ItemNotFound {
        source: "muon_id.json".to_string(),
        item: "SF".to_string(),
    };
    assert_eq!(format!("{}", err), "Could not find 'SF' in 'muon_id.json'");

    // UnknownObjectKind
    let err = SfError::UnknownObjectKind {
        branch: "fast".to_string(),
        kind: "tau".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "Branch 'fast' has no recipe for object kind 'tau'"
    );
}

#[test]
fn test_sf_error_classification() {
    assert!(
        SfError::SourceNotFound {
            source: "a.json".to_string(),
            reason: "missing".to_string(),
        }
        .is_configuration()
    );
    assert!(
        SfError::ItemNotFound {
            source: "a.json".to_string(),
            item: "SF".to_string(),
        }
        .is_configuration()
    );
    assert!(SfError::NotConverged { passes: 1, bins: 2 }.is_configuration());
    assert!(SfError::UnknownBranch("x".to_string()).is_configuration());

    assert!(!SfError::EmptyInput.is_configuration());
    assert!(!SfError::DegenerateCurve.is_configuration());
    assert!(
        !SfError::DegenerateOverlap {
            index: 0,
            high_edge: 1.0,
            next_low_edge: 0.5,
        }
        .is_configuration()
    );
}

#[test]
fn test_sf_error_properties() {
    let err1 = SfError::EmptyInput;
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, SfError::DegenerateCurve);
}

#[cfg(feature = "std")]
#[test]
fn test_sf_error_is_std_error() {
    fn assert_error<T: std::error::Error>() {}
    assert_error::<SfError>();
}
