//! End-to-end tests through the public API.
//!
//! ## Test Organization
//!
//! 1. **Lepton Weights** - Full and fast branches for a realistic event
//! 2. **Curve Tables** - A stitched curve used inside a recipe
//! 3. **Concurrency** - Shared tables queried from many threads

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;

use scalefactor_rs::prelude::*;

fn table(
    x: Vec<f64>,
    y: Vec<f64>,
    values: &[f64],
    errors: &[f64],
) -> Arc<ScaleFactorTable<f64>> {
    Arc::new(
        ScaleFactorTable::from_values(
            BinAxis::new(x).unwrap(),
            BinAxis::new(y).unwrap(),
            values,
            errors,
        )
        .unwrap(),
    )
}

fn lepton_weighter() -> EventWeighter<f64> {
    let muon_id = table(
        vec![10.0, 20.0, 50.0],
        vec![0.0, 1.2, 2.4],
        &[0.97, 0.99, 0.96, 0.98],
        &[0.02, 0.01, 0.02, 0.01],
    );
    let muon_iso = table(
        vec![10.0, 50.0],
        vec![0.0, 2.4],
        &[0.99],
        &[0.01],
    );
    let electron_id = table(
        vec![-2.5, 0.0, 2.5],
        vec![10.0, 200.0],
        &[0.95, 0.96],
        &[0.02, 0.02],
    );

    let full_muon = ObjectRecipe::builder()
        .table(muon_id.clone(), QueryMapping::AbsSecond)
        .systematic(0.03)
        .table(muon_iso.clone(), QueryMapping::AbsSecond)
        .systematic(0.03)
        .build()
        .unwrap();
    let full_electron = ObjectRecipe::builder()
        .table(electron_id.clone(), QueryMapping::Swapped)
        .windowed_systematic(20.0, 80.0, 0.0, 0.01)
        .build()
        .unwrap();
    let fast_muon = ObjectRecipe::builder()
        .table(muon_id, QueryMapping::AbsSecond)
        .systematic(0.02)
        .table(muon_iso, QueryMapping::AbsSecond)
        .systematic(0.02)
        .build()
        .unwrap();
    let fast_electron = ObjectRecipe::builder()
        .table(electron_id, QueryMapping::Swapped)
        .systematic(0.02)
        .build()
        .unwrap();

    EventWeighter::new()
        .with_branch(
            WeightBranch::new("full")
                .with_recipe("muon", full_muon)
                .with_recipe("electron", full_electron),
        )
        .with_branch(
            WeightBranch::new("fast")
                .with_recipe("muon", fast_muon)
                .with_recipe("electron", fast_electron),
        )
}

// ============================================================================
// Lepton Weight Tests
// ============================================================================

#[test]
fn test_single_muon_fold() {
    let w = lepton_weighter()
        .weigh("full", &[ObjectCandidate::new("muon", 15.0, 0.3, true)])
        .unwrap();

    let expected = merge_all([
        ScaleFactor::new(0.97, 0.02),
        ScaleFactor::systematic(0.03),
        ScaleFactor::new(0.99, 0.01),
        ScaleFactor::systematic(0.03),
    ]);
    assert_relative_eq!(w.weight, 0.97 * 0.99, epsilon = 1e-12);
    assert_relative_eq!(w.up - w.weight, expected.error, epsilon = 1e-12);
    assert_relative_eq!(w.weight - w.down, expected.error, epsilon = 1e-12);
}

#[test]
fn test_event_with_leptons_out_of_range() {
    let weighter = lepton_weighter();
    let objects = [
        // Beyond the last pt edge: falls back to the last pt bin
        ObjectCandidate::new("muon", 800.0, -2.0, true),
        ObjectCandidate::new("electron", 25.0, 3.0, true),
        ObjectCandidate::new("electron", 9.0, 0.0, false),
    ];

    let w = weighter.weigh("full", &objects).unwrap();
    let muon = ScaleFactor::new(0.98, 0.01)
        * ScaleFactor::systematic(0.03)
        * ScaleFactor::new(0.99, 0.01)
        * ScaleFactor::systematic(0.03);
    let electron = ScaleFactor::new(0.96, 0.02) * ScaleFactor::new(1.0, 0.0);

    assert_relative_eq!(w.weight, (muon * electron).value, epsilon = 1e-12);
    assert_relative_eq!(w.up, (muon * electron).value + (muon * electron).error, epsilon = 1e-12);
}

#[test]
fn test_branches_share_central_value() {
    let weighter = lepton_weighter();
    let objects = [
        ObjectCandidate::new("muon", 30.0, 1.5, true),
        ObjectCandidate::new("electron", 100.0, -1.0, true),
    ];
    let all = weighter.weigh_all(&objects).unwrap();
    let (fast, full) = (all[0].1, all[1].1);
    assert_relative_eq!(fast.weight, full.weight, epsilon = 1e-12);
    // Only the systematic terms differ
    assert_ne!(fast.up, full.up);
}

// ============================================================================
// Curve Table Tests
// ============================================================================

#[test]
fn test_curve_table_in_recipe() {
    // Two fitted segments overlapping in [1.0, 1.5]
    let curve = [
        CurvePoint {
            x: 0.5,
            ex_low: 0.5,
            ex_high: 1.0,
            y: 0.9,
            ey_low: 0.05,
            ey_high: 0.05,
        },
        CurvePoint {
            x: 2.0,
            ex_low: 1.0,
            ex_high: 0.5,
            y: 1.1,
            ey_low: 0.05,
            ey_high: 0.05,
        },
    ];
    let converter = CurveConverter::builder().build().unwrap();
    let eta_curve = Arc::new(converter.convert_curve(&curve).unwrap());
    assert_eq!(eta_curve.y_axis().edges(), &[0.0, 1.0, 1.5, 2.5]);

    let recipe = ObjectRecipe::builder()
        .table(eta_curve, QueryMapping::AbsSecond)
        .build()
        .unwrap();

    let inside = recipe.evaluate(40.0, -1.2);
    assert_relative_eq!(inside.value, (0.9f64 * 1.1).sqrt(), epsilon = 1e-12);

    // Outside the curve: the (1, 1) sentinel
    assert_eq!(recipe.evaluate(40.0, 3.0), ScaleFactor::new(1.0, 1.0));
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_concurrent_weighing() {
    let weighter = Arc::new(lepton_weighter());
    let objects = [
        ObjectCandidate::new("muon", 25.0, 0.7, true),
        ObjectCandidate::new("electron", 60.0, 1.1, true),
    ];
    let reference = weighter.weigh("full", &objects).unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let weighter = Arc::clone(&weighter);
                s.spawn(move || {
                    (0..1000)
                        .map(|_| weighter.weigh("full", &objects).unwrap())
                        .all(|w| w == reference)
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    });
}
