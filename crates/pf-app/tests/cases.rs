//! End-to-end runs of the three cases.

use pf_app::{
    AppConfig, FlowSource, IvpCaseConfig, NetworkCaseConfig, RlcCaseConfig, RlcCircuit,
    ScalarIvp, run_ivp_case, run_network_case, run_rlc_case,
};
use pf_core::Tolerances;
use pf_ode::{IvpOptions, QuadOptions};
use proptest::prelude::*;

#[test]
fn scalar_ivp_tracks_exact_solution() {
    let comparison = run_ivp_case(&IvpCaseConfig::default()).unwrap();
    assert_eq!(comparison.rows.len(), 26);
    assert_eq!(comparison.rows[0].x, 0.0);
    assert!((comparison.rows[25].x - 5.0).abs() < 1e-12);
    for row in &comparison.rows {
        assert!(row.abs_error < 1e-2, "x = {}: error {}", row.x, row.abs_error);
    }
    assert!(comparison.max_abs_error < 1e-2);
}

#[test]
fn other_initial_value_tracks_its_own_exact_solution() {
    let config = IvpCaseConfig {
        y0: 0.5,
        ..IvpCaseConfig::default()
    };
    let comparison = run_ivp_case(&config).unwrap();
    assert_eq!(comparison.y0, 0.5);
    assert_eq!(comparison.rows[0].exact, 0.5);
    assert_eq!(comparison.rows[0].abs_error, 0.0);
    for row in &comparison.rows {
        assert!(row.abs_error < 1e-2, "x = {}: error {}", row.x, row.abs_error);
    }
}

#[test]
fn shifted_start_point_tracks_exact_solution() {
    let config = IvpCaseConfig {
        x_start: 0.4,
        y0: 0.45,
        ..IvpCaseConfig::default()
    };
    let comparison = run_ivp_case(&config).unwrap();
    assert!(comparison.rows.len() >= 23);
    assert_eq!(comparison.rows[0].x, 0.4);
    assert!((comparison.rows[0].exact - 0.45).abs() < 1e-12);
    for row in &comparison.rows {
        assert!(row.abs_error < 1e-2, "x = {}: error {}", row.x, row.abs_error);
    }
    assert!(comparison.to_string().contains("y(0.4)=0.45"));
}

#[test]
fn fresnel_integral_reference_values() {
    let opts = QuadOptions::default();
    let cases = [
        (1.0, 0.310268301723),
        (2.0, 0.804776489344),
        (5.0, 0.527917281165),
    ];
    for (x, expected) in cases {
        let s = ScalarIvp::fresnel_s(x, &opts).unwrap();
        assert!((s - expected).abs() < 1e-8, "S({x}) = {s}");
    }
}

#[test]
fn rlc_default_case_shape() {
    let series = run_rlc_case(&RlcCaseConfig::default()).unwrap();
    assert_eq!(series.t.len(), 1000);
    assert_eq!(series.t[0], 0.0);
    assert_eq!(*series.t.last().unwrap(), 10.0);
    assert_eq!(series.i1[0], 0.0);
    assert_eq!(series.v_c[0], 0.0);

    let summary = series.summary();
    assert!(summary.peak_i1 > 0.05 && summary.peak_i1 < 0.2);
    assert!(summary.peak_v_c > 0.3 && summary.peak_v_c < 1.5);
}

#[test]
fn rlc_without_source_stays_at_rest() {
    let config = RlcCaseConfig {
        circuit: RlcCircuit {
            amplitude: 0.0,
            ..RlcCircuit::default()
        },
        ..RlcCaseConfig::default()
    };
    let series = run_rlc_case(&config).unwrap();
    assert!(series.i1.iter().all(|&i| i == 0.0));
    assert!(series.v_c.iter().all(|&v| v == 0.0));
}

#[test]
fn unforced_discharge_matches_closed_form() {
    // L = 20, C = 0.05 give ω0 = 1; R = 10 gives α = R / 2L = 0.25.
    let v0 = 2.0;
    let config = RlcCaseConfig {
        circuit: RlcCircuit {
            amplitude: 0.0,
            ..RlcCircuit::default()
        },
        vc_0: v0,
        points: 101,
        solver: IvpOptions {
            tol: Tolerances {
                abs: 1e-12,
                rel: 1e-10,
            },
            ..IvpOptions::default()
        },
        ..RlcCaseConfig::default()
    };
    let series = run_rlc_case(&config).unwrap();

    let alpha = 0.25_f64;
    let wd = (1.0 - alpha * alpha).sqrt();
    let c = 0.05;
    for ((&t, &i1), &vc) in series.t.iter().zip(&series.i1).zip(&series.v_c) {
        let decay = (-alpha * t).exp();
        let vc_exact = v0 * decay * ((wd * t).cos() + alpha / wd * (wd * t).sin());
        let i1_exact = -c * v0 / wd * decay * (wd * t).sin();
        assert!((vc - vc_exact).abs() < 1e-6, "t = {t}: vC {vc} vs {vc_exact}");
        assert!((i1 - i1_exact).abs() < 1e-6, "t = {t}: i1 {i1} vs {i1_exact}");
    }
}

#[test]
fn network_case_with_seed_is_reproducible() {
    let config = NetworkCaseConfig {
        seed: Some(2024),
        ..NetworkCaseConfig::default()
    };
    let a = run_network_case(&config).unwrap();
    let b = run_network_case(&config).unwrap();
    assert_eq!(a, b);
    assert!(a.total_imbalance().abs() < 1e-9);
    assert!(a.loop_drops.iter().all(|d| d.pressure_drop_psi == 0.0));
}

#[test]
fn config_round_trip_through_yaml() {
    let mut config = AppConfig::default();
    config.network.seed = Some(5);
    config.network.flows = FlowSource::Zero;
    config.rlc.points = 50;
    let text = serde_yaml::to_string(&config).unwrap();
    let back = pf_app::config::parse_config(&text).unwrap();
    assert_eq!(config, back);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn seeded_network_balances_to_zero(seed in any::<u64>()) {
        let config = NetworkCaseConfig {
            seed: Some(seed),
            ..NetworkCaseConfig::default()
        };
        let report = run_network_case(&config).unwrap();
        prop_assert!(report.total_imbalance().abs() < 1e-9);
        prop_assert_eq!(report.head_losses.len(), 13);
    }
}
