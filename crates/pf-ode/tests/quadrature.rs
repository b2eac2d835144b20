//! Quadrature against reference values.

use pf_ode::{QuadOptions, quad};

#[test]
fn fresnel_sine_integral_reference() {
    // ∫₀ˣ sin(t²) dt; reference values from Abramowitz & Stegun via
    // S(x) = sqrt(π/2) · S_AS(x · sqrt(2/π)).
    let cases = [
        (1.0, 0.310_268_301_7),
        (2.0, 0.804_776_489_9),
        (5.0, 0.527_917_281_3),
    ];
    for (x, expected) in cases {
        let r = quad(|t: f64| (t * t).sin(), 0.0, x, &QuadOptions::default()).unwrap();
        assert!(r.converged);
        assert!(
            (r.value - expected).abs() < 1e-7,
            "S({x}) = {} expected {expected}",
            r.value
        );
    }
}

#[test]
fn gaussian_integral() {
    let r = quad(|x: f64| (-x * x).exp(), -8.0, 8.0, &QuadOptions::default()).unwrap();
    assert!((r.value - std::f64::consts::PI.sqrt()).abs() < 1e-8);
    assert!(r.abs_error < 1e-7);
}
