// pf-core/src/units.rs

use uom::si::f64::{Length as UomLength, Pressure as UomPressure, VolumeRate as UomVolumeRate};

// Public canonical unit types (SI storage, f64)
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn cfs(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_foot_per_second;
    VolumeRate::new::<cubic_foot_per_second>(v)
}

#[inline]
pub fn in_inches(l: Length) -> f64 {
    l.get::<uom::si::length::inch>()
}

#[inline]
pub fn in_feet(l: Length) -> f64 {
    l.get::<uom::si::length::foot>()
}

#[inline]
pub fn in_psi(p: Pressure) -> f64 {
    p.get::<uom::si::pressure::pound_force_per_square_inch>()
}

#[inline]
pub fn in_cfs(q: VolumeRate) -> f64 {
    q.get::<uom::si::volume_rate::cubic_foot_per_second>()
}

/// Water properties and conversion factors in US customary units.
///
/// The hydraulic formulas in `pf-hydraulics` are written directly in these
/// units, so they stay plain `f64`.
pub mod constants {
    /// Gravitational acceleration (ft/s²)
    pub const G_FTPS2: f64 = 32.2;
    /// Density of water (lb/ft³)
    pub const RHO_WATER_LB_FT3: f64 = 62.3;
    /// Viscosity of water (lb/(ft·s))
    pub const MU_WATER_LB_FT_S: f64 = 20.50e-6;
    /// Default node pressure (psi)
    pub const DEFAULT_NODE_PRESSURE_PSI: f64 = 80.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = psi(80.0);
        let _q = cfs(1.5);
        let _l = inch(18.0);
        let _r = ft(0.003);
    }

    #[test]
    fn us_customary_round_trip() {
        assert!((in_inches(inch(18.0)) - 18.0).abs() < 1e-9);
        assert!((in_feet(inch(24.0)) - 2.0).abs() < 1e-9);
        assert!((in_psi(psi(80.0)) - 80.0).abs() < 1e-9);
        assert!((in_cfs(cfs(-4.2)) + 4.2).abs() < 1e-9);
    }
}
