//! Display-side unit conversions. The state record keeps platform units
//! (g, rad/s, radians, µT, kPa); everything here is presentation only.

/// Gravity constant used for the g → m/s² readout
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Acceleration in g to m/s²
pub fn g_to_ms2(g: f64) -> f64 {
    g * STANDARD_GRAVITY
}

/// User acceleration in g to the cm/s²-scaled readout (× 100)
pub fn g_to_cms2(g: f64) -> f64 {
    g * 100.0
}

/// Radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Battery fraction to percent
pub fn fraction_to_percent(fraction: f32) -> f32 {
    fraction * 100.0
}

/// Tilt angle of the device from the gravity z-component. A device lying
/// flat (gravity z = -1) reads 0°.
pub fn tilt_deg(gravity_z: f64) -> f64 {
    180.0 - gravity_z.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Pressure readout, displayed raw with no conversion
pub fn pressure_kpa(pressure: f64) -> String {
    format!("{pressure:.2} kPa")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g_to_ms2() {
        assert!((g_to_ms2(1.0) - 9.81).abs() < 1e-9);
        assert!((g_to_ms2(2.0) - 19.62).abs() < 1e-9);
        assert!((g_to_ms2(3.0) - 29.43).abs() < 1e-9);
    }

    #[test]
    fn test_g_to_cms2() {
        assert_eq!(g_to_cms2(0.5), 50.0);
    }

    #[test]
    fn test_rad_to_deg() {
        assert!((rad_to_deg(std::f64::consts::PI) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_fraction_to_percent() {
        assert_eq!(fraction_to_percent(0.42), 42.0);
    }

    #[test]
    fn test_tilt_flat_device_reads_zero() {
        assert!(tilt_deg(-1.0).abs() < 1e-9);
        // Upright device (gravity along y, z = 0) reads 90°
        assert!((tilt_deg(0.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_displayed_raw() {
        assert_eq!(pressure_kpa(101.3), "101.30 kPa");
    }
}
