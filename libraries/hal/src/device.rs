/// Device-info service interface

/// Read-only device queries plus the proximity-monitoring toggle.
///
/// Proximity deliberately delivers no samples: the platform exposes a
/// monitoring flag and a near/far state, and the view reads the state
/// directly.
pub trait DeviceInfo {
    fn device_name(&self) -> String;

    fn model(&self) -> String;

    fn os_name(&self) -> String;

    fn os_version(&self) -> String;

    /// Battery charge as a fraction in 0.0..=1.0, or a negative value if
    /// the level is unknown
    fn battery_level(&self) -> f32;

    /// Enable or disable proximity monitoring
    fn set_proximity_monitoring(&mut self, enabled: bool);

    fn proximity_monitoring_enabled(&self) -> bool;

    /// Whether something is near the proximity sensor. Only meaningful
    /// while monitoring is enabled; otherwise false.
    fn proximity_near(&self) -> bool;
}
