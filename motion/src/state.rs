use hal::{Sample, Vector3d};

/// Latest known value for every measured quantity.
///
/// Each field reflects the most recent sample delivered by its subscription,
/// or zero if that subscription has not produced one yet. Fields are updated
/// independently; there is no cross-field consistency guarantee (attitude and
/// raw gyro rate may come from different update cycles).
#[derive(Debug, Clone)]
pub struct LiveSensorState {
    /// Raw acceleration including gravity, in g
    pub acceleration: Vector3d,

    /// Gravity-compensated user acceleration, in g
    pub user_acceleration: Vector3d,

    /// Gravity unit vector in device frame
    pub gravity: Vector3d,

    /// Raw rotation rate in rad/s
    pub rotation_rate: Vector3d,

    /// Fused attitude in radians
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,

    /// Raw magnetic field in µT
    pub magnetic_field_raw: Vector3d,

    /// Platform-calibrated magnetic field in µT
    pub magnetic_field_calibrated: Vector3d,

    /// Compass heading in degrees
    pub heading: f64,

    /// Relative barometric pressure in kPa
    pub pressure: f64,

    /// Altitude change since the pressure subscription started, in meters
    pub relative_altitude: f64,
}

impl Default for LiveSensorState {
    fn default() -> Self {
        Self {
            acceleration: Vector3d::zeros(),
            user_acceleration: Vector3d::zeros(),
            gravity: Vector3d::zeros(),
            rotation_rate: Vector3d::zeros(),
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            magnetic_field_raw: Vector3d::zeros(),
            magnetic_field_calibrated: Vector3d::zeros(),
            heading: 0.0,
            pressure: 0.0,
            relative_altitude: 0.0,
        }
    }
}

impl LiveSensorState {
    /// Overwrite the fields covered by one delivered sample, leaving every
    /// other field at its last-known value
    pub fn apply(&mut self, sample: Sample) {
        match sample {
            Sample::Motion(m) => {
                self.user_acceleration = m.user_acceleration;
                self.gravity = m.gravity;
                self.pitch = m.pitch;
                self.roll = m.roll;
                self.yaw = m.yaw;
                self.magnetic_field_calibrated = m.magnetic_field;
                self.heading = m.heading;
            }
            Sample::Accel(a) => {
                self.acceleration = a.acceleration;
            }
            Sample::Gyro(g) => {
                self.rotation_rate = g.rotation_rate;
            }
            Sample::Mag(m) => {
                self.magnetic_field_raw = m.field;
            }
            Sample::Pressure(p) => {
                self.pressure = p.pressure;
                self.relative_altitude = p.relative_altitude;
            }
        }
    }
}
