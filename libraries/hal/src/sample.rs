use std::fmt;
use std::time::Instant;

use crate::types::Vector3d;

/// Fused device-motion sample produced by the platform's motion-fusion
/// subsystem. All values are already gravity-compensated and calibrated
/// by the platform; this crate only transports them.
#[derive(Debug, Clone)]
pub struct MotionSample {
    /// User acceleration with gravity removed, in g (x, y, z)
    pub user_acceleration: Vector3d,

    /// Gravity unit vector in device frame (z-component drives the level tool)
    pub gravity: Vector3d,

    /// Fused attitude in radians
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,

    /// Calibrated magnetic field in µT (x, y, z)
    pub magnetic_field: Vector3d,

    /// Heading relative to magnetic north, in degrees
    pub heading: f64,

    /// Timestamp when the sample was taken
    pub timestamp: Instant,
}

/// Raw accelerometer sample in g, gravity included
#[derive(Debug, Clone)]
pub struct AccelSample {
    pub acceleration: Vector3d,
    pub timestamp: Instant,
}

/// Raw gyroscope sample, rotation rate in rad/s
#[derive(Debug, Clone)]
pub struct GyroSample {
    pub rotation_rate: Vector3d,
    pub timestamp: Instant,
}

/// Raw (uncalibrated) magnetometer sample in µT
#[derive(Debug, Clone)]
pub struct MagSample {
    pub field: Vector3d,
    pub timestamp: Instant,
}

/// Relative-altitude sample: barometric pressure plus the altitude change
/// since the subscription started
#[derive(Debug, Clone)]
pub struct PressureSample {
    /// Pressure in kPa
    pub pressure: f64,

    /// Altitude relative to the subscription start, in meters
    pub relative_altitude: f64,

    pub timestamp: Instant,
}

/// The five independent sensor subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    DeviceMotion,
    Accelerometer,
    Gyroscope,
    Magnetometer,
    Pressure,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::DeviceMotion => write!(f, "device motion"),
            SensorKind::Accelerometer => write!(f, "accelerometer"),
            SensorKind::Gyroscope => write!(f, "gyroscope"),
            SensorKind::Magnetometer => write!(f, "magnetometer"),
            SensorKind::Pressure => write!(f, "pressure"),
        }
    }
}

/// A delivered sample from any of the five subscriptions
#[derive(Debug, Clone)]
pub enum Sample {
    Motion(MotionSample),
    Accel(AccelSample),
    Gyro(GyroSample),
    Mag(MagSample),
    Pressure(PressureSample),
}

impl Sample {
    /// The subscription this sample belongs to
    pub fn kind(&self) -> SensorKind {
        match self {
            Sample::Motion(_) => SensorKind::DeviceMotion,
            Sample::Accel(_) => SensorKind::Accelerometer,
            Sample::Gyro(_) => SensorKind::Gyroscope,
            Sample::Mag(_) => SensorKind::Magnetometer,
            Sample::Pressure(_) => SensorKind::Pressure,
        }
    }
}

/// Error reported by the platform in place of a sample
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} delivery failed: {message}")]
pub struct SensorFault {
    /// The subscription that reported the error
    pub kind: SensorKind,

    /// Platform-provided description
    pub message: String,
}

/// What a subscription pushes into its sink: a typed sample or a fault
pub type Delivery = Result<Sample, SensorFault>;
