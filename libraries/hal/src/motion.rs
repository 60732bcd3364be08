/// Motion service interface
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::error::HalResult;
use crate::sample::Delivery;

/// Reference frame for fused device-motion updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFrame {
    /// X toward magnetic north, Z vertical
    MagneticNorthZVertical,
}

/// Motion service interface.
///
/// Four independent subscriptions: fused device motion plus the three raw
/// sensors. Each `start_*` begins pushing deliveries into the given sink at
/// roughly the requested interval until the matching `stop_*` is called.
/// Starting an already-started subscription is the platform's business; the
/// session layer above never does it.
pub trait MotionDevice {
    /// Begin fused device-motion updates in the given reference frame
    fn start_device_motion(
        &mut self,
        frame: ReferenceFrame,
        interval: Duration,
        sink: Sender<Delivery>,
    ) -> HalResult<()>;

    fn stop_device_motion(&mut self);

    /// Begin raw accelerometer updates (units of g)
    fn start_accelerometer(&mut self, interval: Duration, sink: Sender<Delivery>) -> HalResult<()>;

    fn stop_accelerometer(&mut self);

    /// Begin raw gyroscope updates (rad/s)
    fn start_gyroscope(&mut self, interval: Duration, sink: Sender<Delivery>) -> HalResult<()>;

    fn stop_gyroscope(&mut self);

    /// Begin raw magnetometer updates (µT)
    fn start_magnetometer(&mut self, interval: Duration, sink: Sender<Delivery>) -> HalResult<()>;

    fn stop_magnetometer(&mut self);
}
