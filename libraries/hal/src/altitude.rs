/// Altitude service interface
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::error::HalResult;
use crate::sample::Delivery;

/// Relative-altitude (barometer) service interface.
///
/// The altitude in each delivered sample is relative to a reference taken
/// when the subscription starts.
pub trait AltitudeDevice {
    /// Begin relative-altitude/pressure updates
    fn start_relative_altitude(
        &mut self,
        interval: Duration,
        sink: Sender<Delivery>,
    ) -> HalResult<()>;

    fn stop_relative_altitude(&mut self);
}
