use std::sync::mpsc::{self, Receiver, Sender};

use hal::{AltitudeDevice, Delivery, DeviceInfo, MotionDevice, ReferenceFrame, SensorKind};
use log::{debug, warn};

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::state::LiveSensorState;

/// Which subscriptions are currently running
#[derive(Debug, Default, Clone, Copy)]
struct Active {
    fused: bool,
    accel: bool,
    gyro: bool,
    mag: bool,
    pressure: bool,
}

impl Active {
    fn contains(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::DeviceMotion => self.fused,
            SensorKind::Accelerometer => self.accel,
            SensorKind::Gyroscope => self.gyro,
            SensorKind::Magnetometer => self.mag,
            SensorKind::Pressure => self.pressure,
        }
    }
}

/// Owns the platform sensor handles and republishes their deliveries into a
/// [`LiveSensorState`].
///
/// Every `start_*` is idempotent. Deliveries arrive over an internal mpsc
/// channel and are applied by [`pump`](Self::pump), which the view layer
/// calls once per frame on the UI context. Dropping the session stops all
/// subscriptions.
pub struct SensorSession {
    motion: Box<dyn MotionDevice>,
    altimeter: Box<dyn AltitudeDevice>,
    device: Box<dyn DeviceInfo>,
    config: SessionConfig,
    state: LiveSensorState,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
    active: Active,
}

impl SensorSession {
    pub fn new(
        motion: Box<dyn MotionDevice>,
        altimeter: Box<dyn AltitudeDevice>,
        device: Box<dyn DeviceInfo>,
        config: SessionConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            motion,
            altimeter,
            device,
            config,
            state: LiveSensorState::default(),
            tx,
            rx,
            active: Active::default(),
        }
    }

    /// Begin fused device-motion updates (magnetic-north-aligned frame).
    /// Feeds user acceleration, gravity, attitude, calibrated magnetic field
    /// and heading. No-op if already started.
    pub fn start_fused_motion(&mut self) -> SessionResult<()> {
        if self.active.fused {
            return Ok(());
        }
        self.motion.start_device_motion(
            ReferenceFrame::MagneticNorthZVertical,
            self.config.sample_interval,
            self.tx.clone(),
        )?;
        self.active.fused = true;
        debug!("device-motion updates started");
        Ok(())
    }

    /// Begin raw accelerometer updates. No-op if already started.
    pub fn start_accelerometer(&mut self) -> SessionResult<()> {
        if self.active.accel {
            return Ok(());
        }
        self.motion
            .start_accelerometer(self.config.sample_interval, self.tx.clone())?;
        self.active.accel = true;
        debug!("accelerometer updates started");
        Ok(())
    }

    /// Begin raw gyroscope updates. No-op if already started.
    pub fn start_gyroscope(&mut self) -> SessionResult<()> {
        if self.active.gyro {
            return Ok(());
        }
        self.motion
            .start_gyroscope(self.config.sample_interval, self.tx.clone())?;
        self.active.gyro = true;
        debug!("gyroscope updates started");
        Ok(())
    }

    /// Begin raw magnetometer updates. No-op if already started.
    pub fn start_magnetometer(&mut self) -> SessionResult<()> {
        if self.active.mag {
            return Ok(());
        }
        self.motion
            .start_magnetometer(self.config.sample_interval, self.tx.clone())?;
        self.active.mag = true;
        debug!("magnetometer updates started");
        Ok(())
    }

    /// Begin relative-altitude/pressure updates. No-op if already started.
    pub fn start_pressure(&mut self) -> SessionResult<()> {
        if self.active.pressure {
            return Ok(());
        }
        self.altimeter
            .start_relative_altitude(self.config.sample_interval, self.tx.clone())?;
        self.active.pressure = true;
        debug!("pressure updates started");
        Ok(())
    }

    /// Enable the platform proximity flag. Proximity delivers no samples;
    /// the view reads the near/far state straight from [`device`](Self::device).
    pub fn start_proximity_monitoring(&mut self) {
        self.device.set_proximity_monitoring(true);
        debug!("proximity monitoring enabled");
    }

    pub fn stop_proximity_monitoring(&mut self) {
        self.device.set_proximity_monitoring(false);
        debug!("proximity monitoring disabled");
    }

    /// Drain pending deliveries and apply them to the state. Returns the
    /// number of samples applied.
    ///
    /// A fault keeps the last-known value for its category and is only
    /// logged; no delivery error is fatal, the pressure feed included.
    /// Deliveries for a category that has been stopped are discarded.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            match delivery {
                Ok(sample) => {
                    if self.active.contains(sample.kind()) {
                        self.state.apply(sample);
                        applied += 1;
                    }
                }
                Err(fault) => {
                    warn!("{fault}; keeping last value");
                }
            }
        }
        applied
    }

    pub fn state(&self) -> &LiveSensorState {
        &self.state
    }

    pub fn device(&self) -> &dyn DeviceInfo {
        self.device.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Release all five subscriptions. Samples still in flight will be
    /// discarded by the next [`pump`](Self::pump).
    pub fn stop_all(&mut self) {
        if self.active.fused {
            self.motion.stop_device_motion();
            self.active.fused = false;
        }
        if self.active.accel {
            self.motion.stop_accelerometer();
            self.active.accel = false;
        }
        if self.active.gyro {
            self.motion.stop_gyroscope();
            self.active.gyro = false;
        }
        if self.active.mag {
            self.motion.stop_magnetometer();
            self.active.mag = false;
        }
        if self.active.pressure {
            self.altimeter.stop_relative_altitude();
            self.active.pressure = false;
        }
        debug!("all sensor subscriptions stopped");
    }
}

impl Drop for SensorSession {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use hal::{
        AccelSample, HalResult, PressureSample, Sample, SensorFault, Vector3d,
    };

    use super::*;

    /// Call log shared between a mock device and the test body
    #[derive(Default)]
    struct MockLog {
        starts: Vec<SensorKind>,
        stops: Vec<SensorKind>,
        sink: Option<Sender<Delivery>>,
    }

    impl MockLog {
        fn start_count(&self, kind: SensorKind) -> usize {
            self.starts.iter().filter(|k| **k == kind).count()
        }

        fn send(&self, delivery: Delivery) {
            self.sink
                .as_ref()
                .expect("no subscription started")
                .send(delivery)
                .unwrap();
        }
    }

    struct MockMotion(Arc<Mutex<MockLog>>);

    impl MockMotion {
        fn record_start(&self, kind: SensorKind, sink: Sender<Delivery>) {
            let mut log = self.0.lock().unwrap();
            log.starts.push(kind);
            log.sink = Some(sink);
        }

        fn record_stop(&self, kind: SensorKind) {
            self.0.lock().unwrap().stops.push(kind);
        }
    }

    impl MotionDevice for MockMotion {
        fn start_device_motion(
            &mut self,
            _frame: ReferenceFrame,
            _interval: Duration,
            sink: Sender<Delivery>,
        ) -> HalResult<()> {
            self.record_start(SensorKind::DeviceMotion, sink);
            Ok(())
        }

        fn stop_device_motion(&mut self) {
            self.record_stop(SensorKind::DeviceMotion);
        }

        fn start_accelerometer(
            &mut self,
            _interval: Duration,
            sink: Sender<Delivery>,
        ) -> HalResult<()> {
            self.record_start(SensorKind::Accelerometer, sink);
            Ok(())
        }

        fn stop_accelerometer(&mut self) {
            self.record_stop(SensorKind::Accelerometer);
        }

        fn start_gyroscope(
            &mut self,
            _interval: Duration,
            sink: Sender<Delivery>,
        ) -> HalResult<()> {
            self.record_start(SensorKind::Gyroscope, sink);
            Ok(())
        }

        fn stop_gyroscope(&mut self) {
            self.record_stop(SensorKind::Gyroscope);
        }

        fn start_magnetometer(
            &mut self,
            _interval: Duration,
            sink: Sender<Delivery>,
        ) -> HalResult<()> {
            self.record_start(SensorKind::Magnetometer, sink);
            Ok(())
        }

        fn stop_magnetometer(&mut self) {
            self.record_stop(SensorKind::Magnetometer);
        }
    }

    struct MockAltimeter(Arc<Mutex<MockLog>>);

    impl AltitudeDevice for MockAltimeter {
        fn start_relative_altitude(
            &mut self,
            _interval: Duration,
            sink: Sender<Delivery>,
        ) -> HalResult<()> {
            let mut log = self.0.lock().unwrap();
            log.starts.push(SensorKind::Pressure);
            log.sink = Some(sink);
            Ok(())
        }

        fn stop_relative_altitude(&mut self) {
            self.0.lock().unwrap().stops.push(SensorKind::Pressure);
        }
    }

    struct MockDevice {
        proximity: Arc<Mutex<bool>>,
    }

    impl DeviceInfo for MockDevice {
        fn device_name(&self) -> String {
            "Mock".into()
        }

        fn model(&self) -> String {
            "MockDevice".into()
        }

        fn os_name(&self) -> String {
            "MockOS".into()
        }

        fn os_version(&self) -> String {
            "1.0".into()
        }

        fn battery_level(&self) -> f32 {
            1.0
        }

        fn set_proximity_monitoring(&mut self, enabled: bool) {
            *self.proximity.lock().unwrap() = enabled;
        }

        fn proximity_monitoring_enabled(&self) -> bool {
            *self.proximity.lock().unwrap()
        }

        fn proximity_near(&self) -> bool {
            false
        }
    }

    fn session() -> (SensorSession, Arc<Mutex<MockLog>>, Arc<Mutex<bool>>) {
        let log = Arc::new(Mutex::new(MockLog::default()));
        let proximity = Arc::new(Mutex::new(false));
        let session = SensorSession::new(
            Box::new(MockMotion(log.clone())),
            Box::new(MockAltimeter(log.clone())),
            Box::new(MockDevice {
                proximity: proximity.clone(),
            }),
            SessionConfig::default(),
        );
        (session, log, proximity)
    }

    fn accel(x: f64, y: f64, z: f64) -> Delivery {
        Ok(Sample::Accel(AccelSample {
            acceleration: Vector3d::new(x, y, z),
            timestamp: Instant::now(),
        }))
    }

    fn pressure(kpa: f64) -> Delivery {
        Ok(Sample::Pressure(PressureSample {
            pressure: kpa,
            relative_altitude: 0.0,
            timestamp: Instant::now(),
        }))
    }

    #[test]
    fn test_state_starts_at_zero_defaults() {
        let (session, _, _) = session();
        assert_eq!(session.state().acceleration, Vector3d::zeros());
        assert_eq!(session.state().pressure, 0.0);
        assert_eq!(session.state().heading, 0.0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut session, log, _) = session();
        session.start_accelerometer().unwrap();
        session.start_accelerometer().unwrap();
        assert_eq!(
            log.lock().unwrap().start_count(SensorKind::Accelerometer),
            1
        );

        session.start_fused_motion().unwrap();
        session.start_fused_motion().unwrap();
        assert_eq!(
            log.lock().unwrap().start_count(SensorKind::DeviceMotion),
            1
        );
    }

    #[test]
    fn test_accel_delivery_updates_state_exactly() {
        let (mut session, log, _) = session();
        session.start_accelerometer().unwrap();
        log.lock().unwrap().send(accel(1.0, 2.0, 3.0));
        assert_eq!(session.pump(), 1);
        assert_eq!(session.state().acceleration, Vector3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_fault_keeps_last_value() {
        let (mut session, log, _) = session();
        session.start_pressure().unwrap();
        log.lock().unwrap().send(pressure(101.3));
        assert_eq!(session.pump(), 1);
        assert_eq!(session.state().pressure, 101.3);

        log.lock().unwrap().send(Err(SensorFault {
            kind: SensorKind::Pressure,
            message: "altimeter timeout".into(),
        }));
        assert_eq!(session.pump(), 0);
        assert_eq!(session.state().pressure, 101.3);
    }

    #[test]
    fn test_stop_all_discards_late_deliveries() {
        let (mut session, log, _) = session();
        session.start_accelerometer().unwrap();
        session.stop_all();

        // Platform still pushes a sample after the stop
        log.lock().unwrap().send(accel(5.0, 5.0, 5.0));
        assert_eq!(session.pump(), 0);
        assert_eq!(session.state().acceleration, Vector3d::zeros());
    }

    #[test]
    fn test_stop_all_releases_every_subscription() {
        let (mut session, log, _) = session();
        session.start_fused_motion().unwrap();
        session.start_accelerometer().unwrap();
        session.start_gyroscope().unwrap();
        session.start_magnetometer().unwrap();
        session.start_pressure().unwrap();
        session.stop_all();

        let stops = log.lock().unwrap().stops.clone();
        for kind in [
            SensorKind::DeviceMotion,
            SensorKind::Accelerometer,
            SensorKind::Gyroscope,
            SensorKind::Magnetometer,
            SensorKind::Pressure,
        ] {
            assert!(stops.contains(&kind), "missing stop for {kind}");
        }
    }

    #[test]
    fn test_proximity_toggle_leaves_flag_false() {
        let (mut session, _, proximity) = session();
        session.start_proximity_monitoring();
        assert!(*proximity.lock().unwrap());
        session.stop_proximity_monitoring();
        assert!(!*proximity.lock().unwrap());
    }
}
