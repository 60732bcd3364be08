//! Desktop stand-in for the phone's motion hardware.
//!
//! Each started subscription spawns a worker thread that sleeps the update
//! interval, synthesizes a plausible waveform sample, and pushes it into the
//! sink. Stopping flips the worker's running flag and joins the thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use hal::{
    AccelSample, AltitudeDevice, Delivery, DeviceInfo, GyroSample, HalResult, MagSample,
    MotionDevice, MotionSample, PressureSample, ReferenceFrame, Sample, Vector3d,
};

/// One subscription's delivery thread
struct Worker {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn spawn<F>(interval: Duration, sink: Sender<Delivery>, produce: F) -> Self
    where
        F: Fn(f64) -> Sample + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            while flag.load(Ordering::Relaxed) {
                std::thread::sleep(interval);
                if !flag.load(Ordering::Relaxed) {
                    return;
                }
                let t = started.elapsed().as_secs_f64();
                // Receiver gone means the session is being torn down
                if sink.send(Ok(produce(t))).is_err() {
                    return;
                }
            }
        });
        Self { running, handle }
    }

    fn stop(self) {
        self.running.store(false, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}

fn attitude_at(t: f64) -> (f64, f64, f64) {
    let pitch = 0.35 * (0.40 * t).sin();
    let roll = 0.25 * (0.30 * t).cos();
    let yaw = 0.80 * (0.10 * t).sin();
    (pitch, roll, yaw)
}

fn motion_sample(t: f64) -> Sample {
    let (pitch, roll, yaw) = attitude_at(t);
    // Gravity unit vector tilted by the simulated attitude
    let gravity = Vector3d::new(
        pitch.sin(),
        -roll.sin() * pitch.cos(),
        -pitch.cos() * roll.cos(),
    );
    Sample::Motion(MotionSample {
        user_acceleration: Vector3d::new(
            0.02 * (2.1 * t).sin(),
            0.02 * (1.7 * t).cos(),
            0.01 * (2.9 * t).sin(),
        ),
        gravity,
        pitch,
        roll,
        yaw,
        magnetic_field: Vector3d::new(
            21.0 + 0.4 * (0.5 * t).sin(),
            -4.0 + 0.3 * (0.4 * t).cos(),
            -43.0 + 0.5 * (0.6 * t).sin(),
        ),
        heading: (12.0 * t) % 360.0,
        timestamp: Instant::now(),
    })
}

fn accel_sample(t: f64) -> Sample {
    let (pitch, roll, _) = attitude_at(t);
    Sample::Accel(AccelSample {
        acceleration: Vector3d::new(
            pitch.sin() + 0.005 * (9.0 * t).sin(),
            -roll.sin() * pitch.cos() + 0.005 * (8.0 * t).cos(),
            -pitch.cos() * roll.cos() + 0.005 * (7.0 * t).sin(),
        ),
        timestamp: Instant::now(),
    })
}

fn gyro_sample(t: f64) -> Sample {
    Sample::Gyro(GyroSample {
        rotation_rate: Vector3d::new(
            0.14 * (0.40 * t).cos(),
            -0.075 * (0.30 * t).sin(),
            0.08 * (0.10 * t).cos(),
        ),
        timestamp: Instant::now(),
    })
}

fn mag_sample(t: f64) -> Sample {
    // Raw field carries a hard-iron offset the fused feed has calibrated out
    Sample::Mag(MagSample {
        field: Vector3d::new(
            33.0 + 0.8 * (0.5 * t).sin(),
            8.0 + 0.6 * (0.4 * t).cos(),
            -51.0 + 0.9 * (0.6 * t).sin(),
        ),
        timestamp: Instant::now(),
    })
}

fn pressure_sample(t: f64) -> Sample {
    let relative_altitude = 1.5 * (0.05 * t).sin();
    Sample::Pressure(PressureSample {
        // ~12 Pa per meter near sea level
        pressure: 101.325 - 0.012 * relative_altitude,
        relative_altitude,
        timestamp: Instant::now(),
    })
}

/// Synthetic motion service: fused device motion plus the three raw sensors
#[derive(Default)]
pub struct SyntheticMotion {
    fused: Option<Worker>,
    accel: Option<Worker>,
    gyro: Option<Worker>,
    mag: Option<Worker>,
}

impl SyntheticMotion {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotionDevice for SyntheticMotion {
    fn start_device_motion(
        &mut self,
        _frame: ReferenceFrame,
        interval: Duration,
        sink: Sender<Delivery>,
    ) -> HalResult<()> {
        self.fused = Some(Worker::spawn(interval, sink, motion_sample));
        Ok(())
    }

    fn stop_device_motion(&mut self) {
        if let Some(worker) = self.fused.take() {
            worker.stop();
        }
    }

    fn start_accelerometer(&mut self, interval: Duration, sink: Sender<Delivery>) -> HalResult<()> {
        self.accel = Some(Worker::spawn(interval, sink, accel_sample));
        Ok(())
    }

    fn stop_accelerometer(&mut self) {
        if let Some(worker) = self.accel.take() {
            worker.stop();
        }
    }

    fn start_gyroscope(&mut self, interval: Duration, sink: Sender<Delivery>) -> HalResult<()> {
        self.gyro = Some(Worker::spawn(interval, sink, gyro_sample));
        Ok(())
    }

    fn stop_gyroscope(&mut self) {
        if let Some(worker) = self.gyro.take() {
            worker.stop();
        }
    }

    fn start_magnetometer(&mut self, interval: Duration, sink: Sender<Delivery>) -> HalResult<()> {
        self.mag = Some(Worker::spawn(interval, sink, mag_sample));
        Ok(())
    }

    fn stop_magnetometer(&mut self) {
        if let Some(worker) = self.mag.take() {
            worker.stop();
        }
    }
}

/// Synthetic relative-altitude service
#[derive(Default)]
pub struct SyntheticAltimeter {
    worker: Option<Worker>,
}

impl SyntheticAltimeter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AltitudeDevice for SyntheticAltimeter {
    fn start_relative_altitude(
        &mut self,
        interval: Duration,
        sink: Sender<Delivery>,
    ) -> HalResult<()> {
        self.worker = Some(Worker::spawn(interval, sink, pressure_sample));
        Ok(())
    }

    fn stop_relative_altitude(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop();
        }
    }
}

/// Device info backed by the host environment. Proximity alternates between
/// near and far every couple of seconds while monitoring is on, so the test
/// screen has something to show.
pub struct DesktopDeviceInfo {
    monitoring: bool,
    started: Instant,
}

impl DesktopDeviceInfo {
    pub fn new() -> Self {
        Self {
            monitoring: false,
            started: Instant::now(),
        }
    }
}

impl DeviceInfo for DesktopDeviceInfo {
    fn device_name(&self) -> String {
        std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .unwrap_or_else(|_| "desktop".to_string())
    }

    fn model(&self) -> String {
        std::env::consts::ARCH.to_string()
    }

    fn os_name(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn os_version(&self) -> String {
        std::env::consts::FAMILY.to_string()
    }

    fn battery_level(&self) -> f32 {
        // No battery service on the desktop; negative means unknown
        -1.0
    }

    fn set_proximity_monitoring(&mut self, enabled: bool) {
        self.monitoring = enabled;
    }

    fn proximity_monitoring_enabled(&self) -> bool {
        self.monitoring
    }

    fn proximity_near(&self) -> bool {
        self.monitoring && self.started.elapsed().as_secs() % 4 >= 2
    }
}
