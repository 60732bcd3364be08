//! # Motion - Sensor Session Manager
//!
//! Manages the lifecycle of five independent sensor subscriptions (fused
//! device motion, raw accelerometer, raw gyroscope, raw magnetometer,
//! relative pressure) and funnels every delivered sample into a single
//! [`LiveSensorState`] record.
//!
//! Platform subscriptions push [`hal::Delivery`] values into an mpsc
//! channel; [`SensorSession::pump`] drains that channel on the UI context,
//! so state mutation and rendering never race.

mod config;
mod error;
mod session;
mod state;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::SensorSession;
pub use state::LiveSensorState;
