mod altitude;
mod device;
mod error;
mod motion;
mod sample;
mod types;

pub use altitude::*;
pub use device::*;
pub use error::*;
pub use motion::*;
pub use sample::*;
pub use types::*;
