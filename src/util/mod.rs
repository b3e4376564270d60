//! Shared utilities: clocks, ring indices, uid helpers and telemetry.

pub mod clock;
pub mod ring;
pub mod telemetry;
pub mod uid;

pub use clock::*;
pub use ring::*;
pub use telemetry::*;
pub use uid::*;
