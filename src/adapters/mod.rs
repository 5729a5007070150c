//! Adapters - concrete implementations of ports
//!
//! Adapters connect the domain to the outside world by implementing
//! the port traits. Each adapter knows how to work with a specific
//! technology or hardware.
//!
//! # Available Adapters
//!
//! - **one_shot**: any embedded-hal 0.2 `OneShot` ADC
//! - **fake**: in-memory ADC for host-side tests (feature `fake`)

pub mod one_shot;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

pub use one_shot::OneShotAdc;

#[cfg(any(test, feature = "fake"))]
pub use fake::{FakeAdc, FakeAdcFault};
