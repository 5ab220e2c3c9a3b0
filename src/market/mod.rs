//! Simulated market data
//!
//! Value generators, seed tables, banding rules and the shared tick
//! scheduler. Nothing in here touches the terminal.

pub mod bands;
pub mod clock;
pub mod flows;
pub mod gauge;
pub mod generator;
pub mod insight;
pub mod news;
pub mod quote;
pub mod scheduler;

pub use clock::{Clock, SystemClock};
pub use generator::ChartPoint;
pub use quote::AssetQuote;
pub use scheduler::Scheduler;
