//! Bolita core - play classification, pricing and prize settlement
//!
//! The engines here are pure functions over plain data. Callers own all I/O:
//! they classify raw bet strings as a slip is typed, price each play, and later
//! settle priced plays against published results using a prize table.

pub mod classifier;
pub mod config;
pub mod digits;
pub mod error;
pub mod game;
pub mod prize;
pub mod pricing;
pub mod region;
pub mod settlement;
pub mod types;

pub use classifier::classify;
pub use config::EngineConfig;
pub use error::{BolitaError, Result};
pub use game::GameMode;
pub use prize::{PrizeTable, DEFAULT_PRIZES};
pub use pricing::{price, ticket_total};
pub use region::RegionConfig;
pub use settlement::{settle, Settler};
pub use types::{CalculationResult, LotteryResult, Play, Positions, WagerType};
