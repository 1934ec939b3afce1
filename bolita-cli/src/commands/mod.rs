pub mod play;
pub mod prizes;
pub mod settle;

pub use play::{handle_classify, handle_price, PriceArgs, Selection};
pub use prizes::handle_prizes;
pub use settle::{handle_settle, handle_total};
