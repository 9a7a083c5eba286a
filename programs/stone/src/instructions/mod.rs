pub mod initialize_minter;
pub mod set_treasury;
pub mod mint_epoch;
pub mod initialize_vesting;
pub mod grant_option;
pub mod exercise_option;
pub mod split_option;
pub mod merge_option;
pub mod approve_option;
pub mod transfer_option;
pub mod emit_supply_quote;

pub use initialize_minter::*;
pub use set_treasury::*;
pub use mint_epoch::*;
pub use initialize_vesting::*;
pub use grant_option::*;
pub use exercise_option::*;
pub use split_option::*;
pub use merge_option::*;
pub use approve_option::*;
pub use transfer_option::*;
pub use emit_supply_quote::*;
