pub mod emission_state;
pub mod option;
pub mod vesting_config;

pub use emission_state::*;
pub use option::*;
pub use vesting_config::*;
