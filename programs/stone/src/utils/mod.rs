pub mod emission;
pub mod funding;
pub mod hook;
