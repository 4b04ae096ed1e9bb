pub mod general;
pub mod network;
pub mod wallet;
