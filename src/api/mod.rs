pub mod chain;
pub mod connector;
pub mod keys;
pub mod query;
pub mod token;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
