//! Application services: catalog lookup, validation, sizing, the ledger,
//! risk policy and the engine facade that ties them together.

pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod risk;
pub mod sizing;
pub mod validator;
