pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
