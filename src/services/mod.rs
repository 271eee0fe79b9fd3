// Service module exports

pub mod config;
pub mod report;
pub mod storage;
pub mod store;
