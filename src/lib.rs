pub mod catalogue;
pub mod config;
pub mod listing;
pub mod models;
pub mod notifications;
pub mod session;
pub mod storage;
