pub mod api_client;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod storage;
