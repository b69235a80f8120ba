//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_BODY_LIMIT_MB, DEFAULT_ENDPOINT, DEFAULT_HOST, DEFAULT_PORT,
};
