pub mod config;
pub mod logging;

pub mod crawler;
pub mod executor;
pub mod fetch;
pub mod format;
pub mod keywords;
pub mod layout;
pub mod marker;
pub mod provider;
pub mod scheduler;
pub mod status;
