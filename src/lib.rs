pub mod catalog;
pub mod changelog;
pub mod config;
pub mod http;
pub mod markdown;
pub mod provider;
pub mod release_info;
pub mod runtime;
pub mod site;
