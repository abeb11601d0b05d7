pub mod config;
pub mod logging;

pub mod batch;
pub mod downloader;
pub mod http;
pub mod ident;
pub mod marketplace;
pub mod outcome;
pub mod progress;
pub mod retry;
