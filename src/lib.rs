pub mod app;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod image;
pub mod logging;
pub mod models;
pub mod session;
pub mod storage;
pub mod validation;
pub mod views;

pub use error::{AppError, Result};
