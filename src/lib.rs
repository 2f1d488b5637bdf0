pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod service;
pub mod ui;
pub mod validation;

pub use error::{AppError, Result};
