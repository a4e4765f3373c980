// src/lib.rs

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod status_indicator;
pub mod transcript;
pub mod ui;

pub use app::{App, AppScreen};
