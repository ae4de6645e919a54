//! Session and profile bootstrap

pub mod ports;
pub mod service;
