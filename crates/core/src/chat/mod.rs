//! Zone chat synchronizer

pub mod ports;
pub mod service;
pub mod subscription;
