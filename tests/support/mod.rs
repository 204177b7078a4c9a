#![allow(dead_code)]

pub mod config_env;
pub mod transport;
pub mod wav;
