// src/lib.rs

//! kolnet: dormitory directory lookup library

pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod services;
pub mod utils;
