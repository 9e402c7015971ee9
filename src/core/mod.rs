// src/core/mod.rs

pub mod access;
pub mod html;
pub mod net;
pub mod sanitize;
