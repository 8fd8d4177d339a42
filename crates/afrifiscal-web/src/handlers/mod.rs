//! HTTP handlers: rendered pages and the JSON proxy

pub mod api;
pub mod pages;
