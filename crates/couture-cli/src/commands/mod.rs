//! Command handlers

pub mod config;
pub mod credits;
pub mod head;
pub mod inject;
pub mod inspect;
pub mod sitemap;
