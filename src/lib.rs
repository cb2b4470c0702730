//! bannerdash: banner-ad performance dashboard.
//!
//! Library half of the `bannerdash` binary. The record collection lives in
//! [`state::Dashboard`]; everything else derives views from it or presents
//! them.

pub mod activity;
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod filter;
pub mod insights;
pub mod locale;
pub mod paste;
pub mod record;
pub mod state;
pub mod web;
