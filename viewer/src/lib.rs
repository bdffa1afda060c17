#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod cli;
pub mod colormap;
pub mod export;
pub mod plot;
pub mod plot_map;
pub mod session;
