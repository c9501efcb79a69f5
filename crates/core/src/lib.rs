pub mod config;
pub mod content;
pub mod error;
pub mod theme;
pub mod types;

pub use config::{parse_site_toml, parse_site_toml_str};
pub use content::{ContentPage, load_content};
pub use error::{Error, Result};
pub use theme::{Breakpoint, Breakpoints, StyleConfig, Theme};
pub use types::*;
