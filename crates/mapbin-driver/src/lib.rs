#![warn(clippy::pedantic)]

pub mod config;
pub mod driver;
pub mod error;
pub mod render_json;
pub mod render_xml;

pub use config::{OutputFormat, RenderConfig};
pub use driver::{DefaultDriver, MapDriver};
pub use error::DriverError;
pub use render_json::JsonRenderer;
pub use render_xml::{XmlRenderer, escape_name};
