use mapbin_types::Node;
use mapbin_wire::MapHeader;

use crate::config::{OutputFormat, RenderConfig};
use crate::error::DriverError;
use crate::render_json::JsonRenderer;
use crate::render_xml::XmlRenderer;

/// Renders a decoded map into an external text representation.
///
/// Implementations are stateless; everything they need comes from the
/// decoded header, the root node, and the [`RenderConfig`].
///
/// ```text
/// (MapHeader, Node) ──▶ MapDriver::render() ──▶ String
///                              │
///                        RenderConfig
///                      (format, pretty, …)
/// ```
pub trait MapDriver {
    /// # Errors
    ///
    /// [`DriverError`] if the output encoder fails.
    fn render(&self, header: &MapHeader, root: &Node, config: &RenderConfig) -> Result<String, DriverError>;
}

/// Dispatches to [`JsonRenderer`] or [`XmlRenderer`] by
/// `config.format`.
pub struct DefaultDriver;

impl MapDriver for DefaultDriver {
    fn render(&self, header: &MapHeader, root: &Node, config: &RenderConfig) -> Result<String, DriverError> {
        match config.format {
            OutputFormat::Json => JsonRenderer::render(header, root, config.pretty),
            OutputFormat::Xml => Ok(XmlRenderer::render(
                header,
                root,
                config.pretty,
                config.xml_declaration,
            )),
        }
    }
}
