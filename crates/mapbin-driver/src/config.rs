/// Configuration for rendering a decoded map.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                          │
/// ├─────────────────┼──────────────────────────────────────────────────┤
/// │ format          │ Selects the JSON or XML renderer                 │
/// │ pretty          │ Indent output (both formats)                     │
/// │ xml_declaration │ Prefix XML output with <?xml …?>                 │
/// └─────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub xml_declaration: bool,
}

impl Default for RenderConfig {
    /// JSON, pretty-printed, no XML declaration.
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            xml_declaration: false,
        }
    }
}

/// Output representations of a decoded map.
///
/// The two formats carry the header differently:
///
/// ```text
/// ┌────────┬─────────────────────────────────────────────────────────────┐
/// │ Format │ Root attributes added from the header                       │
/// ├────────┼─────────────────────────────────────────────────────────────┤
/// │ Json   │ "Header" (document tag) and "Package"                       │
/// │ Xml    │ "Package" only; the tag is dropped                          │
/// └────────┴─────────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{name, attributes, children}` objects, native value types.
    Json,
    /// One element per node, attributes as text.
    Xml,
}
