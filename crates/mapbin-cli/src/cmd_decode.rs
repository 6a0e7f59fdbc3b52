/// Implementation of `mapbin decode`.
///
/// Reads a map file (or stdin), decodes it with the configured limits,
/// and renders the tree through `DefaultDriver`. The output is written to
/// stdout or to `-o <file>`.
///
/// # Output formats
///
/// ```text
/// ┌──────┬────────────────────────────────────────────────────────────────┐
/// │ Mode │ Format                                                         │
/// ├──────┼────────────────────────────────────────────────────────────────┤
/// │ json │ {"name": "...", "attributes": {...}, "children": [...]} (dflt) │
/// │ xml  │ <CelesteMap Package="..."><levels>...</levels></CelesteMap>    │
/// └──────┴────────────────────────────────────────────────────────────────┘
/// ```
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use mapbin_driver::{DefaultDriver, MapDriver, OutputFormat, RenderConfig};

use crate::source::load_or_fail;
use crate::{DecodeArgs, FormatArg};

/// Run the `mapbin decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, the renderer
/// fails, or the output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let decoded = load_or_fail(&args.file, &args.limits.decoder_config())?;

    let config = render_config(args);
    let rendered = DefaultDriver
        .render(&decoded.header, &decoded.root, &config)
        .context("render failed")?;

    if let Some(path) = &args.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
        if !rendered.ends_with('\n') {
            handle.write_all(b"\n").context("cannot write to stdout")?;
        }
    }

    Ok(())
}

fn render_config(args: &DecodeArgs) -> RenderConfig {
    RenderConfig {
        format: match args.format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Xml => OutputFormat::Xml,
        },
        pretty: !args.compact,
        xml_declaration: args.xml_declaration,
    }
}
