/// Implementation of `mapbin inspect`.
///
/// Prints a summary of the decoded document without rendering it.
///
/// ```text
/// Header:        CELESTE MAP
/// Package:       1-ForsakenCity
/// String table:  412 entries
/// Nodes:         18344
/// Depth:         5
/// Trailing:      0 bytes
/// ```
///
/// With `--children`, each top-level child of the root follows as one
/// line: its name, attribute count, and subtree size.
use anyhow::Result;

use crate::InspectArgs;
use crate::source::load_or_fail;

/// Run the `mapbin inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded.
pub fn run(args: &InspectArgs) -> Result<()> {
    let decoded = load_or_fail(&args.file, &args.limits.decoder_config())?;

    println!("Header:        {}", decoded.header.tag);
    println!("Package:       {}", decoded.header.package);
    println!("String table:  {} entries", decoded.lookup_len);
    println!("Nodes:         {}", decoded.root.node_count());
    println!("Depth:         {}", decoded.root.depth());
    println!("Trailing:      {} bytes", decoded.trailing_bytes);

    if args.children {
        println!();
        println!("{:<24} {:>6} {:>8}", "Child", "Attrs", "Nodes");
        for child in &decoded.root.children {
            println!(
                "{:<24} {:>6} {:>8}",
                child.name,
                child.attributes.len(),
                child.node_count()
            );
        }
    }

    Ok(())
}
