use anyhow::Context;
use file_signature::Catalogue;

use crate::cli::FormatsArgs;

pub async fn execute(args: FormatsArgs) -> anyhow::Result<()> {
    let catalogue = Catalogue::builtin().context("Invalid built-in signature")?;
    let filter = args.filter.as_deref().map(str::to_lowercase);
    let wanted = |name: &str, description: &str| {
        filter.as_deref().is_none_or(|f| {
            name.to_lowercase().contains(f) || description.to_lowercase().contains(f)
        })
    };

    if args.parsers {
        println!("{:<38} Signatures", "Parser");
        println!("{}", "-".repeat(74));
        let mut shown = 0;
        for parser in catalogue.parsers().iter() {
            let kind = parser.kind();
            if !wanted(kind.format(), kind.description()) {
                continue;
            }
            let patterns: Vec<&str> = parser.signatures().iter().map(|s| s.source()).collect();
            println!("{:<38} {}", kind.format(), patterns.join(" | "));
            shown += 1;
        }
        println!("\n{shown} parser(s).");
        return Ok(());
    }

    println!("{:<28} {:>6}  Pattern", "Name", "Offset");
    println!("{}", "-".repeat(74));
    let mut shown = 0;
    for sig in catalogue.signatures() {
        if !wanted(sig.name(), sig.description().unwrap_or_default()) {
            continue;
        }
        println!("{:<28} {:>6}  {}", sig.name(), sig.offset(), sig.source());
        shown += 1;
    }
    println!("\n{shown} signature(s).");
    Ok(())
}
