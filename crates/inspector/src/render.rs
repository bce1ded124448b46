//! Plain-text rendering of an inspection.

use std::fmt::Write;

use file_signature::{Inspection, ParseOutcome, SignatureMatch, bytes_to_human};

const ROW_WIDTH: usize = 16;
/// Offset column plus its two-space gutter.
const GUTTER: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub hex_bytes: usize,
    pub show_alternatives: bool,
}

/// Hex dump of the first `len` bytes, with a `^^` marker row under every
/// byte the match compared.
pub fn hex_dump(buffer: &[u8], len: usize, highlighted: Option<&SignatureMatch>) -> String {
    let shown = &buffer[..len.min(buffer.len())];
    let mut out = String::new();

    for (row, chunk) in shown.chunks(ROW_WIDTH).enumerate() {
        let base = row * ROW_WIDTH;
        let mut hex = String::with_capacity(ROW_WIDTH * 3);
        let mut ascii = String::with_capacity(ROW_WIDTH);
        let mut markers = String::with_capacity(ROW_WIDTH * 3);
        for (i, b) in chunk.iter().enumerate() {
            let _ = write!(hex, "{b:02x} ");
            ascii.push(if b.is_ascii_graphic() || *b == b' ' {
                char::from(*b)
            } else {
                '.'
            });
            let relevant = highlighted.is_some_and(|m| m.is_relevant(base + i));
            markers.push_str(if relevant { "^^ " } else { "   " });
        }

        let _ = writeln!(out, "{base:08x}  {hex:<width$} |{ascii}|", width = ROW_WIDTH * 3);
        if markers.contains('^') {
            let _ = writeln!(out, "{:width$}{}", "", markers.trim_end(), width = GUTTER);
        }
    }
    out
}

pub fn render_inspection(inspection: &Inspection, buffer: &[u8], opts: RenderOptions) -> String {
    let mut out = String::new();
    let file = &inspection.file;

    let _ = writeln!(out, "File:      {}", file.file_name);
    let _ = writeln!(out, "Size:      {} ({} bytes)", bytes_to_human(file.size), file.size);
    if let Some(modified) = file.last_modified {
        let _ = writeln!(out, "Modified:  {}", modified.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    match (inspection.format_name(), inspection.highlighted()) {
        (Some(name), Some(m)) => {
            let description = inspection
                .output()
                .map(|o| o.file.description.as_str())
                .or(m.description.as_deref());
            match description {
                Some(d) => {
                    let _ = writeln!(out, "Format:    {name} ({d})");
                }
                None => {
                    let _ = writeln!(out, "Format:    {name}");
                }
            }
            let _ = writeln!(
                out,
                "Match:     {} of {} bytes at offset {}",
                m.specificity(),
                m.pattern_length,
                m.signature_offset
            );
        }
        _ => {
            let _ = writeln!(out, "Format:    unknown");
        }
    }

    if opts.show_alternatives && !inspection.alternatives.is_empty() {
        let names: Vec<String> = inspection
            .alternatives
            .iter()
            .map(|m| format!("{} ({})", m.name, m.specificity()))
            .collect();
        let _ = writeln!(out, "Also:      {}", names.join(", "));
    }

    out.push('\n');
    out.push_str(&hex_dump(buffer, opts.hex_bytes, inspection.highlighted()));

    match &inspection.parsed {
        ParseOutcome::Parsed(output) if !output.metadata.is_empty() => {
            let width = output.metadata.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
            out.push_str("\nMetadata:\n");
            for (label, value) in output.metadata.iter() {
                let _ = writeln!(out, "  {label:<width$}  {value}");
            }
        }
        ParseOutcome::Failed(e) => {
            let _ = write!(out, "\nParse error: {}", e.message);
            if let Some(index) = e.byte_index {
                let _ = write!(out, " (at byte {index})");
            }
            out.push('\n');
        }
        _ => {}
    }
    out
}
