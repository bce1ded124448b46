//! RIFF / IFF style containers and OAR.

use crate::error::ExtractError;
use crate::output::Metadata;
use crate::reader::{CursorReader, Endian};
use crate::size::bytes_to_human;

// https://developers.google.com/speed/webp/docs/riff_container
pub(super) fn webp(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.skip(4);
    let file_size = u64::from(reader.consume_u32(Endian::Little)?) + 12;

    metadata.insert("File Size", bytes_to_human(file_size));
    metadata.insert("File Size Bytes", file_size);

    // The first chunk after the form type names the bitstream; a file cut
    // off right after the header still reports its size.
    reader.seek(12);
    if let Ok(fourcc) = reader.consume_bytes(4) {
        let encoding = match fourcc {
            b"VP8 " => "Lossy (VP8)",
            b"VP8L" => "Lossless (VP8L)",
            b"VP8X" => "Extended (VP8X)",
            _ => "Unknown",
        };
        metadata.insert("Encoding", encoding);
    }
    Ok(())
}

/// Canonical WAVE layout: the `fmt ` chunk directly follows the form type.
pub(super) fn wav(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.seek(12);
    if reader.consume_bytes(4)? != b"fmt " {
        return Err(ExtractError::invalid("WAVE file does not start with a fmt chunk", 12));
    }
    // chunk size
    reader.skip(4);
    let audio_format = reader.consume_u16(Endian::Little)?;
    let channels = reader.consume_u16(Endian::Little)?;
    let sample_rate = reader.consume_u32(Endian::Little)?;
    // byte rate, block align
    reader.skip(6);
    let bits_per_sample = reader.consume_u16(Endian::Little)?;

    metadata.insert(
        "Audio Format",
        match audio_format {
            0x0001 => "PCM".to_string(),
            0x0003 => "IEEE float".to_string(),
            0x0006 => "A-law".to_string(),
            0x0007 => "\u{3bc}-law".to_string(),
            0xFFFE => "Extensible".to_string(),
            other => format!("0x{other:04X}"),
        },
    );
    metadata.insert("Channels", channels);
    metadata.insert("Sample Rate", format!("{sample_rate} Hz"));
    metadata.insert("Bits Per Sample", bits_per_sample);
    Ok(())
}

pub(super) fn djvu(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    // "AT&TFORM"
    reader.skip(8);
    let form_length = reader.consume_u32(Endian::Big)?;
    // "DJV" then 'M' (bundled multi-page) or 'U' (single page)
    reader.skip(3);
    let marker_at = reader.position();
    let multipage = match reader.consume_u8()? {
        b'M' => "True",
        b'U' => "False",
        other => {
            return Err(ExtractError::invalid(
                format!("Unrecognised DjVu form type DJV{}", char::from(other)),
                marker_at,
            ));
        }
    };

    metadata.insert("Multipage", multipage);
    metadata.insert("Form Length", form_length);
    Ok(())
}

pub(super) fn oar(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.skip(3);
    let version = reader.consume_u8()?;
    metadata.insert("Format version", version);
    Ok(())
}
