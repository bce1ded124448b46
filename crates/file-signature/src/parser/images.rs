//! Still-image header fields.

use crate::error::ExtractError;
use crate::output::Metadata;
use crate::reader::{CursorReader, Endian};

use super::endian_label;

/// JFIF APP0 segment, immediately after SOI.
pub(super) fn jfif(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    // SOI (2) + APP0 marker (2) + segment length (2) + "JFIF\0" (5)
    reader.seek(11);
    let major = reader.consume_u8()?;
    let minor = reader.consume_u8()?;
    let units = reader.consume_u8()?;
    let x_density = reader.consume_u16(Endian::Big)?;
    let y_density = reader.consume_u16(Endian::Big)?;

    metadata.insert("JFIF Version", format!("{major}.{minor:02}"));
    metadata.insert(
        "Density Units",
        match units {
            0 => "None (aspect ratio only)".to_string(),
            1 => "Pixels per inch".to_string(),
            2 => "Pixels per centimetre".to_string(),
            other => format!("Unknown ({other})"),
        },
    );
    metadata.insert("X Density", x_density);
    metadata.insert("Y Density", y_density);
    Ok(())
}

/// APP1 "Exif\0\0" followed by a TIFF header.
pub(super) fn exif(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    const TIFF_HEADER: usize = 12;

    reader.seek(TIFF_HEADER);
    let endian = tiff_byte_order(reader)?;
    let magic_at = reader.position();
    let magic = reader.consume_u16(endian)?;
    if magic != 42 {
        return Err(ExtractError::invalid(
            format!("Unexpected TIFF magic {magic} in EXIF segment"),
            magic_at,
        ));
    }
    let ifd0 = reader.consume_u32(endian)?;

    metadata.insert("Byte Order", endian_label(endian));
    metadata.insert("IFD0 Offset", ifd0);
    Ok(())
}

pub(super) fn png(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.seek(8);
    let chunk_length = reader.consume_u32(Endian::Big)?;
    let chunk_at = reader.position();
    if reader.consume_bytes(4)? != b"IHDR" {
        return Err(ExtractError::invalid("First PNG chunk is not IHDR", chunk_at));
    }
    if chunk_length != 13 {
        return Err(ExtractError::invalid(
            format!("IHDR chunk has length {chunk_length}, expected 13"),
            8,
        ));
    }

    let width = reader.consume_u32(Endian::Big)?;
    let height = reader.consume_u32(Endian::Big)?;
    let bit_depth = reader.consume_u8()?;
    let colour_type = reader.consume_u8()?;
    // compression method, filter method
    reader.skip(2);
    let interlace = reader.consume_u8()?;

    metadata.insert("Width", width);
    metadata.insert("Height", height);
    metadata.insert("Bit Depth", bit_depth);
    metadata.insert(
        "Colour Type",
        match colour_type {
            0 => "Greyscale".to_string(),
            2 => "Truecolour".to_string(),
            3 => "Indexed-colour".to_string(),
            4 => "Greyscale with alpha".to_string(),
            6 => "Truecolour with alpha".to_string(),
            other => format!("Unknown ({other})"),
        },
    );
    metadata.insert(
        "Interlace",
        match interlace {
            0 => "None",
            1 => "Adam7",
            _ => "Unknown",
        },
    );
    Ok(())
}

pub(super) fn gif(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.skip(3);
    let version = String::from_utf8_lossy(reader.consume_bytes(3)?).into_owned();
    let width = reader.consume_u16(Endian::Little)?;
    let height = reader.consume_u16(Endian::Little)?;
    let packed = reader.consume_u8()?;

    metadata.insert("Version", version);
    metadata.insert("Width", width);
    metadata.insert("Height", height);
    let global_table = if packed & 0x80 != 0 {
        format!("Yes ({} colours)", 1u32 << ((packed & 0x07) + 1))
    } else {
        "No".to_string()
    };
    metadata.insert("Global Colour Table", global_table);
    Ok(())
}

pub(super) fn big_tiff(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    let endian = tiff_byte_order(reader)?;
    // version (43)
    reader.skip(2);
    let offset_size = reader.consume_u16(endian)?;
    if offset_size != 8 {
        return Err(ExtractError::invalid(
            format!("BigTIFF offset size is {offset_size}, expected 8"),
            4,
        ));
    }
    // reserved
    reader.skip(2);
    let first_ifd = reader.consume_u64(endian)?;

    metadata.insert("Byte Order", endian_label(endian));
    metadata.insert("Offset Size", format!("{offset_size} bytes"));
    metadata.insert("First IFD Offset", first_ifd);
    Ok(())
}

/// `II` / `MM` at the cursor.
fn tiff_byte_order(reader: &mut CursorReader<'_>) -> Result<Endian, ExtractError> {
    let at = reader.position();
    match reader.consume_bytes(2)? {
        b"II" => Ok(Endian::Little),
        b"MM" => Ok(Endian::Big),
        _ => Err(ExtractError::invalid("Unrecognised TIFF byte order", at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        f: fn(&mut CursorReader<'_>, &mut Metadata) -> Result<(), ExtractError>,
        buffer: &[u8],
    ) -> Result<Metadata, ExtractError> {
        let mut reader = CursorReader::new(buffer);
        let mut metadata = Metadata::new();
        f(&mut reader, &mut metadata)?;
        Ok(metadata)
    }

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        buffer.extend_from_slice(&13u32.to_be_bytes());
        buffer.extend_from_slice(b"IHDR");
        buffer.extend_from_slice(&width.to_be_bytes());
        buffer.extend_from_slice(&height.to_be_bytes());
        buffer.extend_from_slice(&[8, 6, 0, 0, 0]);
        buffer
    }

    #[test]
    fn png_ihdr_fields() {
        let metadata = run(png, &png_header(640, 480)).unwrap();
        let fields: Vec<(&str, &str)> = metadata.iter().collect();
        assert_eq!(
            fields,
            vec![
                ("Width", "640"),
                ("Height", "480"),
                ("Bit Depth", "8"),
                ("Colour Type", "Truecolour with alpha"),
                ("Interlace", "None"),
            ]
        );
    }

    #[test]
    fn png_without_ihdr_is_invalid() {
        let mut buffer = png_header(1, 1);
        buffer[12..16].copy_from_slice(b"IDAT");
        let err = run(png, &buffer).unwrap_err();
        assert_eq!(err, ExtractError::invalid("First PNG chunk is not IHDR", 12));
    }

    #[test]
    fn png_truncated_in_ihdr() {
        let buffer = &png_header(1, 1)[..20];
        assert!(matches!(run(png, buffer), Err(ExtractError::Read(_))));
    }

    #[test]
    fn gif_screen_descriptor() {
        let buffer = b"GIF89a\x40\x01\xF0\x00\xF7\x00\x00";
        let metadata = run(gif, buffer).unwrap();
        assert_eq!(metadata.get("Version"), Some("89a"));
        assert_eq!(metadata.get("Width"), Some("320"));
        assert_eq!(metadata.get("Height"), Some("240"));
        assert_eq!(metadata.get("Global Colour Table"), Some("Yes (256 colours)"));
    }

    #[test]
    fn jfif_version_and_density() {
        let buffer = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00\x01\x02\x01\x00\x48\x00\x48\x00\x00";
        let metadata = run(jfif, buffer).unwrap();
        assert_eq!(metadata.get("JFIF Version"), Some("1.02"));
        assert_eq!(metadata.get("Density Units"), Some("Pixels per inch"));
        assert_eq!(metadata.get("X Density"), Some("72"));
        assert_eq!(metadata.get("Y Density"), Some("72"));
    }

    #[test]
    fn exif_tiff_header() {
        let buffer = b"\xFF\xD8\xFF\xE1\x10\x00Exif\x00\x00MM\x00\x2A\x00\x00\x00\x08";
        let metadata = run(exif, buffer).unwrap();
        assert_eq!(metadata.get("Byte Order"), Some("Big-endian"));
        assert_eq!(metadata.get("IFD0 Offset"), Some("8"));

        let buffer = b"\xFF\xD8\xFF\xE1\x10\x00Exif\x00\x00II\x2A\x00\x08\x00\x00\x00";
        let metadata = run(exif, buffer).unwrap();
        assert_eq!(metadata.get("Byte Order"), Some("Little-endian"));
    }

    #[test]
    fn exif_bad_byte_order() {
        let buffer = b"\xFF\xD8\xFF\xE1\x10\x00Exif\x00\x00XX\x00\x2A";
        let err = run(exif, buffer).unwrap_err();
        assert_eq!(err, ExtractError::invalid("Unrecognised TIFF byte order", 12));
    }

    #[test]
    fn big_tiff_header() {
        let mut buffer = b"II\x2B\x00\x08\x00\x00\x00".to_vec();
        buffer.extend_from_slice(&16u64.to_le_bytes());
        let metadata = run(big_tiff, &buffer).unwrap();
        assert_eq!(metadata.get("Byte Order"), Some("Little-endian"));
        assert_eq!(metadata.get("Offset Size"), Some("8 bytes"));
        assert_eq!(metadata.get("First IFD Offset"), Some("16"));
    }

    #[test]
    fn big_tiff_rejects_odd_offset_size() {
        let buffer = b"MM\x00\x2B\x00\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\x10";
        let err = run(big_tiff, buffer).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid { offset: 4, .. }));
    }
}
