//! Packet capture file headers.

use crate::error::ExtractError;
use crate::output::Metadata;
use crate::reader::{CursorReader, Endian};

use super::endian_label;

/// Byte-order magic of a pcapng section header block.
const PCAPNG_BYTE_ORDER_MAGIC: u32 = 0x1A2B_3C4D;

pub(super) fn libpcap(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    let (endian, resolution) = match reader.consume_u32(Endian::Big)? {
        0xA1B2_C3D4 => (Endian::Big, "Microseconds"),
        0xD4C3_B2A1 => (Endian::Little, "Microseconds"),
        0xA1B2_3C4D => (Endian::Big, "Nanoseconds"),
        0x4D3C_B2A1 => (Endian::Little, "Nanoseconds"),
        other => {
            return Err(ExtractError::invalid(
                format!("Unrecognised pcap magic 0x{other:08X}"),
                0,
            ));
        }
    };
    let major = reader.consume_u16(endian)?;
    let minor = reader.consume_u16(endian)?;
    // thiszone, sigfigs
    reader.skip(8);
    let snap_length = reader.consume_u32(endian)?;
    let link_type = reader.consume_u32(endian)?;

    metadata.insert("Byte Order", endian_label(endian));
    metadata.insert("Timestamp Resolution", resolution);
    metadata.insert("Version", format!("{major}.{minor}"));
    metadata.insert("Snapshot Length", snap_length);
    metadata.insert("Link Type", link_type_name(link_type));
    Ok(())
}

/// Section header block at the start of a pcapng file.
pub(super) fn pcapng(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    // The block length precedes the byte-order magic, so read the magic first.
    reader.seek(8);
    let endian = match reader.peek_u32(Endian::Little)? {
        PCAPNG_BYTE_ORDER_MAGIC => Endian::Little,
        m if m.swap_bytes() == PCAPNG_BYTE_ORDER_MAGIC => Endian::Big,
        other => {
            return Err(ExtractError::invalid(
                format!("Unrecognised pcapng byte-order magic 0x{other:08X}"),
                8,
            ));
        }
    };

    reader.seek(4);
    let block_length = reader.consume_u32(endian)?;
    reader.skip(4);
    let major = reader.consume_u16(endian)?;
    let minor = reader.consume_u16(endian)?;
    let section_length = reader.consume_u64(endian)?;

    metadata.insert("Byte Order", endian_label(endian));
    metadata.insert("Version", format!("{major}.{minor}"));
    metadata.insert("Block Length", block_length);
    metadata.insert(
        "Section Length",
        if section_length == u64::MAX {
            "Unspecified".to_string()
        } else {
            section_length.to_string()
        },
    );
    Ok(())
}

fn link_type_name(link_type: u32) -> String {
    match link_type {
        0 => "BSD loopback".to_string(),
        1 => "Ethernet".to_string(),
        101 => "Raw IP".to_string(),
        105 => "IEEE 802.11".to_string(),
        113 => "Linux cooked capture".to_string(),
        127 => "IEEE 802.11 radiotap".to_string(),
        228 => "Raw IPv4".to_string(),
        229 => "Raw IPv6".to_string(),
        other => other.to_string(),
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

    #[test]
    fn libpcap_little_endian_header() {
        let mut buffer = vec![0xD4, 0xC3, 0xB2, 0xA1];
        buffer.extend_from_slice(&2u16.to_le_bytes());
        buffer.extend_from_slice(&4u16.to_le_bytes());
        buffer.extend_from_slice(&[0; 8]);
        buffer.extend_from_slice(&65_535u32.to_le_bytes());
        buffer.extend_from_slice(&1u32.to_le_bytes());

        let metadata = run(libpcap, &buffer).unwrap();
        assert_eq!(metadata.get("Byte Order"), Some("Little-endian"));
        assert_eq!(metadata.get("Timestamp Resolution"), Some("Microseconds"));
        assert_eq!(metadata.get("Version"), Some("2.4"));
        assert_eq!(metadata.get("Snapshot Length"), Some("65535"));
        assert_eq!(metadata.get("Link Type"), Some("Ethernet"));
    }

    #[test]
    fn libpcap_big_endian_nanosecond_header() {
        let mut buffer = vec![0xA1, 0xB2, 0x3C, 0x4D];
        buffer.extend_from_slice(&2u16.to_be_bytes());
        buffer.extend_from_slice(&4u16.to_be_bytes());
        buffer.extend_from_slice(&[0; 8]);
        buffer.extend_from_slice(&262_144u32.to_be_bytes());
        buffer.extend_from_slice(&1u32.to_be_bytes());

        let metadata = run(libpcap, &buffer).unwrap();
        assert_eq!(metadata.get("Byte Order"), Some("Big-endian"));
        assert_eq!(metadata.get("Timestamp Resolution"), Some("Nanoseconds"));
        assert_eq!(metadata.get("Version"), Some("2.4"));
        assert_eq!(metadata.get("Snapshot Length"), Some("262144"));
        assert_eq!(metadata.get("Link Type"), Some("Ethernet"));
    }

    #[test]
    fn libpcap_truncated() {
        let buffer = [0xA1, 0xB2, 0xC3, 0xD4, 0x00, 0x02];
        let err = run(libpcap, &buffer).unwrap_err();
        assert!(matches!(err, ExtractError::Read(_)));
    }

    #[test]
    fn pcapng_big_endian_section_header() {
        let mut buffer = vec![0x0A, 0x0D, 0x0D, 0x0A];
        buffer.extend_from_slice(&28u32.to_be_bytes());
        buffer.extend_from_slice(&PCAPNG_BYTE_ORDER_MAGIC.to_be_bytes());
        buffer.extend_from_slice(&1u16.to_be_bytes());
        buffer.extend_from_slice(&0u16.to_be_bytes());
        buffer.extend_from_slice(&u64::MAX.to_be_bytes());

        let metadata = run(pcapng, &buffer).unwrap();
        assert_eq!(metadata.get("Byte Order"), Some("Big-endian"));
        assert_eq!(metadata.get("Version"), Some("1.0"));
        assert_eq!(metadata.get("Block Length"), Some("28"));
        assert_eq!(metadata.get("Section Length"), Some("Unspecified"));
    }

    #[test]
    fn pcapng_bad_byte_order_magic() {
        let mut buffer = vec![0x0A, 0x0D, 0x0D, 0x0A];
        buffer.extend_from_slice(&28u32.to_le_bytes());
        buffer.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let err = run(pcapng, &buffer).unwrap_err();
        assert!(matches!(err, ExtractError::Invalid { offset: 8, .. }));
    }
}
