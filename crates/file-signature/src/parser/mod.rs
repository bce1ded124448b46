//! Format parsers and specificity-based dispatch.
//!
//! Each [`ParserKind`] owns a small set of signature variants and a fixed
//! header layout.  Dispatch asks every parser whether it recognises the
//! buffer, keeps the one whose match compared the most literal bytes, and
//! only then runs that parser's extractor.  RIFF-based formats are the
//! motivating case: a WebP file also satisfies a bare `RIFF` prefix, but the
//! WebP signature compares the `WEBP` tag as well and therefore wins.

mod captures;
mod containers;
mod images;
mod legacy;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, ParserError};
use crate::output::{FileDescriptor, FileInfo, Metadata, ParserOutput};
use crate::reader::{CursorReader, Endian};
use crate::signature::{Signature, SignatureError, SignatureMatch};

//  Parser kinds

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParserKind {
    Jpeg,
    JpegJfif,
    JpegExif,
    Png,
    Gif,
    BigTiff,
    WebP,
    Wav,
    DjVu,
    Oar,
    AmigaHunk,
    KindleUpdate,
    Lotus123V1,
    Lotus123V9,
    PcapNg,
    Libpcap,
    QuarkExpress,
    ClarisWorks,
}

impl ParserKind {
    /// Every parser, in registration order.
    pub const ALL: [ParserKind; 18] = [
        Self::Jpeg,
        Self::JpegJfif,
        Self::JpegExif,
        Self::Png,
        Self::Gif,
        Self::BigTiff,
        Self::WebP,
        Self::Wav,
        Self::DjVu,
        Self::Oar,
        Self::AmigaHunk,
        Self::KindleUpdate,
        Self::Lotus123V1,
        Self::Lotus123V9,
        Self::PcapNg,
        Self::Libpcap,
        Self::QuarkExpress,
        Self::ClarisWorks,
    ];

    pub fn format(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::JpegJfif => "JPEG JFIF",
            Self::JpegExif => "JPEG EXIF",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::BigTiff => "BigTIFF",
            Self::WebP => "WebP",
            Self::Wav => "WAV",
            Self::DjVu => "DjVu",
            Self::Oar => "OAR",
            Self::AmigaHunk => "Amiga Hunk",
            Self::KindleUpdate => "Amazon Kindle Update Package",
            Self::Lotus123V1 => "Lotus 1-2-3 Spreadsheet V1",
            Self::Lotus123V9 => "Lotus 1-2-3 Spreadsheet V9",
            Self::PcapNg => "PCAP NextGen Dump File",
            Self::Libpcap => "Libpcap File Format",
            Self::QuarkExpress => "Quark Express",
            Self::ClarisWorks => "ClarisWorks Word Processing Document",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG image",
            Self::JpegJfif => "JPEG image with JFIF metadata",
            Self::JpegExif => "JPEG image with EXIF metadata",
            Self::Png => "PNG image",
            Self::Gif => "Graphics Interchange Format",
            Self::BigTiff => "Big Tagged Image File Format",
            Self::WebP => "WebP image",
            Self::Wav => "Waveform audio",
            Self::DjVu => "DjVu document",
            Self::Oar => "OAR archive",
            Self::AmigaHunk => "Amiga Hunk executable",
            Self::KindleUpdate => "An update package for Amazon Kindle devices",
            Self::Lotus123V1 => "Lotus 1-2-3 Spreadsheet V1",
            Self::Lotus123V9 => "Lotus 1-2-3 Spreadsheet V9",
            Self::PcapNg => "PCAP NextGen Dump File",
            Self::Libpcap => "Libpcap File Format",
            Self::QuarkExpress => "Quark Express Document",
            Self::ClarisWorks => "ClarisWorks Word Processing Document",
        }
    }

    /// Signature variants this parser accepts.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["FF D8 FF DB", "FF D8 FF EE", "FF D8 FF E0"],
            Self::JpegJfif => &["FF D8 FF E0 ?? ?? 4A 46 49 46 00"],
            Self::JpegExif => &["FF D8 FF E1 ?? ?? 45 78 69 66 00"],
            Self::Png => &["89 50 4E 47 0D 0A 1A 0A"],
            Self::Gif => &["47 49 46 38 37 61", "47 49 46 38 39 61"],
            Self::BigTiff => &["4D 4D 00 2B", "49 49 2B 00"],
            Self::WebP => &["52 49 46 46 ?? ?? ?? ?? 57 45 42 50"],
            Self::Wav => &["52 49 46 46 ?? ?? ?? ?? 57 41 56 45"],
            Self::DjVu => &["41 54 26 54 46 4F 52 4D ?? ?? ?? ?? 44 4A 56"],
            Self::Oar => &["4F 41 52 ??"],
            Self::AmigaHunk => &["00 00 03 F3"],
            Self::KindleUpdate => &["53 50 30 31"],
            Self::Lotus123V1 => &["00 00 02 00 06 04 06 00 08 00 00 00 00 00"],
            Self::Lotus123V9 => &["00 00 1A 00 05 10 04"],
            Self::PcapNg => &["0A 0D 0D 0A"],
            Self::Libpcap => &["A1 B2 C3 D4", "D4 C3 B2 A1", "A1 B2 3C 4D", "4D 3C B2 A1"],
            Self::QuarkExpress => &["00 00 4D 4D 58 50 52", "00 00 49 49 58 50 52"],
            Self::ClarisWorks => &["02 00 5A 57 52 54 00 00 00 00 00 00 00 00 00 00"],
        }
    }

    fn extract(
        self,
        reader: &mut CursorReader<'_>,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        match self {
            Self::JpegJfif => images::jfif(reader, metadata),
            Self::JpegExif => images::exif(reader, metadata),
            Self::Png => images::png(reader, metadata),
            Self::Gif => images::gif(reader, metadata),
            Self::BigTiff => images::big_tiff(reader, metadata),
            Self::WebP => containers::webp(reader, metadata),
            Self::Wav => containers::wav(reader, metadata),
            Self::DjVu => containers::djvu(reader, metadata),
            Self::Oar => containers::oar(reader, metadata),
            Self::AmigaHunk => legacy::amiga_hunk(reader, metadata),
            Self::QuarkExpress => legacy::quark_express(reader, metadata),
            Self::PcapNg => captures::pcapng(reader, metadata),
            Self::Libpcap => captures::libpcap(reader, metadata),
            // Recognised by signature only.
            Self::Jpeg
            | Self::KindleUpdate
            | Self::Lotus123V1
            | Self::Lotus123V9
            | Self::ClarisWorks => Ok(()),
        }
    }
}

pub(crate) fn endian_label(endian: Endian) -> &'static str {
    match endian {
        Endian::Big => "Big-endian",
        Endian::Little => "Little-endian",
    }
}

//  Format parser

#[derive(Debug, Clone)]
pub struct FormatParser {
    kind: ParserKind,
    signatures: Vec<Signature>,
}

impl FormatParser {
    pub fn new(kind: ParserKind) -> Result<Self, SignatureError> {
        let signatures = kind
            .patterns()
            .iter()
            .map(|p| {
                Signature::new(kind.format(), p).map(|s| s.with_description(kind.description()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kind, signatures })
    }

    pub fn kind(&self) -> ParserKind {
        self.kind
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The most specific of this parser's signatures that matches `buffer`.
    pub fn can_read_file(&self, buffer: &[u8]) -> Option<SignatureMatch> {
        let mut best: Option<SignatureMatch> = None;
        for candidate in self.signatures.iter().filter_map(|s| s.matches(buffer)) {
            if best.as_ref().is_none_or(|b| candidate.outranks(b)) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Re-check the signature, then read the format's header fields.
    pub fn parse(&self, buffer: &[u8], info: &FileInfo) -> Result<ParserOutput, ParserError> {
        let signature = self
            .can_read_file(buffer)
            .ok_or_else(|| ParserError::new("Invalid file format"))?;

        let mut reader = CursorReader::new(buffer);
        let mut metadata = Metadata::new();
        self.kind
            .extract(&mut reader, &mut metadata)
            .map_err(|e| e.into_parser_error(buffer))?;

        Ok(ParserOutput {
            file: FileDescriptor {
                format: self.kind.format().to_string(),
                description: self.kind.description().to_string(),
                file_name: info.file_name.clone(),
                last_modified: info.last_modified,
                size: info.size,
            },
            signature,
            metadata,
        })
    }
}

//  Registry & dispatch

#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    parsers: Vec<FormatParser>,
}

impl ParserRegistry {
    pub fn new(parsers: Vec<FormatParser>) -> Self {
        Self { parsers }
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatParser> {
        self.parsers.iter()
    }

    /// Parser with the most specific match, evaluated over every parser
    /// before any of them runs.
    pub fn select(&self, buffer: &[u8]) -> Option<(&FormatParser, SignatureMatch)> {
        let mut best: Option<(&FormatParser, SignatureMatch)> = None;
        for parser in &self.parsers {
            let Some(candidate) = parser.can_read_file(buffer) else {
                continue;
            };
            if best.as_ref().is_none_or(|(_, b)| candidate.outranks(b)) {
                best = Some((parser, candidate));
            }
        }
        best
    }

    pub fn dispatch(&self, buffer: &[u8], info: &FileInfo) -> Result<ParserOutput, ParserError> {
        let Some((parser, signature)) = self.select(buffer) else {
            debug!(file = %info.file_name, "no parser recognises buffer");
            return Err(ParserError::unknown_format());
        };

        debug!(
            file = %info.file_name,
            parser = parser.kind().format(),
            specificity = signature.specificity(),
            "dispatching parser"
        );
        let result = parser.parse(buffer, info);
        if let Err(e) = &result {
            debug!(
                parser = parser.kind().format(),
                error = %e,
                byte_index = ?e.byte_index,
                "parse failed"
            );
        }
        result
    }
}

/// Build one parser per [`ParserKind`].
pub fn builtin() -> Result<ParserRegistry, SignatureError> {
    let parsers = ParserKind::ALL
        .into_iter()
        .map(FormatParser::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParserRegistry::new(parsers))
}

/// Select and run the most specific parser for `buffer`.
pub fn dispatch_parser(
    parsers: &ParserRegistry,
    buffer: &[u8],
    info: &FileInfo,
) -> Result<ParserOutput, ParserError> {
    parsers.dispatch(buffer, info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> FileInfo {
        FileInfo::new("sample.bin", 1234)
    }

    #[test]
    fn every_kind_builds() {
        let registry = builtin().unwrap();
        assert_eq!(registry.len(), ParserKind::ALL.len());
        for parser in registry.iter() {
            assert!(!parser.signatures().is_empty());
            for sig in parser.signatures() {
                assert_eq!(sig.name(), parser.kind().format());
                assert!(sig.specificity() > 0);
            }
        }
    }

    #[test]
    fn unknown_buffer_is_unknown_format() {
        let registry = builtin().unwrap();
        let err = registry.dispatch(b"hello world", &info()).unwrap_err();
        assert!(err.is_unknown_format());
        assert_eq!(err.byte_index, None);
    }

    #[test]
    fn webp_wins_over_wav_and_riff() {
        let registry = builtin().unwrap();
        let mut buffer = b"RIFF".to_vec();
        buffer.extend_from_slice(&1000u32.to_le_bytes());
        buffer.extend_from_slice(b"WEBPVP8L");
        let (parser, m) = registry.select(&buffer).unwrap();
        assert_eq!(parser.kind(), ParserKind::WebP);
        assert_eq!(m.specificity(), 8);
    }

    #[test]
    fn jfif_beats_plain_jpeg_parser() {
        let registry = builtin().unwrap();
        let buffer = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00\x01\x01\x01\x00\x48\x00\x48\x00\x00";
        let (parser, _) = registry.select(buffer).unwrap();
        assert_eq!(parser.kind(), ParserKind::JpegJfif);
    }

    #[test]
    fn output_carries_file_descriptor() {
        let registry = builtin().unwrap();
        let modified = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let info = FileInfo::new("update.bin", 42).with_last_modified(modified);
        let out = registry.dispatch(b"SP01\x00\x00", &info).unwrap();
        assert_eq!(out.file.format, "Amazon Kindle Update Package");
        assert_eq!(out.file.file_name, "update.bin");
        assert_eq!(out.file.size, 42);
        assert_eq!(out.file.last_modified, Some(modified));
        assert_eq!(out.signature.relevant_bytes, vec![0, 1, 2, 3]);
        assert!(out.metadata.is_empty());
    }

    #[test]
    fn signature_only_formats_dispatch_with_empty_metadata() {
        let registry = builtin().unwrap();
        let mut claris = vec![0x02, 0x00, 0x5A, 0x57, 0x52, 0x54];
        claris.extend_from_slice(&[0; 12]);
        let cases: [(&[u8], &str); 3] = [
            (
                b"\x00\x00\x02\x00\x06\x04\x06\x00\x08\x00\x00\x00\x00\x00\x01",
                "Lotus 1-2-3 Spreadsheet V1",
            ),
            (b"\x00\x00\x1A\x00\x05\x10\x04\x00", "Lotus 1-2-3 Spreadsheet V9"),
            (&claris, "ClarisWorks Word Processing Document"),
        ];
        for (buffer, format) in cases {
            let out = registry.dispatch(buffer, &info()).unwrap();
            assert_eq!(out.file.format, format);
            assert!(out.metadata.is_empty());
        }
    }

    #[test]
    fn parse_rejects_foreign_buffer() {
        let parser = FormatParser::new(ParserKind::Png).unwrap();
        let err = parser.parse(b"GIF89a", &info()).unwrap_err();
        assert_eq!(err.message, "Invalid file format");
    }

    #[test]
    fn truncated_header_is_reported_not_panicked() {
        let registry = builtin().unwrap();
        // PNG signature with no IHDR chunk behind it.
        let err = registry
            .dispatch(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00], &info())
            .unwrap_err();
        assert_eq!(err.byte_index, Some(8));
        assert_eq!(
            err.data_slice,
            vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00]
        );
    }

    #[test]
    fn dispatch_is_idempotent() {
        let registry = builtin().unwrap();
        let buffer = b"OAR\x03rest-of-archive";
        let first = dispatch_parser(&registry, buffer, &info());
        let second = dispatch_parser(&registry, buffer, &info());
        assert_eq!(first, second);
    }
}
