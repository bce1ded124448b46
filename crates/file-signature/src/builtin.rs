//! Built-in signature catalogue.
//!
//! Entries are listed roughly most-common-first inside each group; the
//! order is also the tie-break order of [`SignatureRegistry`].
//!
//! References:
//! https://www.garykessler.net/library/file_sigs.html
//! https://en.wikipedia.org/wiki/List_of_file_signatures

use tracing::debug;

use crate::registry::SignatureRegistry;
use crate::signature::{Signature, SignatureError};

/// Static description of one catalogue entry.
#[derive(Debug, Clone, Copy)]
pub struct SignatureDef {
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: &'static str,
    pub offset: usize,
}

impl SignatureDef {
    pub fn build(&self) -> Result<Signature, SignatureError> {
        Ok(Signature::new(self.name, self.pattern)?
            .with_offset(self.offset)
            .with_description(self.description))
    }
}

const fn sig(name: &'static str, description: &'static str, pattern: &'static str) -> SignatureDef {
    sig_at(0, name, description, pattern)
}

const fn sig_at(
    offset: usize,
    name: &'static str,
    description: &'static str,
    pattern: &'static str,
) -> SignatureDef {
    SignatureDef {
        name,
        description,
        pattern,
        offset,
    }
}

/// Build the registry from [`BUILTIN_SIGNATURES`].
///
/// Fails only if an entry's pattern is malformed, which is a defect in the
/// table rather than a runtime condition.
pub fn builtin() -> Result<SignatureRegistry, SignatureError> {
    let signatures = BUILTIN_SIGNATURES
        .iter()
        .map(SignatureDef::build)
        .collect::<Result<Vec<_>, _>>()?;
    let registry = SignatureRegistry::from_signatures(signatures);
    debug!(count = registry.len(), "built-in signature catalogue loaded");
    Ok(registry)
}

#[rustfmt::skip]
pub static BUILTIN_SIGNATURES: &[SignatureDef] = &[
    //  Images
    sig("JPEG", "JPEG raw image", "FF D8 FF DB"),
    sig("JPEG", "JPEG image (Samsung D500)", "FF D8 FF EE"),
    sig("JPEG", "JPEG image", "FF D8 FF E0"),
    sig("JPEG JFIF", "JPEG image with JFIF metadata", "FF D8 FF E0 ?? ?? 4A 46 49 46 00"),
    sig("JPEG EXIF", "JPEG image with EXIF metadata", "FF D8 FF E1 ?? ?? 45 78 69 66 00"),
    sig("JPEG 2000", "JPEG 2000 image (JP2 container)", "00 00 00 0C 6A 50 20 20 0D 0A 87 0A"),
    sig("JPEG 2000", "JPEG 2000 codestream", "FF 4F FF 51"),
    sig("JPEG XL", "JPEG XL codestream", "FF 0A"),
    sig("JPEG XL", "JPEG XL image (ISOBMFF container)", "00 00 00 0C 4A 58 4C 20 0D 0A 87 0A"),
    sig("PNG", "Portable Network Graphics image", "89 50 4E 47 0D 0A 1A 0A"),
    sig("GIF", "Graphics Interchange Format (87a)", "47 49 46 38 37 61"),
    sig("GIF", "Graphics Interchange Format (89a)", "47 49 46 38 39 61"),
    sig("BMP", "Windows bitmap image", "42 4D"),
    sig("TIFF", "Tagged Image File Format (little-endian)", "49 49 2A 00"),
    sig("TIFF", "Tagged Image File Format (big-endian)", "4D 4D 00 2A"),
    sig("BigTIFF", "Big Tagged Image File Format (big-endian)", "4D 4D 00 2B"),
    sig("BigTIFF", "Big Tagged Image File Format (little-endian)", "49 49 2B 00"),
    sig("DNG", "Adobe Digital Negative", "49 49 2A 00 08 00 00 00 44 4E 47 00"),
    sig("CR2", "Canon RAW 2 image", "49 49 2A 00 10 00 00 00 43 52 02 00"),
    sig("NEF", "Nikon Electronic Format image", "49 49 2A 00 08 00 00 00 4E 45 46 00"),
    sig("ORF", "Olympus RAW image", "49 49 52 4F 08 00 00 00"),
    sig("RW2", "Panasonic RAW image", "49 49 55 00"),
    sig("RAF", "Fujifilm RAW image", "46 55 4A 49 46 49 4C 4D 43 43 44 2D 52 41 57"),
    sig("WebP", "WebP image (RIFF container)", "52 49 46 46 ?? ?? ?? ?? 57 45 42 50"),
    sig("ICO", "Windows icon", "00 00 01 00"),
    sig("CUR", "Windows cursor", "00 00 02 00"),
    sig("PSD", "Adobe Photoshop document", "38 42 50 53"),
    sig("XCF", "GIMP image", "67 69 6D 70 20 78 63 66"),
    sig("OpenEXR", "OpenEXR high dynamic range image", "76 2F 31 01"),
    sig("QOI", "Quite OK Image", "71 6F 69 66"),
    sig("Radiance HDR", "Radiance high dynamic range image", "23 3F 52 41 44 49 41 4E 43 45 0A"),
    sig("DPX", "Digital Picture Exchange (big-endian)", "53 44 50 58"),
    sig("DPX", "Digital Picture Exchange (little-endian)", "58 50 44 53"),
    sig("Cineon", "Kodak Cineon image", "80 2A 5F D7"),
    sig("FLIF", "Free Lossless Image Format", "46 4C 49 46"),
    sig("farbfeld", "farbfeld image", "66 61 72 62 66 65 6C 64"),
    sig("ILBM", "IFF Interleaved Bitmap", "46 4F 52 4D ?? ?? ?? ?? 49 4C 42 4D"),
    sig("DjVu", "DjVu document (single page)", "41 54 26 54 46 4F 52 4D ?? ?? ?? ?? 44 4A 56 55"),
    sig("DjVu", "DjVu document (multi-page)", "41 54 26 54 46 4F 52 4D ?? ?? ?? ?? 44 4A 56 4D"),
    sig_at(4, "HEIC", "High Efficiency Image File", "66 74 79 70 68 65 69 63"),
    sig_at(4, "HEIF", "High Efficiency Image File", "66 74 79 70 6D 69 66 31"),
    sig_at(4, "AVIF", "AV1 Image File Format", "66 74 79 70 61 76 69 66"),

    //  Audio
    sig("MP3", "MPEG-1 Layer 3 audio with ID3v2 tag", "49 44 33"),
    sig("MP3", "MPEG-1 Layer 3 audio frame", "FF FB"),
    sig("MP3", "MPEG-2 Layer 3 audio frame", "FF F3"),
    sig("MP3", "MPEG-2.5 Layer 3 audio frame", "FF F2"),
    sig("AAC", "AAC audio (ADTS, MPEG-4)", "FF F1"),
    sig("AAC", "AAC audio (ADTS, MPEG-2)", "FF F9"),
    sig("FLAC", "Free Lossless Audio Codec", "66 4C 61 43"),
    sig("Ogg", "Ogg container", "4F 67 67 53"),
    sig_at(28, "Opus", "Opus audio in Ogg", "4F 70 75 73 48 65 61 64"),
    sig("WAV", "Waveform audio (RIFF container)", "52 49 46 46 ?? ?? ?? ?? 57 41 56 45"),
    sig("AIFF", "Audio Interchange File Format", "46 4F 52 4D ?? ?? ?? ?? 41 49 46 46"),
    sig("AIFF-C", "Compressed Audio Interchange File Format", "46 4F 52 4D ?? ?? ?? ?? 41 49 46 43"),
    sig("MIDI", "Standard MIDI file", "4D 54 68 64"),
    sig("AU", "Sun/NeXT audio", "2E 73 6E 64"),
    sig("AMR", "Adaptive Multi-Rate audio", "23 21 41 4D 52"),
    sig("CAF", "Apple Core Audio Format", "63 61 66 66"),
    sig("WavPack", "WavPack audio", "77 76 70 6B"),
    sig("APE", "Monkey's Audio", "4D 41 43 20"),
    sig("VOC", "Creative Voice File", "43 72 65 61 74 69 76 65 20 56 6F 69 63 65 20 46 69 6C 65"),
    sig("XM", "FastTracker 2 Extended Module", "45 78 74 65 6E 64 65 64 20 4D 6F 64 75 6C 65 3A"),
    sig("IT", "Impulse Tracker module", "49 4D 50 4D"),
    sig_at(44, "S3M", "Scream Tracker 3 module", "53 43 52 4D"),
    sig_at(1080, "MOD", "ProTracker module", "4D 2E 4B 2E"),
    sig_at(4, "M4A", "MPEG-4 audio", "66 74 79 70 4D 34 41 20"),

    //  Video
    sig("AVI", "Audio Video Interleave (RIFF container)", "52 49 46 46 ?? ?? ?? ?? 41 56 49 20"),
    sig("RIFF", "Resource Interchange File Format container", "52 49 46 46"),
    sig("Matroska", "Matroska / WebM (EBML)", "1A 45 DF A3"),
    sig("FLV", "Flash Video", "46 4C 56 01"),
    sig("ASF", "Advanced Systems Format (WMV/WMA)", "30 26 B2 75 8E 66 CF 11 A6 D9 00 AA 00 62 CE 6C"),
    sig("MPEG-PS", "MPEG program stream", "00 00 01 BA"),
    sig("MPEG", "MPEG-1/2 video elementary stream", "00 00 01 B3"),
    sig("SWF", "Shockwave Flash (uncompressed)", "46 57 53"),
    sig("SWF", "Shockwave Flash (zlib)", "43 57 53"),
    sig("SWF", "Shockwave Flash (LZMA)", "5A 57 53"),
    sig("RealMedia", "RealMedia container", "2E 52 4D 46"),
    sig_at(4, "MP4", "MPEG-4 video (isom)", "66 74 79 70 69 73 6F 6D"),
    sig_at(4, "MP4", "MPEG-4 video (mp42)", "66 74 79 70 6D 70 34 32"),
    sig_at(4, "MP4", "MPEG-4 video (Sony)", "66 74 79 70 4D 53 4E 56"),
    sig_at(4, "M4V", "Apple MPEG-4 video", "66 74 79 70 4D 34 56 20"),
    sig_at(4, "QuickTime", "QuickTime movie", "66 74 79 70 71 74 20 20"),
    sig_at(4, "3GP", "3GPP multimedia", "66 74 79 70 33 67"),
    sig_at(4, "ISO Base Media", "ISO base media file (generic ftyp box)", "66 74 79 70"),

    //  Archives and compression
    sig("ZIP", "ZIP archive", "50 4B 03 04"),
    sig("ZIP", "ZIP archive (empty)", "50 4B 05 06"),
    sig("ZIP", "ZIP archive (spanned)", "50 4B 07 08"),
    sig_at(30, "EPUB", "EPUB electronic publication", "6D 69 6D 65 74 79 70 65 61 70 70 6C 69 63 61 74 69 6F 6E 2F 65 70 75 62 2B 7A 69 70"),
    sig_at(30, "ODT", "OpenDocument text", "6D 69 6D 65 74 79 70 65 61 70 70 6C 69 63 61 74 69 6F 6E 2F 76 6E 64 2E 6F 61 73 69 73 2E 6F 70 65 6E 64 6F 63 75 6D 65 6E 74 2E 74 65 78 74"),
    sig("RAR", "RAR archive (v1.5+)", "52 61 72 21 1A 07 00"),
    sig("RAR", "RAR archive (v5+)", "52 61 72 21 1A 07 01 00"),
    sig("7z", "7-Zip archive", "37 7A BC AF 27 1C"),
    sig("GZIP", "GZIP compressed data", "1F 8B"),
    sig("BZIP2", "BZIP2 compressed data", "42 5A 68"),
    sig("XZ", "XZ compressed data", "FD 37 7A 58 5A 00"),
    sig("Zstandard", "Zstandard compressed frame", "28 B5 2F FD"),
    sig("LZ4", "LZ4 frame", "04 22 4D 18"),
    sig("lzip", "lzip compressed data", "4C 5A 49 50"),
    sig("Compress", "Unix compress (.Z)", "1F 9D"),
    sig("LZH", "LZH archive (LH0)", "2D 6C 68 30 2D"),
    sig("CAB", "Microsoft Cabinet archive", "4D 53 43 46"),
    sig("ARJ", "ARJ archive", "60 EA"),
    sig_at(7, "ACE", "ACE archive", "2A 2A 41 43 45 2A 2A"),
    sig("XAR", "eXtensible ARchive", "78 61 72 21"),
    sig("cpio", "cpio archive (new ASCII)", "30 37 30 37 30 37"),
    sig("ar", "Unix ar archive", "21 3C 61 72 63 68 3E 0A"),
    sig("DEB", "Debian package", "21 3C 61 72 63 68 3E 0A 64 65 62 69 61 6E 2D 62 69 6E 61 72 79"),
    sig("RPM", "RPM package", "ED AB EE DB"),
    sig_at(257, "TAR", "POSIX tar archive", "75 73 74 61 72 00 30 30"),
    sig_at(257, "TAR", "GNU tar archive", "75 73 74 61 72 20 20 00"),
    sig("OAR", "OAR archive", "4F 41 52 ??"),
    sig("Amazon Kindle Update Package", "An update package for Amazon Kindle devices", "53 50 30 31"),

    //  Executables and object code
    sig("ELF", "Executable and Linkable Format", "7F 45 4C 46"),
    sig("MZ", "DOS MZ executable / Windows PE", "4D 5A"),
    sig("Mach-O", "Mach-O binary (32-bit, big-endian)", "FE ED FA CE"),
    sig("Mach-O", "Mach-O binary (64-bit, big-endian)", "FE ED FA CF"),
    sig("Mach-O", "Mach-O binary (32-bit, little-endian)", "CE FA ED FE"),
    sig("Mach-O", "Mach-O binary (64-bit, little-endian)", "CF FA ED FE"),
    sig("Java class / Mach-O fat", "Java class file or Mach-O universal binary", "CA FE BA BE"),
    sig("WebAssembly", "WebAssembly binary module", "00 61 73 6D"),
    sig("DEX", "Dalvik executable", "64 65 78 0A 30 33 35 00"),
    sig("Lua bytecode", "Precompiled Lua chunk", "1B 4C 75 61"),
    sig("Amiga Hunk", "Amiga Hunk executable", "00 00 03 F3"),
    sig("Script", "Script with shebang line", "23 21"),
    sig("Android boot image", "Android boot.img", "41 4E 44 52 4F 49 44 21"),
    sig("Android sparse image", "Android sparse filesystem image", "3A FF 26 ED"),
    sig("U-Boot image", "U-Boot legacy uImage", "27 05 19 56"),
    sig("Device tree blob", "Flattened device tree", "D0 0D FE ED"),
    sig("NES ROM", "iNES Nintendo Entertainment System ROM", "4E 45 53 1A"),
    sig_at(260, "Game Boy ROM", "Nintendo Game Boy ROM (logo)", "CE ED 66 66 CC 0D 00 0B"),

    //  Disk and filesystem images
    sig_at(0x8001, "ISO 9660", "ISO 9660 CD/DVD image", "43 44 30 30 31"),
    sig_at(0x8801, "ISO 9660", "ISO 9660 CD/DVD image", "43 44 30 30 31"),
    sig_at(0x9001, "ISO 9660", "ISO 9660 CD/DVD image", "43 44 30 30 31"),
    sig_at(1080, "ext2/3/4", "Linux extended filesystem superblock", "53 EF"),
    sig_at(510, "MBR", "Master boot record", "55 AA"),
    sig("QCOW", "QEMU copy-on-write disk image", "51 46 49 FB"),
    sig("VMDK", "VMware virtual disk", "4B 44 4D"),
    sig("VHD", "Microsoft virtual hard disk", "63 6F 6E 65 63 74 69 78"),
    sig("VHDX", "Microsoft virtual hard disk v2", "76 68 64 78 66 69 6C 65"),
    sig_at(64, "VDI", "VirtualBox disk image", "7F 10 DA BE"),
    sig("DMG", "Apple disk image (zlib)", "78 01 73 0D 62 62 60"),
    sig("SquashFS", "SquashFS filesystem (little-endian)", "68 73 71 73"),
    sig("cramfs", "Compressed ROM filesystem", "45 3D CD 28"),
    sig("LUKS", "Linux Unified Key Setup encrypted volume", "4C 55 4B 53 BA BE"),

    //  Documents
    sig("PDF", "Portable Document Format", "25 50 44 46 2D"),
    sig("PostScript", "PostScript document", "25 21 50 53"),
    sig("EPS", "Encapsulated PostScript (DOS binary)", "C5 D0 D3 C6"),
    sig("RTF", "Rich Text Format", "7B 5C 72 74 66 31"),
    sig("OLE2", "Compound File Binary (DOC/XLS/PPT/MSI)", "D0 CF 11 E0 A1 B1 1A E1"),
    sig("CHM", "Microsoft Compiled HTML Help", "49 54 53 46"),
    sig("WordPerfect", "WordPerfect document", "FF 57 50 43"),
    sig("Lotus 1-2-3 Spreadsheet V1", "Lotus 1-2-3 spreadsheet (v1)", "00 00 02 00 06 04 06 00 08 00 00 00 00 00"),
    sig("Lotus 1-2-3 Spreadsheet V9", "Lotus 1-2-3 spreadsheet (v9)", "00 00 1A 00 05 10 04"),
    sig("Quark Express", "Quark Express document (big-endian)", "00 00 4D 4D 58 50 52"),
    sig("Quark Express", "Quark Express document (little-endian)", "00 00 49 49 58 50 52"),
    sig("ClarisWorks", "ClarisWorks word processing document", "02 00 5A 57 52 54 00 00 00 00 00 00 00 00 00 00"),
    sig("XML", "XML document", "3C 3F 78 6D 6C 20"),
    sig("vCard", "vCard contact", "42 45 47 49 4E 3A 56 43 41 52 44"),
    sig("iCalendar", "iCalendar data", "42 45 47 49 4E 3A 56 43 41 4C 45 4E 44 41 52"),
    sig("Binary plist", "Apple binary property list", "62 70 6C 69 73 74 30 30"),
    sig("Torrent", "BitTorrent metainfo", "64 38 3A 61 6E 6E 6F 75 6E 63 65"),

    //  Fonts
    sig("TrueType", "TrueType font", "00 01 00 00 00"),
    sig("OpenType", "OpenType font (CFF)", "4F 54 54 4F"),
    sig("TrueType Collection", "TrueType font collection", "74 74 63 66"),
    sig("WOFF", "Web Open Font Format", "77 4F 46 46"),
    sig("WOFF2", "Web Open Font Format 2", "77 4F 46 32"),

    //  Databases and data containers
    sig("SQLite", "SQLite 3 database", "53 51 4C 69 74 65 20 66 6F 72 6D 61 74 20 33 00"),
    sig("Access", "Microsoft Access database (Jet)", "00 01 00 00 53 74 61 6E 64 61 72 64 20 4A 65 74 20 44 42"),
    sig("HDF5", "Hierarchical Data Format 5", "89 48 44 46 0D 0A 1A 0A"),
    sig("Parquet", "Apache Parquet", "50 41 52 31"),
    sig("Arrow", "Apache Arrow IPC file", "41 52 52 4F 57 31"),
    sig("Avro", "Apache Avro object container", "4F 62 6A 01"),
    sig("ORC", "Apache ORC", "4F 52 43"),
    sig("GGUF", "GGUF model file", "47 47 55 46"),
    sig("glTF", "Binary glTF", "67 6C 54 46"),
    sig("FBX", "Autodesk FBX (binary)", "4B 61 79 64 61 72 61 20 46 42 58 20 42 69 6E 61 72 79 20 20 00"),
    sig("Blender", "Blender scene", "42 4C 45 4E 44 45 52"),

    //  Network captures
    sig("Libpcap File Format", "libpcap capture (big-endian, microseconds)", "A1 B2 C3 D4"),
    sig("Libpcap File Format", "libpcap capture (little-endian, microseconds)", "D4 C3 B2 A1"),
    sig("Libpcap File Format", "libpcap capture (big-endian, nanoseconds)", "A1 B2 3C 4D"),
    sig("Libpcap File Format", "libpcap capture (little-endian, nanoseconds)", "4D 3C B2 A1"),
    sig("PCAP NextGen Dump File", "pcapng capture", "0A 0D 0D 0A"),

    //  Keys, certificates and encrypted data
    sig("PGP", "ASCII-armoured OpenPGP data", "2D 2D 2D 2D 2D 42 45 47 49 4E 20 50 47 50"),
    sig("OpenSSH key", "OpenSSH private key", "2D 2D 2D 2D 2D 42 45 47 49 4E 20 4F 50 45 4E 53 53 48"),
    sig("PEM", "PEM encoded data", "2D 2D 2D 2D 2D 42 45 47 49 4E 20"),
    sig("Java KeyStore", "Java KeyStore", "FE ED FE ED"),
    sig("KeePass", "KeePass 2 database", "03 D9 A2 9A 67 FB 4B B5"),
    sig("age", "age encrypted file", "61 67 65 2D 65 6E 63 72 79 70 74 69 6F 6E 2E 6F 72 67 2F"),

    //  Windows artefacts
    sig("LNK", "Windows shortcut", "4C 00 00 00 01 14 02 00"),
    sig("Registry hive", "Windows registry hive", "72 65 67 66"),
    sig("EVTX", "Windows XML event log", "45 6C 66 46 69 6C 65 00"),
    sig("Minidump", "Windows minidump", "4D 44 4D 50 93 A7"),
    sig_at(4, "Prefetch", "Windows prefetch file", "53 43 43 41"),

    //  Text encodings (byte order marks)
    sig("UTF-32LE", "UTF-32 little-endian byte order mark", "FF FE 00 00"),
    sig("UTF-32BE", "UTF-32 big-endian byte order mark", "00 00 FE FF"),
    sig("UTF-8", "UTF-8 byte order mark", "EF BB BF"),
    sig("UTF-16LE", "UTF-16 little-endian byte order mark", "FF FE"),
    sig("UTF-16BE", "UTF-16 big-endian byte order mark", "FE FF"),
    sig("UTF-7", "UTF-7 byte order mark", "2B 2F 76"),
    sig("UTF-1", "UTF-1 byte order mark", "F7 64 4C"),
    sig("UTF-EBCDIC", "UTF-EBCDIC byte order mark", "DD 73 66 73"),
    sig("SCSU", "Standard Compression Scheme for Unicode", "0E FE FF"),
    sig("BOCU-1", "Binary Ordered Compression for Unicode", "FB EE 28"),
    sig("GB 18030", "GB 18030 byte order mark", "84 31 95 33"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parse_pattern;

    #[test]
    fn every_entry_parses() {
        for def in BUILTIN_SIGNATURES {
            assert!(
                parse_pattern(def.pattern).is_ok(),
                "malformed pattern for {}: {}",
                def.name,
                def.pattern
            );
        }
        assert!(builtin().is_ok());
    }

    #[test]
    fn no_entry_is_all_wildcards() {
        for def in BUILTIN_SIGNATURES {
            let sig = def.build().unwrap();
            assert!(sig.specificity() > 0, "{} matches everything", def.name);
        }
    }

    #[test]
    fn no_exact_duplicates_in_table() {
        let registry = builtin().unwrap();
        assert_eq!(registry.len(), BUILTIN_SIGNATURES.len());
    }

    #[test]
    fn catalogue_is_substantial() {
        assert!(BUILTIN_SIGNATURES.len() > 150);
    }

    #[test]
    fn jpeg_scenario() {
        let registry = builtin().unwrap();
        let best = registry
            .find_best_match(&[0xFF, 0xD8, 0xFF, 0xDB, 0x34, 0x23])
            .unwrap();
        assert_eq!(best.name, "JPEG");
        assert_eq!(best.relevant_bytes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn jpeg_end_marker_alone_is_unknown() {
        let registry = builtin().unwrap();
        assert!(registry.find_best_match(&[0xFF, 0xD9]).is_none());
    }

    #[test]
    fn png_scenario() {
        let registry = builtin().unwrap();
        let buffer = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
            0x44, 0x52,
        ];
        let best = registry.find_best_match(&buffer).unwrap();
        assert_eq!(best.name, "PNG");
        assert_eq!(best.relevant_bytes.len(), 8);
    }

    #[test]
    fn jfif_beats_plain_jpeg() {
        let registry = builtin().unwrap();
        let buffer = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00\x01\x02";
        assert_eq!(registry.find_best_match(buffer).unwrap().name, "JPEG JFIF");
    }

    #[test]
    fn riff_family_resolves_by_tag() {
        let registry = builtin().unwrap();
        let cases: [(&[u8], &str); 4] = [
            (b"RIFF\x24\x00\x00\x00WAVEfmt ", "WAV"),
            (b"RIFF\x24\x00\x00\x00WEBPVP8 ", "WebP"),
            (b"RIFF\x24\x00\x00\x00AVI LIST", "AVI"),
            (b"RIFF\x24\x00\x00\x00RMIDdata", "RIFF"),
        ];
        for (buffer, expected) in cases {
            assert_eq!(registry.find_best_match(buffer).unwrap().name, expected);
        }
    }

    #[test]
    fn utf32_bom_beats_utf16_bom() {
        let registry = builtin().unwrap();
        assert_eq!(
            registry.find_best_match(&[0xFF, 0xFE, 0x00, 0x00]).unwrap().name,
            "UTF-32LE"
        );
        assert_eq!(
            registry.find_best_match(&[0xFF, 0xFE, 0x41, 0x00]).unwrap().name,
            "UTF-16LE"
        );
    }

    #[test]
    fn offset_entries_match_deep_in_buffer() {
        let registry = builtin().unwrap();
        let mut buffer = vec![0u8; 512];
        buffer[257..265].copy_from_slice(b"ustar\x0000");
        assert_eq!(registry.find_best_match(&buffer).unwrap().name, "TAR");
    }
}
