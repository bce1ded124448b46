//! Older executable and document formats.

use crate::error::ExtractError;
use crate::output::Metadata;
use crate::reader::{CursorReader, Endian};

use super::endian_label;

/// Upper bound on resident library names before the header is considered
/// corrupt.
const MAX_RESIDENT_LIBRARIES: u32 = 64;

/// HUNK_HEADER: resident library names, then the hunk table bounds.
pub(super) fn amiga_hunk(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.skip(4);

    let mut resident = 0u32;
    loop {
        let at = reader.position();
        let longwords = reader.consume_u32(Endian::Big)?;
        if longwords == 0 {
            break;
        }
        resident += 1;
        if resident > MAX_RESIDENT_LIBRARIES {
            return Err(ExtractError::invalid("Too many resident library names", at));
        }
        reader.skip((longwords as usize).saturating_mul(4));
    }

    let table_size = reader.consume_u32(Endian::Big)?;
    let first_hunk = reader.consume_u32(Endian::Big)?;
    let last_hunk = reader.consume_u32(Endian::Big)?;

    metadata.insert("Resident Libraries", resident);
    metadata.insert("Hunk Table Size", table_size);
    metadata.insert("First Hunk", first_hunk);
    metadata.insert("Last Hunk", last_hunk);
    Ok(())
}

pub(super) fn quark_express(
    reader: &mut CursorReader<'_>,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    reader.skip(2);
    let endian = match reader.consume_bytes(2)? {
        b"MM" => Endian::Big,
        b"II" => Endian::Little,
        _ => return Err(ExtractError::invalid("Unrecognised byte order", 2)),
    };
    metadata.insert("Byte Order", endian_label(endian));
    Ok(())
}
