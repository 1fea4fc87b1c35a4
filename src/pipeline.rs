use std::io::{BufRead, Write};

use crate::diag::Diagnostics;
use crate::errors::Result;
use crate::pair_handler::PairHandler;
use crate::record::{SamRecord, HEADER_MARKER};

/// Stream one name-sorted SAM body through the handler. Header lines are
/// copied verbatim to `header_sink`; every other line must parse as an
/// alignment record. The first fatal error aborts the stream.
pub(crate) fn process<R, W, D, H>(
    input: R,
    handler: &mut PairHandler<W, D>,
    header_sink: &mut H,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    D: Diagnostics,
    H: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.starts_with(HEADER_MARKER) {
            writeln!(header_sink, "{line}")?;
            continue;
        }
        handler.handle_record(SamRecord::parse(&line)?)?;
    }
    handler.finish()
}
