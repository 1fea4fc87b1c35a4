use std::fmt;

use bio::alphabets::dna;
use strum::Display;

use crate::errors::{LoonError, Result};

// SAM flag bits this tool looks at
pub(crate) const FLAG_REVERSE: u16 = 16;
pub(crate) const FLAG_FIRST_MATE: u16 = 64;
pub(crate) const FLAG_SECOND_MATE: u16 = 128;

/// Header lines start with this and bypass record parsing entirely.
pub(crate) const HEADER_MARKER: char = '@';

// alternate haplotype contigs carry this suffix in GRCh38-style references
const ALT_SUFFIX: &str = "_alt";

// a SAM body line has 11 mandatory columns
const MANDATORY_FIELDS: usize = 11;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub(crate) enum ReadEnd {
    #[strum(serialize = "1")]
    First,
    #[strum(serialize = "2")]
    Second,
    #[strum(serialize = "unpaired")]
    Unpaired,
}

/// One alignment line, reduced to the fields needed to rebuild the read it
/// came from. Sequence and qualities are stored in reference-forward
/// orientation no matter which strand the aligner placed the read on; the
/// strand bit is consumed here and never consulted again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SamRecord {
    pub(crate) template: String,
    pub(crate) end: ReadEnd,
    pub(crate) sequence: Vec<u8>,
    pub(crate) quality: Vec<u8>,
    pub(crate) contig: String,
    pub(crate) is_suspect: bool,
}

impl SamRecord {
    pub(crate) fn parse(line: &str) -> Result<SamRecord> {
        let fields = line.split('\t').collect::<Vec<_>>();
        if fields.len() < MANDATORY_FIELDS {
            return Err(LoonError::TruncatedRecord { line: line.to_owned() });
        }

        let template = fields[0].to_owned();
        let flags = fields[1].parse::<u16>().map_err(|source| LoonError::BadFlags {
            value: fields[1].to_owned(),
            source,
        })?;

        let end = match (flags & FLAG_FIRST_MATE != 0, flags & FLAG_SECOND_MATE != 0) {
            (true, true) => return Err(LoonError::BothMateBits { template }),
            (true, false) => ReadEnd::First,
            (false, true) => ReadEnd::Second,
            (false, false) => ReadEnd::Unpaired,
        };

        let contig = fields[2].to_owned();
        let mut sequence = fields[9].as_bytes().to_vec();
        let mut quality = fields[10].as_bytes().to_vec();
        if flags & FLAG_REVERSE != 0 {
            sequence = dna::revcomp(&sequence);
            quality.reverse();
        }

        // bwa mem can corrupt the middle bases of even-length alignments to
        // alts; flag those so deduplication prefers any clean copy
        let is_suspect = contig.ends_with(ALT_SUFFIX) && sequence.len() % 2 == 0;

        Ok(SamRecord { template, end, sequence, quality, contig, is_suspect })
    }

    /// Output name for this read: `/1` and `/2` for paired ends, the bare
    /// template name for unpaired reads.
    pub(crate) fn read_name(&self) -> String {
        match self.end {
            ReadEnd::Unpaired => self.template.clone(),
            end => format!("{}/{}", self.template, end),
        }
    }
}

/// Diagnostic rendering, with a trailing `?` marking suspect records.
impl fmt::Display for SamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} end {} on {}: {}{}",
            self.template,
            self.end,
            self.contig,
            String::from_utf8_lossy(&self.sequence),
            if self.is_suspect { "?" } else { "" }
        )
    }
}
