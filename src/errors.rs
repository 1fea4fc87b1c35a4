//! Error types for SAM-to-FASTQ reconstruction.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

use crate::record::ReadEnd;

/// Result alias for reconstruction operations.
pub(crate) type Result<T> = std::result::Result<T, LoonError>;

#[derive(Error, Debug)]
pub(crate) enum LoonError {
    /// A body line with fewer than the mandatory SAM fields.
    #[error("alignment record has too few fields: {line:?}")]
    TruncatedRecord { line: String },

    /// The FLAG column did not parse as an unsigned integer.
    #[error("couldn't parse FLAG value {value:?}")]
    BadFlags {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("alignment for template {template} is flagged as both mate 1 and mate 2")]
    BothMateBits { template: String },

    /// Two non-suspect alignments disagree on the read content for one end
    /// of one template, so neither can be picked over the other.
    #[error("non-suspect alignments don't agree on end {end} of template {template}:\n{incoming}\n{kept}")]
    ConflictingAlignments {
        template: String,
        end: ReadEnd,
        kept: String,
        incoming: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_template_and_end() {
        let error = LoonError::ConflictingAlignments {
            template: "ERR894727.320".to_string(),
            end: ReadEnd::Second,
            kept: "ACGT".to_string(),
            incoming: "ACGG".to_string(),
        };
        let msg = format!("{error}");
        assert!(msg.contains("end 2 of template ERR894727.320"));
        assert!(msg.contains("ACGT"));
        assert!(msg.contains("ACGG"));
    }

    #[test]
    fn both_mate_bits_message() {
        let error = LoonError::BothMateBits { template: "read.1".to_string() };
        assert!(format!("{error}").contains("both mate 1 and mate 2"));
    }

    #[test]
    fn bad_flags_carries_source() {
        let source = "x".parse::<u16>().unwrap_err();
        let error = LoonError::BadFlags { value: "x".to_string(), source };
        assert!(format!("{error}").contains("\"x\""));
    }
}
