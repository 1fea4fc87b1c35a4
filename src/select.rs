use crate::errors::{LoonError, Result};
use crate::record::SamRecord;

/// Two records describe the same read when template, end, and the
/// normalized sequence and qualities all match. Contig and original strand
/// don't participate, so secondary and supplementary placements of one
/// read compare equal.
pub(crate) fn records_equal(a: &SamRecord, b: &SamRecord) -> bool {
    a.template == b.template && a.end == b.end && a.sequence == b.sequence && a.quality == b.quality
}

/// Whether `a` should replace `b` as the representative for its end: `a`
/// is clean, and `b` is either suspect or carries less sequence.
pub(crate) fn dominates(a: &SamRecord, b: &SamRecord) -> bool {
    a.template == b.template
        && a.end == b.end
        && !a.is_suspect
        && (b.is_suspect || a.sequence.len() > b.sequence.len())
}

/// Merge an incoming record into the representative slot for its
/// (template, end).
///
/// A clean incoming record that can neither replace nor match the current
/// representative is a genuine disagreement between alignments and aborts
/// the run; a suspect or shorter record is dropped without comment.
pub(crate) fn merge(slot: &mut Option<SamRecord>, incoming: SamRecord) -> Result<()> {
    match slot {
        None => *slot = Some(incoming),
        Some(current) => {
            if dominates(&incoming, current) {
                *slot = Some(incoming);
            } else if !incoming.is_suspect
                && incoming.sequence.len() >= current.sequence.len()
                && !records_equal(&incoming, current)
            {
                return Err(LoonError::ConflictingAlignments {
                    kept: current.to_string(),
                    incoming: incoming.to_string(),
                    template: incoming.template,
                    end: incoming.end,
                });
            }
        }
    }
    Ok(())
}
