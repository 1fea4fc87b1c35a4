//! Warning sink for non-fatal per-template diagnostics.
//!
//! The sink is handed to the pair handler instead of being a global, so
//! tests can capture warnings and the selection logic stays independent of
//! process-wide logger state.

use log::warn;

use crate::record::ReadEnd;

pub(crate) trait Diagnostics {
    /// Every alignment seen for this end of this template was suspect; the
    /// end is treated as missing when pairing.
    fn suspect_only(&mut self, template: &str, end: ReadEnd);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn suspect_only(&mut self, template: &str, end: ReadEnd) {
        (**self).suspect_only(template, end);
    }
}

/// Production sink: forward warnings to the process logger.
pub(crate) struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn suspect_only(&mut self, template: &str, end: ReadEnd) {
        warn!("only suspect alignments found for end {end} of template {template}; skipping");
    }
}
