use std::io::Write;

use bio::io::fastq;

use crate::diag::Diagnostics;
use crate::errors::Result;
use crate::record::{ReadEnd, SamRecord};
use crate::select;

/// Per-end representatives for the template currently being accumulated.
/// Three fixed slots rather than a map keyed by end: the set of ends is
/// closed, and the working set must stay bounded by one template.
#[derive(Debug, Default)]
struct EndSlots {
    first: Option<SamRecord>,
    second: Option<SamRecord>,
    unpaired: Option<SamRecord>,
}

impl EndSlots {
    fn slot_mut(&mut self, end: ReadEnd) -> &mut Option<SamRecord> {
        match end {
            ReadEnd::First => &mut self.first,
            ReadEnd::Second => &mut self.second,
            ReadEnd::Unpaired => &mut self.unpaired,
        }
    }
}

/// One template's working set while its alignments stream past. At most one
/// group is ever alive; it is finalized the moment a different template
/// shows up, or at end of input.
#[derive(Debug)]
struct TemplateGroup {
    template: String,
    slots: EndSlots,
}

impl TemplateGroup {
    fn open(record: SamRecord) -> TemplateGroup {
        let template = record.template.clone();
        let end = record.end;
        let mut slots = EndSlots::default();
        *slots.slot_mut(end) = Some(record);
        TemplateGroup { template, slots }
    }

    fn merge(&mut self, record: SamRecord) -> Result<()> {
        select::merge(self.slots.slot_mut(record.end), record)
    }
}

pub(crate) struct PairHandler<W: Write, D: Diagnostics> {
    record_writers: (fastq::Writer<W>, fastq::Writer<W>),
    diagnostics: D,
    open: Option<TemplateGroup>,
    pub(crate) total_records: usize,
    pub(crate) good_records: usize,
    pub(crate) dropped_templates: usize,
    pub(crate) suspect_ends: usize,
}

impl<W: Write, D: Diagnostics> PairHandler<W, D> {
    pub(crate) fn new(record_writers: (fastq::Writer<W>, fastq::Writer<W>), diagnostics: D) -> Self {
        PairHandler {
            record_writers,
            diagnostics,
            open: None,
            total_records: 0,
            good_records: 0,
            dropped_templates: 0,
            suspect_ends: 0,
        }
    }

    /// Fold one alignment into the open group, finalizing the previous
    /// group first when the template changes. Alignments for one template
    /// must arrive contiguously (name-sorted input); this is not re-checked,
    /// and unsorted input silently fragments templates into partial groups.
    pub(crate) fn handle_record(&mut self, record: SamRecord) -> Result<()> {
        self.total_records += 1;

        if let Some(group) = self.open.as_mut() {
            if group.template == record.template {
                return group.merge(record);
            }
        }

        let finished = self.open.replace(TemplateGroup::open(record));
        if let Some(group) = finished {
            self.emit(group)?;
        }
        Ok(())
    }

    /// Finalize the last open group and flush both outputs. Call once,
    /// after the final record.
    pub(crate) fn finish(&mut self) -> Result<()> {
        if let Some(group) = self.open.take() {
            self.emit(group)?;
        }
        self.record_writers.0.flush()?;
        self.record_writers.1.flush()?;
        Ok(())
    }

    fn emit(&mut self, group: TemplateGroup) -> Result<()> {
        let TemplateGroup { slots, .. } = group;
        let first = self.resolve(slots.first);
        let second = self.resolve(slots.second);
        // singletons never pair up, but a suspect-only one still warrants
        // the warning
        self.resolve(slots.unpaired);

        match (first, second) {
            (Some(mate1), Some(mate2)) => self.write_pair(&mate1, &mate2),
            _ => {
                self.dropped_templates += 1;
                Ok(())
            }
        }
    }

    /// Discard a representative that is still suspect: no clean alignment
    /// ever turned up for that end, so its bases can't be trusted.
    fn resolve(&mut self, best: Option<SamRecord>) -> Option<SamRecord> {
        match best {
            Some(record) if record.is_suspect => {
                self.suspect_ends += 1;
                self.diagnostics.suspect_only(&record.template, record.end);
                None
            }
            other => other,
        }
    }

    fn write_pair(&mut self, mate1: &SamRecord, mate2: &SamRecord) -> Result<()> {
        // the two mates go out back to back, mate 1 first
        self.record_writers.0.write(&mate1.read_name(), None, &mate1.sequence, &mate1.quality)?;
        self.record_writers.1.write(&mate2.read_name(), None, &mate2.sequence, &mate2.quality)?;
        self.good_records += 1;
        Ok(())
    }
}
