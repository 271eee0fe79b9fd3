//! Overlap layout for one day column.
//!
//! Given the blocks placed in a single column, derive a deterministic visual
//! stacking so overlapping blocks stay legible: later-starting blocks draw on
//! top and translucent, earlier blocks get an overlay rectangle marking the
//! shadowed range. Recomputed in full on every pass; nothing here is
//! persisted.

/// One block's temporal extent within a column, in slot units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub id: String,
    pub start: usize,
    pub span: usize,
}

impl ColumnEntry {
    pub fn new(id: impl Into<String>, start: usize, span: usize) -> Self {
        Self {
            id: id.into(),
            start,
            span,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.span
    }
}

/// The shadowed sub-rectangle of an earlier block, in column pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRegion {
    pub top: f32,
    pub height: f32,
}

/// Derived display attributes for one block. Indexed like the input slice.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub id: String,
    /// Stacking order; increases monotonically with start slot.
    pub z: usize,
    /// Set on both participants of any overlapping pair.
    pub aligned: bool,
    /// Set on the later-starting block of an overlapping pair.
    pub translucent: bool,
    pub overlay: Option<OverlayRegion>,
}

/// Slot overlap between two entries; zero when they merely touch.
pub fn overlap_slots(a: &ColumnEntry, b: &ColumnEntry) -> usize {
    let lo = a.start.max(b.start);
    let hi = a.end().min(b.end());
    hi.saturating_sub(lo)
}

/// Compute the layout for one day column.
///
/// Results come back in the same order as `entries`. The computation is a
/// pure function of the entries and the slot height, so two passes over the
/// same column agree exactly.
pub fn compute_column_layout(entries: &[ColumnEntry], slot_height: f32) -> Vec<BlockLayout> {
    let mut layouts: Vec<BlockLayout> = entries
        .iter()
        .map(|e| BlockLayout {
            id: e.id.clone(),
            z: 0,
            aligned: false,
            translucent: false,
            overlay: None,
        })
        .collect();

    if entries.len() < 2 {
        return layouts;
    }

    // Stable sort by start; ties keep insertion order.
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&i| entries[i].start);

    for (z, &idx) in order.iter().enumerate() {
        layouts[idx].z = z;
    }

    for i in 0..order.len() {
        for j in (i + 1)..order.len() {
            let first = &entries[order[i]];
            let second = &entries[order[j]];
            if first.end() > second.start && second.end() > first.start {
                layouts[order[i]].aligned = true;
                layouts[order[j]].aligned = true;

                let slots = overlap_slots(first, second);
                if slots > 0 {
                    let overlap_start = first.start.max(second.start);
                    layouts[order[i]].overlay = Some(OverlayRegion {
                        top: (overlap_start - first.start) as f32 * slot_height,
                        height: slots as f32 * slot_height,
                    });
                    layouts[order[j]].translucent = true;
                }
            }
        }
    }

    layouts
}
