use std::collections::HashSet;

/// Key of one matrix cell, `"{cabinetTypeId}-{brandId}"`.
pub fn cell_key(cabinet_type: &str, brand_name: &str) -> String {
    format!("{}-{}", cabinet_type, brand_name)
}

/// Cells with an in-flight request, used only to drive the saving
/// affordance. Not a lock: overlapping edits to one cell are not prevented,
/// they are merely both shown as saving. A key's presence must exactly
/// bracket the lifetime of its request, so `end` has to run on every exit
/// path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingKeySet {
    keys: HashSet<String>,
}

impl PendingKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cell in-flight. Returns false if it already was, which lets the
    /// caller notice an overlapping edit to the same cell.
    pub fn begin(&mut self, cabinet_type: &str, brand_name: &str) -> bool {
        self.keys.insert(cell_key(cabinet_type, brand_name))
    }

    pub fn end(&mut self, cabinet_type: &str, brand_name: &str) {
        self.keys.remove(&cell_key(cabinet_type, brand_name));
    }

    pub fn is_pending(&self, cabinet_type: &str, brand_name: &str) -> bool {
        self.keys.contains(&cell_key(cabinet_type, brand_name))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
