//! Sprint interval type

/// One contiguous block of weeks in the derived timeline.
///
/// `end == start + duration` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintInterval {
    pub name: String,
    pub start: u32,
    pub end: u32,
    pub duration: u32,
}

impl SprintInterval {
    pub fn new(index: usize, start: u32, end: u32) -> Self {
        Self {
            name: format!("Sprint {}", index + 1),
            start,
            end,
            duration: end - start,
        }
    }
}
