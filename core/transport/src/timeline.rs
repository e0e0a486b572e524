/// A run of frames placed on a shared timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
    /// first frame (inclusive)
    pub start: u64,
    /// number of frames
    pub len: u64,
}

impl FrameSpan {
    pub const fn new(start: u64, len: u64) -> Self {
        Self { start, len }
    }

    /// One past the last frame.
    pub const fn end(&self) -> u64 {
        self.start + self.len
    }

    pub const fn contains(&self, frame: u64) -> bool {
        frame >= self.start && frame < self.end()
    }

    /// Number of frames both spans cover.
    pub fn overlap(&self, other: &Self) -> u64 {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        end.saturating_sub(start)
    }
}
