use crate::streamer::{Frame, SizedStreamer, Streamer};

/// Repeats one frame for a fixed number of frames.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    frame: Frame,
    len: u64,
    position: u64,
}

impl Constant {
    pub const fn new(frame: Frame, len: u64) -> Self {
        Self {
            frame,
            len,
            position: 0,
        }
    }
}

impl Streamer for Constant {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        let remaining = self.len - self.position;
        if remaining == 0 {
            return (0, false);
        }

        let n = buffer.len().min(remaining as usize);
        buffer[..n].fill(self.frame);
        self.position += n as u64;
        (n, true)
    }
}

impl SizedStreamer for Constant {
    fn len(&self) -> u64 {
        self.len
    }
}
