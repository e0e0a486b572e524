use crate::streamer::{Frame, SizedStreamer, Streamer};

/// A fixed run of silent frames.
#[derive(Debug, Clone, Copy)]
pub struct Silence {
    remaining: u64,
    len: u64,
}

impl Silence {
    pub const fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            len: frames,
        }
    }
}

impl Streamer for Silence {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        if self.remaining == 0 {
            return (0, false);
        }

        let n = buffer.len().min(self.remaining as usize);
        buffer[..n].fill((0.0, 0.0));
        self.remaining -= n as u64;
        (n, true)
    }
}

impl SizedStreamer for Silence {
    fn len(&self) -> u64 {
        self.len
    }
}
