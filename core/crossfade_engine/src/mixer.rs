use log::debug;

use crate::streamer::{Frame, Streamer};

/// Holds multiple streamers and adds their frames together.
///
/// Streamers are dropped once they report they are no longer live; the mixer itself stays
/// live for as long as it holds at least one streamer.
pub struct Mixer<'a> {
    streamers: Vec<Box<dyn Streamer + 'a>>,
    /// reused pull buffer, grown to the largest request seen
    scratch: Vec<Frame>,
}

impl<'a> Mixer<'a> {
    pub const fn new() -> Self {
        Self {
            streamers: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn add(&mut self, streamer: impl Streamer + 'a) {
        self.streamers.push(Box::new(streamer));
    }

    /// Number of streamers that have not been drained yet.
    pub fn active(&self) -> usize {
        self.streamers.len()
    }
}

impl Default for Mixer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mixer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mixer")
            .field("active", &self.streamers.len())
            .finish_non_exhaustive()
    }
}

impl Streamer for Mixer<'_> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        if self.streamers.is_empty() {
            return (0, false);
        }

        buffer.fill((0.0, 0.0));
        if self.scratch.len() < buffer.len() {
            self.scratch.resize(buffer.len(), (0.0, 0.0));
        }
        let scratch = &mut self.scratch[..buffer.len()];

        let mut produced = 0;
        self.streamers.retain_mut(|streamer| {
            let (n, live) = streamer.stream(scratch);
            for (out, (l, r)) in buffer.iter_mut().zip(&scratch[..n]) {
                out.0 += l;
                out.1 += r;
            }
            produced = produced.max(n);
            live
        });

        let drained_now = self.streamers.is_empty();
        if drained_now {
            debug!("mixer: all streamers drained");
        }

        (produced, produced > 0 || !drained_now)
    }
}
