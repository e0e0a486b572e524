use crate::streamer::{Frame, SizedStreamer, Streamer};

/// Plays `silence` frames of nothing, then the inner streamer.
///
/// The switch happens inside a single pull: a buffer that straddles the start frame
/// gets the tail of the silence followed by the head of the inner stream.
#[derive(Debug)]
pub struct Delayed<S> {
    inner: S,
    /// frames of silence still to emit
    remaining: u64,
    /// the frame the inner streamer starts at
    start_frame: u64,
}

impl<S: Streamer> Delayed<S> {
    pub const fn new(silence: u64, inner: S) -> Self {
        Self {
            inner,
            remaining: silence,
            start_frame: silence,
        }
    }

    pub const fn start_frame(&self) -> u64 {
        self.start_frame
    }
}

impl<S: Streamer> Streamer for Delayed<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        let silent = buffer.len().min(self.remaining as usize);
        buffer[..silent].fill((0.0, 0.0));
        self.remaining -= silent as u64;

        if self.remaining > 0 {
            return (silent, true);
        }

        let (n, live) = self.inner.stream(&mut buffer[silent..]);
        (silent + n, live || silent > 0)
    }
}

impl<S: SizedStreamer> SizedStreamer for Delayed<S> {
    fn len(&self) -> u64 {
        self.start_frame + self.inner.len()
    }
}
