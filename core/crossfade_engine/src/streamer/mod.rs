pub mod constant;
pub mod delayed;
pub mod silence;
pub mod wav;

pub use constant::Constant;
pub use delayed::Delayed;
pub use silence::Silence;
pub use wav::WavStreamer;

/// One stereo sample frame (L, R).
pub type Frame = (f32, f32);

/// Pull-based producer of stereo frames.
///
/// A call to [`Streamer::stream`] fills up to `buffer.len()` frames and returns how many
/// were written along with whether the producer is still live. A short read with
/// `live == true` is normal (upstream has nothing more right now); `(0, false)` means
/// the producer is exhausted for good. Frames past the returned count are left as they were.
pub trait Streamer
where
    Self: Send,
{
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool);
}

/// A [`Streamer`] whose total length in frames is known up front.
pub trait SizedStreamer: Streamer {
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Streamer + ?Sized> Streamer for &mut S {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        (**self).stream(buffer)
    }
}

impl<S: SizedStreamer + ?Sized> SizedStreamer for &mut S {
    fn len(&self) -> u64 {
        (**self).len()
    }
}

impl<S: Streamer + ?Sized> Streamer for Box<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        (**self).stream(buffer)
    }
}

impl<S: SizedStreamer + ?Sized> SizedStreamer for Box<S> {
    fn len(&self) -> u64 {
        (**self).len()
    }
}

/// Test helper: pulls everything `streamer` has left, `chunk` frames at a time.
#[cfg(test)]
pub fn drain<S: Streamer + ?Sized>(streamer: &mut S, chunk: usize) -> Vec<Frame> {
    let mut out = Vec::new();
    let mut buffer = vec![(0.0f32, 0.0f32); chunk];
    loop {
        let (n, live) = streamer.stream(&mut buffer);
        out.extend_from_slice(&buffer[..n]);
        if !live {
            break;
        }
    }
    out
}

#[cfg(test)]
mod streamer_tests {
    use super::*;

    #[test]
    fn test_borrowed_streamer_keeps_position_with_owner() {
        let mut source = Constant::new((0.5, 0.5), 4);

        {
            let mut borrowed: Box<dyn SizedStreamer + '_> = Box::new(&mut source);
            assert_eq!(borrowed.len(), 4);
            let mut buffer = [(0.0, 0.0); 3];
            assert_eq!(borrowed.stream(&mut buffer), (3, true));
        }

        let mut buffer = [(0.0, 0.0); 3];
        assert_eq!(source.stream(&mut buffer), (1, true));
        assert_eq!(buffer[0], (0.5, 0.5));
    }

    #[test]
    fn test_drain_collects_until_exhausted() {
        let mut source = Constant::new((0.1, 0.2), 10);
        let frames = drain(&mut source, 3);
        assert_eq!(frames.len(), 10);
        assert!(frames.iter().all(|f| *f == (0.1, 0.2)));
    }
}
