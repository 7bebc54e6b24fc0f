//! Frame sources: a live feed or a still image.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::image::FrameImage;

/// A live stream of decoded frames.
///
/// Returns `None` until the first frame has been decoded.
pub trait VideoFeed: Send {
    fn latest_frame(&mut self) -> Option<Arc<FrameImage>>;
}

/// Single-frame mailbox shared between a feed producer and the render loop.
///
/// Producers overwrite the slot; the consumer always sees the newest frame.
#[derive(Debug, Clone, Default)]
pub struct FrameSlot {
    inner: Arc<Mutex<Option<Arc<FrameImage>>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame.
    pub fn publish(&self, frame: Arc<FrameImage>) {
        *self.inner.lock() = Some(frame);
    }

    /// Drop the current frame, e.g. when the stream stops.
    pub fn clear(&self) {
        *self.inner.lock() = None;
    }

    /// Newest frame, if any.
    pub fn peek(&self) -> Option<Arc<FrameImage>> {
        self.inner.lock().clone()
    }
}

impl VideoFeed for FrameSlot {
    fn latest_frame(&mut self) -> Option<Arc<FrameImage>> {
        self.peek()
    }
}

/// Where the session reads pixels from.
#[derive(Default)]
pub enum FrameSource {
    /// Live frames; may not have produced anything yet.
    Live(Box<dyn VideoFeed>),
    /// A single uploaded image.
    Still(Arc<FrameImage>),
    /// Nothing selected.
    #[default]
    Empty,
}

impl FrameSource {
    /// The frame to render this tick, if one is ready.
    pub fn current_frame(&mut self) -> Option<Arc<FrameImage>> {
        match self {
            Self::Live(feed) => feed.latest_frame(),
            Self::Still(image) => Some(Arc::clone(image)),
            Self::Empty => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Live(_) => "live",
            Self::Still(_) => "still",
            Self::Empty => "empty",
        }
    }
}

impl std::fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameSource::{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        let mut slot = FrameSlot::new();
        assert!(slot.latest_frame().is_none());
    }

    #[test]
    fn test_slot_returns_newest_frame() {
        let producer = FrameSlot::new();
        let mut consumer = producer.clone();
        producer.publish(Arc::new(FrameImage::solid(1, 1, [0.0; 4]).unwrap()));
        producer.publish(Arc::new(FrameImage::solid(2, 1, [1.0; 4]).unwrap()));
        let frame = consumer.latest_frame().unwrap();
        assert_eq!(frame.width, 2);
        producer.clear();
        assert!(consumer.latest_frame().is_none());
    }

    #[test]
    fn test_live_source_reads_through_feed() {
        let slot = FrameSlot::new();
        let mut source = FrameSource::Live(Box::new(slot.clone()));
        assert!(source.current_frame().is_none());
        slot.publish(Arc::new(FrameImage::solid(3, 3, [0.5; 4]).unwrap()));
        assert_eq!(source.current_frame().unwrap().width, 3);
        assert!(source.is_live());
    }

    #[test]
    fn test_still_and_empty_sources() {
        let mut still = FrameSource::Still(Arc::new(FrameImage::solid(1, 1, [0.2; 4]).unwrap()));
        assert!(still.current_frame().is_some());
        assert!(FrameSource::Empty.current_frame().is_none());
    }
}
