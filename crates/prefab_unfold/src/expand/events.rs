//! Observation hooks for expansion.
//!
//! The runner reports what it does through an [`EventSink`]; sinks cost
//! nothing when unused because the no-op implementation on `()` inlines
//! away. [`VecSink`] collects events for inspection, [`FnSink`] adapts a
//! closure.
use crate::transform::Transform;

/// Something the runner did or skipped during one expansion.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ExpandEvent {
    /// A leaf node was appended to the recipe tree.
    NodeEmitted {
        name: String,
        transform: Transform,
        depth: usize,
    },
    /// A transform was appended to a batch group.
    BatchInstanceAdded { key: String, name: String },
    /// An element failed the filter test and was skipped.
    ElementVetoed { asset: String, element: String },
    /// A reference led back into an asset already on the expansion path.
    CycleDetected { asset: String, reference: String },
    /// A branch hit the recursion depth ceiling.
    BranchTruncated { asset: String, depth: usize },
    /// A recoverable structural problem was skipped over.
    Warning { context: String, message: String },
}

/// Receives expansion events.
pub trait EventSink {
    fn send(&mut self, event: ExpandEvent);

    fn send_many<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = ExpandEvent>,
        Self: Sized,
    {
        for event in events {
            self.send(event);
        }
    }
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ExpandEvent) {}
}

/// Forwards each event to a closure.
pub struct FnSink<F: FnMut(ExpandEvent)> {
    callback: F,
}

impl<F: FnMut(ExpandEvent)> FnSink<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(ExpandEvent)> EventSink for FnSink<F> {
    fn send(&mut self, event: ExpandEvent) {
        (self.callback)(event);
    }
}

/// Collects events into a vector.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<ExpandEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    pub fn into_inner(self) -> Vec<ExpandEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ExpandEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    fn send(&mut self, event: ExpandEvent) {
        self.events.push(event);
    }
}
