//! Input events and the per-tick input queue
//!
//! Host listeners push events here; the tick drains and applies them in
//! arrival order. Listeners never touch game state directly.

/// Input the game understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer press at surface coordinates
    Pointer { x: f32, y: f32 },
    /// The flap/start/restart/resume key
    PrimaryKey,
    /// The pause toggle key
    PauseKey,
}

impl InputEvent {
    /// Pointer position, if this event carries one
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            InputEvent::Pointer { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

/// A queue of input events, drained once per tick
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Pointer { x: 10.0, y: 20.0 });
        q.push(InputEvent::PauseKey);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(
            events,
            vec![InputEvent::Pointer { x: 10.0, y: 20.0 }, InputEvent::PauseKey]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn pointer_position() {
        assert_eq!(
            InputEvent::Pointer { x: 1.0, y: 2.0 }.position(),
            Some((1.0, 2.0))
        );
        assert_eq!(InputEvent::PrimaryKey.position(), None);
    }
}
