use std::collections::VecDeque;

use crate::sound::SoundCue;

/// Events that the presentation layer may want to react to with a sound.
pub trait Cue {
    fn sound_cue(&self) -> Option<SoundCue>;
}

/// FIFO of events emitted by a controller.
///
/// Controllers never talk to the screen or the speakers directly; they push
/// events here and whoever owns the controller drains them after every call.
#[derive(Debug, Clone)]
pub struct Events<E> {
    queue: VecDeque<E>,
}

impl<E> Default for Events<E> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<E> Events<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_order() {
        let mut events = Events::new();
        events.send(1);
        events.send(2);
        events.send(3);
        assert_eq!(events.len(), 3);

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(drained, vec![1, 2, 3]);
        assert!(events.is_empty());
    }
}
