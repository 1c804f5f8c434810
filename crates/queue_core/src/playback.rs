use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing has been played since the last load.
    #[default]
    Pending,
    Playing,
    Paused,
    /// Stopped, or asked to play an empty queue. Only a new load leaves it.
    Invalid,
}

/// What the transport does once the current item plays to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemEndAction {
    #[default]
    Advance,
    Pause,
}

#[derive(Debug, Default)]
pub struct PlaybackStateMachine {
    state: PlaybackState,
}

impl PlaybackStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Move to `to`, returning whether the move was accepted.
    ///
    /// Self-transitions are accepted. `Invalid` can only be left through
    /// [`reset`](Self::reset).
    pub fn transition(&mut self, to: PlaybackState) -> bool {
        let allowed = match (self.state, to) {
            (_, PlaybackState::Invalid) => true,
            (PlaybackState::Invalid, _) => false,
            (_, PlaybackState::Pending) => self.state == PlaybackState::Pending,
            _ => true,
        };

        if allowed {
            debug!("playback state {:?} -> {:?}", self.state, to);
            self.state = to;
        } else {
            debug!("rejected playback state {:?} -> {:?}", self.state, to);
        }
        allowed
    }

    /// The target of a play/pause toggle, or `Invalid` when there is
    /// nothing to play.
    pub fn toggle_target(&self, queue_is_empty: bool) -> PlaybackState {
        if queue_is_empty {
            PlaybackState::Invalid
        } else if self.is_playing() {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        }
    }

    /// Return to `Pending` after a fresh load. Only `Invalid` is reset;
    /// playing or paused sessions carry over to the new queue.
    pub fn reset(&mut self) {
        if self.state == PlaybackState::Invalid {
            debug!("playback state reset to Pending");
            self.state = PlaybackState::Pending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates_from_pending() {
        let mut machine = PlaybackStateMachine::new();
        let mut seen = Vec::new();

        for _ in 0..3 {
            let target = machine.toggle_target(false);
            assert!(machine.transition(target));
            seen.push(machine.state());
        }

        assert_eq!(
            seen,
            vec![
                PlaybackState::Playing,
                PlaybackState::Paused,
                PlaybackState::Playing
            ]
        );
    }

    #[test]
    fn empty_queue_targets_invalid() {
        let machine = PlaybackStateMachine::new();
        assert_eq!(machine.toggle_target(true), PlaybackState::Invalid);
    }

    #[test]
    fn invalid_only_leaves_through_reset() {
        let mut machine = PlaybackStateMachine::new();
        assert!(machine.transition(PlaybackState::Invalid));

        assert!(!machine.transition(PlaybackState::Playing));
        assert!(!machine.transition(PlaybackState::Paused));
        assert!(machine.transition(PlaybackState::Invalid));
        assert_eq!(machine.state(), PlaybackState::Invalid);

        machine.reset();
        assert_eq!(machine.state(), PlaybackState::Pending);
        assert!(machine.transition(PlaybackState::Playing));
    }

    #[test]
    fn forcing_the_same_state_is_accepted() {
        let mut machine = PlaybackStateMachine::new();
        assert!(machine.transition(PlaybackState::Playing));
        assert!(machine.transition(PlaybackState::Playing));
        assert_eq!(machine.state(), PlaybackState::Playing);
    }

    #[test]
    fn reset_keeps_active_sessions() {
        let mut machine = PlaybackStateMachine::new();
        machine.transition(PlaybackState::Paused);

        machine.reset();

        assert_eq!(machine.state(), PlaybackState::Paused);
        assert!(!machine.transition(PlaybackState::Pending));
    }
}
