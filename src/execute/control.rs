use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Shared handle onto an executor's playback state.
///
/// Clones observe and steer the same run. Requests take effect between commands.
#[derive(Clone, Debug, Default)]
pub struct PlaybackControl {
    state: Rc<Cell<PlaybackState>>,
}

impl PlaybackControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state() == PlaybackState::Paused
    }

    /// Ask a running playback to stop after the current command. No effect when not playing.
    pub fn pause(&self) {
        if self.is_playing() {
            self.state.set(PlaybackState::Paused);
        }
    }

    pub fn stop(&self) {
        self.state.set(PlaybackState::Idle);
    }

    pub(crate) fn set(&self, state: PlaybackState) {
        self.state.set(state);
    }
}
