/// Playback lifecycle as seen by the UI.
///
/// `Starting` and `Stopping` are requests in flight; the transport's change
/// notification settles them into `Playing` or `Stopped`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransportState {
    #[default]
    Stopped,
    Starting,
    Playing,
    Stopping,
}

impl TransportState {
    /// Every state, in declaration order.
    pub const ALL: [TransportState; 4] = [
        TransportState::Stopped,
        TransportState::Starting,
        TransportState::Playing,
        TransportState::Stopping,
    ];
}

/// Which of the three buttons accept clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonStates {
    pub open: bool,
    pub play: bool,
    pub stop: bool,
}

impl Default for ButtonStates {
    fn default() -> Self {
        Self {
            open: true,
            play: false,
            stop: false,
        }
    }
}
