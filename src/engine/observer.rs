use super::character::CharacterState;

/// Receives state transitions from a running engine.
///
/// All methods default to no-ops so a consumer implements only what it
/// renders. The engine calls these synchronously from `step`; implementations
/// should hand off quickly rather than block.
pub trait RunObserver {
    /// The block currently executing, or `None` once the run leaves it.
    fn on_active_block(&mut self, _block_id: Option<&str>) {}

    /// The edge currently being crossed, or `None` once crossed.
    fn on_active_edge(&mut self, _edge_id: Option<&str>) {}

    /// The full console text, newline-joined, after each appended line.
    fn on_console(&mut self, _text: &str) {}

    /// The character pose after a move/rotate/output mutation.
    fn on_character(&mut self, _state: &CharacterState) {}

    /// A transient error flag on a block. Clearing the flag after a display
    /// window is the rendering collaborator's concern; the engine reports it
    /// once, together with the abort.
    fn on_block_error(&mut self, _block_id: &str, _message: &str) {}
}

/// The default observer: ignores everything.
pub struct NullObserver;

impl RunObserver for NullObserver {}
