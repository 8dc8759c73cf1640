#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(i32, i32),
    Interact,

    /// No input this tick; NPCs still advance.
    Tick,
    Quit,
    None,
}
