//! Keyboard mapping
//!
//! The game listens for a single logical key. Key repeat is not filtered:
//! every keydown counts.

/// Logical inputs the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a run when idle, jump while running
    Jump,
}

/// `KeyboardEvent.code` bound to [`Action::Jump`]
pub const JUMP_KEY_CODE: &str = "Space";

/// Map a physical key code to an action
pub fn action_for_code(code: &str) -> Option<Action> {
    match code {
        JUMP_KEY_CODE => Some(Action::Jump),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_space_is_bound() {
        assert_eq!(action_for_code("Space"), Some(Action::Jump));
        assert_eq!(action_for_code("Enter"), None);
        assert_eq!(action_for_code("KeyW"), None);
        assert_eq!(action_for_code("space"), None);
    }
}
