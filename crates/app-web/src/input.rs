// Input mapping kept free of web_sys so host tests can include it directly.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Cast, reel or dismiss depending on the fishing state.
    Primary,
    /// Only dismisses a landed catch.
    Dismiss,
}

pub const PRIMARY_BUTTON: i16 = 0;

#[inline]
pub fn action_for_key(key: &str, repeat: bool) -> Option<InputAction> {
    if repeat {
        return None;
    }
    match key {
        " " | "Enter" => Some(InputAction::Primary),
        "Escape" => Some(InputAction::Dismiss),
        _ => None,
    }
}

/// Left mouse button, first touch or pen contact.
#[inline]
pub fn action_for_pointer(button: i16, is_primary: bool) -> Option<InputAction> {
    (is_primary && button == PRIMARY_BUTTON).then_some(InputAction::Primary)
}
