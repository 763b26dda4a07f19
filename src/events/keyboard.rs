/// Keyboard shortcuts understood by the visualizer.
///
/// Only `TogglePause` and `ResetPosition` act on the core; the rest are
/// handed back to the UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePause,
    ResetPosition,
    ToggleUi,
    ToggleSettings,
    ToggleFullscreen,
    ToggleQuality,
    CloseSettings,
}

impl KeyCommand {
    /// Whether the simulation core handles this command itself.
    pub fn is_core(self) -> bool {
        matches!(self, KeyCommand::TogglePause | KeyCommand::ResetPosition)
    }
}

#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    if key == " " {
        return Some(KeyCommand::TogglePause);
    }
    match key.to_ascii_lowercase().as_str() {
        "r" => Some(KeyCommand::ResetPosition),
        "h" => Some(KeyCommand::ToggleUi),
        "s" => Some(KeyCommand::ToggleSettings),
        "f" => Some(KeyCommand::ToggleFullscreen),
        "q" => Some(KeyCommand::ToggleQuality),
        "escape" => Some(KeyCommand::CloseSettings),
        _ => None,
    }
}
