// Input binding configuration

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create a configuration from a list of bindings; later entries win
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_defaults_bound() {
        let config = InputConfig::default();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyW)),
            Some(Action::MoveForward)
        );
        assert_eq!(
            config.get_action(InputSource::mouse(MouseButton::Left)),
            Some(Action::Attack)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::ReleaseCursor)
        );
    }

    #[test]
    fn test_later_binding_wins() {
        let space = InputSource::key(KeyCode::Space);
        let config = InputConfig::from_bindings(vec![(space, Action::Jump), (space, Action::Attack)]);
        assert_eq!(config.get_action(space), Some(Action::Attack));
    }

    #[test]
    fn test_unbound_source() {
        let config = InputConfig::default();
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyZ)), None);
    }
}
