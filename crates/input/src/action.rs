/// A discrete action produced by the input layer.
///
/// The session consumes actions, never raw device events. Held movement keys
/// are not actions; they live in [`crate::InputState`] and are sampled once
/// per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Attempt a pickup or a delivery, depending on mission state.
    Interact,
    /// Orbit the follow camera by the given angle deltas, in radians.
    Orbit { d_alpha: f32, d_beta: f32 },
    /// Zoom the follow camera. Positive values move it closer.
    Zoom(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interact_is_constructible() {
        assert!(matches!(Action::Interact, Action::Interact));
    }

    #[test]
    fn orbit_carries_deltas() {
        let a = Action::Orbit {
            d_alpha: 0.1,
            d_beta: -0.2,
        };
        assert_eq!(
            a,
            Action::Orbit {
                d_alpha: 0.1,
                d_beta: -0.2
            }
        );
    }
}
