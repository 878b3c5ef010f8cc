use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// Logical actions sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub quit: bool,
}

impl Controls {
    /// Map the set of currently held keys to actions. WASD and the arrow
    /// keys are equivalent; Escape quits.
    pub fn from_keys(keys_down: &HashSet<KeyCode>) -> Self {
        let held = |a: KeyCode, b: KeyCode| keys_down.contains(&a) || keys_down.contains(&b);
        Self {
            forward: held(KeyCode::KeyW, KeyCode::ArrowUp),
            backward: held(KeyCode::KeyS, KeyCode::ArrowDown),
            rotate_left: held(KeyCode::KeyA, KeyCode::ArrowLeft),
            rotate_right: held(KeyCode::KeyD, KeyCode::ArrowRight),
            quit: keys_down.contains(&KeyCode::Escape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_set_is_idle() {
        assert_eq!(Controls::from_keys(&HashSet::new()), Controls::default());
    }

    #[test]
    fn letters_and_arrows_map_to_the_same_action() {
        let keys: HashSet<KeyCode> = [KeyCode::KeyW, KeyCode::ArrowLeft].into_iter().collect();
        let controls = Controls::from_keys(&keys);
        assert!(controls.forward);
        assert!(controls.rotate_left);
        assert!(!controls.backward && !controls.rotate_right && !controls.quit);

        let keys: HashSet<KeyCode> = [KeyCode::ArrowDown, KeyCode::KeyD, KeyCode::Escape]
            .into_iter()
            .collect();
        let controls = Controls::from_keys(&keys);
        assert!(controls.backward && controls.rotate_right && controls.quit);
    }
}
