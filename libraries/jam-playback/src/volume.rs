//! Volume control
//!
//! Level is a linear gain in `0.0..=1.0`, the same scale the audio output
//! takes. Mute silences the output without losing the level.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped to 0.0-1.0
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level),
            muted: false,
        }
    }

    /// Set volume level, clamped to 0.0-1.0
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp(level);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain to hand to the audio output
    ///
    /// Returns 0.0 if muted, otherwise the level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_clamped() {
        let mut volume = Volume::new(1.5);
        assert_eq!(volume.level(), 1.0);

        volume.set_level(-0.2);
        assert_eq!(volume.level(), 0.0);

        volume.set_level(f32::NAN);
        assert_eq!(volume.level(), 0.0);

        volume.set_level(0.3);
        assert_eq!(volume.level(), 0.3);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(0.6);

        volume.mute();
        assert!(volume.is_muted());
        assert_eq!(volume.gain(), 0.0);
        assert_eq!(volume.level(), 0.6);

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.gain(), 0.6);
    }
}
