//! Session settings, built once at startup and passed to whoever needs them.

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub window_width: i32,
    pub window_height: i32,
    pub fullscreen: bool,
    pub debug: bool,
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub eye_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            fullscreen: false,
            debug: false,
            fov: 60.0,
            eye_height: 0.2,
        }
    }
}

impl Settings {
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_window_and_camera() {
        let s = Settings::default();
        assert_eq!((s.window_width, s.window_height), (800, 600));
        assert_eq!(s.fov, 60.0);
        assert_eq!(s.log_filter(), "info");
    }

    #[test]
    fn fullscreen_toggles() {
        let mut s = Settings::default();
        assert!(s.toggle_fullscreen());
        assert!(!s.toggle_fullscreen());
    }
}
