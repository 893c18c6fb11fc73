//! Game flow: end-of-level screens and scene changes

/// A scene change requested by gameplay, applied between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    /// Restart the current level.
    Reload,
    /// Advance to the next level in the playlist.
    Next,
}

/// Operations the UI / scene layer exposes to gameplay.
pub trait GameFlow: Send {
    /// Reveal the game-over screen.
    fn end_game(&mut self);

    /// Reveal the level-complete screen.
    fn complete_level(&mut self);

    /// Ask for the current scene to be reloaded.
    fn reload_scene(&mut self);

    /// Ask for the next indexed scene to be loaded.
    fn load_next_scene(&mut self);

    /// Take the outstanding scene request, if any.
    fn take_scene_request(&mut self) -> Option<SceneRequest> {
        None
    }

    /// A level finished loading. Not called when a request fails.
    fn scene_loaded(&mut self) {}

    /// Whether play has reached an end screen.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Default flow: two UI panels and a single pending scene request.
#[derive(Debug, Clone, Default)]
pub struct UiFlow {
    /// Game-over panel visible
    pub game_over_visible: bool,
    /// Level-complete panel visible
    pub level_complete_visible: bool,
    request: Option<SceneRequest>,
}

impl UiFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide both panels, as a freshly loaded scene would.
    pub fn reset(&mut self) {
        self.game_over_visible = false;
        self.level_complete_visible = false;
    }

    fn request(&mut self, request: SceneRequest) {
        if let Some(previous) = self.request.replace(request) {
            log::debug!("scene request {previous:?} superseded by {request:?}");
        }
    }
}

impl GameFlow for UiFlow {
    fn end_game(&mut self) {
        if !self.game_over_visible {
            log::info!("game over");
        }
        self.game_over_visible = true;
    }

    fn complete_level(&mut self) {
        if !self.level_complete_visible {
            log::info!("level complete");
        }
        self.level_complete_visible = true;
    }

    fn reload_scene(&mut self) {
        self.request(SceneRequest::Reload);
    }

    fn load_next_scene(&mut self) {
        self.request(SceneRequest::Next);
    }

    fn take_scene_request(&mut self) -> Option<SceneRequest> {
        self.request.take()
    }

    fn scene_loaded(&mut self) {
        self.reset();
    }

    fn is_finished(&self) -> bool {
        self.game_over_visible || self.level_complete_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_are_independent() {
        let mut flow = UiFlow::new();
        flow.end_game();
        assert!(flow.game_over_visible);
        assert!(!flow.level_complete_visible);
        assert!(flow.is_finished());

        flow.complete_level();
        assert!(flow.level_complete_visible);
    }

    #[test]
    fn test_latest_scene_request_wins() {
        let mut flow = UiFlow::new();
        flow.reload_scene();
        flow.load_next_scene();
        assert_eq!(flow.take_scene_request(), Some(SceneRequest::Next));
        assert_eq!(flow.take_scene_request(), None);
    }

    #[test]
    fn test_panels_stay_until_scene_loaded() {
        let mut flow = UiFlow::new();
        flow.end_game();
        flow.reload_scene();

        assert_eq!(flow.take_scene_request(), Some(SceneRequest::Reload));
        assert_eq!(flow.take_scene_request(), None);
        assert!(flow.is_finished());

        flow.scene_loaded();
        assert!(!flow.is_finished());
    }
}
