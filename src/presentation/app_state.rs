// Application state for HTTP handlers
use crate::application::view_coordinator::ViewCoordinator;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: ViewCoordinator,
}
