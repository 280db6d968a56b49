//! Path-to-page routing. The client has a single page at `/`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(&'static str, Route)>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            routes: vec![("/", Route::Home)],
        }
    }
}

impl Router {
    pub const INITIAL_PATH: &'static str = "/";

    /// Route for `path`. An empty path is the root; trailing slashes are ignored.
    pub fn resolve(&self, path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        self.routes
            .iter()
            .find(|(p, _)| *p == normalized)
            .map(|(_, route)| *route)
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.iter().map(|(p, _)| *p)
    }
}
