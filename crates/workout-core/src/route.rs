//! Route table
//!
//! The three screens of the app and their paths.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Login,
    Register,
    Main,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Main => "/app",
        }
    }

    /// Unknown paths fall back to the login screen.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/register" => Route::Register,
            "/app" => Route::Main,
            _ => Route::Login,
        }
    }

    /// Screens behind the session gate
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Main)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
