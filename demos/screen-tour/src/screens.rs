//! Two toy screens standing in for real UI surfaces.

pub struct MainScreen {
    pub greeting: String,
}

impl MainScreen {
    pub fn new(application: &str) -> Self {
        Self {
            greeting: format!("Welcome to {}", application),
        }
    }
}

pub struct DetailScreen {
    pub title: &'static str,
}

/// Short label for whatever screen is in front
pub fn describe(screen: &app_provider::ScreenHandle) -> String {
    if let Some(main) = screen.downcast_ref::<MainScreen>() {
        format!("main ({})", main.greeting)
    } else if let Some(detail) = screen.downcast_ref::<DetailScreen>() {
        format!("detail ({})", detail.title)
    } else {
        screen.id().to_string()
    }
}
