mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::annotations::AnnotationStore;
use crate::config::AppConfig;
use crate::document::Document;
use crate::position::PositionTracker;
use crate::prefs::Preferences;
use iced::{Point, Size, window};

/// Helper to launch the app with the loaded document and stores.
pub fn run_app(
    document: Document,
    config: AppConfig,
    annotations: AnnotationStore,
    positions: PositionTracker,
    prefs: Preferences,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        position: match (config.window_pos_x, config.window_pos_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                window::Position::Specific(Point::new(x, y))
            }
            _ => window::Position::Default,
        },
        ..window::Settings::default()
    };

    iced::application("Confesión de Fe de 1689", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| app.current_theme())
        .run_with(move || App::bootstrap(document, config, annotations, positions, prefs))
}
