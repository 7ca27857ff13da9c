use iced::widget::scrollable::Id as ScrollableId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Identity of the single reading scrollable, shared between the view and
/// the scroll effects.
pub(crate) static READER_SCROLL_ID: Lazy<ScrollableId> =
    Lazy::new(|| ScrollableId::new("reader-scroll"));

pub(crate) const FONT_SIZE_STEP: f32 = 1.0;

/// How long a navigation target stays visually flashed.
pub(crate) const FLASH_DURATION: Duration = Duration::from_millis(1600);

/// How long the "copied" acknowledgment stays visible.
pub(crate) const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// Cadence of the UI tick while any timer is pending.
pub(crate) const TICK_INTERVAL: Duration = Duration::from_millis(100);
