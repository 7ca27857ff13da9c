use super::super::super::messages::Message;
use super::super::super::state::{App, READER_SCROLL_ID};
use super::super::Effect;
use crate::config::save_config;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::AbsoluteOffset;
use iced::window;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                save_config(Path::new("conf/config.toml"), &self.config);
                Task::none()
            }
            Effect::ScrollTo(offset) => {
                self.reader.last_scroll_offset = offset;
                iced::widget::scrollable::scroll_to(
                    READER_SCROLL_ID.clone(),
                    AbsoluteOffset { x: 0.0, y: offset },
                )
            }
            Effect::FocusParagraph(id) => {
                let offset = self.estimated_offset_for(&id);
                self.reader.flash_paragraph(id, Instant::now());
                self.reader.last_scroll_offset = offset;
                iced::widget::scrollable::scroll_to(
                    READER_SCROLL_ID.clone(),
                    AbsoluteOffset { x: 0.0, y: offset },
                )
            }
            Effect::CopyToClipboard(text) => {
                self.reader.copied_at = Some(Instant::now());
                iced::clipboard::write(text)
            }
            Effect::ExportAnnotations => {
                self.export_annotations_to_file();
                Task::none()
            }
            Effect::Quit => {
                self.positions.flush();
                save_config(Path::new("conf/config.toml"), &self.config);
                info!("Shutting down");
                iced::exit()
            }
        }
    }

    fn export_annotations_to_file(&self) {
        let export = self.annotations.export_document();
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = format!("confesion-anotaciones-{stamp}.json");
        match serde_json::to_string_pretty(&export) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    warn!(path, error = %err, "Failed to write export file");
                } else {
                    info!(
                        path,
                        bookmarks = export.bookmarks.len(),
                        highlights = export.highlights.len(),
                        "Exported annotations"
                    );
                }
            }
            Err(err) => warn!(error = %err, "Failed to serialize export"),
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(iced::window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(iced::window::Event::Moved(position)) => Some(Message::WindowMoved {
            x: position.x,
            y: position.y,
        }),
        Event::Window(iced::window::Event::CloseRequested) => Some(Message::SafeQuit),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
