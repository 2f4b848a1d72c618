use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use iced::window;
use iced::{Subscription, Task};
use tracing::info;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![window::resize_events().map(|(_id, size)| Message::WindowResized {
                width: size.width,
                height: size.height,
            })];

        if app.engine.needs_tick() {
            subscriptions.push(window::frames().map(Message::AnimationFrame));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::Scrolled {
                offset,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset, viewport_height, content_height),
            Message::WindowResized { width, height } => self.handle_window_resized(width, height),
            Message::AnimationFrame(now) => self.handle_animation_frame(now),
            Message::FrameLoad(event) => self.handle_frame_load(event, &mut effects),
            Message::FrameLoadFinished { generation, error } => {
                self.handle_frame_load_finished(generation, error)
            }
            Message::OverlayAction(label) => {
                info!(%label, progress = self.engine.smoothed_progress(), "Overlay action selected");
            }
        }

        effects
    }
}
