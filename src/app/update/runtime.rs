use super::super::messages::Message;
use super::super::state::{App, PLAYBACK_SCROLL_ID};
use super::Effect;
use iced::Task;
use iced::window;
use iced::futures::channel::mpsc;
use iced::widget::scrollable;
use neurobridge_core::{LoadCycle, load_frames};
use std::sync::Arc;

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::StartFrameLoad(variant) => {
                self.load_error = None;
                let cycle = self.engine.begin_load(variant);
                self.spawn_frame_load(cycle)
            }
            Effect::SnapScroll(offset) => scrollable::snap_to(PLAYBACK_SCROLL_ID.clone(), offset),
            Effect::QueryWindowSize => window::get_oldest()
                .and_then(window::get_size)
                .map(|size| Message::WindowResized {
                    width: size.width,
                    height: size.height,
                }),
        }
    }

    /// Drive `cycle` in the background. Load events stream back as
    /// `Message::FrameLoad`; the driver's own result arrives last as
    /// `Message::FrameLoadFinished`.
    fn spawn_frame_load(&self, cycle: LoadCycle) -> Task<Message> {
        let generation = cycle.generation();
        let source = Arc::clone(&self.source);
        let (sender, receiver) = mpsc::unbounded();

        let driver = Task::perform(
            async move {
                let result = load_frames(cycle, source, move |event| {
                    let _ = sender.unbounded_send(event);
                })
                .await;
                result.err().map(|err| format!("{err:#}"))
            },
            move |error| Message::FrameLoadFinished { generation, error },
        );
        let events = Task::run(receiver, Message::FrameLoad);

        Task::batch([events, driver])
    }
}
