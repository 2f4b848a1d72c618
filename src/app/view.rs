use super::messages::Message;
use super::state::{
    App, LOADING_BAR_HEIGHT_PX, LOADING_BAR_WIDTH_PX, OVERLAY_ACTION_SIZE_PX,
    OVERLAY_BODY_SIZE_PX, OVERLAY_MAX_WIDTH_PX, OVERLAY_SIDE_PADDING_PX, OVERLAY_TITLE_SIZE_PX,
    PLAYBACK_SCROLL_ID,
};
use crate::config::ThemeMode;
use crate::theme::{Palette, faded};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Space, Stack, button, column, container, image, progress_bar, scrollable, stack, text,
};
use iced::{Alignment, Background, ContentFit, Element, Length, Theme};
use neurobridge_core::{Overlay, OverlayPosition};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let palette = Palette::for_mode(self.config.theme);

        let content: Element<'_, Message> = if self.engine.is_loading() {
            self.loading_view(palette)
        } else {
            stack![
                self.frame_layer(),
                self.scroll_layer(),
                self.overlay_layer(palette),
                self.theme_toggle(),
            ]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(palette.background)),
                text_color: Some(palette.title),
                ..container::Style::default()
            })
            .into()
    }

    fn loading_view(&self, palette: Palette) -> Element<'_, Message> {
        let percent = self.loading_percent();
        let mut content = column![
            text("Loading NeuroBridge")
                .size(16)
                .color(palette.body),
            text(format!("{}%", percent.round() as u32))
                .size(32)
                .color(palette.title),
            progress_bar(0.0..=100.0, percent)
                .width(Length::Fixed(LOADING_BAR_WIDTH_PX))
                .height(Length::Fixed(LOADING_BAR_HEIGHT_PX)),
        ]
        .spacing(12)
        .align_x(Alignment::Center);

        if let Some(error) = &self.load_error {
            content = content.push(text(error.as_str()).size(14).color(palette.accent));
        }

        container(content).center(Length::Fill).into()
    }

    fn frame_layer(&self) -> Element<'_, Message> {
        match &self.frame.handle {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Space::new(Length::Fill, Length::Fill).into(),
        }
    }

    /// Invisible track whose scroll position drives playback.
    fn scroll_layer(&self) -> Element<'_, Message> {
        let track = Space::new(
            Length::Fill,
            Length::Fixed(self.viewport.scroll_content_height()),
        );
        scrollable(track)
            .id(PLAYBACK_SCROLL_ID.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .on_scroll(|viewport| Message::Scrolled {
                offset: viewport.relative_offset(),
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .into()
    }

    fn overlay_layer(&self, palette: Palette) -> Element<'_, Message> {
        let progress = self.engine.smoothed_progress();
        let cards: Vec<Element<'_, Message>> = self
            .engine
            .overlays()
            .visible(progress)
            .map(|(overlay, opacity)| overlay_card(overlay, opacity, palette))
            .collect();

        if cards.is_empty() {
            Space::new(Length::Fill, Length::Fill).into()
        } else {
            Stack::with_children(cards)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }

    fn theme_toggle(&self) -> Element<'_, Message> {
        let label = match self.config.theme {
            ThemeMode::Day => "Night",
            ThemeMode::Night => "Day",
        };
        container(
            button(text(label).size(14))
                .padding([6, 14])
                .style(button::secondary)
                .on_press(Message::ToggleTheme),
        )
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(16)
        .into()
    }
}

fn overlay_card<'a>(overlay: &'a Overlay, opacity: f32, palette: Palette) -> Element<'a, Message> {
    let align = match overlay.window.position() {
        OverlayPosition::Center => Horizontal::Center,
        OverlayPosition::Left => Horizontal::Left,
        OverlayPosition::Right => Horizontal::Right,
    };

    let mut content = column![
        text(overlay.title.as_str())
            .size(OVERLAY_TITLE_SIZE_PX)
            .color(faded(palette.title, opacity))
            .align_x(align),
    ]
    .spacing(16)
    .max_width(OVERLAY_MAX_WIDTH_PX)
    .align_x(align);

    if !overlay.body.is_empty() {
        content = content.push(
            text(overlay.body.as_str())
                .size(OVERLAY_BODY_SIZE_PX)
                .color(faded(palette.body, opacity))
                .align_x(align),
        );
    }

    if let Some(label) = &overlay.action {
        content = content.push(
            button(text(label.as_str()).size(OVERLAY_ACTION_SIZE_PX))
                .padding([10, 24])
                .style(move |theme: &Theme, status| faded_button(theme, status, opacity))
                .on_press(Message::OverlayAction(label.clone())),
        );
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding([0, OVERLAY_SIDE_PADDING_PX])
        .align_x(align)
        .align_y(Vertical::Center)
        .into()
}

fn faded_button(theme: &Theme, status: button::Status, opacity: f32) -> button::Style {
    let base = button::primary(theme, status);
    button::Style {
        background: base.background.map(|background| match background {
            Background::Color(color) => Background::Color(faded(color, opacity)),
            other => other,
        }),
        text_color: faded(base.text_color, opacity),
        ..base
    }
}
