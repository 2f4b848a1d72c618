use super::super::state::App;
use super::Effect;
use tracing::info;

impl App {
    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = self.config.theme.toggled();
        let variant = self.config.theme.variant();
        info!(theme = %self.config.theme, %variant, "Switching frame variant");
        effects.push(Effect::StartFrameLoad(variant));
    }
}
