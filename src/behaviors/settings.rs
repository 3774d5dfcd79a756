//! Settings panel toggling over an injected panel handle.

/// A panel that can report and change its visibility.
pub trait Panel {
    fn is_visible(&self) -> bool;
    fn show(&mut self);
    fn hide(&mut self);
}

/// Show/hide/toggle operations for a settings panel.
#[derive(Debug)]
pub struct SettingsToggle<P: Panel> {
    panel: P,
}

impl<P: Panel> SettingsToggle<P> {
    pub fn new(panel: P) -> Self {
        SettingsToggle { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn toggle_settings(&mut self) {
        if self.panel.is_visible() {
            self.hide_settings();
        } else {
            self.show_settings();
        }
    }

    pub fn show_settings(&mut self) {
        self.panel.show();
    }

    pub fn hide_settings(&mut self) {
        self.panel.hide();
    }
}
