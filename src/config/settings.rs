//! Process-wide display settings
//!
//! Built once at startup from [`Config`](super::Config) and handed to the
//! rendering layer explicitly. Changes go through the setters; dependents
//! observe them through a [`watch::Receiver`].

use super::{AppearanceConfig, ThemeMode};
use tokio::sync::watch;

#[derive(Debug)]
pub struct Settings {
    theme: watch::Sender<ThemeMode>,
    colors: bool,
}

impl Settings {
    pub fn new(appearance: &AppearanceConfig) -> Self {
        let (theme, _) = watch::channel(appearance.theme);
        Self {
            theme,
            colors: appearance.colors,
        }
    }

    pub fn theme(&self) -> ThemeMode {
        *self.theme.borrow()
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    /// Set the theme; subscribers are notified only when the value changes
    pub fn set_theme(&self, mode: ThemeMode) {
        let changed = self.theme.send_if_modified(|current| {
            if *current == mode {
                false
            } else {
                *current = mode;
                true
            }
        });
        if changed {
            tracing::debug!("Theme changed to {}", mode);
        }
    }

    pub fn toggle_theme(&self) -> ThemeMode {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    /// Receiver that observes theme changes
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.theme.subscribe()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(&AppearanceConfig::default())
    }
}
