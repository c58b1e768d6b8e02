use log::info;

use crate::{
    constants::THEME_KEY,
    storage::{SharedStorage, Storage, StorageError},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than "dark" reads as the light theme
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub struct ThemeController<S> {
    storage: SharedStorage<S>,
    theme: Theme,
}

impl<S: Storage> ThemeController<S> {
    pub fn load(storage: SharedStorage<S>) -> Self {
        let theme = storage
            .lock()
            .unwrap()
            .get_item(THEME_KEY)
            .map_or_else(Theme::default, |value| Theme::from_stored(&value));
        Self { storage, theme }
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches to the other theme and remembers the choice
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let theme = self.theme.toggled();
        self.storage
            .lock()
            .unwrap()
            .set_item(THEME_KEY, theme.as_str().into())?;
        self.theme = theme;
        info!("Switched to the {} theme", theme.as_str());
        Ok(theme)
    }
}
