/// The page-level theme mode.
///
/// The host application owns the current mode and passes it to widget
/// builds every frame; widgets resolve their palettes against it at
/// build time, so a toggle takes effect on the next render without
/// touching any widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}
