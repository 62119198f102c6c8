//! Tray icon contract.
//!
//! The icon itself belongs to the front end. The core only decides what each
//! activation and menu entry does.

use serde::{Deserialize, Serialize};

pub use super::view::APP_TITLE as TOOLTIP;

/// How the user activated the tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrayActivation {
    Unknown,
    Context,
    DoubleClick,
    Trigger,
    MiddleClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrayMenuAction {
    /// Show the main window.
    Options,
    /// Terminate the process.
    Quit,
}

/// One line of the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Action(TrayMenuAction, &'static str),
    Separator,
}

/// Context menu, top to bottom.
pub const MENU: [MenuEntry; 3] = [
    MenuEntry::Action(TrayMenuAction::Options, "Options"),
    MenuEntry::Separator,
    MenuEntry::Action(TrayMenuAction::Quit, "Quit"),
];

impl TrayActivation {
    /// Only a double click restores the window.
    pub fn restores_window(self) -> bool {
        self == TrayActivation::DoubleClick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_is_options_separator_quit() {
        assert_eq!(
            MENU,
            [
                MenuEntry::Action(TrayMenuAction::Options, "Options"),
                MenuEntry::Separator,
                MenuEntry::Action(TrayMenuAction::Quit, "Quit"),
            ]
        );
        assert_eq!(TOOLTIP, "Time Master");
    }

    #[test]
    fn only_double_click_restores() {
        assert!(TrayActivation::DoubleClick.restores_window());
        for other in [
            TrayActivation::Unknown,
            TrayActivation::Context,
            TrayActivation::Trigger,
            TrayActivation::MiddleClick,
        ] {
            assert!(!other.restores_window());
        }
    }
}
