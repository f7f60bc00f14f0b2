//! Engine configuration: decapitalization toggles, text flags, text speed.

use crate::tagging::{TextHandle, tag};

/// Context a string is printed in, for per-category decapitalization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextCategory {
    Nicknames,
    MainMenu,
    OptionMenu,
    StartMenu,
    PartyMenu,
    MapNames,
    EasyChat,
    FieldMessages,
    SummaryScreen,
    ItemNames,
}

/// Which categories of text get decapitalized.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecapConfig {
    /// Master switch; off disables folding for every printer.
    pub enabled: bool,
    /// Player names, nicknames, and box names.
    pub nicknames: bool,
    pub main_menu: bool,
    pub option_menu: bool,
    /// Start menu options and save menu text.
    pub start_menu: bool,
    pub party_menu: bool,
    pub map_names: bool,
    /// Easy Chat words and interface.
    pub easy_chat: bool,
    /// Field messages, including scripts.
    pub field_messages: bool,
    pub summary_screen: bool,
    pub item_names: bool,
}

impl Default for DecapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nicknames: false,
            main_menu: true,
            option_menu: true,
            start_menu: true,
            party_menu: true,
            map_names: true,
            easy_chat: true,
            field_messages: true,
            summary_screen: true,
            item_names: true,
        }
    }
}

impl DecapConfig {
    /// Everything off.
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            nicknames: false,
            main_menu: false,
            option_menu: false,
            start_menu: false,
            party_menu: false,
            map_names: false,
            easy_chat: false,
            field_messages: false,
            summary_screen: false,
            item_names: false,
        }
    }

    pub fn folds(&self, category: TextCategory) -> bool {
        self.enabled
            && match category {
                TextCategory::Nicknames => self.nicknames,
                TextCategory::MainMenu => self.main_menu,
                TextCategory::OptionMenu => self.option_menu,
                TextCategory::StartMenu => self.start_menu,
                TextCategory::PartyMenu => self.party_menu,
                TextCategory::MapNames => self.map_names,
                TextCategory::EasyChat => self.easy_chat,
                TextCategory::FieldMessages => self.field_messages,
                TextCategory::SummaryScreen => self.summary_screen,
                TextCategory::ItemNames => self.item_names,
            }
    }

    /// Tags `handle` preserve-case when `category` is not decapitalized, so
    /// it can be handed to any printer unchanged.
    pub fn gate<'a>(&self, category: TextCategory, handle: TextHandle<'a>) -> TextHandle<'a> {
        if self.folds(category) {
            handle
        } else {
            tag(handle)
        }
    }
}

/// Global printer behavior flags.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TextFlags {
    /// An advance press while a character delay is pending skips delays for
    /// the rest of the job.
    pub can_speed_up_print: bool,
    /// Draw the dark variant of the down arrow.
    pub use_alternate_down_arrow: bool,
    /// Waits time out on their own; characters are paced at a fixed rate.
    pub auto_scroll: bool,
    /// Treat the player's text speed as [`TextSpeedOption::Mid`].
    pub force_mid_text_speed: bool,
}

/// Player-selected text speed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TextSpeedOption {
    Slow,
    #[default]
    Mid,
    Fast,
}

impl TextSpeedOption {
    /// Per-character delay in ticks for callers printing at player speed.
    pub const fn delay(self) -> u8 {
        match self {
            Self::Slow => 8,
            Self::Mid => 4,
            Self::Fast => 1,
        }
    }

    /// Pixels scrolled per tick while a printer scrolls a line away.
    pub const fn scroll_step(self) -> u8 {
        match self {
            Self::Slow => 1,
            Self::Mid => 2,
            Self::Fast => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EngineConfig {
    pub decap: DecapConfig,
    pub flags: TextFlags,
    pub text_speed: TextSpeedOption,
}

impl EngineConfig {
    pub const fn new(decap: DecapConfig, flags: TextFlags, text_speed: TextSpeedOption) -> Self {
        Self {
            decap,
            flags,
            text_speed,
        }
    }

    pub const fn with_flags(mut self, flags: TextFlags) -> Self {
        self.flags = flags;
        self
    }

    pub const fn with_decap(mut self, decap: DecapConfig) -> Self {
        self.decap = decap;
        self
    }

    /// Text speed after applying [`TextFlags::force_mid_text_speed`].
    pub fn effective_text_speed(&self) -> TextSpeedOption {
        if self.flags.force_mid_text_speed {
            TextSpeedOption::Mid
        } else {
            self.text_speed
        }
    }
}
