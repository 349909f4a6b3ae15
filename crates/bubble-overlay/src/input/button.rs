//! Button code contract between the widget and the handler

/// Code of the first share-with-friend button
pub const SHARE_FRIEND_BASE: u16 = 101;
/// Highest share-with-friend code
pub const SHARE_FRIEND_LAST: u16 = 105;

/// Decoded bubble button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleButton {
    AddMinute,
    TogglePause,
    Dismiss,
    OpenHostApp,
    OpenShareMenu,
    ToggleDebug,
    ShareMenuBack,
    /// Friend at this index of the share roster
    ShareWithFriend(usize),
}

impl BubbleButton {
    /// Decode a widget button code
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(BubbleButton::AddMinute),
            1 => Some(BubbleButton::TogglePause),
            2 => Some(BubbleButton::Dismiss),
            3 => Some(BubbleButton::OpenHostApp),
            4 => Some(BubbleButton::OpenShareMenu),
            5 => Some(BubbleButton::ToggleDebug),
            100 => Some(BubbleButton::ShareMenuBack),
            SHARE_FRIEND_BASE..=SHARE_FRIEND_LAST => {
                Some(BubbleButton::ShareWithFriend(usize::from(code - SHARE_FRIEND_BASE)))
            }
            _ => None,
        }
    }

    /// Widget button code
    pub fn code(self) -> u16 {
        match self {
            BubbleButton::AddMinute => 0,
            BubbleButton::TogglePause => 1,
            BubbleButton::Dismiss => 2,
            BubbleButton::OpenHostApp => 3,
            BubbleButton::OpenShareMenu => 4,
            BubbleButton::ToggleDebug => 5,
            BubbleButton::ShareMenuBack => 100,
            BubbleButton::ShareWithFriend(index) => SHARE_FRIEND_BASE + index as u16,
        }
    }

    /// True for the buttons shown on the main bubble (codes 0..=5)
    #[inline]
    pub fn is_main(self) -> bool {
        self.code() <= 5
    }
}
