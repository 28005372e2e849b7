//! Screen identifier enum.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Intro splash. Not in the tab bar.
    #[default]
    GetStarted,
    Home,    // 1
    Battery, // 2
    Network, // 3
}

impl ScreenId {
    /// Screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Home, Self::Battery, Self::Network];

    /// Numeric key for this screen. GetStarted has none.
    pub fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Battery => 2,
            Self::Network => 3,
            Self::GetStarted => 0,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GetStarted => "Get Started",
            Self::Home => "Home",
            Self::Battery => "Battery",
            Self::Network => "Network",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(4), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Network.next(), ScreenId::Home);
        assert_eq!(ScreenId::Home.prev(), ScreenId::Network);
        // The splash is outside the cycle; Tab from it lands after Home.
        assert_eq!(ScreenId::GetStarted.next(), ScreenId::Battery);
    }
}
