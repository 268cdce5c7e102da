//! Mobile Navigation
//!
//! Hamburger-driven off-canvas menu. Open adds three flags (hamburger,
//! menu panel, body scroll lock) and closed removes all three.

mod controller;

pub use controller::NavigationController;

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// What a click means for the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    /// The hamburger control
    Hamburger,
    /// A navigation link
    Link,
    /// Somewhere outside both the hamburger and the panel
    Outside,
    /// Inside the panel but not on a link
    Inside,
}

impl MenuState {
    /// Transition for a click
    pub fn on_click(self, click: MenuClick) -> Self {
        match click {
            MenuClick::Hamburger => self.toggled(),
            MenuClick::Link | MenuClick::Outside => MenuState::Closed,
            MenuClick::Inside => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        assert_eq!(MenuState::Closed.on_click(MenuClick::Hamburger), MenuState::Open);
        assert_eq!(MenuState::Open.on_click(MenuClick::Hamburger), MenuState::Closed);
        assert_eq!(MenuState::Open.on_click(MenuClick::Link), MenuState::Closed);
        assert_eq!(MenuState::Closed.on_click(MenuClick::Link), MenuState::Closed);
        assert_eq!(MenuState::Open.on_click(MenuClick::Outside), MenuState::Closed);
        assert_eq!(MenuState::Open.on_click(MenuClick::Inside), MenuState::Open);
    }
}
