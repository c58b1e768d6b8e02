use crate::constants::SCROLL_THRESHOLD;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Navbar {
    scrolled: bool,
    menu_open: bool,
}

impl Navbar {
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scrolled = scroll_y > SCROLL_THRESHOLD;
    }

    /// The hamburger button
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Following a link closes the menu
    pub fn on_link_click(&mut self) {
        self.menu_open = false;
    }

    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }
}
