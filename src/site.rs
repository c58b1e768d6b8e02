use log::debug;

use crate::{
    articles::{ArticleBrowser, Catalog},
    carousel::{CarouselController, SlideView},
    comments::CommentBoard,
    config::Config,
    contact::ContactForm,
    error::SiteResult,
    forms::FormRules,
    navbar::Navbar,
    storage::{SharedStorage, Storage},
    theme::ThemeController,
    view::View,
};

/// Everything a page shares: configuration, storage, theme and navigation bar. The page
/// regions are built from it, and a region that isn't on the page is simply never built.
pub struct Site<S> {
    config: Config,
    storage: SharedStorage<S>,
    catalog: Catalog,
    theme: ThemeController<S>,
    navbar: Navbar,
}

impl<S: Storage> Site<S> {
    pub fn new(config: Config, storage: SharedStorage<S>) -> Self {
        Self::with_catalog(config, storage, Catalog::sample())
    }

    pub fn with_catalog(config: Config, storage: SharedStorage<S>, catalog: Catalog) -> Self {
        let theme = ThemeController::load(storage.clone());
        debug!("Using the {} theme", theme.theme().as_str());
        Self {
            config,
            storage,
            catalog,
            theme,
            navbar: Navbar::default(),
        }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> SharedStorage<S> {
        self.storage.clone()
    }

    pub const fn theme(&self) -> &ThemeController<S> {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeController<S> {
        &mut self.theme
    }

    pub const fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    pub fn navbar_mut(&mut self) -> &mut Navbar {
        &mut self.navbar
    }

    pub fn article_browser<V: View>(&self, view: V) -> SiteResult<ArticleBrowser<S, V>> {
        ArticleBrowser::new(
            self.catalog.clone(),
            self.storage.clone(),
            view,
            self.config.detail_page.clone(),
        )
    }

    pub fn comment_board<V: View>(&self, view: V) -> CommentBoard<S, V> {
        CommentBoard::new(
            self.storage.clone(),
            view,
            self.config.comment_submit_delay(),
            self.config.date_format.clone(),
        )
    }

    pub fn contact_form(&self, rules: FormRules) -> ContactForm<S> {
        ContactForm::new(
            rules,
            self.storage.clone(),
            self.config.contact_submit_delay(),
        )
    }

    /// Builds the carousel with autoplay running, or nothing if there are no slides. Must be
    /// called from within a tokio runtime.
    pub fn carousel<V>(&self, view: V) -> Option<CarouselController<V>>
    where
        V: SlideView + Send + 'static,
    {
        if view.slide_count() == 0 {
            debug!("There are no slides, the carousel stays off");
            return None;
        }
        let mut carousel = CarouselController::new(view, self.config.autoplay_interval());
        carousel.start_autoplay();
        Some(carousel)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::Site;
    use crate::{
        carousel::testing::RecordingSlides,
        config::Config,
        constants::{CONTACT_MESSAGES_KEY, THEME_KEY},
        contact::load_contact_messages,
        forms::{ContactFields, FormRules, Submission},
        storage::{memory::MemoryStorage, Storage},
        theme::Theme,
        view::testing::RecordingView,
    };

    fn site() -> Site<MemoryStorage> {
        Site::new(Config::sample(), Arc::new(Mutex::new(MemoryStorage::default())))
    }

    #[test]
    fn theme_is_restored_from_storage() {
        let mut storage = MemoryStorage::default();
        storage.set_item(THEME_KEY, "dark".into()).unwrap();
        let site = Site::new(Config::sample(), Arc::new(Mutex::new(storage)));
        assert_eq!(site.theme().theme(), Theme::Dark);
    }

    #[test]
    fn navbar_state_lives_on_the_site() {
        let mut site = site();
        assert!(!site.navbar().is_scrolled());
        site.navbar_mut().on_scroll(120.0);
        site.navbar_mut().toggle_menu();
        assert!(site.navbar().is_scrolled());
        assert!(site.navbar().is_menu_open());
        site.navbar_mut().on_link_click();
        assert!(!site.navbar().is_menu_open());
    }

    #[tokio::test(start_paused = true)]
    async fn carousel_needs_slides() {
        let site = site();
        assert!(site.carousel(RecordingSlides::new(0)).is_none());
        let carousel = site.carousel(RecordingSlides::new(3)).unwrap();
        assert!(carousel.is_autoplay_active());
        assert_eq!(carousel.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn regions_share_one_storage() {
        let site = site();
        let board = site.comment_board(RecordingView::default());
        board.submit("Alice", "Hi").await.unwrap();
        assert_eq!(site.comment_board(RecordingView::default()).comments().len(), 1);

        let homepage = site.contact_form(FormRules::HOMEPAGE);
        let contact_page = site.contact_form(FormRules::CONTACT_PAGE);
        let fields = ContactFields::new("Ann", "ann@example.com", "Hi");
        assert_eq!(homepage.submit(&fields).await.unwrap(), Submission::Accepted);
        assert_eq!(contact_page.submit(&fields).await.unwrap(), Submission::Accepted);

        let storage = site.storage();
        let storage = storage.lock().unwrap();
        assert_eq!(load_contact_messages(&*storage).len(), 2);
        assert!(storage.get_item(CONTACT_MESSAGES_KEY).unwrap().starts_with('['));
    }

    #[test]
    fn article_browser_uses_the_configured_detail_page() {
        let mut config = Config::sample();
        config.detail_page = "article.html".into();
        let site = Site::new(config, Arc::new(Mutex::new(MemoryStorage::default())));
        let browser = site.article_browser(RecordingView::default()).unwrap();
        assert_eq!(browser.view_article(1).unwrap(), Some("article.html"));
    }
}
