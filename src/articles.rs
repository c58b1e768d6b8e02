use std::borrow::Cow;

use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::{
    constants::{ALL_TAGS, CURRENT_ARTICLE_ID_KEY, SAMPLE_ARTICLES},
    error::SiteResult,
    lower_case_string::LowerCaseString,
    page_compilers::{compile_articles, compile_filter_tags},
    storage::{SharedStorage, Storage},
    view::View,
};

pub type CowStr = Cow<'static, str>;
pub type ArticleId = u32;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: CowStr,
    pub summary: CowStr,
    /// Category label
    pub tag: CowStr,
    /// Already formatted for display
    pub date: CowStr,
    pub image: CowStr,
}

impl Article {
    fn matches(&self, query: &LowerCaseString<String>) -> bool {
        query.is_found_in(&self.title)
            || query.is_found_in(&self.summary)
            || query.is_found_in(&self.tag)
    }
}

/// The fixed list of articles. Every query keeps the catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    articles: Vec<Article>,
}

impl Catalog {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_ARTICLES.to_vec())
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|article| tag == ALL_TAGS || article.tag == tag)
            .collect()
    }

    /// Case-insensitive search over titles, summaries and tags. A blank query matches
    /// everything.
    pub fn search(&self, query: &str) -> Vec<&Article> {
        let query = LowerCaseString::from(query.trim());
        if query.is_empty() {
            return self.articles.iter().collect();
        }
        self.articles
            .iter()
            .filter(|article| article.matches(&query))
            .collect()
    }

    /// The filter choices: "all" followed by every distinct tag in catalog order
    pub fn tags(&self) -> Vec<&str> {
        std::iter::once(ALL_TAGS)
            .chain(self.articles.iter().map(|article| &*article.tag))
            .unique()
            .collect()
    }
}

/// The article grid with its tag filter and search box
pub struct ArticleBrowser<S, V> {
    catalog: Catalog,
    active_tag: String,
    storage: SharedStorage<S>,
    view: V,
    detail_page: String,
}

impl<S, V> ArticleBrowser<S, V>
where
    S: Storage,
    V: View,
{
    /// Shows the whole catalog right away
    pub fn new(
        catalog: Catalog,
        storage: SharedStorage<S>,
        view: V,
        detail_page: impl Into<String>,
    ) -> SiteResult<Self> {
        let mut instance = Self {
            catalog,
            active_tag: ALL_TAGS.into(),
            storage,
            view,
            detail_page: detail_page.into(),
        };
        instance.select_tag(ALL_TAGS)?;
        Ok(instance)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active_tag(&self) -> &str {
        &self.active_tag
    }

    /// Returns how many articles are shown now
    pub fn select_tag(&mut self, tag: &str) -> SiteResult<usize> {
        self.active_tag = tag.into();
        let articles = self.catalog.filter_by_tag(tag);
        debug!("Tag `{}` matches {} article(s)", tag, articles.len());
        self.view.show(compile_articles(&articles)?);
        Ok(articles.len())
    }

    /// Returns how many articles are shown now. Resets the tag filter.
    pub fn search(&mut self, query: &str) -> SiteResult<usize> {
        self.active_tag = ALL_TAGS.into();
        let articles = self.catalog.search(query);
        debug!("Query `{}` matches {} article(s)", query.trim(), articles.len());
        self.view.show(compile_articles(&articles)?);
        Ok(articles.len())
    }

    pub fn tag_bar(&self) -> SiteResult<String> {
        Ok(compile_filter_tags(&self.catalog.tags(), &self.active_tag)?)
    }

    /// Remembers the chosen article for the detail page and returns where that page is.
    /// Unknown ids are ignored.
    pub fn view_article(&self, id: ArticleId) -> SiteResult<Option<&str>> {
        if self.catalog.get(id).is_none() {
            debug!("There's no article with id {}", id);
            return Ok(None);
        }
        self.storage
            .lock()
            .unwrap()
            .set_item(CURRENT_ARTICLE_ID_KEY, id.to_string())?;
        info!("Opening article {}", id);
        Ok(Some(self.detail_page.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{ArticleBrowser, Catalog};
    use crate::{
        constants::{CURRENT_ARTICLE_ID_KEY, NO_ARTICLES_MESSAGE},
        storage::{memory::MemoryStorage, Storage},
        view::testing::RecordingView,
    };

    fn ids(articles: &[&super::Article]) -> Vec<u32> {
        articles.iter().map(|article| article.id).collect()
    }

    #[test]
    fn all_tag_keeps_the_whole_catalog_in_order() {
        let catalog = Catalog::sample();
        assert_eq!(ids(&catalog.filter_by_tag("all")), vec![1, 2, 3]);
    }

    #[test]
    fn tag_filter_is_an_exact_match() {
        let catalog = Catalog::sample();
        assert_eq!(ids(&catalog.filter_by_tag("Frontend")), vec![1, 2]);
        assert_eq!(ids(&catalog.filter_by_tag("Backend")), vec![3]);
        assert!(catalog.filter_by_tag("frontend").is_empty());
        assert!(catalog.filter_by_tag("Design").is_empty());
    }

    #[test]
    fn blank_search_matches_everything() {
        let catalog = Catalog::sample();
        assert_eq!(ids(&catalog.search("")), vec![1, 2, 3]);
        assert_eq!(ids(&catalog.search("   ")), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let catalog = Catalog::sample();
        assert_eq!(ids(&catalog.search("grid")), vec![1]);
        assert_eq!(ids(&catalog.search("  GRID ")), vec![1]);
        assert_eq!(ids(&catalog.search("CSS")), ids(&catalog.search("css")));
        assert_eq!(ids(&catalog.search("css")), vec![1]);
    }

    #[test]
    fn search_looks_at_tags_and_summaries() {
        let catalog = Catalog::sample();
        assert_eq!(ids(&catalog.search("backend")), vec![3]);
        assert_eq!(ids(&catalog.search("caching")), vec![3]);
        assert!(catalog.search("rust").is_empty());
    }

    #[test]
    fn tags_are_distinct_and_start_with_all() {
        assert_eq!(Catalog::sample().tags(), vec!["all", "Frontend", "Backend"]);
    }

    fn browser() -> (
        ArticleBrowser<MemoryStorage, RecordingView>,
        RecordingView,
        Arc<Mutex<MemoryStorage>>,
    ) {
        let view = RecordingView::default();
        let storage = Arc::new(Mutex::new(MemoryStorage::default()));
        let browser =
            ArticleBrowser::new(Catalog::sample(), storage.clone(), view.clone(), "blog.html")
                .unwrap();
        (browser, view, storage)
    }

    #[test]
    fn renders_the_catalog_on_creation() {
        let (_browser, view, _storage) = browser();
        assert_eq!(view.count(), 1);
        let markup = view.last().unwrap();
        assert_eq!(markup.matches("class=\"article-card\"").count(), 3);
    }

    #[test]
    fn search_resets_the_active_tag() {
        let (mut browser, view, _storage) = browser();
        assert_eq!(browser.select_tag("Backend").unwrap(), 1);
        assert_eq!(browser.active_tag(), "Backend");
        assert_eq!(browser.search("javascript").unwrap(), 1);
        assert_eq!(browser.active_tag(), "all");
        assert!(view.last().unwrap().contains("Asynchronous JavaScript"));
    }

    #[test]
    fn empty_result_shows_the_placeholder() {
        let (mut browser, view, _storage) = browser();
        assert_eq!(browser.search("nothing like this").unwrap(), 0);
        let markup = view.last().unwrap();
        assert!(markup.contains(NO_ARTICLES_MESSAGE));
        assert!(!markup.contains("article-card"));
    }

    #[test]
    fn tag_bar_marks_the_active_tag() {
        let (mut browser, _view, _storage) = browser();
        browser.select_tag("Frontend").unwrap();
        let markup = browser.tag_bar().unwrap();
        assert!(markup.contains(r#"class="tag-btn active" data-tag="Frontend""#));
        assert!(markup.contains(r#"class="tag-btn" data-tag="all""#));
    }

    #[test]
    fn viewing_an_article_remembers_its_id() {
        let (browser, _view, storage) = browser();
        assert_eq!(browser.view_article(2).unwrap(), Some("blog.html"));
        assert_eq!(
            storage.lock().unwrap().get_item(CURRENT_ARTICLE_ID_KEY).as_deref(),
            Some("2")
        );
        assert_eq!(browser.view_article(42).unwrap(), None);
        assert_eq!(
            storage.lock().unwrap().get_item(CURRENT_ARTICLE_ID_KEY).as_deref(),
            Some("2")
        );
    }
}
