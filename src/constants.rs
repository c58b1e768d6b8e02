use std::borrow::Cow;

use crate::articles::Article;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const THEME_KEY: &str = "theme";
pub const CURRENT_ARTICLE_ID_KEY: &str = "currentArticleId";
pub const COMMENTS_KEY: &str = "blogComments";
pub const CONTACT_MESSAGES_KEY: &str = "contactMessages";

pub const ALL_TAGS: &str = "all";

/// The navigation bar counts as scrolled past this many pixels
pub const SCROLL_THRESHOLD: f64 = 50.0;

pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

pub const NO_ARTICLES_MESSAGE: &str = "No matching articles found";
pub const NO_COMMENTS_MESSAGE: &str = "No comments yet. Be the first to leave one!";
pub const CONTACT_SUCCESS_MESSAGE: &str = "Thanks! Your message has been sent.";

pub const SAMPLE_ARTICLES: [Article; 3] = [
    Article {
        id: 1,
        title: Cow::Borrowed("CSS Grid Layout: The Complete Guide"),
        summary: Cow::Borrowed(
            "CSS Grid is a powerful two-dimensional layout system that handles rows and columns \
            at the same time, making complex page layouts simple and intuitive. This article \
            walks through its core concepts and practical uses.",
        ),
        tag: Cow::Borrowed("Frontend"),
        date: Cow::Borrowed("January 15, 2025"),
        image: Cow::Borrowed("images/css-grid.jpg"),
    },
    Article {
        id: 2,
        title: Cow::Borrowed("A Deep Dive into Asynchronous JavaScript"),
        summary: Cow::Borrowed(
            "From callbacks to promises to async/await: a complete tour of how asynchronous \
            JavaScript evolved and how to use it well.",
        ),
        tag: Cow::Borrowed("Frontend"),
        date: Cow::Borrowed("January 10, 2025"),
        image: Cow::Borrowed("images/async-javascript.jpg"),
    },
    Article {
        id: 3,
        title: Cow::Borrowed("Node.js Performance Tuning in Practice"),
        summary: Cow::Borrowed(
            "Find the bottlenecks of a Node.js application and remove them with code \
            optimizations, caching strategies and cluster deployments.",
        ),
        tag: Cow::Borrowed("Backend"),
        date: Cow::Borrowed("January 5, 2025"),
        image: Cow::Borrowed("images/nodejs-performance.jpg"),
    },
];
