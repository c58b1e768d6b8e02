use askama::Template;
use itertools::Itertools;

use crate::{
    articles::Article,
    comments::Comment,
    constants::{NO_ARTICLES_MESSAGE, NO_COMMENTS_MESSAGE},
};

#[derive(Template)]
#[template(path = "articles.html")]
struct ArticlesTemplate<'articles> {
    articles: &'articles [&'articles Article],
    no_results: &'static str,
}

/// Renders the article grid, or the "nothing found" placeholder if there's nothing to show
pub fn compile_articles(articles: &[&Article]) -> askama::Result<String> {
    ArticlesTemplate {
        articles,
        no_results: NO_ARTICLES_MESSAGE,
    }
    .render()
}

struct TagButton<'tag> {
    label: &'tag str,
    is_active: bool,
}

#[derive(Template)]
#[template(path = "filter_tags.html")]
struct FilterTagsTemplate<'tag> {
    buttons: Vec<TagButton<'tag>>,
}

pub fn compile_filter_tags(tags: &[&str], active_tag: &str) -> askama::Result<String> {
    FilterTagsTemplate {
        buttons: tags
            .iter()
            .map(|&label| TagButton {
                label,
                is_active: label == active_tag,
            })
            .collect(),
    }
    .render()
}

pub fn compile_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return format!(
            r#"<p class="no-comments">{}</p>"#,
            html_escape::encode_text(NO_COMMENTS_MESSAGE)
        );
    }
    comments
        .iter()
        .map(|comment| {
            format!(
                r#"<div class="comment-item">
  <div class="comment-header">
    <span class="commenter-name">{}</span>
    <span class="comment-date">{}</span>
  </div>
  <p class="comment-text">{}</p>
</div>"#,
                html_escape::encode_text(&comment.name),
                html_escape::encode_text(&comment.date),
                html_escape::encode_text(&comment.content),
            )
        })
        .join("\n")
}
