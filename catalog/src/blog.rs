//! Blog post model shared by the markdown-backed server and the storefront.

#[cfg(test)]
#[path = "blog_test.rs"]
mod blog_test;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::store::parse_timestamp;

/// Metadata block at the top of each post file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFrontMatter {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, alias = "published")]
    pub is_published: bool,
}

/// A post with its raw markdown body and rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    #[serde(flatten)]
    pub front: BlogFrontMatter,
    pub content: String,
    pub html: String,
}

impl BlogPost {
    /// `created_at` as a timestamp. Accepts RFC 3339 or a bare
    /// `YYYY-MM-DD` date.
    #[must_use]
    pub fn created(&self) -> Option<OffsetDateTime> {
        parse_post_date(&self.front.created_at)
    }
}

/// Body of `POST /api/blog`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_published: bool,
}

fn parse_post_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    parse_timestamp(raw).or_else(|| {
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| date.midnight().assume_utc())
    })
}

/// Keep published posts only, newest `created_at` first. Posts with an
/// unreadable date sort last in their original order.
#[must_use]
pub fn published_newest_first(posts: Vec<BlogPost>) -> Vec<BlogPost> {
    let mut published: Vec<BlogPost> = posts.into_iter().filter(|post| post.front.is_published).collect();
    published.sort_by_key(|post| std::cmp::Reverse(post.created()));
    published
}

/// Distinct non-empty categories in first-seen order.
#[must_use]
pub fn categories(posts: &[BlogPost]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for post in posts {
        let category = post.front.category.trim();
        if !category.is_empty() && !out.iter().any(|c| c == category) {
            out.push(category.to_owned());
        }
    }
    out
}

/// URL slug for a new post: lowercase title with punctuation dropped and
/// whitespace runs collapsed to `-`, followed by the last six digits of
/// `millis` so two posts with the same title do not collide.
#[must_use]
pub fn slugify(title: &str, millis: u64) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    format!("{}-{:06}", words.join("-"), millis % 1_000_000)
}

/// Whether `slug` is safe to use as a file stem.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
