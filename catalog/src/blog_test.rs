use super::*;

fn post(slug: &str, created_at: &str, published: bool, category: &str) -> BlogPost {
    BlogPost {
        slug: slug.to_owned(),
        front: BlogFrontMatter {
            title: slug.to_uppercase(),
            category: category.to_owned(),
            created_at: created_at.to_owned(),
            is_published: published,
            ..BlogFrontMatter::default()
        },
        content: String::new(),
        html: String::new(),
    }
}

#[test]
fn published_posts_sorted_newest_first() {
    let posts = vec![
        post("old", "2023-01-05", true, "News"),
        post("draft", "2024-12-01", false, "News"),
        post("new", "2024-03-10T09:00:00Z", true, "Tech"),
        post("undated", "", true, "Tech"),
        post("mid", "2023-08-20", true, "Events"),
    ];
    let slugs: Vec<String> = published_newest_first(posts).into_iter().map(|p| p.slug).collect();
    assert_eq!(slugs, vec!["new", "mid", "old", "undated"]);
}

#[test]
fn categories_are_distinct_and_skip_blanks() {
    let posts = vec![
        post("a", "", true, "News"),
        post("b", "", true, " "),
        post("c", "", true, "Tech"),
        post("d", "", true, "News"),
    ];
    assert_eq!(categories(&posts), vec!["News", "Tech"]);
}

#[test]
fn slugify_strips_punctuation_and_appends_time_suffix() {
    assert_eq!(slugify("Hello, World!  LED Drivers", 1_717_171_234_567), "hello-world-led-drivers-234567");
    assert_eq!(slugify("Short", 42), "short-000042");
}

#[test]
fn slug_validation_rejects_path_tricks() {
    assert!(is_valid_slug("hello-world-234567"));
    assert!(!is_valid_slug(""));
    assert!(!is_valid_slug("../etc/passwd"));
    assert!(!is_valid_slug(".hidden"));
    assert!(!is_valid_slug("a/b"));
}

#[test]
fn front_matter_accepts_published_alias() {
    let front: BlogFrontMatter =
        serde_json::from_str(r#"{"title":"T","published":true}"#).expect("front matter");
    assert!(front.is_published);
    assert!(front.summary.is_empty());
}

#[test]
fn post_serializes_front_matter_flat() {
    let value = serde_json::to_value(post("x", "2024-01-01", true, "News")).expect("serialize");
    assert_eq!(value["slug"], "x");
    assert_eq!(value["category"], "News");
    assert_eq!(value["is_published"], true);
}
