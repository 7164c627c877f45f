//! Decoding realistic Reddit listing payloads.
//!
//! These bodies carry the extra fields a live listing includes; decoding
//! must ignore them and keep only the record fields.

use personaforge::fetch::reddit::{parse_comments, parse_posts};

const SUBMITTED_BODY: &str = r#"{
  "kind": "Listing",
  "data": {
    "after": "t3_1abcde",
    "dist": 2,
    "modhash": "",
    "geo_filter": "",
    "children": [
      {
        "kind": "t3",
        "data": {
          "subreddit": "rust",
          "title": "My first crate",
          "selftext": "I published a thing.",
          "author": "testuser",
          "ups": 42,
          "num_comments": 7,
          "permalink": "/r/rust/comments/1abcde/my_first_crate/",
          "url": "https://www.reddit.com/r/rust/comments/1abcde/my_first_crate/",
          "created_utc": 1724800000.0
        }
      },
      {
        "kind": "t3",
        "data": {
          "subreddit": "programming",
          "title": "Interesting article",
          "selftext": "",
          "author": "testuser",
          "ups": 3,
          "permalink": "/r/programming/comments/1abcdf/interesting_article/",
          "url": "https://example.com/article",
          "created_utc": 1724700000.0
        }
      }
    ],
    "before": null
  }
}"#;

const COMMENTS_BODY: &str = r#"{
  "kind": "Listing",
  "data": {
    "after": null,
    "dist": 1,
    "children": [
      {
        "kind": "t1",
        "data": {
          "subreddit": "rust",
          "body": "Clippy would flag that.",
          "author": "testuser",
          "ups": 12,
          "link_id": "t3_1abcde",
          "permalink": "/r/rust/comments/1abcde/my_first_crate/k0mm3nt/",
          "created_utc": 1724810000.0
        }
      }
    ],
    "before": null
  }
}"#;

#[test]
fn decodes_live_shaped_submission_listing() {
    let posts = parse_posts(SUBMITTED_BODY, 5).expect("valid listing");
    assert_eq!(posts.len(), 2);

    assert_eq!(posts[0].title, "My first crate");
    assert_eq!(posts[0].text, "I published a thing.");
    assert_eq!(
        posts[0].url,
        "https://www.reddit.com/r/rust/comments/1abcde/my_first_crate/"
    );

    // Link post keeps the outbound URL and an empty body.
    assert_eq!(posts[1].text, "");
    assert_eq!(posts[1].url, "https://example.com/article");
}

#[test]
fn decodes_live_shaped_comment_listing() {
    let comments = parse_comments(COMMENTS_BODY, 5).expect("valid listing");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "Clippy would flag that.");
    assert_eq!(
        comments[0].url,
        "https://www.reddit.com/r/rust/comments/1abcde/my_first_crate/k0mm3nt/"
    );
}

#[test]
fn limit_bounds_live_shaped_listing() {
    let posts = parse_posts(SUBMITTED_BODY, 1).expect("valid listing");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "My first crate");
}
