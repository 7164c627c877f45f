//! End-to-end pipeline runs against trait doubles for both capabilities.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use personaforge::fetch::{CommentRecord, ContentSource, FetchError, FetchResult, PostRecord};
use personaforge::generate::{ChatModel, ChatRequest, GenerationError};
use personaforge::http::HttpError;
use personaforge::identity::Username;
use personaforge::pipeline::{Pipeline, PipelineError, PipelineSettings};
use personaforge::prompt::SYSTEM_MESSAGE;

// ── Test doubles ──

/// Content source double that records calls and replays a canned result.
struct StubSource {
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, u32)>>,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    fail_comments: bool,
}

impl StubSource {
    fn new(posts: Vec<PostRecord>, comments: Vec<CommentRecord>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            posts,
            comments,
            fail_comments: false,
        }
    }

    fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn recent_activity(&self, username: &Username, limit: u32) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("test lock")
            .push((username.as_str().to_owned(), limit));

        let mut result = FetchResult {
            posts: self.posts.clone(),
            comments: self.comments.clone(),
            errors: Vec::new(),
        };
        if self.fail_comments {
            result.comments.clear();
            result.errors.push(FetchError::Http(HttpError::Status {
                status: 403,
                body: "Forbidden".to_owned(),
            }));
        }
        result
    }
}

/// Chat model double that records requests and replays a canned completion.
struct StubModel {
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
    completion: Result<String, String>,
}

impl StubModel {
    fn completing(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            completion: Ok(text.to_owned()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            completion: Err(message.to_owned()),
        }
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, request: ChatRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("test lock").push(request);
        match &self.completion {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(GenerationError::Parse(message.clone())),
        }
    }

    fn model_id(&self) -> &str {
        "stub/model"
    }
}

// ── Fixtures ──

fn sample_posts() -> Vec<PostRecord> {
    vec![
        PostRecord {
            title: "Hello".to_owned(),
            text: "world".to_owned(),
            url: "https://x/1".to_owned(),
        },
        PostRecord {
            title: "Foo".to_owned(),
            text: String::new(),
            url: "https://x/2".to_owned(),
        },
    ]
}

fn sample_comments() -> Vec<CommentRecord> {
    vec![CommentRecord {
        body: "nice!".to_owned(),
        url: "https://www.reddit.com/r/x/comments/1/nice".to_owned(),
    }]
}

fn settings(output_dir: PathBuf) -> PipelineSettings {
    PipelineSettings {
        fetch_limit: 5,
        max_tokens: 500,
        temperature: 0.7,
        output_dir,
    }
}

fn pipeline(source: Arc<StubSource>, model: Arc<StubModel>, dir: PathBuf) -> Pipeline {
    Pipeline::new(source, model, settings(dir))
}

// ── Tests ──

#[tokio::test]
async fn end_to_end_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(StubSource::new(sample_posts(), sample_comments()));
    let model = Arc::new(StubModel::completing("A curious Rustacean."));

    let report = pipeline(Arc::clone(&source), Arc::clone(&model), dir.path().into())
        .run("https://www.reddit.com/user/testuser/")
        .await
        .expect("run succeeds");

    assert_eq!(report.username.as_str(), "testuser");
    assert_eq!(report.posts_fetched, 2);
    assert_eq!(report.comments_fetched, 1);
    assert!(report.fetch_complete);

    // Fetch was invoked once, with the extracted username and the limit.
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    let seen = source.seen.lock().expect("test lock");
    assert_eq!(seen.as_slice(), &[("testuser".to_owned(), 5)]);

    // Generation was invoked once, with the assembled prompt as the user
    // message and the fixed system message.
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    let requests = model.requests.lock().expect("test lock");
    let request = &requests[0];
    assert_eq!(request.system, SYSTEM_MESSAGE);
    assert_eq!(request.max_tokens, 500);

    let mut rest = request.user.as_str();
    for needle in ["=== POSTS ===", "- Hello", "  world", "=== COMMENTS ===", "- nice!"] {
        let pos = rest
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing or out of order in prompt"));
        rest = &rest[pos..][needle.len()..];
    }

    // The output file holds exactly the stubbed completion.
    assert!(report.output_path.ends_with("user_persona_testuser.txt"));
    let written = std::fs::read_to_string(&report.output_path).expect("readable");
    assert_eq!(written, "A curious Rustacean.");
}

#[tokio::test]
async fn invalid_url_makes_no_upstream_calls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(StubSource::empty());
    let model = Arc::new(StubModel::completing("unused"));

    let err = pipeline(Arc::clone(&source), Arc::clone(&model), dir.path().into())
        .run("not a url")
        .await
        .expect_err("invalid reference");

    assert!(matches!(err, PipelineError::InvalidReference));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_fetch_still_invokes_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(StubSource::empty());
    let model = Arc::new(StubModel::completing("A persona from nothing."));

    let report = pipeline(Arc::clone(&source), Arc::clone(&model), dir.path().into())
        .run("https://www.reddit.com/user/ghost/")
        .await
        .expect("run succeeds");

    assert_eq!(report.posts_fetched, 0);
    assert_eq!(report.comments_fetched, 0);
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);

    let requests = model.requests.lock().expect("test lock");
    assert!(requests[0].user.contains("=== POSTS ===\n\n"));

    let written = std::fs::read_to_string(&report.output_path).expect("readable");
    assert_eq!(written, "A persona from nothing.");
}

#[tokio::test]
async fn partial_fetch_degrades_but_completes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut stub = StubSource::new(sample_posts(), sample_comments());
    stub.fail_comments = true;
    let source = Arc::new(stub);
    let model = Arc::new(StubModel::completing("Partial persona."));

    let report = pipeline(Arc::clone(&source), Arc::clone(&model), dir.path().into())
        .run("https://www.reddit.com/user/testuser/")
        .await
        .expect("run succeeds despite fetch errors");

    assert_eq!(report.posts_fetched, 2);
    assert_eq!(report.comments_fetched, 0);
    assert!(!report.fetch_complete);
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generation_failure_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = Arc::new(StubSource::new(sample_posts(), sample_comments()));
    let model = Arc::new(StubModel::failing("upstream exploded"));

    let err = pipeline(Arc::clone(&source), Arc::clone(&model), dir.path().into())
        .run("https://www.reddit.com/user/testuser/")
        .await
        .expect_err("generation error propagates");

    assert!(matches!(err, PipelineError::Generation(_)));
    // Nothing was written.
    assert!(!dir.path().join("user_persona_testuser.txt").exists());
}
