//! End-to-end tests: the real server on an ephemeral port, spoken to in raw
//! HTTP/1.1 over a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use blog_api::{Post, PostStore, Server, app};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    store: Arc<PostStore>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), blog_api::Error>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(PostStore::seeded());
        let (shutdown, rx) = oneshot::channel::<()>();

        let router = app(Arc::clone(&store));
        let handle = tokio::spawn(async move {
            Server::from_listener(listener)
                .serve_with_shutdown(router, async {
                    let _ = rx.await;
                })
                .await
        });

        Self { addr, store, shutdown, handle }
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> TestResponse {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let body = body.unwrap_or("");
        let raw = format!(
            "{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(raw.as_bytes()).await.unwrap();

        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        TestResponse::parse(&buf)
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

struct TestResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl TestResponse {
    fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let (head, body) = text.split_once("\r\n\r\n").expect("response head");
        let mut lines = head.lines();
        let status = lines.next().unwrap()
            .split_whitespace()
            .nth(1).unwrap()
            .parse().unwrap();
        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_owned()))
            .collect();
        Self { status, headers, body: body.to_owned() }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body).unwrap()
    }

    fn error(&self) -> String {
        let value: serde_json::Value = self.json();
        value["error"].as_str().unwrap().to_owned()
    }
}

fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn fresh_server_lists_seed_posts() {
    let server = TestServer::start().await;

    let res = server.request("GET", "/posts", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-type"), Some("application/json"));
    let posts: Vec<Post> = res.json();
    assert_eq!(ids(&posts), [1, 2]);
    assert_eq!(posts[0].author, "Gopher");

    server.stop().await;
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let server = TestServer::start().await;

    let res = server
        .request("POST", "/posts", Some(r#"{"title":"A","content":"B","author":"C"}"#))
        .await;
    assert_eq!(res.status, 201);
    let created: Post = res.json();
    assert_eq!(created.id, 3);

    let res = server.request("GET", &format!("/posts/{}", created.id), None).await;
    assert_eq!(res.status, 200);
    let fetched: Post = res.json();
    assert_eq!(fetched, created);
    assert_eq!((fetched.title.as_str(), fetched.content.as_str(), fetched.author.as_str()), ("A", "B", "C"));

    server.stop().await;
}

#[tokio::test]
async fn deleted_id_is_not_reused() {
    let server = TestServer::start().await;
    let body = Some(r#"{"title":"A","content":"B","author":"C"}"#);

    let first: Post = server.request("POST", "/posts", body).await.json();
    let res = server.request("DELETE", &format!("/posts/{}", first.id), None).await;
    assert_eq!(res.status, 204);
    assert!(res.body.is_empty());

    let second: Post = server.request("POST", "/posts", body).await.json();
    assert!(second.id > first.id);

    server.stop().await;
}

#[tokio::test]
async fn list_grows_with_each_create() {
    let server = TestServer::start().await;

    for n in 0..3 {
        let body = format!(r#"{{"title":"t{n}","content":"c","author":"a"}}"#);
        assert_eq!(server.request("POST", "/posts", Some(&body)).await.status, 201);
    }
    let posts: Vec<Post> = server.request("GET", "/posts", None).await.json();
    assert_eq!(ids(&posts), [1, 2, 3, 4, 5]);

    server.stop().await;
}

#[tokio::test]
async fn missing_post_is_404_and_changes_nothing() {
    let server = TestServer::start().await;

    let res = server.request("GET", "/posts/9999", None).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.error(), "Post not found");

    let res = server.request("DELETE", "/posts/9999", None).await;
    assert_eq!(res.status, 404);
    assert_eq!(server.store.len(), 2);

    server.stop().await;
}

#[tokio::test]
async fn non_integer_id_is_400() {
    let server = TestServer::start().await;

    for method in ["GET", "DELETE"] {
        let res = server.request(method, "/posts/abc", None).await;
        assert_eq!(res.status, 400, "{method}");
        assert_eq!(res.error(), "Invalid post ID");
    }

    server.stop().await;
}

#[tokio::test]
async fn invalid_create_leaves_store_unchanged() {
    let server = TestServer::start().await;

    let res = server
        .request("POST", "/posts", Some(r#"{"title":"","content":"x","author":"y"}"#))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.error(), "Title, content, and author are required");

    let res = server.request("POST", "/posts", Some("not json")).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.error(), "Invalid JSON");

    let posts: Vec<Post> = server.request("GET", "/posts", None).await.json();
    assert_eq!(posts.len(), 2);

    server.stop().await;
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let server = TestServer::start().await;

    let res = server.request("DELETE", "/posts/1", None).await;
    assert_eq!(res.status, 204);
    assert_eq!(res.header("content-type"), Some("application/json"));

    let posts: Vec<Post> = server.request("GET", "/posts", None).await.json();
    assert_eq!(ids(&posts), [2]);
    assert_eq!(posts[0].title, "Why Choose Go?");

    server.stop().await;
}

#[tokio::test]
async fn heartbeat_and_routing_errors() {
    let server = TestServer::start().await;

    let res = server.request("GET", "/up", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, ".");

    let res = server.request("GET", "/comments", None).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.error(), "Not Found");

    let res = server.request("PUT", "/posts/1", Some("{}")).await;
    assert_eq!(res.status, 405);
    assert_eq!(res.header("allow"), Some("DELETE, GET"));

    server.stop().await;
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let server = Arc::new(TestServer::start().await);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let res = server
                    .request("POST", "/posts", Some(r#"{"title":"A","content":"B","author":"C"}"#))
                    .await;
                res.json::<Post>().id
            })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    assert_eq!(server.store.len(), 18);

    let Ok(server) = Arc::try_unwrap(server) else {
        panic!("server handle still shared");
    };
    server.stop().await;
}
