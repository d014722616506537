// Test helpers.
// Serves an axum router in-process so HTTP clients can be exercised end to end.

use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Notes</title>
    <item>
      <title>Shipping a tiny CLI</title>
      <link>https://blog.example.com/tiny-cli/</link>
      <pubDate>Sat, 18 Oct 2025 16:58:12 GMT</pubDate>
    </item>
    <item>
      <title></title>
      <link>https://blog.example.com/untitled/</link>
    </item>
    <item>
      <title>Notes on feeds</title>
      <link>https://blog.example.com/feeds/</link>
      <pubDate>Mon, 06 Oct 2025 09:00:00 +0000</pubDate>
    </item>
    <item>
      <title>Older post</title>
      <link>https://blog.example.com/older/</link>
    </item>
  </channel>
</rss>"#;
