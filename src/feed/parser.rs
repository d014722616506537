// Feed document parser.
// Understands RSS 2.0 channels and Atom feeds with or without a default namespace.

use std::borrow::Cow;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::warn;

use crate::error::Result;

use super::types::Post;

/// Feed dialect, decided by the root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDialect<'a> {
    /// `<rss><channel><item>...`
    Rss,
    /// `<feed><entry>...`, children qualified by the root's namespace.
    Atom { namespace: Option<&'a str> },
    Unknown,
}

impl<'a> FeedDialect<'a> {
    pub fn detect(root: Node<'a, '_>) -> Self {
        let tag = root.tag_name();
        match tag.name() {
            "rss" => FeedDialect::Rss,
            "feed" => FeedDialect::Atom {
                namespace: tag.namespace(),
            },
            _ => FeedDialect::Unknown,
        }
    }
}

/// Parse raw feed bytes into posts, in document order.
///
/// Missing fields become empty strings. An unrecognized root element yields
/// no posts; only malformed XML is an error.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Post>> {
    let text = decode_feed(bytes);
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(&text, options)?;
    let root = doc.root_element();

    let posts = match FeedDialect::detect(root) {
        FeedDialect::Rss => parse_rss(root),
        FeedDialect::Atom { namespace } => parse_atom(root, namespace),
        FeedDialect::Unknown => Vec::new(),
    };
    Ok(posts)
}

/// Decode feed bytes as UTF-8, or as Latin-1 when the XML declaration says so.
/// Other encodings are decoded lossily.
fn decode_feed(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    match declared_encoding(bytes).as_deref() {
        Some("iso-8859-1" | "latin1" | "latin-1" | "us-ascii") => {
            Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())
        }
        declared => {
            warn!(
                encoding = declared.unwrap_or("utf-8"),
                "feed is not valid UTF-8, replacing undecodable bytes"
            );
            String::from_utf8_lossy(bytes)
        }
    }
}

/// Lowercased `encoding` pseudo-attribute of the `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let decl = String::from_utf8_lossy(&rest[..end]);

    let (_, after) = decl.split_once("encoding")?;
    let value = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let (name, _) = value[1..].split_once(quote)?;
    Some(name.trim().to_ascii_lowercase())
}

fn parse_rss(root: Node) -> Vec<Post> {
    let Some(channel) = child(root, "channel", None) else {
        return Vec::new();
    };

    children(channel, "item", None)
        .map(|item| Post {
            title: child_text(item, "title", None),
            link: child_text(item, "link", None),
            published: child_text(item, "pubDate", None),
        })
        .collect()
}

fn parse_atom(root: Node, ns: Option<&str>) -> Vec<Post> {
    children(root, "entry", ns)
        .map(|entry| {
            let link = child(entry, "link", ns)
                .map(|link| {
                    let href = link.attribute("href").unwrap_or_default().trim();
                    if href.is_empty() {
                        node_text(link)
                    } else {
                        href.to_string()
                    }
                })
                .unwrap_or_default();

            let published = child(entry, "updated", ns)
                .or_else(|| child(entry, "published", ns))
                .map(node_text)
                .unwrap_or_default();

            Post {
                title: child_text(entry, "title", ns),
                link,
                published,
            }
        })
        .collect()
}

fn matches(node: &Node, name: &str, ns: Option<&str>) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == ns
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
    ns: Option<&'a str>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| matches(c, name, ns))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str, ns: Option<&str>) -> Option<Node<'a, 'input>> {
    node.children().find(|c| matches(c, name, ns))
}

fn child_text(node: Node, name: &str, ns: Option<&str>) -> String {
    child(node, name, ns).map(node_text).unwrap_or_default()
}

fn node_text(node: Node) -> String {
    node.text().unwrap_or_default().trim().to_string()
}
