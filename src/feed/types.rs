// Feed record types.

/// A single post as it appears in the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub link: String,
    /// Raw date text, formatted only at render time.
    pub published: String,
}

impl Post {
    /// A post needs both a title and a link to be rendered.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.link.is_empty()
    }
}
