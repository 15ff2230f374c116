#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        FeedItem {
            title: title.into(),
            link: link.into(),
        }
    }
}
