use crate::model::FeedItem;
use crate::Result;
use quick_xml::{events::Event, Reader};
use simple_error::SimpleError;

// title/link text collected while inside an <item>
#[derive(Default)]
struct ItemState {
    depth: usize,
    field: Option<Field>,
    title: Option<String>,
    link: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Link,
}

impl ItemState {
    fn push_text(&mut self, text: &str) {
        let slot = match self.field {
            Some(Field::Title) => &mut self.title,
            Some(Field::Link) => &mut self.link,
            None => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn build(self) -> std::result::Result<FeedItem, SimpleError> {
        let title = non_empty(self.title).ok_or_else(|| SimpleError::new("item without title"))?;
        let link = non_empty(self.link)
            .ok_or_else(|| SimpleError::new(format!("item {:?} without link", title)))?;
        Ok(FeedItem { title, link })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Parses a feed document into its items, in document order.
///
/// `item` elements are matched at any depth. `title` and `link` must be
/// direct children of the item and only the first of each is used.
/// Malformed XML and items lacking either child are errors.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedItem>> {
    // text is kept verbatim: titles are compared byte for byte against the cache
    let mut reader = Reader::from_reader(xml);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut seen_root = false;
    // nested items are not expected, but keep the outer one intact if they appear
    let mut stack: Vec<ItemState> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                seen_root = true;
                let name = e.name();
                let name = name.as_ref();
                if let Some(item) = stack.last_mut() {
                    if item.field.is_none() && depth == item.depth + 1 {
                        item.field = match name {
                            b"title" if item.title.is_none() => Some(Field::Title),
                            b"link" if item.link.is_none() => Some(Field::Link),
                            _ => None,
                        };
                    }
                }
                if name == b"item" {
                    stack.push(ItemState {
                        depth,
                        ..Default::default()
                    });
                }
            }
            Ok(Event::Empty(e)) => {
                seen_root = true;
                if e.name().as_ref() == b"item" {
                    return Err(SimpleError::new("empty item element").into());
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = stack.pop() {
                        items.push(item.build()?);
                    }
                }
                if let Some(item) = stack.last_mut() {
                    if depth == item.depth + 1 {
                        item.field = None;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                if let Some(item) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| SimpleError::with("bad text content", err))?;
                    item.push_text(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(item) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    item.push_text(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SimpleError::with("malformed XML", e).into()),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(SimpleError::new("no element found").into());
    }
    if depth != 0 {
        return Err(SimpleError::new("unexpected end of document").into());
    }

    Ok(items)
}
