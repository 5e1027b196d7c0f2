use url::Url;

use super::client::NotificationSource;
use super::dom::{Document, Element, ListContainer};
use super::error::RenderError;
use super::types::{Notification, NotificationId};

pub const NOTIFICATIONS_PATH: &str = "/notifications/";
pub const LIST_CONTAINER_ID: &str = "notification-list";
pub const MARK_AS_READ_LABEL: &str = "Mark as Read";

// Only the path of the resolved URL is kept; the host is a placeholder.
const LINK_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub rendered: usize,
    pub unread: usize,
}

/// Builds `/notifications/mark-as-read/<id>/`, percent-encoding string ids.
///
/// Empty and dot-only ids are rejected: URL parsers collapse `.`/`..`
/// segments (encoded or not), so no link could carry them.
pub fn mark_as_read_href(id: &NotificationId) -> Result<String, RenderError> {
    let segment = id.to_string();
    if segment.is_empty() || segment.chars().all(|c| c == '.') {
        return Err(RenderError::InvalidLink(format!(
            "notification id {:?} cannot be used as a path segment",
            segment
        )));
    }

    let mut url = Url::parse(LINK_BASE)?.join(NOTIFICATIONS_PATH)?;
    url.path_segments_mut()
        .map_err(|_| RenderError::InvalidLink(id.to_string()))?
        .pop_if_empty()
        .push("mark-as-read")
        .push(&segment)
        .push("");

    Ok(url.path().to_string())
}

/// One `<li>`: message, timestamp in `<small>`, and a mark-as-read link when unread.
pub fn render_item(notification: &Notification) -> Result<Element, RenderError> {
    let mut item = Element::new("li")
        .with_child(notification.message.as_str())
        .with_child(" ")
        .with_child(Element::new("small").with_child(notification.timestamp.as_str()));

    if !notification.is_read {
        let link = Element::new("a")
            .with_attribute("href", mark_as_read_href(&notification.id)?)
            .with_child(MARK_AS_READ_LABEL);
        item.append_child(link);
    }

    Ok(item)
}

/// Replaces the container's contents with one item per notification.
///
/// Items are built before the container is touched, so a failure leaves the
/// previous contents in place.
pub fn render_notifications<C>(
    container: &mut C,
    notifications: &[Notification],
) -> Result<RenderSummary, RenderError>
where
    C: ListContainer + ?Sized,
{
    let items = notifications
        .iter()
        .map(render_item)
        .collect::<Result<Vec<_>, _>>()?;

    container.clear();
    for item in items {
        container.push_item(item);
    }

    Ok(RenderSummary {
        rendered: notifications.len(),
        unread: notifications.iter().filter(|n| !n.is_read).count(),
    })
}

/// Fetches the current notification list and renders it into a container
/// supplied by the host.
pub struct NotificationRenderer<S> {
    source: S,
}

impl<S: NotificationSource> NotificationRenderer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn initialize<C>(&self, container: &mut C) -> Result<RenderSummary, RenderError>
    where
        C: ListContainer + ?Sized,
    {
        tracing::debug!("Fetching notifications");

        let feed = match self.source.fetch().await {
            Ok(feed) => feed,
            Err(e) => {
                tracing::warn!("Failed to fetch notifications: {}", e);
                return Err(e);
            }
        };

        let summary = match render_notifications(container, &feed.notifications) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Failed to render notifications: {}", e);
                return Err(e);
            }
        };
        tracing::debug!(
            "Rendered {} notifications ({} unread)",
            summary.rendered,
            summary.unread
        );

        Ok(summary)
    }

    /// Looks up `#notification-list` in the document and renders into it.
    pub async fn initialize_document(
        &self,
        document: &mut Document,
    ) -> Result<RenderSummary, RenderError> {
        let container = document
            .get_element_by_id_mut(LIST_CONTAINER_ID)
            .ok_or_else(|| RenderError::MissingContainer(LIST_CONTAINER_ID.to_string()))?;

        self.initialize(container).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::types::NotificationFeed;
    use async_trait::async_trait;

    enum StubSource {
        Body(&'static str),
        Unavailable,
    }

    #[async_trait]
    impl NotificationSource for StubSource {
        async fn fetch(&self) -> Result<NotificationFeed, RenderError> {
            match self {
                StubSource::Body(body) => Ok(serde_json::from_str(body)?),
                StubSource::Unavailable => {
                    Err(RenderError::Status(reqwest::StatusCode::BAD_GATEWAY))
                }
            }
        }
    }

    const TWO_ITEMS: &str = r#"{"notifications":[
        {"id":1,"message":"Hi","timestamp":"t1","is_read":false},
        {"id":2,"message":"Bye","timestamp":"t2","is_read":true}
    ]}"#;

    fn list() -> Element {
        Element::new("ul").with_attribute("id", LIST_CONTAINER_ID)
    }

    fn items(container: &Element) -> Vec<&Element> {
        container.child_elements().collect()
    }

    #[tokio::test]
    async fn test_renders_items_in_order_with_links_for_unread() {
        let renderer = NotificationRenderer::new(StubSource::Body(TWO_ITEMS));
        let mut container = list();

        let summary = renderer.initialize(&mut container).await.unwrap();
        assert_eq!(summary, RenderSummary { rendered: 2, unread: 1 });

        let items = items(&container);
        assert_eq!(items.len(), 2);

        assert!(items[0].text_content().starts_with("Hi t1"));
        let links = items[0].descendants_by_tag("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attribute("href"), Some("/notifications/mark-as-read/1/"));
        assert_eq!(links[0].text_content(), MARK_AS_READ_LABEL);

        assert_eq!(items[1].text_content(), "Bye t2");
        assert!(items[1].descendants_by_tag("a").is_empty());
    }

    #[tokio::test]
    async fn test_empty_feed_clears_container() {
        let renderer = NotificationRenderer::new(StubSource::Body(r#"{"notifications":[]}"#));
        let mut container = list().with_child(Element::new("li").with_child("stale"));

        let summary = renderer.initialize(&mut container).await.unwrap();
        assert_eq!(summary.rendered, 0);
        assert_eq!(container.item_count(), 0);
    }

    #[tokio::test]
    async fn test_rerender_does_not_accumulate() {
        let renderer = NotificationRenderer::new(StubSource::Body(TWO_ITEMS));
        let mut container = list();

        renderer.initialize(&mut container).await.unwrap();
        renderer.initialize(&mut container).await.unwrap();

        assert_eq!(container.item_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_content() {
        let mut container = list().with_child(Element::new("li").with_child("previous"));
        let before = container.clone();

        let renderer = NotificationRenderer::new(StubSource::Unavailable);
        let err = renderer.initialize(&mut container).await.unwrap_err();

        assert!(matches!(err, RenderError::Status(_)));
        assert_eq!(container, before);
    }

    #[tokio::test]
    async fn test_malformed_body_keeps_previous_content() {
        let mut container = list().with_child(Element::new("li").with_child("previous"));
        let before = container.clone();

        let renderer = NotificationRenderer::new(StubSource::Body("<html>oops</html>"));
        let err = renderer.initialize(&mut container).await.unwrap_err();

        assert!(matches!(err, RenderError::Decode(_)));
        assert_eq!(container, before);
    }

    #[tokio::test]
    async fn test_markup_in_message_stays_text() {
        let renderer = NotificationRenderer::new(StubSource::Body(
            r#"{"notifications":[{"id":3,"message":"<img src=x onerror=alert(1)>","timestamp":"now","is_read":true}]}"#,
        ));
        let mut container = list();
        renderer.initialize(&mut container).await.unwrap();

        let item = items(&container)[0];
        assert!(item.descendants_by_tag("img").is_empty());
        assert_eq!(
            item.to_string(),
            "<li>&lt;img src=x onerror=alert(1)&gt; <small>now</small></li>"
        );
    }

    #[tokio::test]
    async fn test_initialize_document_finds_container() {
        let body = Element::new("body").with_child(list());
        let mut document = Document::new(Element::new("head"), body);

        let renderer = NotificationRenderer::new(StubSource::Body(TWO_ITEMS));
        let summary = renderer.initialize_document(&mut document).await.unwrap();
        assert_eq!(summary.rendered, 2);
        assert_eq!(document.root().descendants_by_tag("li").len(), 2);
    }

    #[tokio::test]
    async fn test_initialize_document_without_container() {
        let mut document = Document::new(Element::new("head"), Element::new("body"));

        let renderer = NotificationRenderer::new(StubSource::Body(TWO_ITEMS));
        let err = renderer.initialize_document(&mut document).await.unwrap_err();
        assert!(matches!(err, RenderError::MissingContainer(ref id) if id == LIST_CONTAINER_ID));
    }

    #[test]
    fn test_string_ids_are_percent_encoded() {
        let href = mark_as_read_href(&NotificationId::Text("a b/c".into())).unwrap();
        assert_eq!(href, "/notifications/mark-as-read/a%20b%2Fc/");
    }

    #[test]
    fn test_dot_and_empty_ids_are_rejected() {
        for raw in [".", "..", ""] {
            let err = mark_as_read_href(&NotificationId::Text(raw.into())).unwrap_err();
            assert!(matches!(err, RenderError::InvalidLink(_)), "id {:?}", raw);
        }

        let href = mark_as_read_href(&NotificationId::Text("..a".into())).unwrap();
        assert_eq!(href, "/notifications/mark-as-read/..a/");
    }

    #[tokio::test]
    async fn test_unlinkable_id_keeps_previous_content() {
        let mut container = list().with_child(Element::new("li").with_child("previous"));
        let before = container.clone();

        let renderer = NotificationRenderer::new(StubSource::Body(
            r#"{"notifications":[{"id":"..","message":"m","timestamp":"t","is_read":false}]}"#,
        ));
        let err = renderer.initialize(&mut container).await.unwrap_err();

        assert!(matches!(err, RenderError::InvalidLink(_)));
        assert_eq!(container, before);
    }

    #[test]
    fn test_large_integer_ids_are_linked() {
        let id: NotificationId = serde_json::from_str("18446744073709551615").unwrap();
        let href = mark_as_read_href(&id).unwrap();
        assert_eq!(href, "/notifications/mark-as-read/18446744073709551615/");
    }

    #[test]
    fn test_each_unread_item_gets_exactly_one_link() {
        let notifications: Vec<Notification> = (0..5_i64)
            .map(|i| Notification {
                id: NotificationId::from(i),
                message: format!("m{}", i),
                timestamp: "t".into(),
                is_read: i % 2 == 0,
            })
            .collect();

        let mut container = list();
        let summary = render_notifications(&mut container, &notifications).unwrap();
        assert_eq!(summary, RenderSummary { rendered: 5, unread: 2 });

        for (item, notification) in items(&container).iter().zip(&notifications) {
            let links = item.descendants_by_tag("a");
            if notification.is_read {
                assert!(links.is_empty());
            } else {
                assert_eq!(links.len(), 1);
                let expected = format!("/notifications/mark-as-read/{}/", notification.id);
                assert_eq!(links[0].attribute("href"), Some(expected.as_str()));
            }
        }
    }
}
