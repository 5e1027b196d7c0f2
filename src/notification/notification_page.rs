use crate::renderer::{self, render_notifications, Document, Element, RenderError, LIST_CONTAINER_ID};
use super::notification_service::NotificationPage;

pub const MARK_ALL_READ_PATH: &str = "/notifications/mark-all-read/";

/// Full HTML page for a browser visiting `/notifications/`. The list is
/// built with the same renderer the client uses.
pub fn render_page(page: &NotificationPage) -> Result<String, RenderError> {
    let entries: Vec<renderer::Notification> =
        page.notifications.iter().map(renderer::Notification::from).collect();

    let mut list = Element::new("ul").with_attribute("id", LIST_CONTAINER_ID);
    render_notifications(&mut list, &entries)?;

    let summary = Element::new("p").with_attribute("class", "notification-counts").with_child(format!(
        "{} unread of {} notifications",
        page.unread_count, page.total_count
    ));

    let mut body = Element::new("body")
        .with_child(Element::new("h1").with_child("Notifications"))
        .with_child(summary);

    if page.unread_count > 0 {
        body.append_child(
            Element::new("a")
                .with_attribute("href", MARK_ALL_READ_PATH)
                .with_attribute("class", "mark-all-read")
                .with_child("Mark all as read"),
        );
    }

    body.append_child(list);
    body.append_child(pagination(page));

    let head = Element::new("head")
        .with_child(Element::new("meta").with_attribute("charset", "utf-8"))
        .with_child(Element::new("title").with_child("Notifications"));

    Ok(Document::new(head, body).to_string())
}

fn pagination(page: &NotificationPage) -> Element {
    let mut nav = Element::new("nav").with_attribute("class", "pagination");

    if page.has_previous() {
        nav.append_child(page_link(page.page - 1, "Previous"));
    }
    nav.append_child(
        Element::new("span").with_child(format!("Page {} of {}", page.page, page.total_pages)),
    );
    if page.has_next() {
        nav.append_child(page_link(page.page + 1, "Next"));
    }

    nav
}

fn page_link(page: u32, label: &str) -> Element {
    Element::new("a")
        .with_attribute("href", format!("?page={}", page))
        .with_child(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_models::{Notification, NotificationType};
    use chrono::Utc;
    use uuid::Uuid;

    fn notification(id: i64, message: &str, is_read: bool) -> Notification {
        let now = Utc::now();
        Notification {
            id,
            recipient_id: Uuid::new_v4(),
            notification_type: NotificationType::System,
            title: "t".into(),
            message: message.into(),
            related_type: None,
            related_id: None,
            is_read,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_page_contains_list_and_escapes_messages() {
        let page = NotificationPage {
            notifications: vec![
                notification(5, "<script>alert(1)</script>", false),
                notification(4, "Paid", true),
            ],
            page: 2,
            total_pages: 3,
            total_count: 25,
            unread_count: 1,
        };

        let html = render_page(&page).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<ul id=\"notification-list\"><li>&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("href=\"/notifications/mark-as-read/5/\""));
        assert!(!html.contains("/notifications/mark-as-read/4/"));
        assert!(html.contains(MARK_ALL_READ_PATH));
        assert!(html.contains("href=\"?page=1\""));
        assert!(html.contains("href=\"?page=3\""));
        assert!(html.contains("1 unread of 25 notifications"));
    }

    #[test]
    fn test_single_page_without_unread_has_no_extra_links() {
        let page = NotificationPage {
            notifications: vec![notification(1, "Done", true)],
            page: 1,
            total_pages: 1,
            total_count: 1,
            unread_count: 0,
        };

        let html = render_page(&page).unwrap();
        assert!(!html.contains(MARK_ALL_READ_PATH));
        assert!(!html.contains("?page="));
        assert!(html.contains("Page 1 of 1"));
    }
}
