use uuid::Uuid;

use docket_domain::pagination::Window;

use docket_practice::domain::types::{
    NotificationKind, NotificationQuery, RelatedEntity, RelatedSummary,
};
use docket_practice::error::PracticeServiceError;
use docket_practice::usecase::notification::{
    ClearNotificationsUseCase, CreateNotificationInput, CreateNotificationUseCase,
    DeleteNotificationUseCase, ListNotificationsUseCase, MarkNotificationReadUseCase,
    MarkNotificationsReadUseCase, UnreadCountUseCase,
};

use crate::helpers::{
    MockInvoiceRepo, MockNotificationRepo, MockRelatedResolver, Practice, test_invoice,
    test_notification,
};

fn notice(kind: NotificationKind) -> CreateNotificationInput {
    CreateNotificationInput {
        title: "Invoice issued".to_owned(),
        body: "Invoice INV-7 is due next week.".to_owned(),
        kind,
        related_entity_type: None,
        related_entity_id: None,
        priority: None,
        action_url: None,
        metadata: None,
    }
}

#[tokio::test]
async fn should_count_unread_until_all_marked_read() {
    let user = Uuid::now_v7();
    let notifications = MockNotificationRepo::new(vec![
        test_notification(user, false),
        test_notification(user, false),
        test_notification(user, true),
        test_notification(Uuid::now_v7(), false),
    ]);
    let unread = UnreadCountUseCase {
        notifications: notifications.clone(),
    };

    assert_eq!(unread.execute(user).await.unwrap(), 2);

    let touched = MarkNotificationsReadUseCase {
        notifications: notifications.clone(),
    }
    .execute(user, None)
    .await
    .unwrap();

    assert_eq!(touched, 2);
    assert_eq!(unread.execute(user).await.unwrap(), 0);
}

#[tokio::test]
async fn should_mark_only_listed_notifications_of_caller() {
    let user = Uuid::now_v7();
    let mine = test_notification(user, false);
    let also_mine = test_notification(user, false);
    let theirs = test_notification(Uuid::now_v7(), false);
    let notifications =
        MockNotificationRepo::new(vec![mine.clone(), also_mine.clone(), theirs.clone()]);

    let touched = MarkNotificationsReadUseCase {
        notifications: notifications.clone(),
    }
    .execute(user, Some(vec![mine.id, theirs.id]))
    .await
    .unwrap();

    assert_eq!(touched, 1);
    let stored = notifications.notifications.lock().unwrap();
    assert!(stored.iter().find(|n| n.id == mine.id).unwrap().is_read);
    assert!(!stored.iter().find(|n| n.id == also_mine.id).unwrap().is_read);
    assert!(!stored.iter().find(|n| n.id == theirs.id).unwrap().is_read);
}

#[tokio::test]
async fn should_page_feed_and_report_total() {
    let user = Uuid::now_v7();
    let stored = (0..5).map(|_| test_notification(user, false)).collect();

    let page = ListNotificationsUseCase {
        notifications: MockNotificationRepo::new(stored),
        resolver: MockRelatedResolver::default(),
    }
    .execute(
        user,
        NotificationQuery {
            window: Window { limit: 2, skip: 1 },
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.window, Window { limit: 2, skip: 1 });
}

#[tokio::test]
async fn should_clamp_window_limit() {
    let user = Uuid::now_v7();

    let page = ListNotificationsUseCase {
        notifications: MockNotificationRepo::new(vec![
            test_notification(user, false),
            test_notification(user, false),
        ]),
        resolver: MockRelatedResolver::default(),
    }
    .execute(
        user,
        NotificationQuery {
            window: Window { limit: 0, skip: 0 },
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(page.window.limit, 1);
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn should_filter_feed_to_unread() {
    let user = Uuid::now_v7();

    let page = ListNotificationsUseCase {
        notifications: MockNotificationRepo::new(vec![
            test_notification(user, false),
            test_notification(user, true),
        ]),
        resolver: MockRelatedResolver::default(),
    }
    .execute(
        user,
        NotificationQuery {
            unread_only: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(!page.items[0].notification.is_read);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn should_resolve_related_invoice_on_create() {
    let user = Uuid::now_v7();
    let invoice = test_invoice("INV-7", "250.00");
    let resolver = MockRelatedResolver {
        invoices: MockInvoiceRepo::new(vec![invoice.clone()]),
        ..Default::default()
    };

    let view = CreateNotificationUseCase {
        notifications: MockNotificationRepo::default(),
        resolver,
    }
    .execute(
        user,
        CreateNotificationInput {
            related_entity_type: Some("Invoice".to_owned()),
            related_entity_id: Some(invoice.id.0),
            ..notice(NotificationKind::Payment)
        },
    )
    .await
    .unwrap();

    assert_eq!(view.notification.user_id, user);
    assert_eq!(
        view.notification.related,
        Some(RelatedEntity::Invoice(invoice.id))
    );
    match view.related {
        Some(RelatedSummary::Invoice(resolved)) => assert_eq!(resolved.invoice_number, "INV-7"),
        other => panic!("expected invoice summary, got {other:?}"),
    }
}

#[tokio::test]
async fn should_leave_dangling_reference_unresolved() {
    let practice = Practice::new();
    let resolver = MockRelatedResolver {
        cases: practice.cases.clone(),
        ..Default::default()
    };

    let view = CreateNotificationUseCase {
        notifications: MockNotificationRepo::default(),
        resolver,
    }
    .execute(
        Uuid::now_v7(),
        CreateNotificationInput {
            related_entity_type: Some("Case".to_owned()),
            related_entity_id: Some(Uuid::now_v7()),
            ..notice(NotificationKind::Case)
        },
    )
    .await
    .unwrap();

    assert!(view.notification.related.is_some());
    assert!(view.related.is_none());
}

#[tokio::test]
async fn should_reject_half_specified_related_entity() {
    let notifications = MockNotificationRepo::default();

    let result = CreateNotificationUseCase {
        notifications: notifications.clone(),
        resolver: MockRelatedResolver::default(),
    }
    .execute(
        Uuid::now_v7(),
        CreateNotificationInput {
            related_entity_type: Some("Case".to_owned()),
            ..notice(NotificationKind::Case)
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(PracticeServiceError::InvalidRelatedEntity)
    ));
    assert!(notifications.notifications.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_hide_other_users_notification() {
    let owner = Uuid::now_v7();
    let notification = test_notification(owner, false);
    let notifications = MockNotificationRepo::new(vec![notification.clone()]);
    let intruder = Uuid::now_v7();

    let read = MarkNotificationReadUseCase {
        notifications: notifications.clone(),
    }
    .execute(intruder, notification.id)
    .await;
    let deleted = DeleteNotificationUseCase {
        notifications: notifications.clone(),
    }
    .execute(intruder, notification.id)
    .await;

    assert!(matches!(
        read,
        Err(PracticeServiceError::NotificationNotFound)
    ));
    assert!(matches!(
        deleted,
        Err(PracticeServiceError::NotificationNotFound)
    ));
    assert_eq!(notifications.notifications.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_clear_only_callers_feed() {
    let user = Uuid::now_v7();
    let notifications = MockNotificationRepo::new(vec![
        test_notification(user, false),
        test_notification(user, true),
        test_notification(Uuid::now_v7(), false),
    ]);

    let removed = ClearNotificationsUseCase {
        notifications: notifications.clone(),
    }
    .execute(user)
    .await
    .unwrap();

    assert_eq!(removed, 2);
    assert_eq!(notifications.notifications.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_store_trimmed_title_and_message() {
    let user = Uuid::now_v7();
    let notifications = MockNotificationRepo::default();

    let view = CreateNotificationUseCase {
        notifications: notifications.clone(),
        resolver: MockRelatedResolver::default(),
    }
    .execute(
        user,
        CreateNotificationInput {
            title: "  Hearing moved  ".to_owned(),
            body: "\tNow on Friday at 10:30 AM \n".to_owned(),
            action_url: Some("  /cases/42  ".to_owned()),
            ..notice(NotificationKind::Case)
        },
    )
    .await
    .unwrap();

    assert_eq!(view.notification.title, "Hearing moved");
    assert_eq!(view.notification.body, "Now on Friday at 10:30 AM");
    let stored = notifications.notifications.lock().unwrap()[0].clone();
    assert_eq!(stored.title, "Hearing moved");
    assert_eq!(stored.body, "Now on Friday at 10:30 AM");
    assert_eq!(stored.action_url.as_deref(), Some("/cases/42"));
}

#[tokio::test]
async fn should_reject_blank_title_after_trimming() {
    let notifications = MockNotificationRepo::default();

    let result = CreateNotificationUseCase {
        notifications: notifications.clone(),
        resolver: MockRelatedResolver::default(),
    }
    .execute(
        Uuid::now_v7(),
        CreateNotificationInput {
            title: "   ".to_owned(),
            ..notice(NotificationKind::System)
        },
    )
    .await;

    assert!(matches!(result, Err(PracticeServiceError::MissingData)));
    assert!(notifications.notifications.lock().unwrap().is_empty());
}
