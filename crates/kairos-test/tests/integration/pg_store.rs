//! Tests for the `PostgreSQL` event store. Skipped unless `TEST_DATABASE_URL` is set.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use salvo::http::StatusCode;

use kairos_service::error::ServiceError;
use kairos_test::component::event::{EventDraft, EventFilter, EventStore};
use kairos_test::component::types::{DayCode, DaySet, EventDefinition, Frequency};

use super::helpers::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid test time")
}

fn gym() -> EventDraft {
    EventDraft {
        title: "Gym".to_string(),
        description: Some("Leg day".to_string()),
        start_date: at(2024, 1, 1, 7, 0),
        end_date: at(2024, 1, 1, 8, 0),
        is_recurring: true,
        frequency: Some(Frequency::Weekly),
        days_of_week: Some([DayCode::Fri, DayCode::Mon].into_iter().collect()),
        recurring_end_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        is_active: true,
    }
}

fn dentist() -> EventDraft {
    EventDraft {
        title: "Dentist".to_string(),
        description: None,
        start_date: at(2024, 1, 5, 14, 0),
        end_date: at(2024, 1, 5, 15, 0),
        is_recurring: false,
        frequency: None,
        days_of_week: None,
        recurring_end_date: None,
        is_active: true,
    }
}

fn assert_not_found<T: std::fmt::Debug>(result: Result<T, ServiceError>) {
    assert!(
        matches!(result, Err(ServiceError::NotFound(_))),
        "expected NotFound, got {result:?}"
    );
}

#[test_log::test(tokio::test)]
async fn pg_create_and_get_round_trip_days_of_week() {
    let Some(db) = TestDb::new("create_get").await else {
        return;
    };
    let store = db.store();

    let created = store.create(gym()).await.expect("create");
    assert!(created.id > 0);
    assert_eq!(created.frequency, Some(Frequency::Weekly));
    assert_eq!(
        created.days_of_week.map(|days| days.to_string()),
        Some("MON,FRI".to_string())
    );

    let fetched = store.get(created.id).await.expect("get");
    assert_eq!(fetched, created);
    assert_eq!(
        fetched.days_of_week,
        Some([DayCode::Mon, DayCode::Fri].into_iter().collect::<DaySet>())
    );

    drop(store);
    db.teardown().await;
}

#[test_log::test(tokio::test)]
async fn pg_soft_delete_and_restore_leave_other_columns_unchanged() {
    let Some(db) = TestDb::new("soft_delete_restore").await else {
        return;
    };
    let store = db.store();
    let created = store.create(gym()).await.expect("create");

    let stopped = store.soft_delete(created.id).await.expect("soft delete");
    assert!(!stopped.is_active);
    assert_eq!(
        stopped.clone(),
        EventDefinition {
            is_active: false,
            updated_at: stopped.updated_at,
            ..created.clone()
        }
    );

    let restored = store.restore(created.id).await.expect("restore");
    assert!(restored.is_active);
    assert_eq!(
        restored.clone(),
        EventDefinition {
            updated_at: restored.updated_at,
            ..created
        }
    );

    drop(store);
    db.teardown().await;
}

#[test_log::test(tokio::test)]
async fn pg_update_to_one_off_clears_recurrence_columns() {
    let Some(db) = TestDb::new("update_clears").await else {
        return;
    };
    let store = db.store();
    let created = store.create(gym()).await.expect("create");

    let updated = store
        .update(
            created.id,
            EventDraft {
                title: "Gym (one-off)".to_string(),
                ..dentist()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, "Gym (one-off)");
    assert_eq!(updated.description, None);
    assert!(!updated.is_recurring);
    assert_eq!(updated.frequency, None);
    assert_eq!(updated.days_of_week, None);
    assert_eq!(updated.recurring_end_date, None);

    // The stored row agrees with what the update returned.
    assert_eq!(store.get(created.id).await.expect("get"), updated);

    let weekly = store
        .list(&EventFilter::from_query(Some("WEEKLY"), None, None).expect("filter"))
        .await
        .expect("list");
    assert!(weekly.is_empty());

    drop(store);
    db.teardown().await;
}

#[test_log::test(tokio::test)]
async fn pg_list_filters_by_frequency_day_and_active_flag() {
    let Some(db) = TestDb::new("list_filters").await else {
        return;
    };
    let store = db.store();

    let one_off = store.create(dentist()).await.expect("create dentist");
    let weekly = store.create(gym()).await.expect("create gym");
    let standup = store
        .create(EventDraft {
            title: "Standup".to_string(),
            description: None,
            start_date: at(2024, 1, 2, 9, 0),
            end_date: at(2024, 1, 2, 9, 15),
            is_recurring: true,
            frequency: Some(Frequency::Daily),
            days_of_week: None,
            recurring_end_date: None,
            is_active: true,
        })
        .await
        .expect("create standup");
    let stopped = store
        .create(EventDraft {
            title: "Old gym".to_string(),
            is_active: false,
            ..gym()
        })
        .await
        .expect("create stopped");

    let ids = |events: Vec<EventDefinition>| {
        events.into_iter().map(|event| event.id).collect::<Vec<_>>()
    };

    // Ordered by start date, then id.
    let active = store.list(&EventFilter::default()).await.expect("list");
    assert_eq!(ids(active), vec![weekly.id, standup.id, one_off.id]);

    let daily = store
        .list(&EventFilter::from_query(Some("DAILY"), None, None).expect("filter"))
        .await
        .expect("list daily");
    assert_eq!(ids(daily), vec![standup.id]);

    let fridays = store
        .list(&EventFilter::from_query(None, Some("FRI"), None).expect("filter"))
        .await
        .expect("list fridays");
    assert_eq!(ids(fridays), vec![weekly.id]);

    let tuesdays = store
        .list(&EventFilter::from_query(None, Some("TUE"), None).expect("filter"))
        .await
        .expect("list tuesdays");
    assert!(tuesdays.is_empty());

    let inactive = store
        .list(&EventFilter::from_query(None, None, Some("true")).expect("filter"))
        .await
        .expect("list stopped");
    assert_eq!(ids(inactive), vec![stopped.id]);

    drop(store);
    db.teardown().await;
}

#[test_log::test(tokio::test)]
async fn pg_hard_delete_reports_missing_rows() {
    let Some(db) = TestDb::new("hard_delete").await else {
        return;
    };
    let store = db.store();
    let created = store.create(dentist()).await.expect("create");

    store.hard_delete(created.id).await.expect("hard delete");

    assert_not_found(store.get(created.id).await);
    assert_not_found(store.hard_delete(created.id).await);
    assert_not_found(store.update(created.id, dentist()).await);
    assert_not_found(store.soft_delete(created.id).await);
    assert_not_found(store.restore(created.id).await);

    drop(store);
    db.teardown().await;
}

#[test_log::test(tokio::test)]
async fn pg_backed_calendar_expands_stored_definitions() {
    let Some(db) = TestDb::new("calendar").await else {
        return;
    };
    let service = create_test_service_over(Arc::new(db.store()), test_config());

    create_event(
        &service,
        &serde_json::json!({
            "title": "Team sync",
            "startDate": "2024-01-01T10:00",
            "endDate": "2024-01-01T11:00",
            "isRecurring": true,
            "frequency": "WEEKLY",
            "daysOfWeek": "MON,WED",
            "recurringEndDate": "2024-01-10",
        }),
    )
    .await;

    let occurrences = TestRequest::get(CALENDAR_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_envelope(true, "Occurrences fetched successfully")
        .data();

    let starts: Vec<&str> = occurrences
        .as_array()
        .expect("occurrence array")
        .iter()
        .filter_map(|o| o["start"].as_str())
        .collect();
    assert_eq!(
        starts,
        vec![
            "2024-01-01T10:00:00",
            "2024-01-03T10:00:00",
            "2024-01-08T10:00:00",
            "2024-01-10T10:00:00",
        ]
    );

    drop(service);
    db.teardown().await;
}
