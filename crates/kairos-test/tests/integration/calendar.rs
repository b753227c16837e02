//! Tests for the `/api/calendar` occurrence view.

use chrono::Local;
use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::*;

fn weekly_mon_wed() -> Value {
    json!({
        "title": "Team sync",
        "startDate": "2024-01-01T10:00",
        "endDate": "2024-01-01T11:00",
        "isRecurring": true,
        "frequency": "WEEKLY",
        "daysOfWeek": ["MON", "WED"],
        "recurringEndDate": "2024-01-15",
    })
}

fn starts(occurrences: &Value) -> Vec<String> {
    occurrences
        .as_array()
        .expect("occurrence array")
        .iter()
        .map(|o| o["start"].as_str().expect("start string").to_string())
        .collect()
}

#[test_log::test(tokio::test)]
async fn weekly_definition_expands_to_bounded_occurrences() {
    let service = create_test_service();
    let event = create_event(&service, &weekly_mon_wed()).await;

    let occurrences = TestRequest::get(CALENDAR_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_envelope(true, "Occurrences fetched successfully")
        .data();

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-01-01T10:00:00",
            "2024-01-03T10:00:00",
            "2024-01-08T10:00:00",
            "2024-01-10T10:00:00",
            "2024-01-15T10:00:00",
        ]
    );
    for occurrence in occurrences.as_array().expect("occurrence array") {
        assert_eq!(occurrence["sourceId"], event["id"]);
        assert_eq!(occurrence["title"], "Team sync");
        assert_eq!(occurrence["isRecurring"], true);
        assert!(
            occurrence["end"]
                .as_str()
                .is_some_and(|end| end.ends_with("T11:00:00"))
        );
    }
    assert_eq!(occurrences[0]["id"], "1-1704103200000");
}

#[test_log::test(tokio::test)]
async fn window_limits_occurrences() {
    let service = create_test_service();
    create_event(&service, &weekly_mon_wed()).await;

    let occurrences = TestRequest::get(&format!(
        "{CALENDAR_ROUTE_PREFIX}?from=2024-01-03&to=2024-01-10"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .data();

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-01-03T10:00:00",
            "2024-01-08T10:00:00",
            "2024-01-10T10:00:00",
        ]
    );
}

#[test_log::test(tokio::test)]
async fn inverted_window_is_bad_request() {
    let service = create_test_service();

    TestRequest::get(&format!(
        "{CALENDAR_ROUTE_PREFIX}?from=2024-02-01&to=2024-01-01"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .assert_no_data();
}

#[test_log::test(tokio::test)]
async fn unparseable_window_date_is_bad_request() {
    let service = create_test_service();

    TestRequest::get(&format!("{CALENDAR_ROUTE_PREFIX}?to=someday"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_no_data();
}

#[test_log::test(tokio::test)]
async fn stopped_definitions_are_not_expanded() {
    let service = create_test_service();
    let event = create_event(&service, &weekly_mon_wed()).await;
    create_event(
        &service,
        &json!({
            "title": "Dentist",
            "startDate": "2024-01-05T14:00",
            "endDate": "2024-01-05T15:00",
        }),
    )
    .await;

    TestRequest::delete(&event_path(id_of(&event)))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let occurrences = TestRequest::get(CALENDAR_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();

    assert_eq!(starts(&occurrences), vec!["2024-01-05T14:00:00"]);
    assert_eq!(occurrences[0]["isRecurring"], false);
}

#[test_log::test(tokio::test)]
async fn monthly_definition_clamps_to_month_end() {
    let service = create_test_service();
    create_event(
        &service,
        &json!({
            "title": "Rent",
            "startDate": "2024-01-31T09:00",
            "endDate": "2024-01-31T09:30",
            "isRecurring": true,
            "frequency": "MONTHLY",
            "recurringEndDate": "2024-05-31",
        }),
    )
    .await;

    let occurrences = TestRequest::get(&format!("{CALENDAR_ROUTE_PREFIX}?frequency=MONTHLY"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-01-31T09:00:00",
            "2024-02-29T09:00:00",
            "2024-03-31T09:00:00",
            "2024-04-30T09:00:00",
            "2024-05-31T09:00:00",
        ]
    );
}

#[test_log::test(tokio::test)]
async fn occurrence_cap_comes_from_settings() {
    let mut settings = test_config();
    settings.calendar.max_occurrences = 3;
    let service = create_test_service_with(settings);
    create_event(
        &service,
        &json!({
            "title": "Standup",
            "startDate": "2024-01-01T09:00",
            "endDate": "2024-01-01T09:15",
            "isRecurring": true,
            "frequency": "DAILY",
            "recurringEndDate": "2024-12-31",
        }),
    )
    .await;

    let occurrences = TestRequest::get(CALENDAR_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-12-29T09:00:00",
            "2024-12-30T09:00:00",
            "2024-12-31T09:00:00",
        ]
    );
}

#[test_log::test(tokio::test)]
async fn long_running_daily_event_includes_today() {
    let service = create_test_service();
    create_event(
        &service,
        &json!({
            "title": "Standup",
            "startDate": "1995-01-01T09:00",
            "endDate": "1995-01-01T09:15",
            "isRecurring": true,
            "frequency": "DAILY",
        }),
    )
    .await;

    let occurrences = TestRequest::get(CALENDAR_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();

    let today = format!("{}T09:00:00", Local::now().date_naive().format("%Y-%m-%d"));
    assert!(starts(&occurrences).contains(&today), "missing {today}");
}

#[test_log::test(tokio::test)]
async fn one_off_outside_window_is_hidden() {
    let service = create_test_service();
    create_event(
        &service,
        &json!({
            "title": "Old dentist",
            "startDate": "2020-03-02T14:00",
            "endDate": "2020-03-02T15:00",
        }),
    )
    .await;
    create_event(
        &service,
        &json!({
            "title": "Dentist",
            "startDate": "2026-01-20T09:00",
            "endDate": "2026-01-20T10:00",
        }),
    )
    .await;

    let occurrences = TestRequest::get(&format!(
        "{CALENDAR_ROUTE_PREFIX}?from=2026-01-01&to=2026-01-31"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .data();

    assert_eq!(starts(&occurrences), vec!["2026-01-20T09:00:00"]);
    assert_eq!(occurrences[0]["title"], "Dentist");
}
