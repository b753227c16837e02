use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn health_endpoint_reports_running() {
    let service = create_test_service();

    let response = TestRequest::get(API_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_envelope(true, "Data fetched successfully!");

    let data = response.data();
    assert_eq!(data["name"], "CalendarApiHealthCheck");
    assert_eq!(data["message"], "Api is running");
}

#[test_log::test(tokio::test)]
async fn unknown_route_is_not_found() {
    let service = create_test_service();

    TestRequest::get("/api/nothing-here")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
