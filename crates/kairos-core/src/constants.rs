/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const EVENTS_ROUTE_COMPONENT: &str = "events";
pub const EVENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EVENTS_ROUTE_COMPONENT);

pub const CALENDAR_ROUTE_COMPONENT: &str = "calendar";
pub const CALENDAR_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", CALENDAR_ROUTE_COMPONENT);

/// Name reported by the health endpoint.
pub const HEALTHCHECK_NAME: &str = "CalendarApiHealthCheck";
