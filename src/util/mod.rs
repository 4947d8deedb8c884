pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// ISO-8601 timestamp for backend payloads (browser local clock, UTC form).
pub(crate) fn now_iso() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Human date header for the journal toolbar, e.g. "Monday, January 5, 2026".
/// Uses the system local timezone (browser runtime).
pub(crate) fn today_long_local() -> String {
    let d = js_sys::Date::new_0();

    const WEEKDAYS: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    let weekday = WEEKDAYS[(d.get_day() as usize) % 7];
    let month = MONTHS[(d.get_month() as usize) % 12];

    format!(
        "{}, {} {}, {}",
        weekday,
        month,
        d.get_date(),
        d.get_full_year()
    )
}

pub(crate) fn make_draft_id(now_ms: u64, rand: u64) -> String {
    format!("draft-{now_ms}-{rand}")
}

pub(crate) fn new_draft_id() -> String {
    make_draft_id(
        js_sys::Date::now() as u64,
        (js_sys::Math::random() * 1e9) as u64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_draft_id_is_stable_for_inputs() {
        assert_eq!(make_draft_id(1700000000000, 42), "draft-1700000000000-42");
    }
}
