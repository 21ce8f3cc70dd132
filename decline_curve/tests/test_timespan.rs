use chrono::NaiveDate;
use decline_curve::timespan::{DateRange, Frequency, TimeSpan, Window};
use decline_curve::DeclineError;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample() -> TimeSpan {
    TimeSpan::new(vec![
        ymd(2023, 3, 1),
        ymd(2023, 1, 1),
        ymd(2023, 1, 15),
        ymd(2023, 2, 1),
    ])
}

#[test]
fn test_days_from_anchor() {
    let days = sample().days(ymd(2023, 1, 15));
    assert_eq!(days, vec![45.0, -14.0, 0.0, 17.0]);
}

#[test]
fn test_within_is_inclusive() {
    let span = sample();

    assert_eq!(
        span.within(Some(ymd(2023, 1, 15)), Some(ymd(2023, 2, 1))),
        vec![false, false, true, true]
    );
    assert_eq!(
        span.within(None, Some(ymd(2023, 1, 15))),
        vec![false, true, true, false]
    );
    assert_eq!(span.within(Some(ymd(2023, 2, 1)), None), vec![true, false, false, true]);
    assert_eq!(span.within(None, None), vec![true; 4]);
}

#[test]
fn test_window_constructors() {
    let date = ymd(2023, 2, 1);

    assert!(Window::all().contains(date));
    assert!(Window::since(date).contains(date));
    assert!(!Window::since(ymd(2023, 2, 2)).contains(date));
    assert!(Window::until(date).contains(date));
    assert!(!Window::between(ymd(2023, 1, 1), ymd(2023, 1, 31)).contains(date));
}

#[test]
fn test_select_and_limits() {
    let span = sample();
    let selected = span.select(&span.within(None, Some(ymd(2023, 2, 1))));

    assert_eq!(
        selected.dates(),
        &[ymd(2023, 1, 1), ymd(2023, 1, 15), ymd(2023, 2, 1)]
    );
    assert_eq!(span.min_date(), Some(ymd(2023, 1, 1)));
    assert_eq!(span.limit(), Some((ymd(2023, 1, 1), ymd(2023, 3, 1))));

    let empty = TimeSpan::default();
    assert!(empty.is_empty());
    assert_eq!(empty.min_date(), None);
    assert_eq!(empty.limit(), None);
}

#[test]
fn test_daily_range_is_inclusive() {
    let range = DateRange::new(ymd(2023, 1, 5), ymd(2023, 1, 6), Frequency::Daily);
    let span = TimeSpan::range(&range).unwrap();

    assert_eq!(span.dates(), &[ymd(2023, 1, 5), ymd(2023, 1, 6)]);
}

#[test]
fn test_monthly_range_clamps_without_drift() {
    let range = DateRange::with_periods(ymd(2023, 1, 31), 4, Frequency::Monthly);
    let span = TimeSpan::range(&range).unwrap();

    assert_eq!(
        span.dates(),
        &[
            ymd(2023, 1, 31),
            ymd(2023, 2, 28),
            ymd(2023, 3, 31),
            ymd(2023, 4, 30)
        ]
    );
}

#[test]
fn test_monthly_range_for_next_year() {
    let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 12, 31), Frequency::Monthly);
    let span = TimeSpan::range(&range).unwrap();

    assert_eq!(span.len(), 12);
    assert_eq!(span.dates()[11], ymd(2024, 12, 1));
}

#[test]
fn test_yearly_range_from_leap_day() {
    let range = DateRange::with_periods(ymd(2024, 2, 29), 3, Frequency::Yearly);
    let span = TimeSpan::range(&range).unwrap();

    assert_eq!(
        span.dates(),
        &[ymd(2024, 2, 29), ymd(2025, 2, 28), ymd(2026, 2, 28)]
    );
}

#[test]
fn test_range_ending_before_start_is_empty() {
    let range = DateRange::new(ymd(2023, 5, 1), ymd(2023, 4, 1), Frequency::Daily);
    assert!(TimeSpan::range(&range).unwrap().is_empty());
}

#[test]
fn test_range_needs_exactly_one_bound() {
    let mut range = DateRange::new(ymd(2023, 1, 1), ymd(2023, 2, 1), Frequency::Daily);
    range.periods = Some(3);
    assert!(matches!(
        TimeSpan::range(&range),
        Err(DeclineError::InvalidParameter(_))
    ));

    range.end = None;
    range.periods = None;
    assert!(TimeSpan::range(&range).is_err());
}

#[rstest]
#[case("Daily", Frequency::Daily)]
#[case("d", Frequency::Daily)]
#[case("monthly", Frequency::Monthly)]
#[case("M", Frequency::Monthly)]
#[case("Yearly", Frequency::Yearly)]
#[case("y", Frequency::Yearly)]
fn test_frequency_names(#[case] name: &str, #[case] frequency: Frequency) {
    assert_eq!(name.parse::<Frequency>().unwrap(), frequency);
}

#[test]
fn test_unsupported_frequency() {
    assert!("weekly".parse::<Frequency>().is_err());
    assert_eq!(Frequency::Monthly.to_string(), "Monthly");
}
