use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use decline_curve::{
    fitted_models, Analysis, Arps, ColumnHeads, DateRange, DeclineError, DeclineModel, FitOptions,
    Frequency, ProductionData, Window,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeMap;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (0..n).map(|i| start + Duration::days(i as i64)).collect()
}

fn synthetic(arps: Arps, di: f64, yi: f64, n: usize) -> ProductionData {
    let dates = daily(ymd(2023, 1, 1), n);
    let rates: Vec<f64> = (0..n).map(|t| arps.rate(di, yi, t as f64)).collect();
    ProductionData::from_series(&dates, &rates).unwrap()
}

#[test]
fn test_four_point_exponential_forecast() {
    let dates = daily(ymd(2023, 1, 1), 4);
    let data = ProductionData::from_series(&dates, &[100.0, 90.0, 81.0, 72.9]).unwrap();

    let analysis = Analysis::new(FitOptions::resolve(Some("exponential"), None).unwrap());
    let fit = analysis.fit(&data, &Window::all(), None).unwrap();
    let model = fit.model.unwrap();

    assert!((0.09..=0.12).contains(&model.di()));
    assert!((95.0..=105.0).contains(&model.yi()));
    assert!(fit.rsquared() > 0.99);
    assert_eq!(model.date0(), ymd(2023, 1, 1));

    let range = DateRange::new(ymd(2023, 1, 5), ymd(2023, 1, 6), Frequency::Daily);
    let curve = Analysis::forecast(&model, &range).unwrap();

    assert_eq!(curve.dates(), &[ymd(2023, 1, 5), ymd(2023, 1, 6)]);
    let predicted = curve.predicted();
    assert!(predicted[0] < 72.9);
    assert!(predicted[1] < predicted[0]);
    assert!(curve.cumulative()[1] > curve.cumulative()[0]);
}

#[rstest]
#[case(Arps::Exponential)]
#[case(Arps::hyperbolic(0.5).unwrap())]
#[case(Arps::Harmonic)]
fn test_fit_recovers_parameters(#[case] arps: Arps) {
    let data = synthetic(arps, 0.03, 800.0, 45);
    let options = FitOptions::new().with_exponent(arps.exponent()).unwrap();

    let fit = Analysis::new(options)
        .fit(&data, &Window::all(), None)
        .unwrap();
    let model = fit.model.unwrap();

    assert_eq!(model.mode(), arps.mode());
    assert_relative_eq!(model.di(), 0.03, max_relative = 1e-6);
    assert_relative_eq!(model.yi(), 800.0, max_relative = 1e-6);
    assert_eq!(fit.regression.num, 45);
}

#[test]
fn test_fit_window_and_anchor() {
    let data = synthetic(Arps::Exponential, 0.05, 200.0, 20);
    let analysis = Analysis::default();

    let window = Window::since(ymd(2023, 1, 6));
    let fit = analysis.fit(&data, &window, None).unwrap();
    let model = fit.model.unwrap();

    assert_eq!(fit.regression.num, 15);
    assert_eq!(model.date0(), ymd(2023, 1, 6));
    assert_relative_eq!(model.yi(), 200.0 * (-0.25f64).exp(), max_relative = 1e-6);

    let fit = analysis
        .fit(&data, &window, Some(ymd(2023, 1, 1)))
        .unwrap();
    let model = fit.model.unwrap();
    assert_eq!(model.date0(), ymd(2023, 1, 1));
    assert_relative_eq!(model.yi(), 200.0, max_relative = 1e-6);
}

#[test]
fn test_fit_with_origin_offset() {
    let data = synthetic(Arps::Harmonic, 0.04, 300.0, 30);
    let options = FitOptions::new().with_exponent(1.0).unwrap().with_origin(10.0);

    let model = Analysis::new(options)
        .fit(&data, &Window::all(), None)
        .unwrap()
        .model
        .unwrap();

    assert_eq!(model.xi(), 10.0);
    assert_relative_eq!(model.yi(), 300.0 / 1.4, max_relative = 1e-6);
    assert_relative_eq!(model.forward(&[0.0])[0], 300.0, max_relative = 1e-6);
}

#[test]
fn test_empty_window_gives_no_model() {
    let data = synthetic(Arps::Exponential, 0.05, 200.0, 10);
    let fit = Analysis::default()
        .fit(&data, &Window::since(ymd(2024, 1, 1)), None)
        .unwrap();

    assert!(!fit.is_usable());
    assert_eq!(fit.regression.num, 0);
    assert!(fit.rsquared().is_nan());
}

#[test]
fn test_increasing_rates_are_rejected() {
    let dates = daily(ymd(2023, 1, 1), 3);
    let data = ProductionData::from_series(&dates, &[10.0, 20.0, 40.0]).unwrap();

    let fit = Analysis::default().fit(&data, &Window::all(), None).unwrap();

    assert!(fit.model.is_none());
    assert!(fit.regression.linear.is_some());
    assert!(fit.regression.nonlinear.di < 0.0);
    assert!(matches!(
        fit.regression.failure,
        Some(DeclineError::InvalidParameter(_))
    ));
}

#[test]
fn test_best_fit_picks_harmonic() {
    let data = synthetic(Arps::Harmonic, 0.05, 100.0, 30);
    let best = Analysis::default()
        .best_fit(&data, &Window::all(), None)
        .unwrap();

    assert_eq!(best.regression.b, 1.0);
    assert_relative_eq!(best.model.unwrap().di(), 0.05, max_relative = 1e-6);
}

#[test]
fn test_best_fit_ranks_candidates_on_the_same_points() {
    let dates = daily(ymd(2023, 1, 1), 20);
    let mut rates: Vec<f64> = (0..20).map(|t| 200.0 * (-0.05 * t as f64).exp()).collect();
    rates[8] = -50.0;
    let data = ProductionData::from_series(&dates, &rates).unwrap();

    let best = Analysis::default()
        .best_fit(&data, &Window::all(), None)
        .unwrap();

    assert_eq!(best.regression.b, 0.0);
    assert_eq!(best.regression.num, 19);
    assert_relative_eq!(best.model.unwrap().di(), 0.05, max_relative = 1e-9);
}

#[test]
fn test_best_fit_uses_configured_hyperbolic_exponent() {
    let data = synthetic(Arps::hyperbolic(0.3).unwrap(), 0.05, 100.0, 60);
    let options = FitOptions::new().with_exponent(0.3).unwrap();

    let best = Analysis::new(options)
        .best_fit(&data, &Window::all(), None)
        .unwrap();

    assert_eq!(best.regression.b, 0.3);
}

#[test]
fn test_fit_group_isolates_failures() {
    let dates: Vec<NaiveDate> = daily(ymd(2023, 1, 1), 5)
        .into_iter()
        .flat_map(|d| [d, d])
        .collect();
    let items: Vec<&str> = (0..5).flat_map(|_| ["A", "B"]).collect();
    let rates: Vec<f64> = (0..5)
        .flat_map(|t| [100.0 * (-0.1 * t as f64).exp(), 0.0])
        .collect();

    let data = ProductionData::from_items(&items, &dates, &rates).unwrap();
    let fits = Analysis::default().fit_group(&data, &Window::all()).unwrap();

    assert_eq!(fits.len(), 2);

    let a = fits["A"].as_ref().unwrap();
    assert_relative_eq!(a.model.unwrap().di(), 0.1, max_relative = 1e-9);

    let b = fits["B"].as_ref().unwrap();
    assert!(!b.is_usable());
    assert_eq!(b.regression.num, 0);
    assert!(matches!(
        b.regression.failure,
        Some(DeclineError::InsufficientData(_))
    ));

    let models = fitted_models(&fits);
    assert_eq!(models.keys().collect::<Vec<_>>(), vec!["A"]);
}

#[test]
fn test_estimate_on_observed_dates() {
    let data = synthetic(Arps::Exponential, 0.05, 200.0, 10);
    let model = DeclineModel::new(0.0, 0.05, 200.0, ymd(2023, 1, 1)).unwrap();

    let curve = Analysis::estimate(&model, &data, &Window::until(ymd(2023, 1, 5))).unwrap();
    let rates = data.rates().unwrap();

    assert_eq!(curve.len(), 5);
    for (predicted, observed) in curve.predicted().iter().zip(rates.iter()) {
        assert_relative_eq!(*predicted, *observed, max_relative = 1e-12);
    }
    assert_eq!(curve.cumulative()[0], 0.0);
}

#[test]
fn test_forecast_group_stacks_in_order() {
    let date0 = ymd(2023, 1, 1);
    let fast = DeclineModel::new(0.0, 0.2, 100.0, date0).unwrap();
    let slow = DeclineModel::new(1.0, 0.01, 50.0, date0).unwrap();
    let range = DateRange::with_periods(ymd(2023, 2, 1), 3, Frequency::Monthly);

    let pairs = vec![("Z", fast), ("A", slow)];
    let table = Analysis::forecast_group(pairs.iter().map(|(k, m)| (*k, m)), &range).unwrap();

    assert_eq!(table.len(), 6);
    assert_eq!(
        table.items(),
        vec![Some("Z"), Some("Z"), Some("Z"), Some("A"), Some("A"), Some("A")]
    );
    assert_eq!(table.dates()[3], ymd(2023, 2, 1));

    let mut models = BTreeMap::new();
    models.insert("Z".to_string(), fast);
    models.insert("A".to_string(), slow);
    let table = Analysis::forecast_group(&models, &range).unwrap();

    assert_eq!(table.items()[0], Some("A"));

    let df = table
        .to_dataframe(&ColumnHeads::default().with_item("well"))
        .unwrap();
    assert_eq!(
        df.get_column_names(),
        vec!["well", "date", "predicted", "cumulative"]
    );
    assert_eq!(df.height(), 6);
}

#[test]
fn test_single_curve_dataframe_has_no_item_column() {
    let model = DeclineModel::new(0.5, 0.1, 100.0, ymd(2023, 1, 1)).unwrap();
    let range = DateRange::with_periods(ymd(2023, 1, 1), 4, Frequency::Daily);

    let curve = Analysis::forecast(&model, &range).unwrap();
    let df = curve.to_dataframe(&ColumnHeads::new("Date", "Oil")).unwrap();

    assert_eq!(df.get_column_names(), vec!["Date", "predicted", "cumulative"]);
    assert_relative_eq!(curve.predicted()[0], 100.0);
}
