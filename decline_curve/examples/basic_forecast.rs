use chrono::{Duration, NaiveDate};
use decline_curve::{Analysis, DateRange, FitOptions, Frequency, ProductionData, Window};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Decline Curve: Basic Forecasting Example");
    println!("========================================\n");

    // Create sample data
    println!("Creating sample data...");
    let (dates, rates) = create_sample_data();
    let data = ProductionData::from_series(&dates, &rates)?;
    println!("Sample data created: {} daily points\n", data.len());

    // Fit each family and report the parameters
    println!("Fitting decline families...");
    for mode in ["exponential", "hyperbolic", "harmonic"] {
        let analysis = Analysis::new(FitOptions::resolve(Some(mode), None)?);
        let fit = analysis.fit(&data, &Window::all(), None)?;

        match fit.model {
            Some(model) => println!(
                "  {:<12} Di = {:.4} /day, yi = {:.1}, R² = {:.4}",
                mode,
                model.di(),
                model.yi(),
                fit.rsquared()
            ),
            None => println!("  {:<12} no usable fit", mode),
        }
    }

    // Pick the best family
    let best = Analysis::default().best_fit(&data, &Window::all(), None)?;
    let model = best.model.ok_or("no usable decline fit")?;
    println!(
        "\nBest fit: {} (b = {}), R² = {:.4}",
        model.mode(),
        model.b(),
        best.rsquared()
    );

    // Uncertainty of the initial decline rate
    println!(
        "Di 10/50/90 percentiles: {:.4} / {:.4} / {:.4}",
        best.regression.di_percentile(0.1)?,
        best.regression.di_percentile(0.5)?,
        best.regression.di_percentile(0.9)?
    );

    // Monthly forecast for the next year
    println!("\nGenerating forecast...");
    let start = NaiveDate::from_ymd_opt(2023, 4, 1).ok_or("invalid date")?;
    let range = DateRange::with_periods(start, 12, Frequency::Monthly);
    let curve = Analysis::forecast(&model, &range)?;

    for ((date, rate), volume) in curve
        .dates()
        .iter()
        .zip(curve.predicted())
        .zip(curve.cumulative())
    {
        println!("  {}: rate {:>8.2}, cumulative {:>10.1}", date, rate, volume);
    }

    println!("\nForecasting complete!");

    Ok(())
}

// Hyperbolic decline with a little deterministic noise
fn create_sample_data() -> (Vec<NaiveDate>, Vec<f64>) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    (0..90)
        .map(|t| {
            let days = t as f64;
            let rate = 500.0 * (1.0 + 0.5 * 0.02 * days).powf(-2.0);
            let noise = 1.0 + 0.02 * (days * 0.7).sin();
            (start + Duration::days(t), rate * noise)
        })
        .unzip()
}
