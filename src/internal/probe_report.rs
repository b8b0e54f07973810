#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::collections::HashSet;

use plotters::prelude::*;
use prime_probe::{HashtableBuilder, ProbeStrategy};
use rand::Rng;

// Prime, so no rounding happens at construction
const TABLE_SIZE: usize = 10_007;
const KEY_LENGTH: usize = 8;
// Load factors from 0.05 up to the default maximum of 0.6
const NUM_LOAD_FACTORS: usize = 12;
const MAX_LOAD: f64 = 0.6;

#[derive(Debug, Default)]
struct Measurement {
    average: f64,
    worst: usize,
}

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    let mut seen = HashSet::with_capacity(count);
    let mut keys = Vec::with_capacity(count);

    while keys.len() < count {
        let key: String =
            (0..KEY_LENGTH).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

fn measure(
    strategy: ProbeStrategy,
    keys: &[String],
) -> Result<Measurement, Box<dyn std::error::Error>> {
    let mut table =
        HashtableBuilder::new().with_capacity(TABLE_SIZE).with_strategy(strategy).build()?;
    for (value, key) in keys.iter().enumerate() {
        table.put(key.as_str(), value)?;
    }

    let probes: Vec<usize> = keys.iter().filter_map(|key| table.probe_length(key)).collect();
    if probes.is_empty() {
        return Ok(Measurement::default());
    }
    Ok(Measurement {
        average: probes.iter().sum::<usize>() as f64 / probes.len() as f64,
        worst: probes.iter().copied().max().unwrap_or(0),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let load_factors: Vec<f64> =
        (1..=NUM_LOAD_FACTORS).map(|i| MAX_LOAD * i as f64 / NUM_LOAD_FACTORS as f64).collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    let keys = random_keys(num_keys.iter().copied().max().unwrap_or(0));

    let mut average_probes: Vec<Vec<(f64, f64)>> = vec![Vec::new(); ProbeStrategy::ALL.len()];
    let mut worst_probes: Vec<Vec<(f64, f64)>> = vec![Vec::new(); ProbeStrategy::ALL.len()];

    for (&load, &n_keys) in load_factors.iter().zip(&num_keys) {
        println!("Load factor {load:.2} ({n_keys} keys)");

        for (strategy_idx, &strategy) in ProbeStrategy::ALL.iter().enumerate() {
            let measurement = measure(strategy, &keys[..n_keys])?;
            average_probes[strategy_idx].push((load, measurement.average));
            worst_probes[strategy_idx].push((load, measurement.worst as f64));

            println!(
                "  {strategy}: Avg probes = {:.3}, Worst = {}",
                measurement.average, measurement.worst
            );
        }
    }

    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220), RGBColor(50, 180, 50)];
    let line_width = 2;
    let marker_size = 4;

    let root = BitMapBackend::new("probe_lengths.png", (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));

    let panels = [
        ("Average Successful Lookup", "Average probes", &average_probes),
        ("Worst Successful Lookup", "Worst-case probes", &worst_probes),
    ];

    for ((title, y_desc, series), area) in panels.iter().zip(&areas) {
        let max_y = series
            .iter()
            .flat_map(|points| points.iter().map(|&(_, y)| y))
            .fold(1.0, f64::max) *
            1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(*title, (font_family, 30))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..MAX_LOAD, 0.0..max_y)?;

        chart
            .configure_mesh()
            .x_desc("Load factor")
            .y_desc(*y_desc)
            .axis_desc_style((font_family, 16))
            .draw()?;

        for (strategy_idx, &strategy) in ProbeStrategy::ALL.iter().enumerate() {
            let color = colors[strategy_idx % colors.len()];
            let line_style = ShapeStyle::from(&color).stroke_width(line_width);

            chart
                .draw_series(LineSeries::new(series[strategy_idx].iter().copied(), line_style))?
                .label(strategy.to_string())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

            chart.draw_series(
                series[strategy_idx]
                    .iter()
                    .map(|&point| Circle::new(point, marker_size, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    println!("Generated plot image: probe_lengths.png");

    Ok(())
}
