//! Sweeping over all ranks of an image.
//!
//! The image is decomposed once, every further reconstruction reuses the
//! cached decomposition. The error curve is plotted into `rank_sweep.png`.

use ndarray::{Array3, Axis};
use plotters::prelude::*;
use rusty_image_svd::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rank_sweep=info,rusty_image_svd=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut rng = rand::thread_rng();
    let (rows, cols, channels) = (96, 64, 3);

    // Every channel gets singular values decaying from 1 to 1E-4, shifted into the pixel range.
    let mut image = Array3::<u8>::zeros((rows, cols, channels));
    for mut channel in image.axis_iter_mut(Axis(2)) {
        let mat = f64::random_approximate_low_rank_matrix((rows, cols), 1.0, 1E-4, &mut rng)?;
        let scale = mat.iter().fold(0.0f64, |acc, item| acc.max(item.abs()));
        channel.assign(&mat.mapv(|item| (127.5 + 127.0 * item / scale).round() as u8));
    }

    let rank = RankReducer::<f64>::image_rank(&image)?;
    tracing::info!(rank, "rank of the original image");

    let mut reducer = RankReducer::<f64>::new();
    reducer.decompose(&image)?;

    let mut errors = Vec::with_capacity(rank);
    for target_rank in 1..=rank {
        let reduced = reducer.decompose_and_reduce(&image, target_rank, true)?;
        let mse = mean_squared_error(&reduced, &image)?;
        tracing::info!(
            rank = target_rank,
            mse,
            psnr = psnr(&reduced, &image)?,
            "reconstructed image"
        );
        errors.push((target_rank, mse));
    }

    let max_error = errors.iter().fold(0.0f64, |acc, &(_, mse)| acc.max(mse));

    let root = BitMapBackend::new("rank_sweep.png", (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(1..rank, 0.0..max_error)?;

    chart
        .configure_mesh()
        .x_labels(10)
        .y_labels(10)
        .x_desc("Rank")
        .y_desc("Mean squared error")
        .draw()?;

    chart
        .draw_series(LineSeries::new(errors, &BLACK))?
        .label("reconstruction error")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    chart.configure_series_labels().draw()?;
    root.present()?;

    tracing::info!(generation = reducer.generation(), "decompositions computed");

    Ok(())
}
