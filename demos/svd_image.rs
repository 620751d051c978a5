//! Reducing the rank of an image.
//!
//! This example reconstructs a random color image at a few ranks and prints the
//! error of every reconstruction.

use rusty_image_svd::*;

pub fn main() {
    // We initialize a random number generator.
    let mut rng = rand::thread_rng();

    // A color image with 120 rows, 80 columns and three channels.
    let image = random_image((120, 80, 3), &mut rng);

    // The rank of the image bounds the ranks we can ask for.
    let rank = RankReducer::<f64>::image_rank(&image).expect("Could not compute the image rank.");
    println!("Rank of the original image is {}.", rank);

    let mut reducer = RankReducer::<f64>::new();

    for (index, &target_rank) in [5, 20, 40, rank].iter().enumerate() {
        // Only the first call decomposes the image, the others reuse the decomposition.
        let reduced = reducer
            .decompose_and_reduce(&image, target_rank, index > 0)
            .expect("Could not reduce the image.");

        println!(
            "Rank {:3}: mean squared error {:8.2}, PSNR {:6.2} dB",
            target_rank,
            mean_squared_error(&reduced, &image).unwrap(),
            psnr(&reduced, &image).unwrap()
        );
    }
}
