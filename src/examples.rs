//! # Library examples
//!
//! We provide some examples in the `demos` subdirectory. To run them
//! use `cargo run --example <example_name>`.
//!
//! ### Reducing the rank of an image.
//!
//! The example `svd_image` creates a random color image, reconstructs it
//! at a few ranks and prints the mean squared error of every reconstruction.
//!
//! ### Sweeping over all ranks of an image.
//!
//! The example `rank_sweep` decomposes a synthetic image once and reuses the
//! decomposition for every rank from 1 up to the rank of the image. It logs the
//! error and the PSNR of each reconstruction and plots the error curve into the
//! file `rank_sweep.png`. Set `RUST_LOG=rusty_image_svd=debug` to see when the
//! decomposition is recomputed.
