use std::env;

use image_heightmap::cli::run_convert_cli;

fn main() -> anyhow::Result<()> {
    // RUST_LOG=info shows load/convert progress.
    let _ = env_logger::try_init();

    let args: Vec<String> = env::args().skip(1).collect();
    run_convert_cli(&args)
}
