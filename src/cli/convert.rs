use anyhow::{Context, Result};

use crate::cli::args::{ConvertCliConfig, USAGE};
use crate::convert::convert_image_file;

/// Run the converter CLI over `args` (excluding argv[0]).
///
/// Flag errors are printed with the usage text and exit the process with
/// status 1; conversion errors are returned with context.
pub fn run_convert_cli(args: &[String]) -> Result<()> {
    let cfg = match ConvertCliConfig::parse(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[image-heightmap] error: {e}\n\n{USAGE}");
            std::process::exit(1);
        }
    };

    if cfg.help {
        println!("{USAGE}");
        return Ok(());
    }
    let input = cfg.input.as_deref().context("missing input image")?;

    let params = cfg
        .mesh_parameters()
        .context("invalid conversion settings")?;
    let summary = convert_image_file(input, &cfg.output, &params, cfg.report)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    if cfg.report {
        let json = serde_json::to_string_pretty(&summary).context("failed to encode report")?;
        println!("{json}");
    } else {
        eprintln!(
            "[image-heightmap] STL ready: {} ({} facets)",
            summary.output.display(),
            summary.facet_count
        );
    }
    Ok(())
}
