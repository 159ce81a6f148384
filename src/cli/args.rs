// src/cli/args.rs
// Command-line flags for the image-heightmap converter
// Raw numeric values are kept as strings so blank and malformed input can be told apart

use std::fmt;
use std::path::PathBuf;

use crate::error::HeightmapResult;
use crate::io::stl_ascii::DEFAULT_STL_FILENAME;
use crate::params::{resolve_parameters, MeshParameters};

pub const USAGE: &str = "\
usage: image-heightmap <INPUT> [options]

Convert a PNG or JPEG image into an ASCII STL height map.

options:
  --height <units>     maximum extrusion height for white pixels (default 5)
  --scale <percent>    planar scale, 100 = one unit per pixel (default 100)
  -o, --output <path>  output file (default image_heightmap.stl)
  --report             print a JSON summary with mesh topology
  -h, --help           show this message";

/// Error produced while parsing command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    msg: String,
}

impl CliError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {}

/// Parsed converter invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertCliConfig {
    pub input: Option<PathBuf>,
    pub output: PathBuf,
    pub max_height: Option<String>,
    pub scale_percent: Option<String>,
    pub report: bool,
    pub help: bool,
}

impl Default for ConvertCliConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::from(DEFAULT_STL_FILENAME),
            max_height: None,
            scale_percent: None,
            report: false,
            help: false,
        }
    }
}

fn take_value<'a, I>(args: &mut I, flag: &str) -> Result<String, CliError>
where
    I: Iterator<Item = &'a String>,
{
    args.next()
        .cloned()
        .ok_or_else(|| CliError::new(format!("missing value for {flag}")))
}

impl ConvertCliConfig {
    /// Parse arguments (excluding argv[0]).
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut cfg = Self::default();
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--height" => cfg.max_height = Some(take_value(&mut it, "--height")?),
                "--scale" => cfg.scale_percent = Some(take_value(&mut it, "--scale")?),
                "-o" | "--output" => cfg.output = PathBuf::from(take_value(&mut it, arg)?),
                "--report" => cfg.report = true,
                "-h" | "--help" => cfg.help = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(CliError::new(format!("unknown option '{flag}'")));
                }
                path => {
                    if let Some(prev) = &cfg.input {
                        return Err(CliError::new(format!(
                            "unexpected extra input '{path}' (already have '{}')",
                            prev.display()
                        )));
                    }
                    cfg.input = Some(PathBuf::from(path));
                }
            }
        }
        if cfg.input.is_none() && !cfg.help {
            return Err(CliError::new("missing input image"));
        }
        Ok(cfg)
    }

    /// Resolve `--height` and `--scale` into validated mesh parameters.
    pub fn mesh_parameters(&self) -> HeightmapResult<MeshParameters> {
        resolve_parameters(self.max_height.as_deref(), self.scale_percent.as_deref())
    }
}
