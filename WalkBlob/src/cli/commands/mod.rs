use clap::Subcommand;
use glam::Vec3;
use std::path::PathBuf;
use std::str::FromStr;

/// A point or offset given as `X,Y,Z`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3Arg(pub Vec3);

impl FromStr for Vec3Arg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(format!("Invalid vector '{s}'. Expected X,Y,Z"));
        };

        let parse = |v: &str| {
            v.parse::<f32>()
                .map_err(|_| format!("Invalid coordinate '{v}' in '{s}'"))
        };
        Ok(Vec3Arg(Vec3::new(parse(x)?, parse(y)?, parse(z)?)))
    }
}

pub mod dump;
pub mod export;
pub mod inspect;
pub mod probe;

#[derive(Subcommand)]
pub enum Commands {
    /// Export the walk mesh from a JSON scene to a blob
    Export {
        /// Scene file, optionally followed by `:LAYER` (e.g. "level.json:3")
        scene: String,

        /// Output blob file
        output: PathBuf,

        /// Name of the walk mesh object (default: WalkMesh)
        #[arg(long)]
        object: Option<String>,

        /// TOML file with export options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat a missing walk mesh as an error even if the config says skip
        #[arg(long)]
        strict: bool,
    },

    /// List the chunks in a blob
    Inspect {
        /// Blob file
        path: PathBuf,
    },

    /// Decode a blob and print the mesh as JSON
    Dump {
        /// Blob file
        path: PathBuf,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Place a point on the walk mesh and optionally walk it
    Probe {
        /// Blob file
        path: PathBuf,

        /// World position to start from (X,Y,Z)
        #[arg(long, allow_hyphen_values = true)]
        at: Vec3Arg,

        /// Step to walk from the start point (DX,DY,DZ)
        #[arg(long, allow_hyphen_values = true)]
        step: Option<Vec3Arg>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Export {
                scene,
                output,
                object,
                config,
                strict,
            } => export::execute(
                scene,
                output,
                object.as_deref(),
                config.as_deref(),
                *strict,
            ),
            Commands::Inspect { path } => inspect::execute(path),
            Commands::Dump { path, output } => dump::execute(path, output.as_deref()),
            Commands::Probe { path, at, step } => probe::execute(path, at.0, step.map(|s| s.0)),
        }
    }
}
