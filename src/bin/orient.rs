use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use anyhow::{Context, bail};
    use clap::{Parser, Subcommand, ValueEnum};
    use orient::{Float, Quaternion, Vector3, rotation_matrix};
    use orient_log::{debug, info, with_timing_logging};

    #[derive(Debug, Parser)]
    #[command(about = "Quaternion rotation calculator", long_about = None)]
    struct Cli {
        /// Floating-point precision to compute in
        #[arg(short, long, value_enum, global = true, default_value_t = Precision::F64)]
        precision: Precision,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Precision {
        F32,
        F64,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Create the quaternion for a rotation about an axis
        AxisAngle {
            /// Rotation axis as comma-separated components (need not be
            /// normalized)
            #[arg(long, allow_hyphen_values = true)]
            axis: String,
            /// Rotation angle in radians
            #[arg(long, allow_negative_numbers = true)]
            angle: f64,
        },
        /// Find the shortest-arc rotation from one direction to another
        Between {
            /// Direction to rotate from, as comma-separated components
            #[arg(short, long, allow_hyphen_values = true)]
            from: String,
            /// Direction to rotate to, as comma-separated components
            #[arg(short, long, allow_hyphen_values = true)]
            to: String,
        },
        /// Show the properties of the quaternion R + Xi + Yj + Zk
        Inspect {
            #[arg(allow_negative_numbers = true)]
            r: f64,
            #[arg(allow_negative_numbers = true)]
            x: f64,
            #[arg(allow_negative_numbers = true)]
            y: f64,
            #[arg(allow_negative_numbers = true)]
            z: f64,
        },
    }

    pub fn main() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();

        let cli = Cli::parse();
        debug!("Computing in {:?} precision", cli.precision);

        match cli.precision {
            Precision::F32 => run::<f32>(cli.command),
            Precision::F64 => run::<f64>(cli.command),
        }
    }

    fn run<F: Float>(command: Command) -> Result<()> {
        match command {
            Command::AxisAngle { axis, angle } => {
                let axis: Vector3<F> = parse_vector3(&axis).context("Invalid rotation axis")?;
                if axis.is_zero() {
                    bail!("The rotation axis must be non-zero");
                }
                let angle = F::from_f64_rounded(angle);

                info!("Rotating by {angle} rad about {axis}");
                let quaternion = with_timing_logging!(
                    Debug,
                    "Creating quaternion from axis and angle";
                    Quaternion::from_axis_angle(&axis, angle)
                );

                println!("quaternion: {quaternion}");
                println!("length:     {}", quaternion.length());
                println!("axis:       {}", quaternion.axis());
                println!("angle:      {}", quaternion.angle());
                print!("matrix:\n{}", quaternion.to_matrix3());
            }
            Command::Between { from, to } => {
                let from: Vector3<F> = parse_vector3(&from).context("Invalid `from` direction")?;
                let to: Vector3<F> = parse_vector3(&to).context("Invalid `to` direction")?;
                if from.is_zero() || to.is_zero() {
                    bail!("Directions must be non-zero");
                }

                info!("Rotating from {from} to {to}");
                let quaternion = with_timing_logging!(
                    Debug,
                    "Finding shortest-arc rotation";
                    Quaternion::from_rotation(&from, &to)
                );
                let matrix = with_timing_logging!(
                    Debug,
                    "Building rotation matrix";
                    rotation_matrix(&from, &to)
                );

                println!("quaternion: {quaternion}");
                println!("axis:       {}", quaternion.axis());
                println!("angle:      {}", quaternion.angle());
                println!("rotated:    {}", quaternion.rotate_vector(&from.normalized()));
                print!("matrix:\n{matrix}");
            }
            Command::Inspect { r, x, y, z } => {
                let quaternion = Quaternion::<f64>::new(r, x, y, z).cast::<F>();
                info!("Inspecting {quaternion}");

                let normalized = quaternion.normalized();

                println!("length:     {}", quaternion.length());
                println!("normalized: {normalized}");
                println!("conjugate:  {}", quaternion.conjugate());
                println!("inverse:    {}", quaternion.inverse());
                println!("axis:       {}", quaternion.axis());
                println!("angle:      {}", quaternion.angle());
                println!("log:        {}", normalized.log());
                print!("matrix:\n{}", normalized.to_matrix3());
            }
        }
        Ok(())
    }

    /// Parses a vector from three comma-separated components.
    fn parse_vector3<F: Float>(text: &str) -> Result<Vector3<F>> {
        let components = text
            .split(',')
            .map(|component| {
                let component = component.trim();
                component
                    .parse::<f64>()
                    .with_context(|| format!("Invalid vector component `{component}`"))
            })
            .collect::<Result<Vec<_>>>()?;

        let &[x, y, z] = components.as_slice() else {
            bail!(
                "Expected 3 comma-separated components, got {}",
                components.len()
            );
        };

        Ok(Vector3::new(x, y, z).cast())
    }

}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
