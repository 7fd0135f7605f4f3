//! Writes the reference signals `x_re.txt` and `x_co.txt`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};

use cl_fft::synth::SignalSpec;

const REAL_FILE: &str = "x_re.txt";
const COMPLEX_FILE: &str = "x_co.txt";

/// Generate sine test data for cl-fft.
#[derive(Parser, Debug)]
#[command(name = "mk-test-data", version)]
struct Cli {
    /// Number of samples
    #[arg(short = 'n', default_value_t = 100_000)]
    samples: usize,

    /// Time step
    #[arg(short = 't', default_value_t = 1.0e-4)]
    dt: f64,

    /// Real frequency
    #[arg(short = 'f', default_value_t = 50.0, allow_negative_numbers = true)]
    frequency: f64,

    /// Amplitude
    #[arg(short = 'a', default_value_t = 1.0, allow_negative_numbers = true)]
    amplitude: f64,

    /// Imaginary frequency
    #[arg(short = 'b', default_value_t = -0.01, allow_negative_numbers = true)]
    imag_frequency: f64,

    /// Amplitude of the component at the maximum frequency
    #[arg(short = 'A', default_value_t = 0.0, allow_negative_numbers = true)]
    nyquist_amplitude: f64,

    /// Phase shift
    #[arg(short = 'P', default_value_t = 0.0, allow_negative_numbers = true)]
    phase: f64,

    /// Output number width
    #[arg(short = 'w', default_value_t = 18)]
    width: usize,

    /// Directory for the generated files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// More log output, repeat for more
    #[arg(short = 'd', action = ArgAction::Count)]
    debug: u8,
}

impl Cli {
    fn spec(&self) -> SignalSpec {
        SignalSpec {
            samples: self.samples,
            dt: self.dt,
            frequency: self.frequency,
            imag_frequency: self.imag_frequency,
            amplitude: self.amplitude,
            nyquist_amplitude: self.nyquist_amplitude,
            phase: self.phase,
        }
    }
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    let path = dir.join(name);
    let file = File::create(&path)
        .with_context(|| format!("Fail to open output file <{}>", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.debug {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let spec = cli.spec();

    let mut real_out = create(&cli.out_dir, REAL_FILE)?;
    let mut complex_out = create(&cli.out_dir, COMPLEX_FILE)?;

    spec.write_real(&mut real_out, cli.width)
        .context("writing real signal")?;
    real_out.flush().context("writing real signal")?;

    spec.write_complex(&mut complex_out, cli.width)
        .context("writing complex signal")?;
    complex_out.flush().context("writing complex signal")?;

    info!(
        "Wrote {} samples (dt = {}, f = {}) to {} and {}",
        spec.samples,
        spec.dt,
        spec.frequency,
        cli.out_dir.join(REAL_FILE).display(),
        cli.out_dir.join(COMPLEX_FILE).display()
    );

    Ok(())
}
