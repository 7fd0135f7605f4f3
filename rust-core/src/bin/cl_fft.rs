//! Command line front end: spectrum of a column text file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::{error, LevelFilter};

use cl_fft::config::DEFAULT_DRIFT_TOLERANCE;
use cl_fft::spectrum::Direction;
use cl_fft::{FftConfig, FrequencyUnit, MagnitudeScale, PipelineError, RunSummary};

/// Forward FFT of a time series given as whitespace-delimited columns.
///
/// Lines that are blank or start with '#' or ';' are ignored.
#[derive(Parser, Debug)]
#[command(name = "cl-fft", version)]
struct Cli {
    /// Input file, '-' for stdin
    infile: String,

    /// Output real and imaginary parts instead of magnitude
    #[arg(short = 'c')]
    complex_output: bool,

    /// Complex input (imaginary part in column -y)
    #[arg(short = 'C')]
    complex_input: bool,

    /// Reverse transform (unimplemented)
    #[arg(short = 'r')]
    reverse: bool,

    /// Index of the 't' column
    #[arg(short = 't', default_value_t = 0)]
    time_column: usize,

    /// Index of the 'x' column
    #[arg(short = 'x', default_value_t = 1)]
    real_column: usize,

    /// Index of the imaginary column [default: x+1]
    #[arg(short = 'y')]
    imag_column: Option<usize>,

    /// Output number width
    #[arg(short = 'w', default_value_t = 18)]
    width: usize,

    /// Maximum required frequency
    #[arg(short = 'f', allow_negative_numbers = true)]
    max_frequency: Option<f64>,

    /// Force time step, values <= 0 mean auto
    #[arg(short = 'T', default_value_t = 0.0, allow_negative_numbers = true)]
    dt: f64,

    /// Output file [default: stdout]
    #[arg(short = 'o')]
    output: Option<PathBuf>,

    /// Drop zero frequency from output
    #[arg(short = '0')]
    drop_zero: bool,

    /// Output in ordinary frequency (Hz), not in omega
    #[arg(short = 'z')]
    hertz: bool,

    /// Relative time step deviation that triggers a warning
    #[arg(long, default_value_t = DEFAULT_DRIFT_TOLERANCE)]
    tolerance: f64,

    /// Magnitude normalization for complex input
    #[arg(long, value_enum, default_value_t = ScaleArg::Auto)]
    magnitude_scale: ScaleArg,

    /// More log output, repeat for more
    #[arg(short = 'd', action = ArgAction::Count)]
    debug: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScaleArg {
    Auto,
    OneSided,
    TwoSided,
}

impl From<ScaleArg> for MagnitudeScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Auto => MagnitudeScale::Auto,
            ScaleArg::OneSided => MagnitudeScale::OneSided,
            ScaleArg::TwoSided => MagnitudeScale::TwoSided,
        }
    }
}

impl Cli {
    fn config(&self) -> FftConfig {
        FftConfig {
            time_column: self.time_column,
            real_column: self.real_column,
            imag_column: self.imag_column,
            input_complex: self.complex_input,
            output_complex: self.complex_output,
            direction: if self.reverse {
                Direction::Reverse
            } else {
                Direction::Forward
            },
            forced_dt: Some(self.dt).filter(|&dt| dt > 0.0),
            drift_tolerance: self.tolerance,
            max_frequency: self.max_frequency.unwrap_or(f64::MAX),
            drop_zero_bin: self.drop_zero,
            frequency_unit: if self.hertz {
                FrequencyUnit::Ordinary
            } else {
                FrequencyUnit::Angular
            },
            field_width: self.width,
            magnitude_scale: self.magnitude_scale.into(),
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, PipelineError> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|source| PipelineError::OpenInput {
        path: path.to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>, PipelineError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    let file = File::create(path).map_err(|source| PipelineError::OpenOutput {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = cli.config();

    // reject unsupported requests before touching any file
    config.validate().map_err(PipelineError::from)?;

    let input = open_input(&cli.infile)?;
    let mut output = open_output(cli.output.as_ref())?;

    let summary = cl_fft::run(&config, input, &mut output)?;
    Ok(summary)
}

fn main() -> ExitCode {
    // usage errors exit with 1, exit code 2 is reserved for unreadable input
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.debug);

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            let code = err
                .downcast_ref::<PipelineError>()
                .map_or(1, PipelineError::exit_code);
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cl-fft", "data.txt"]).unwrap();
        let config = cli.config();

        assert_eq!(config.time_column, 0);
        assert_eq!(config.real_column, 1);
        assert_eq!(config.field_width, 18);
        assert_eq!(config.forced_dt, None);
        assert_eq!(config.max_frequency, f64::MAX);
        assert_eq!(config.frequency_unit, FrequencyUnit::Angular);
        assert_eq!(config.direction, Direction::Forward);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "cl-fft", "-c", "-C", "-0", "-z", "-t", "2", "-x", "3", "-w", "10", "-f", "5.5", "-T",
            "0.01", "-dd", "-",
        ])
        .unwrap();
        let config = cli.config();

        assert!(config.output_complex);
        assert!(config.input_complex);
        assert!(config.drop_zero_bin);
        assert_eq!(config.frequency_unit, FrequencyUnit::Ordinary);
        assert_eq!(config.time_column, 2);
        assert_eq!(config.effective_imag_column(), Some(4));
        assert_eq!(config.field_width, 10);
        assert_eq!(config.max_frequency, 5.5);
        assert_eq!(config.forced_dt, Some(0.01));
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.infile, "-");
    }

    #[test]
    fn test_reverse_flag() {
        let cli = Cli::try_parse_from(["cl-fft", "-r", "missing-file.txt"]).unwrap();
        let err = run(&cli).unwrap_err();

        let pipeline = err.downcast_ref::<PipelineError>().unwrap();
        assert_eq!(pipeline.exit_code(), 10);
    }

    #[test]
    fn test_missing_input_file() {
        let cli = Cli::try_parse_from(["cl-fft", "/nonexistent/dir/input.txt"]).unwrap();
        let err = run(&cli).unwrap_err();

        let pipeline = err.downcast_ref::<PipelineError>().unwrap();
        assert_eq!(pipeline.exit_code(), 2);
    }

    #[test]
    fn test_magnitude_scale_arg() {
        let cli = Cli::try_parse_from(["cl-fft", "--magnitude-scale", "one-sided", "in.txt"])
            .unwrap();
        assert_eq!(cli.config().magnitude_scale, MagnitudeScale::OneSided);
    }

    #[test]
    fn test_non_positive_dt_is_auto() {
        let cli = Cli::try_parse_from(["cl-fft", "-T", "-1", "in.txt"]).unwrap();
        assert_eq!(cli.config().forced_dt, None);
    }
}
