use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexgrid_config::{ConfigSource, LoadedConfig};
use flexgrid_core::{
    EFFECTIVE_BITS, FrequencyGhz, FrequencyThz, GranularityCollection, GridMath,
    MAX_FREQUENCY_PRECISION, ModulationFormat, ServicePathSpectrum, SlotIndex, SpectrumInformation,
    central_frequency, central_frequency_open_config, channel_name, dbm_to_watts,
    higher_slot_index, index_of_frequency, lower_slot_index, n_from_index,
    start_frequency_of_index, stop_frequency_of_index,
};

#[derive(Parser)]
#[command(name = "flexgrid", about = "OpenROADM flex-grid spectrum arithmetic")]
struct Cli {
    /// Grid config file (overrides FLEXGRID_CONFIG and ~/.flexgrid/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Raster index, lower/higher slot index and N value of a frequency (THz)
    Index { frequency: FrequencyThz },

    /// Start and stop frequency of a raster index
    Slot {
        #[arg(value_parser = clap::value_parser!(u16).range(0..=i64::from(EFFECTIVE_BITS)))]
        index: SlotIndex,
    },

    /// Central frequency of a [min, max] band (THz)
    Center {
        min: FrequencyThz,
        max: FrequencyThz,

        /// Round half-to-even to this many decimals
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_FREQUENCY_PRECISION))
        )]
        precision: Option<u32>,

        /// Report in MHz for OpenConfig devices
        #[arg(long)]
        open_config: bool,
    },

    /// Spectrum width (GHz) for a service rate (Gbit/s) and modulation format
    Width {
        rate: u32,
        modulation: ModulationFormat,
    },

    /// Least common multiple of node granularities (GHz)
    Lcm {
        #[arg(required = true)]
        granularities: Vec<FrequencyGhz>,

        /// Also report how many slots of this width the LCM covers
        #[arg(long)]
        slots_for: Option<FrequencyGhz>,
    },

    /// Resolve the spectrum of a service path, printed as JSON
    Spectrum {
        #[arg(long)]
        lower: u32,
        #[arg(long)]
        higher: u32,
        #[arg(long)]
        wave_number: Option<u32>,
        #[arg(long)]
        min_freq: Option<FrequencyThz>,
        #[arg(long)]
        max_freq: Option<FrequencyThz>,
        #[arg(long)]
        center_freq: Option<FrequencyThz>,
        #[arg(long)]
        width: Option<FrequencyGhz>,
        #[arg(long)]
        modulation: Option<ModulationFormat>,
    },

    /// 1.2.1 fixed-grid channel for a wavelength number, printed as JSON
    Fixed { wavelength: u32 },

    /// Convert optical power from dBm to watts
    Dbm {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Print the effective grid configuration as TOML
    Config,
}

fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    flexgrid_config::load(cli.config.as_deref()).context("failed to load grid config")
}

fn grid_math(cli: &Cli) -> Result<GridMath> {
    Ok(GridMath::new(load_config(cli)?.config))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Index { frequency } => cmd_index(*frequency),
        Commands::Slot { index } => cmd_slot(*index),
        Commands::Center {
            min,
            max,
            precision,
            open_config,
        } => cmd_center(*min, *max, *precision, *open_config),
        Commands::Width { rate, modulation } => cmd_width(&cli, *rate, *modulation),
        Commands::Lcm {
            granularities,
            slots_for,
        } => cmd_lcm(granularities, *slots_for),
        Commands::Spectrum {
            lower,
            higher,
            wave_number,
            min_freq,
            max_freq,
            center_freq,
            width,
            modulation,
        } => cmd_spectrum(&ServicePathSpectrum {
            lower_spectral_slot_number: Some(*lower),
            higher_spectral_slot_number: Some(*higher),
            wave_number: *wave_number,
            min_freq: *min_freq,
            max_freq: *max_freq,
            center_freq: *center_freq,
            nmc_width: *width,
            modulation_format: *modulation,
        }),
        Commands::Fixed { wavelength } => cmd_fixed(&cli, *wavelength),
        Commands::Dbm { value } => cmd_dbm(*value),
        Commands::Config => cmd_config(&cli),
    }
}

fn cmd_index(frequency: FrequencyThz) -> Result<()> {
    let index = index_of_frequency(frequency)
        .with_context(|| format!("cannot place {frequency} THz on the grid"))?;
    let lower = lower_slot_index(frequency)?;
    let higher = higher_slot_index(frequency)?;

    println!("index:  {index}");
    println!("lower:  {lower}");
    println!("higher: {higher}");
    println!("n:      {}", n_from_index(index));
    Ok(())
}

fn cmd_slot(index: SlotIndex) -> Result<()> {
    println!("start:  {}", start_frequency_of_index(index));
    println!("stop:   {}", stop_frequency_of_index(index));
    println!("name:   {}", channel_name(index));
    Ok(())
}

fn cmd_center(
    min: FrequencyThz,
    max: FrequencyThz,
    precision: Option<u32>,
    open_config: bool,
) -> Result<()> {
    let center = if open_config {
        central_frequency_open_config(min, max, precision)
    } else {
        central_frequency(min, max, precision)
    };
    let center = center.with_context(|| format!("cannot center the band [{min}, {max}] THz"))?;
    println!("{center}");
    Ok(())
}

fn cmd_width(cli: &Cli, rate: u32, modulation: ModulationFormat) -> Result<()> {
    let grid = grid_math(cli)?;
    println!("{}", grid.width_for_rate_and_modulation(rate, modulation));
    Ok(())
}

fn cmd_lcm(granularities: &[FrequencyGhz], slots_for: Option<FrequencyGhz>) -> Result<()> {
    let mut collection = GranularityCollection::new();
    for g in granularities {
        collection
            .add(*g)
            .with_context(|| format!("rejected granularity {g}"))?;
    }
    let lcm = collection
        .least_common_multiple()
        .context("failed to reconcile granularities")?;
    println!("lcm:    {lcm}");

    if let Some(target) = slots_for {
        let slots = collection
            .slots_for(target)
            .with_context(|| format!("failed to count slots of {target} GHz"))?;
        println!("slots:  {slots}");
    }
    Ok(())
}

fn cmd_spectrum(input: &ServicePathSpectrum) -> Result<()> {
    let info = SpectrumInformation::from_service_path(input)
        .context("failed to resolve spectrum information")?;
    let json = serde_json::to_string_pretty(&info).context("failed to serialize spectrum")?;
    println!("{json}");
    Ok(())
}

fn cmd_fixed(cli: &Cli, wavelength: u32) -> Result<()> {
    let grid = grid_math(cli)?;
    let channel = grid
        .fixed_grid_channel(wavelength)
        .context("failed to map fixed-grid wavelength")?;
    let json = serde_json::to_string_pretty(&channel).context("failed to serialize channel")?;
    println!("{json}");
    Ok(())
}

fn cmd_dbm(value: f64) -> Result<()> {
    println!("{}", dbm_to_watts(value));
    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<()> {
    let loaded = load_config(cli)?;
    let source = match &loaded.source {
        ConfigSource::Defaults => "built-in defaults".to_string(),
        other => other
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    };
    let content = toml::to_string_pretty(&loaded.config).context("failed to serialize config")?;
    println!("# source: {source}");
    print!("{content}");
    Ok(())
}
