use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::config::{self, Config, DEFAULT_CONFIG_PATH};
use crate::geocode::{self, CachingGeocoder, Geocoder, NominatimGeocoder, SiteLocation};
use crate::hydrology::{
    self, parse_surface_entry, Coordinates, QuickCheckRequest, StormDuration, SurfaceArea,
    SurfaceError, TcCoefficient, TimeOfConcentration,
};
use crate::report::{format_coordinates, ResultReport};
use crate::ui_cli::{self, MenuChoice};
use crate::units::{convert_length, AreaUnit, LengthUnit};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 콘솔 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(config::ConfigError),
    /// 지표면 입력 오류
    Surface(SurfaceError),
    /// 그 밖의 잘못된 명령행/대화형 입력
    Input(String),
    /// 보고서 JSON 직렬화 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Surface(e) => write!(f, "{e}"),
            AppError::Input(msg) => write!(f, "invalid input: {msg}"),
            AppError::Json(e) => write!(f, "report serialization failed: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<SurfaceError> for AppError {
    fn from(value: SurfaceError) -> Self {
        AppError::Surface(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// Rational Method 간이 유출량 계산기 (Seattle/King County 강우 자료)
#[derive(Parser, Debug)]
#[command(name = "stormwater_quick_check", version)]
#[command(about = "Peak stormwater runoff quick-check using the Rational Method (Q = CiA)")]
pub struct Cli {
    /// Path to the TOML config file (created with defaults when missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute peak runoff for a site
    Calc(CalcArgs),
    /// Estimate time of concentration (FAA method) and the matching storm duration
    Tc(TcArgs),
    /// Look up a rainfall intensity with its citation
    Intensity(IntensityArgs),
    /// List surface types and runoff coefficients
    Surfaces,
    /// Print the Seattle IDF table
    Table,
    /// Menu-driven session (default when no command is given)
    Interactive,
    /// Write the default config file, overwriting an existing one
    InitConfig,
}

#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Surface entry as "<surface type>=<area>", repeatable (e.g. "Lawns=5000")
    #[arg(long = "surface", short = 's', required = true)]
    pub surfaces: Vec<String>,

    /// Unit for surface areas: sqft, acre, m2, ha
    #[arg(long)]
    pub area_unit: Option<String>,

    /// Return period in years (2, 5, 10, 25, 50, 100)
    #[arg(long)]
    pub return_period: Option<u32>,

    /// Storm duration in minutes (5, 10, 15, 30, 60, 120, 180)
    #[arg(long, conflicts_with = "tc_length")]
    pub duration: Option<u32>,

    /// Flow path length for a Tc-based duration
    #[arg(long, requires = "tc_slope")]
    pub tc_length: Option<f64>,

    /// Average slope along the flow path [%]
    #[arg(long, requires = "tc_length")]
    pub tc_slope: Option<f64>,

    /// Runoff coefficient used for Tc (defaults to the configured urban default)
    #[arg(long, requires = "tc_length", conflicts_with = "tc_weighted")]
    pub tc_coefficient: Option<f64>,

    /// Use the site's weighted C for Tc instead of a fixed coefficient
    #[arg(long, requires = "tc_length")]
    pub tc_weighted: bool,

    /// Unit for the flow path length: ft, m, yd
    #[arg(long, requires = "tc_length")]
    pub length_unit: Option<String>,

    /// Project address to geocode
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub address: Option<String>,

    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (west is negative)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Location label shown in the report when coordinates are given directly
    #[arg(long, requires = "lat")]
    pub label: Option<String>,

    /// Skip geocoding even if enabled in config
    #[arg(long)]
    pub no_geocode: bool,

    /// Emit the full report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TcArgs {
    /// Longest flow path length
    #[arg(long)]
    pub length: f64,

    /// Average slope [%]
    #[arg(long)]
    pub slope: f64,

    /// Runoff coefficient (defaults to the configured urban default)
    #[arg(long)]
    pub coefficient: Option<f64>,

    /// Unit for the flow path length: ft, m, yd
    #[arg(long)]
    pub length_unit: Option<String>,
}

#[derive(Args, Debug)]
pub struct IntensityArgs {
    #[arg(long)]
    pub return_period: u32,

    #[arg(long)]
    pub duration: u32,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

/// 명령행 인자에 따라 하위 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(Command::InitConfig) = cli.command {
        Config::default().save_to(&cli.config)?;
        println!("Wrote default config to {}", cli.config.display());
        return Ok(());
    }

    let mut cfg = config::load_from(&cli.config)?;
    match cli.command {
        Some(Command::Calc(args)) => run_calc(&cfg, &args),
        Some(Command::Tc(args)) => run_tc(&cfg, &args),
        Some(Command::Intensity(args)) => run_intensity(&cfg, &args),
        Some(Command::Surfaces) => {
            ui_cli::print_surface_catalog();
            Ok(())
        }
        Some(Command::Table) => {
            ui_cli::print_rainfall_table();
            Ok(())
        }
        Some(Command::Interactive) | None => {
            let stdin = io::stdin();
            run_interactive(&mut cfg, &cli.config, &mut stdin.lock())
        }
        Some(Command::InitConfig) => Ok(()),
    }
}

/// 대화형 메뉴 루프를 실행한다. 입력이 끝나면 설정을 저장하고 종료한다.
pub fn run_interactive<R: BufRead>(
    config: &mut Config,
    config_path: &Path,
    input: &mut R,
) -> Result<(), AppError> {
    let geocoder = build_geocoder(config);
    loop {
        match ui_cli::main_menu(input)? {
            MenuChoice::QuickCheck => {
                ui_cli::handle_quick_check(
                    input,
                    config,
                    geocoder.as_ref().map(|g| g as &dyn Geocoder),
                )?;
            }
            MenuChoice::TimeOfConcentration => {
                ui_cli::handle_time_of_concentration(input, config)?;
            }
            MenuChoice::RainfallTable => ui_cli::print_rainfall_table(),
            MenuChoice::SurfaceCatalog => ui_cli::print_surface_catalog(),
            MenuChoice::Settings => {
                ui_cli::handle_settings(input, config)?;
                config.save_to(config_path)?;
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("Exiting.");
                break;
            }
        }
    }
    Ok(())
}

/// 설정에 따라 캐시가 붙은 Nominatim 지오코더를 만든다. 꺼져 있거나 생성 실패 시 None.
pub fn build_geocoder(cfg: &Config) -> Option<CachingGeocoder<NominatimGeocoder>> {
    if !cfg.geocoder.enabled {
        return None;
    }
    match NominatimGeocoder::new(&cfg.geocoder) {
        Ok(g) => Some(CachingGeocoder::new(
            g,
            Duration::from_secs(cfg.geocoder.cache_ttl_secs),
        )),
        Err(err) => {
            warn!(error = %err, "geocoder unavailable; addresses will fall back to the default site");
            None
        }
    }
}

pub fn parse_area_unit(value: Option<&str>, default: AreaUnit) -> Result<AreaUnit, AppError> {
    match value {
        None => Ok(default),
        Some(s) => AreaUnit::parse(s).ok_or_else(|| AppError::Input(format!("unknown area unit: {s}"))),
    }
}

pub fn parse_length_unit(value: Option<&str>, default: LengthUnit) -> Result<LengthUnit, AppError> {
    match value {
        None => Ok(default),
        Some(s) => {
            LengthUnit::parse(s).ok_or_else(|| AppError::Input(format!("unknown length unit: {s}")))
        }
    }
}

/// 유출계수는 0..=1 범위여야 한다.
pub fn validate_coefficient(coefficient: f64) -> Result<f64, AppError> {
    if (0.0..=1.0).contains(&coefficient) {
        Ok(coefficient)
    } else {
        Err(AppError::Input(format!(
            "runoff coefficient must be within 0..=1, got {coefficient}"
        )))
    }
}

/// `calc` 인자를 계산 요청으로 바꾼다. 지오코딩은 여기서 하지 않고 위치를 인자로 받는다.
pub fn build_request(
    cfg: &Config,
    args: &CalcArgs,
    site: SiteLocation,
) -> Result<QuickCheckRequest, AppError> {
    let area_unit = parse_area_unit(args.area_unit.as_deref(), cfg.units.area)?;
    let surfaces = args
        .surfaces
        .iter()
        .map(|entry| parse_surface_entry(entry, area_unit))
        .collect::<Result<Vec<SurfaceArea>, _>>()?;

    let duration = match (args.tc_length, args.tc_slope) {
        (Some(length), Some(slope_percent)) => {
            let length_unit = parse_length_unit(args.length_unit.as_deref(), cfg.units.length)?;
            let coefficient = if args.tc_weighted {
                TcCoefficient::SiteWeighted
            } else {
                TcCoefficient::Fixed(validate_coefficient(
                    args.tc_coefficient
                        .unwrap_or(cfg.time_of_concentration.coefficient),
                )?)
            };
            StormDuration::FromTc {
                coefficient,
                flow_length_ft: convert_length(length, length_unit, LengthUnit::Foot),
                slope_percent,
            }
        }
        _ => StormDuration::Fixed(args.duration.unwrap_or(cfg.storm.duration_minutes)),
    };

    Ok(QuickCheckRequest {
        surfaces,
        coordinates: site.coordinates,
        location: site.label,
        return_period_years: args
            .return_period
            .unwrap_or(cfg.storm.return_period_years),
        duration,
    })
}

fn run_calc(cfg: &Config, args: &CalcArgs) -> Result<(), AppError> {
    let site = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => SiteLocation {
            coordinates: Coordinates::new(lat, lon),
            label: args
                .label
                .clone()
                .unwrap_or_else(|| format_coordinates(lat, lon)),
            source: geocode::LocationSource::Coordinates,
        },
        _ => {
            let geocoder = if args.no_geocode {
                None
            } else {
                build_geocoder(cfg)
            };
            let site = geocode::resolve_site_location(
                geocoder.as_ref().map(|g| g as &dyn Geocoder),
                args.address.as_deref(),
                &cfg.site,
            );
            ui_cli::print_location_notice(&site);
            site
        }
    };

    let request = build_request(cfg, args, site)?;
    info!(
        surfaces = request.surfaces.len(),
        return_period = request.return_period_years,
        "running quick check"
    );
    let result = hydrology::quick_check(request);
    let report = ResultReport::from_result(&result);
    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        ui_cli::print_report(&report);
    }
    Ok(())
}

fn run_tc(cfg: &Config, args: &TcArgs) -> Result<(), AppError> {
    let length_unit = parse_length_unit(args.length_unit.as_deref(), cfg.units.length)?;
    let coefficient = validate_coefficient(
        args.coefficient
            .unwrap_or(cfg.time_of_concentration.coefficient),
    )?;
    let tc = TimeOfConcentration::estimate(
        coefficient,
        convert_length(args.length, length_unit, LengthUnit::Foot),
        args.slope,
    );
    ui_cli::print_time_of_concentration(&tc, coefficient);
    Ok(())
}

fn run_intensity(cfg: &Config, args: &IntensityArgs) -> Result<(), AppError> {
    let coords = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
        _ => cfg.site.coordinates(),
    };
    let rainfall = hydrology::intensity_with_citation(
        coords.latitude,
        coords.longitude,
        args.return_period,
        args.duration,
    );
    ui_cli::print_intensity(&rainfall, args.return_period, args.duration);
    Ok(())
}
