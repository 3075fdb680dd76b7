use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::geocode::{self, Geocoder, LocationSource, SiteLocation};
use crate::hydrology::{
    self, duration_label, runoff_coefficients, CalculationResult, QuickCheckRequest,
    RainfallIntensity, StormDuration, SurfaceArea, SurfaceType, TimeOfConcentration,
    DURATIONS_MINUTES, RETURN_PERIODS,
};
use crate::report::ResultReport;
use crate::units::{convert_area, convert_length, AreaUnit, LengthUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    QuickCheck,
    TimeOfConcentration,
    RainfallTable,
    SurfaceCatalog,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면(EOF) 종료로 본다.
pub fn main_menu<R: BufRead>(input: &mut R) -> Result<MenuChoice, AppError> {
    println!("\n=== STORMWATER QUICK-CHECK ===");
    println!("1) Runoff calculation (Q = CiA)");
    println!("2) Time of concentration (FAA)");
    println!("3) Rainfall IDF table");
    println!("4) Surface types / runoff coefficients");
    println!("5) Settings");
    println!("0) Exit");
    loop {
        let sel = match read_line(input, "Select: ") {
            Ok(sel) => sel,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                return Ok(MenuChoice::Exit);
            }
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::QuickCheck),
            "2" => return Ok(MenuChoice::TimeOfConcentration),
            "3" => return Ok(MenuChoice::RainfallTable),
            "4" => return Ok(MenuChoice::SurfaceCatalog),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("Invalid selection. Try again."),
        }
    }
}

/// 유출량 계산 메뉴를 처리한다. 입력한 면적이 없으면 계산하지 않고 `None`.
pub fn handle_quick_check<R: BufRead>(
    input: &mut R,
    cfg: &Config,
    geocoder: Option<&dyn Geocoder>,
) -> Result<Option<CalculationResult>, AppError> {
    println!("\n-- Project Location --");
    let address = read_line(input, "Project address (enter for default): ")?;
    let site = geocode::resolve_site_location(geocoder, Some(address.as_str()), &cfg.site);
    print_location_notice(&site);

    println!("\n-- Time of Concentration (optional) --");
    let use_tc = read_line(input, "Calculate Tc to determine storm duration? [y/N]: ")?;
    let tc = if use_tc.trim().eq_ignore_ascii_case("y") {
        let c = cfg.time_of_concentration.coefficient;
        let tc = read_tc_geometry(input, cfg, c)?;
        print_time_of_concentration(&tc, c);
        Some(tc)
    } else {
        None
    };

    println!("\n-- Design Storm --");
    let return_period = read_enumerated(
        input,
        "Return period [years]",
        &RETURN_PERIODS,
        cfg.storm.return_period_years,
    )?;
    // Tc 추천 지속시간은 기본값일 뿐이고 사용자가 바꿀 수 있다.
    let default_duration = tc
        .as_ref()
        .map_or(cfg.storm.duration_minutes, TimeOfConcentration::recommended_duration);
    let minutes = read_enumerated(
        input,
        "Storm duration [min]",
        &DURATIONS_MINUTES,
        default_duration,
    )?;
    let duration = match tc {
        Some(time_of_concentration) => StormDuration::WithTc {
            minutes,
            time_of_concentration,
        },
        None => StormDuration::Fixed(minutes),
    };

    println!("\n-- Site Surfaces --");
    let surfaces = read_surfaces(input, cfg.units.area)?;
    if surfaces.is_empty() {
        println!("No surface with a positive area was entered; nothing to calculate.");
        return Ok(None);
    }

    let result = hydrology::quick_check(QuickCheckRequest {
        surfaces,
        coordinates: site.coordinates,
        location: site.label,
        return_period_years: return_period,
        duration,
    });
    print_report(&ResultReport::from_result(&result));
    Ok(Some(result))
}

/// 유로 길이와 경사를 입력받아 Tc를 추정한다. 길이는 설정된 입력 단위로 받는다.
fn read_tc_geometry<R: BufRead>(
    input: &mut R,
    cfg: &Config,
    coefficient: f64,
) -> Result<TimeOfConcentration, AppError> {
    let defaults = &cfg.time_of_concentration;
    let unit = cfg.units.length;
    let length = read_f64_or(
        input,
        &format!("Flow path length [{}]", unit.symbol()),
        convert_length(defaults.flow_length_ft, LengthUnit::Foot, unit),
    )?;
    let slope = read_f64_or(input, "Average slope [%]", defaults.slope_percent)?;
    Ok(TimeOfConcentration::estimate(
        coefficient,
        convert_length(length, unit, LengthUnit::Foot),
        slope,
    ))
}

fn read_surfaces<R: BufRead>(input: &mut R, unit: AreaUnit) -> Result<Vec<SurfaceArea>, AppError> {
    for (i, t) in SurfaceType::ALL.iter().enumerate() {
        println!("{:>2}) {:<20} C = {:.2}", i + 1, t.label(), t.coefficient());
    }
    let count = loop {
        let n = read_f64_or(input, "Number of surface types (1-10)", 1.0)?;
        if (1.0..=10.0).contains(&n) && n.fract() == 0.0 {
            break n as usize;
        }
        println!("Enter a whole number from 1 to 10.");
    };

    let mut surfaces = Vec::with_capacity(count);
    for i in 0..count {
        let surface_type = loop {
            let sel = read_line(input, &format!("Surface type {} (number or name): ", i + 1))?;
            let sel = sel.trim();
            let picked = sel
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| SurfaceType::ALL.get(idx).copied())
                .or_else(|| runoff_coefficients::find_surface(sel));
            match picked {
                Some(t) => break t,
                None => println!("Unknown surface type."),
            }
        };
        let area = loop {
            let a = read_f64(input, &format!("Area {} [{}]: ", i + 1, unit.symbol()))?;
            if a >= 0.0 {
                break a;
            }
            println!("Area must not be negative.");
        };
        // 면적 0인 행은 계산에서 뺀다.
        if area > 0.0 {
            let surface = SurfaceArea::new(
                surface_type,
                convert_area(area, unit, AreaUnit::SquareFoot),
            )?;
            println!(
                "   C = {:.2} | {}",
                surface.coefficient(),
                surface_type.description()
            );
            surfaces.push(surface);
        }
    }
    Ok(surfaces)
}

/// 도달시간 메뉴를 처리한다.
pub fn handle_time_of_concentration<R: BufRead>(
    input: &mut R,
    cfg: &Config,
) -> Result<TimeOfConcentration, AppError> {
    println!("\n-- Time of Concentration (FAA) --");
    let c = loop {
        let c = read_f64_or(input, "Runoff coefficient C", cfg.time_of_concentration.coefficient)?;
        if (0.0..=1.0).contains(&c) {
            break c;
        }
        println!("C must be between 0 and 1.");
    };
    let tc = read_tc_geometry(input, cfg, c)?;
    print_time_of_concentration(&tc, c);
    Ok(tc)
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings<R: BufRead>(input: &mut R, cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- Settings --");
    println!(
        "Default design storm: {}-year, {}",
        cfg.storm.return_period_years,
        duration_label(cfg.storm.duration_minutes)
    );
    println!(
        "Default site: {} ({:.4}, {:.4})",
        cfg.site.label, cfg.site.latitude, cfg.site.longitude
    );
    println!(
        "Geocoding: {}",
        if cfg.geocoder.enabled { "on" } else { "off" }
    );
    println!("1) Default return period  2) Default duration  3) Toggle geocoding");
    let sel = read_line(input, "Change which (enter to cancel): ")?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            cfg.storm.return_period_years = read_enumerated(
                input,
                "Return period [years]",
                &RETURN_PERIODS,
                cfg.storm.return_period_years,
            )?
        }
        "2" => {
            cfg.storm.duration_minutes = read_enumerated(
                input,
                "Storm duration [min]",
                &DURATIONS_MINUTES,
                cfg.storm.duration_minutes,
            )?
        }
        "3" => cfg.geocoder.enabled = !cfg.geocoder.enabled,
        _ => {
            println!("Invalid selection; settings unchanged.");
            return Ok(());
        }
    }
    println!("Settings saved.");
    Ok(())
}

/// 위치 확인 결과를 안내한다. JSON 출력이 섞이지 않도록 stderr에 쓴다.
pub fn print_location_notice(site: &SiteLocation) {
    let local = hydrology::is_local(site.coordinates.latitude, site.coordinates.longitude);
    match site.source {
        LocationSource::Default => eprintln!(
            "{} is used by default. Enter an address to use your project location.",
            site.label
        ),
        LocationSource::GeocodeFailed => {
            eprintln!("Could not geocode address. Using {} coordinates.", site.label)
        }
        LocationSource::Geocoded | LocationSource::Coordinates if local => {
            eprintln!("Location: {}", truncate(&site.label, 70))
        }
        LocationSource::Geocoded | LocationSource::Coordinates => eprintln!(
            "Location: {} (outside King County - using Seattle rainfall data)",
            truncate(&site.label, 50)
        ),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

pub fn print_time_of_concentration(tc: &TimeOfConcentration, coefficient: f64) {
    println!(
        "Estimated Tc: {:.1} min (C = {:.2}, L = {:.0} ft, S = {:.1}%)",
        tc.minutes, coefficient, tc.flow_length_ft, tc.slope_percent
    );
    println!(
        "Recommended duration: {}",
        duration_label(tc.recommended_duration())
    );
    println!("Note: preliminary estimate, clamped to 5-180 min. Verify with site-specific analysis.");
}

pub fn print_intensity(rainfall: &RainfallIntensity, return_period: u32, duration: u32) {
    println!(
        "Rainfall intensity: {:.2} in/hr for {}-year, {} storm",
        rainfall.intensity_in_per_hr,
        return_period,
        duration_label(duration)
    );
    println!("Source: {}", rainfall.citation);
    if !rainfall.is_local {
        println!("Seattle default data - verify for your location.");
    }
}

pub fn print_surface_catalog() {
    println!("\n{:<20} {:>5}  Description", "Surface Type", "C");
    for entry in runoff_coefficients::catalog() {
        println!(
            "{:<20} {:>5.2}  {}",
            entry.label, entry.coefficient, entry.description
        );
    }
}

pub fn print_rainfall_table() {
    println!("\nSeattle IDF, Table F.18 [in/hr]");
    print!("{:>8}", "RP \\ D");
    for d in DURATIONS_MINUTES {
        print!("{:>8}", duration_label(d));
    }
    println!();
    for rp in RETURN_PERIODS {
        print!("{:>8}", format!("{rp}-yr"));
        for d in DURATIONS_MINUTES {
            match hydrology::lookup(rp, d) {
                Some(i) => print!("{i:>8.2}"),
                None => print!("{:>8}", "-"),
            }
        }
        println!();
    }
}

pub fn print_report(report: &ResultReport) {
    println!("\n{}", report.title);
    println!("Location: {} ({})", report.location.label, report.location.display);
    let storm = &report.design_storm;
    println!(
        "Design storm: {}-year, {} -> i = {:.2} in/hr",
        storm.return_period_years, storm.duration_label, storm.intensity_in_per_hr
    );
    if let Some(tc) = &report.time_of_concentration {
        println!(
            "Tc: {:.1} min (L = {:.0} ft, S = {:.1}%, {})",
            tc.minutes, tc.flow_length_ft, tc.slope_percent, tc.method
        );
    }
    for row in &report.surfaces {
        println!(
            "  {:<20} {:>12.0} sq ft ({:>5.1}%)  C = {:.2}",
            row.surface_type, row.area_sq_ft, row.percent_of_total, row.coefficient
        );
    }
    println!(
        "Total area: {:.0} sq ft ({:.3} acres), weighted C = {:.3}",
        report.totals.area_sq_ft, report.totals.area_acres, report.totals.weighted_coefficient
    );
    println!("{}", report.runoff.formula);
    println!(
        "Peak runoff Q = {:.2} cfs ({:.1} gpm)",
        report.runoff.peak_runoff_cfs, report.runoff.peak_runoff_gpm
    );
    if !report.warnings.is_empty() {
        println!("\nWARNINGS");
        for w in &report.warnings {
            println!("  {w}");
        }
    }
    println!("\nSource: {}", report.citation);
}

/// 한 줄을 읽는다. 입력이 끝났으면(0바이트) `UnexpectedEof` 입출력 오류.
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    if input.read_line(&mut buf).map_err(AppError::Io)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_f64<R: BufRead>(input: &mut R, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, prompt)?;
        match s.trim().replace(',', "").parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("Please enter a number."),
        }
    }
}

fn read_f64_or<R: BufRead>(input: &mut R, label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, &format!("{label} [{default}]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.replace(',', "").parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("Please enter a number."),
        }
    }
}

fn read_enumerated<R: BufRead>(
    input: &mut R,
    label: &str,
    options: &[u32],
    default: u32,
) -> Result<u32, AppError> {
    let listed = options
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("/");
    loop {
        let s = read_line(input, &format!("{label} ({listed}) [{default}]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<u32>() {
            Ok(v) if options.contains(&v) => return Ok(v),
            _ => println!("Choose one of: {listed}"),
        }
    }
}
