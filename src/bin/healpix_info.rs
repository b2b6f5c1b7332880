//! HEALPix Information Tool
//!
//! Command-line front end over the HEALPix index: converts between sky
//! positions and pixel ids, prints pixel outlines, runs disc queries and
//! summarizes resolutions.
//!
//! Usage:
//!   cargo run --bin healpix_info -- ang2pix --nside 64 --degrees 83.6 22.0
//!   cargo run --bin healpix_info -- --json disc --nside 16 --radius 2.5 83.6 22.0

use std::fmt::Display;

use clap::{ArgAction, Parser, Subcommand};
use healpix_index::constants::{DEG2RAD, RAD2DEG};
use healpix_index::{HealpixIndex, RaDec, Scheme, SpatialVector};
use serde::Serialize;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// HEALPix Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts between sky positions and HEALPix pixels and queries regions",
    long_about = None
)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pixel containing a position (theta/phi in radians, or ra/dec with --degrees)
    Ang2pix {
        #[arg(short, long)]
        nside: i64,
        #[arg(short, long, value_enum, default_value = "nested")]
        scheme: Scheme,
        /// Read the position as ra/dec in degrees
        #[arg(short, long, action = ArgAction::SetTrue)]
        degrees: bool,
        #[arg(allow_negative_numbers = true)]
        lon_or_theta: f64,
        #[arg(allow_negative_numbers = true)]
        lat_or_phi: f64,
    },
    /// Centre of a pixel
    Pix2ang {
        #[arg(short, long)]
        nside: i64,
        #[arg(short, long, value_enum, default_value = "nested")]
        scheme: Scheme,
        ipix: i64,
    },
    /// Converts a pixel id to the other numbering scheme
    Convert {
        #[arg(short, long)]
        nside: i64,
        /// Scheme of the given id
        #[arg(short, long, value_enum, default_value = "nested")]
        from: Scheme,
        ipix: i64,
    },
    /// Boundary points of a pixel
    Corners {
        #[arg(short, long)]
        nside: i64,
        #[arg(short, long, value_enum, default_value = "nested")]
        scheme: Scheme,
        /// Points per quarter of the boundary
        #[arg(long, default_value_t = 1)]
        step: usize,
        ipix: i64,
    },
    /// Pixels within a radius of a position given as ra/dec in degrees
    Disc {
        #[arg(short, long)]
        nside: i64,
        #[arg(short, long, value_enum, default_value = "nested")]
        scheme: Scheme,
        /// Radius in degrees
        #[arg(short, long)]
        radius: f64,
        /// Include pixels overlapping the edge of the disc
        #[arg(short, long, action = ArgAction::SetTrue)]
        inclusive: bool,
        #[arg(allow_negative_numbers = true)]
        ra: f64,
        #[arg(allow_negative_numbers = true)]
        dec: f64,
    },
    /// Resolution needed for a pixel size in arcseconds
    Nside { pixsize: f64 },
    /// Summary of a resolution
    Info {
        #[arg(short, long)]
        nside: i64,
    },
}

#[derive(Serialize)]
struct PixelReport {
    nside: i64,
    scheme: Scheme,
    ipix: i64,
    theta: f64,
    phi: f64,
    ra: f64,
    dec: f64,
}

#[derive(Serialize)]
struct ConvertReport {
    nside: i64,
    nested: i64,
    ring: i64,
}

#[derive(Serialize)]
struct CornersReport {
    nside: i64,
    scheme: Scheme,
    ipix: i64,
    points: Vec<RaDec>,
}

#[derive(Serialize)]
struct DiscReport {
    nside: i64,
    scheme: Scheme,
    center: RaDec,
    radius: f64,
    inclusive: bool,
    pixels: Vec<i64>,
}

#[derive(Serialize)]
struct ResolutionReport {
    nside: i64,
    order: u32,
    npix: i64,
    nrings: i64,
    pixel_area_sr: f64,
    resolution_deg: f64,
    max_pixel_radius_deg: f64,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl Display) {
    println!("{}: {}", name, value);
}

fn emit<T: Serialize>(json: bool, report: &T, text: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        text(report);
    }
    Ok(())
}

fn pixel_report(index: &HealpixIndex, scheme: Scheme, ipix: i64) -> Result<PixelReport> {
    let polar = match scheme {
        Scheme::Nested => index.pix2ang_nest(ipix)?,
        Scheme::Ring => index.pix2ang_ring(ipix)?,
    };
    let radec = polar.to_radec();
    Ok(PixelReport {
        nside: index.nside(),
        scheme,
        ipix,
        theta: polar.theta,
        phi: polar.phi,
        ra: radec.ra,
        dec: radec.dec,
    })
}

fn print_pixel(report: &PixelReport) {
    print_section_header(&format!("{} pixel {} at nside {}", report.scheme, report.ipix, report.nside));
    print_named_value("theta (rad)", format!("{:.9}", report.theta));
    print_named_value("phi (rad)", format!("{:.9}", report.phi));
    print_named_value("ra (deg)", format!("{:.6}", report.ra));
    print_named_value("dec (deg)", format!("{:.6}", report.dec));
}

fn resolution_report(index: &HealpixIndex) -> ResolutionReport {
    ResolutionReport {
        nside: index.nside(),
        order: index.order(),
        npix: index.npix(),
        nrings: index.nrings(),
        pixel_area_sr: HealpixIndex::nside2pixarea(index.nside()),
        resolution_deg: HealpixIndex::nside2resol(index.nside()) * RAD2DEG,
        max_pixel_radius_deg: index.max_pixrad() * RAD2DEG,
    }
}

fn print_resolution(report: &ResolutionReport) {
    print_section_header(&format!("Resolution nside {}", report.nside));
    print_named_value("Order", report.order);
    print_named_value("Pixels", report.npix);
    print_named_value("Rings", report.nrings);
    print_named_value("Pixel area (sr)", format!("{:.6e}", report.pixel_area_sr));
    print_named_value("Resolution (deg)", format!("{:.6}", report.resolution_deg));
    print_named_value("Max pixel radius (deg)", format!("{:.6}", report.max_pixel_radius_deg));
}

fn run(args: Args) -> Result<()> {
    let json = args.json;
    match args.command {
        Command::Ang2pix {
            nside,
            scheme,
            degrees,
            lon_or_theta,
            lat_or_phi,
        } => {
            let index = HealpixIndex::new(nside)?;
            let (theta, phi) = if degrees {
                let polar = RaDec::new(lon_or_theta, lat_or_phi).to_polar();
                (polar.theta, polar.phi)
            } else {
                (lon_or_theta, lat_or_phi)
            };
            let ipix = match scheme {
                Scheme::Nested => index.ang2pix_nest(theta, phi)?,
                Scheme::Ring => index.ang2pix_ring(theta, phi)?,
            };
            emit(json, &pixel_report(&index, scheme, ipix)?, print_pixel)
        }
        Command::Pix2ang {
            nside,
            scheme,
            ipix,
        } => {
            let index = HealpixIndex::new(nside)?;
            emit(json, &pixel_report(&index, scheme, ipix)?, print_pixel)
        }
        Command::Convert { nside, from, ipix } => {
            let index = HealpixIndex::new(nside)?;
            let report = match from {
                Scheme::Nested => ConvertReport {
                    nside,
                    nested: ipix,
                    ring: index.nest2ring(ipix)?,
                },
                Scheme::Ring => ConvertReport {
                    nside,
                    nested: index.ring2nest(ipix)?,
                    ring: ipix,
                },
            };
            emit(json, &report, |r| {
                print_section_header(&format!("Pixel ids at nside {}", r.nside));
                print_named_value("NESTED", r.nested);
                print_named_value("RING", r.ring);
            })
        }
        Command::Corners {
            nside,
            scheme,
            step,
            ipix,
        } => {
            let index = HealpixIndex::new(nside)?;
            let vertices = match scheme {
                Scheme::Nested => index.corners_nest(ipix, step)?,
                Scheme::Ring => index.corners_ring(ipix, step)?,
            };
            let points = vertices
                .iter()
                .map(|v| Ok(RaDec::new(v.ra()?, v.dec()?)))
                .collect::<healpix_index::Result<Vec<_>>>()?;
            let report = CornersReport {
                nside,
                scheme,
                ipix,
                points,
            };
            emit(json, &report, |r| {
                print_section_header(&format!(
                    "Boundary of {} pixel {} at nside {}",
                    r.scheme, r.ipix, r.nside
                ));
                for point in &r.points {
                    println!("{}", point);
                }
            })
        }
        Command::Disc {
            nside,
            scheme,
            radius,
            inclusive,
            ra,
            dec,
        } => {
            let index = HealpixIndex::new(nside)?;
            let center = SpatialVector::from_radec(ra, dec);
            let pixels = index.query_disc_scheme(&center, radius * DEG2RAD, scheme, inclusive)?;
            let report = DiscReport {
                nside,
                scheme,
                center: RaDec::new(ra, dec),
                radius,
                inclusive,
                pixels,
            };
            emit(json, &report, |r| {
                print_section_header(&format!(
                    "{} pixels within {}° of {} at nside {}",
                    r.scheme, r.radius, r.center, r.nside
                ));
                print_named_value("Count", r.pixels.len());
                let ids: Vec<String> = r.pixels.iter().map(|p| p.to_string()).collect();
                println!("{}", ids.join(" "));
            })
        }
        Command::Nside { pixsize } => {
            let nside = HealpixIndex::calculate_nside(pixsize)?;
            let index = HealpixIndex::new(nside)?;
            emit(json, &resolution_report(&index), print_resolution)
        }
        Command::Info { nside } => {
            let index = HealpixIndex::new(nside)?;
            emit(json, &resolution_report(&index), print_resolution)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();
    log::debug!("{:?}", args);

    run(args)
}
