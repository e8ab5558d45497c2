// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line front end: turn the arguments into a render request,
//! render it, and write the result with the `image` crate.

use std::error::Error;
use std::process::exit;
use std::str::FromStr;

use clap::{value_parser, Arg, ArgMatches, Command};
use itertools::Itertools;
use log::info;

use fractal::{
    render, Density, Escape, Fractal, Linear, Periodic, Precision, RenderRequest, Solid,
    TrapParams,
};

fn validate_decimal(s: &str) -> Result<String, String> {
    match f64::from_str(s) {
        Ok(_) => Ok(s.to_string()),
        Err(_) => Err(format!("Could not parse {:?} as a decimal number", s)),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<T, String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(i)
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn parse<T: FromStr>(text: &str, what: &str) -> Result<T, String> {
    T::from_str(text).map_err(|_| format!("Could not parse {} from {:?}", what, text))
}

/// Booleans are written as integers, anything but zero is true.
fn parse_flag(text: &str, what: &str) -> Result<bool, String> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => parse::<i64>(text, what).map(|n| n != 0),
    }
}

/// Sample counts may be written in scientific notation, like `1e7`.
fn parse_count(text: &str, what: &str) -> Result<u64, String> {
    let count: f64 = parse(text, what)?;
    if !(count.is_finite() && count >= 0.0) {
        return Err(format!("{} must be a non-negative number, got {:?}", what, text));
    }
    Ok(count as u64)
}

const CENTER: &str = "center";
const DENSITY: &str = "density";
const ESCAPE: &str = "escape";
const FRACTAL: &str = "fractal";
const LINEAR: &str = "linear";
const MPFR: &str = "mpfr";
const NTHREAD: &str = "nthread";
const OUTPUT: &str = "output";
const PERIODIC: &str = "periodic";
const RESOLUTION: &str = "resolution";
const SOLID: &str = "solid";
const TRAP: &str = "trap";
const ZOOM: &str = "zoom";

fn command() -> Command {
    let max_threads = num_cpus::get();

    Command::new("fractal")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Escape-time, orbit-trap and Buddhabrot fractal renderer")
        .arg(
            Arg::new(CENTER)
                .short('c')
                .long(CENTER)
                .num_args(2)
                .value_names(["RE", "IM"])
                .allow_negative_numbers(true)
                .default_values(["-0.75", "0"])
                .value_parser(validate_decimal)
                .help("Center of the image on the complex plane"),
        )
        .arg(
            Arg::new(DENSITY)
                .short('d')
                .long(DENSITY)
                .num_args(4)
                .value_names(["ITER", "BAILOUT", "SAMPLES", "SEED"])
                .help("Density algorithm [default: 80 10 1e7 1]"),
        )
        .arg(
            Arg::new(ESCAPE)
                .short('e')
                .long(ESCAPE)
                .num_args(3)
                .value_names(["ITER", "BAILOUT", "SMOOTH"])
                .help("Escape algorithm, the default [default: 80 10 1]"),
        )
        .arg(
            Arg::new(FRACTAL)
                .short('f')
                .long(FRACTAL)
                .num_args(1..=2)
                .value_names(["NAME", "PARAM"])
                .allow_negative_numbers(true)
                .default_values(["mandelbrot", "0"])
                .help(
                    "Formula (buffalo, burningship, julia, mandelbrot, manowar, phoenix) \
                     and the angle of its constant",
                ),
        )
        .arg(
            Arg::new(LINEAR)
                .short('l')
                .long(LINEAR)
                .num_args(6)
                .value_names(["R", "G", "B", "R", "G", "B"])
                .value_parser(value_parser!(u8))
                .help("Linear coloring from one color to another [default: 0 0 0 255 255 255]"),
        )
        .arg(
            Arg::new(MPFR)
                .short('m')
                .long(MPFR)
                .num_args(0..=1)
                .value_name("BITS")
                .default_missing_value("64")
                .value_parser(value_parser!(u32))
                .help("Use arbitrary precision with this many bits"),
        )
        .arg(
            Arg::new(NTHREAD)
                .short('n')
                .long(NTHREAD)
                .default_value("1")
                .value_parser(move |s: &str| {
                    validate_range(
                        s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::new(OUTPUT)
                .short('o')
                .long(OUTPUT)
                .default_value("fractal.png")
                .help("Output file; the extension picks the format"),
        )
        .arg(
            Arg::new(PERIODIC)
                .short('p')
                .long(PERIODIC)
                .num_args(6)
                .value_names(["AMP", "PHASE", "AMP", "PHASE", "AMP", "PHASE"])
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Periodic coloring, the default [default: 31.93 6.26 30.38 5.86 11.08 0.81]"),
        )
        .arg(
            Arg::new(RESOLUTION)
                .short('r')
                .long(RESOLUTION)
                .num_args(2)
                .value_names(["WIDTH", "HEIGHT"])
                .default_values(["1920", "1080"])
                .value_parser(|s: &str| {
                    validate_range(
                        s,
                        1_usize,
                        65_535,
                        "Could not parse image dimension",
                        "Image dimensions must be between 1 and 65535",
                    )
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::new(SOLID)
                .short('s')
                .long(SOLID)
                .num_args(3)
                .value_names(["R", "G", "B"])
                .value_parser(value_parser!(u8))
                .help("Solid coloring [default: 255 255 255]"),
        )
        .arg(
            Arg::new(TRAP)
                .short('t')
                .long(TRAP)
                .num_args(4)
                .value_names(["ITER", "BAILOUT", "INDEX", "FILL"])
                .help("Orbit trap algorithm [default: 80 100 2 0]"),
        )
        .arg(
            Arg::new(ZOOM)
                .short('z')
                .long(ZOOM)
                .default_value("1.1")
                .value_parser(validate_decimal)
                .help("Magnification"),
        )
}

fn strings<'a>(matches: &'a ArgMatches, id: &str) -> Option<Vec<&'a str>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.map(String::as_str).collect())
}

fn escape(values: &[&str]) -> Result<Escape, Box<dyn Error>> {
    let (iterations, bailout, smooth) = values
        .iter()
        .copied()
        .collect_tuple()
        .ok_or("--escape takes three values")?;
    Ok(Escape {
        max_iterations: parse(iterations, "escape iterations")?,
        bailout_radius: parse(bailout, "escape bailout radius")?,
        enable_smooth: parse_flag(smooth, "escape smoothing")?,
    })
}

fn trap(values: &[&str]) -> Result<TrapParams, Box<dyn Error>> {
    let (iterations, bailout, index, fill) = values
        .iter()
        .copied()
        .collect_tuple()
        .ok_or("--trap takes four values")?;
    Ok(TrapParams {
        max_iterations: parse(iterations, "trap iterations")?,
        bailout_radius: parse(bailout, "trap bailout radius")?,
        trap_index: parse(index, "trap index")?,
        fill_background: parse_flag(fill, "trap background fill")?,
    })
}

fn density(values: &[&str]) -> Result<Density, Box<dyn Error>> {
    let (iterations, bailout, samples, seed) = values
        .iter()
        .copied()
        .collect_tuple()
        .ok_or("--density takes four values")?;
    Ok(Density {
        max_iterations: parse(iterations, "density iterations")?,
        bailout_radius: parse(bailout, "density bailout radius")?,
        samples: parse_count(samples, "density samples")?,
        seed: parse(seed, "density seed")?,
        enable_smooth: false,
    })
}

fn request(matches: &ArgMatches) -> Result<RenderRequest, Box<dyn Error>> {
    let mut request = RenderRequest::default();

    if let Some(values) = strings(matches, FRACTAL) {
        request.fractal = Fractal {
            name: values[0].to_string(),
            parameter: match values.get(1) {
                Some(parameter) => parse(parameter, "fractal parameter")?,
                None => 0.0,
            },
        };
    }
    request.escape = strings(matches, ESCAPE).map(|v| escape(&v)).transpose()?;
    request.trap = strings(matches, TRAP).map(|v| trap(&v)).transpose()?;
    request.density = strings(matches, DENSITY).map(|v| density(&v)).transpose()?;

    if let Some(values) = matches.get_many::<u8>(LINEAR) {
        let values: Vec<u8> = values.copied().collect();
        request.linear = Some(Linear {
            from: [values[0], values[1], values[2]],
            to: [values[3], values[4], values[5]],
        });
    }
    if let Some(values) = matches.get_many::<f64>(PERIODIC) {
        // Pairs of amplitude and phase, one pair per channel.
        let (amplitude, phase): (Vec<f64>, Vec<f64>) = values.copied().tuples().unzip();
        request.periodic = Some(Periodic {
            amplitude: [amplitude[0], amplitude[1], amplitude[2]],
            phase: [phase[0], phase[1], phase[2]],
        });
    }
    if let Some(values) = matches.get_many::<u8>(SOLID) {
        let color: Vec<u8> = values.copied().collect();
        request.solid = Some(Solid {
            color: [color[0], color[1], color[2]],
        });
    }

    if let Some(bits) = matches.get_one::<u32>(MPFR) {
        request.precision = Precision::Arbitrary { bits: *bits };
    }
    if let Some((re, im)) = matches
        .get_many::<String>(CENTER)
        .and_then(|values| values.cloned().collect_tuple())
    {
        request.center = (re, im);
    }
    if let Some(zoom) = matches.get_one::<String>(ZOOM) {
        request.zoom = zoom.clone();
    }
    if let Some((width, height)) = matches
        .get_many::<usize>(RESOLUTION)
        .and_then(|values| values.copied().collect_tuple())
    {
        request.width = width;
        request.height = height;
    }
    if let Some(threads) = matches.get_one::<usize>(NTHREAD) {
        request.threads = *threads;
    }
    Ok(request)
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = request(matches)?.validate()?;
    let (width, height) = (config.width, config.height);
    let rendered = render(&config)?;

    let output = matches
        .get_one::<String>(OUTPUT)
        .map(String::as_str)
        .unwrap_or("fractal.png");
    let buffer = image::RgbImage::from_raw(width as u32, height as u32, rendered.into_raw())
        .ok_or("image buffer does not match the resolution")?;
    buffer.save(output)?;
    info!("wrote {}", output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = command().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["fractal"];
        argv.extend_from_slice(args);
        command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn defaults_match_the_library() {
        let request = request(&matches(&[])).unwrap();
        assert_eq!(request, RenderRequest::default());
    }

    #[test]
    fn options_fill_the_request() {
        let request = request(&matches(&[
            "-f", "julia", "1.25", "-t", "50", "4", "3", "1", "-p", "1", "-2", "3", "4", "5",
            "6", "-c", "-0.5", "0.25", "-r", "64", "48", "-m", "-n", "1",
        ]))
        .unwrap();
        assert_eq!(request.fractal.name, "julia");
        assert_eq!(request.fractal.parameter, 1.25);
        assert_eq!(
            request.trap,
            Some(TrapParams {
                max_iterations: 50,
                bailout_radius: 4.0,
                trap_index: 3,
                fill_background: true,
            })
        );
        assert_eq!(
            request.periodic,
            Some(Periodic {
                amplitude: [1.0, 3.0, 5.0],
                phase: [-2.0, 4.0, 6.0],
            })
        );
        assert_eq!(request.center, ("-0.5".to_string(), "0.25".to_string()));
        assert_eq!((request.width, request.height), (64, 48));
        assert_eq!(request.precision, Precision::Arbitrary { bits: 64 });
    }

    #[test]
    fn samples_accept_scientific_notation() {
        let request = request(&matches(&["-d", "80", "10", "1e7", "1"])).unwrap();
        assert_eq!(request.density.map(|d| d.samples), Some(10_000_000));
    }

    #[test]
    fn malformed_values_are_reported() {
        assert!(request(&matches(&["-e", "many", "10", "1"])).is_err());
        assert!(command()
            .try_get_matches_from(["fractal", "-r", "0", "10"])
            .is_err());
        assert!(command()
            .try_get_matches_from(["fractal", "-z", "close"])
            .is_err());
    }
}
