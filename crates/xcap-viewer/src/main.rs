//! Cross-cap viewer CLI
//!
//! Tessellates the cross-cap, replays navigation keys and writes the
//! requested exports.
//!
//! # Usage
//!
//! ```bash
//! # Print counts, bounds and readouts for the default surface
//! xcap-viewer --summary
//!
//! # Larger outer radius, exported as an HTML viewer
//! xcap-viewer --max-r 1.5 --html crosscap.html
//!
//! # Settings from a JSON file, user point moved twice outward
//! xcap-viewer --config view.json --keys ww --gltf crosscap.gltf
//! ```

use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;
use xcap_core::AppConfig;
use xcap_render::{export_gltf_json, export_html, SurfaceScene};

fn print_usage() {
    eprintln!(
        r#"Cross-cap viewer CLI

USAGE:
    xcap-viewer [OPTIONS]

OPTIONS:
    --max-r <R>         Outer radius of the tessellated ring (default 1.0)
    --step <S>          Grid step in r and theta (default 0.01)
    --delta <D>         Finite-difference step for normals (default 0.001)
    --zoom <Z>          Camera zoom, must be positive (default 1.0)
    --angle <DEG>       Texture rotation angle in degrees (default 0)
    --keys <WASD>       Navigation keys to replay on the user point
    --config <FILE>     Load settings from a JSON file first
    --html <FILE>       Write a standalone HTML viewer
    --gltf <FILE>       Write a glTF 2.0 JSON file
    --summary           Print mesh statistics and readouts
    --help              Show this help message

Without --html or --gltf the summary is printed.
Set RUST_LOG (e.g. RUST_LOG=xcap=debug) for more output.
"#
    );
}

#[derive(Debug, Default, PartialEq)]
struct ViewerArgs {
    max_r: Option<f64>,
    step: Option<f64>,
    delta: Option<f64>,
    zoom: Option<f64>,
    angle: Option<f64>,
    keys: Option<String>,
    config: Option<PathBuf>,
    html: Option<PathBuf>,
    gltf: Option<PathBuf>,
    summary: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<ViewerArgs, String> {
    let mut parsed = ViewerArgs::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag.as_str() {
            "--help" | "-h" => parsed.help = true,
            "--summary" => parsed.summary = true,
            "--max-r" => parsed.max_r = Some(parse_number(flag, &value()?)?),
            "--step" => parsed.step = Some(parse_number(flag, &value()?)?),
            "--delta" => parsed.delta = Some(parse_number(flag, &value()?)?),
            "--zoom" => parsed.zoom = Some(parse_number(flag, &value()?)?),
            "--angle" => parsed.angle = Some(parse_number(flag, &value()?)?),
            "--keys" => parsed.keys = Some(value()?),
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--html" => parsed.html = Some(PathBuf::from(value()?)),
            "--gltf" => parsed.gltf = Some(PathBuf::from(value()?)),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(parsed)
}

fn parse_number(flag: &str, text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("{flag} expects a number, got '{text}'"))
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn build_config(args: &ViewerArgs) -> xcap_core::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(max_r) = args.max_r {
        config.surface.r_max = max_r;
    }
    if let Some(step) = args.step {
        config.surface.step = step;
    }
    if let Some(delta) = args.delta {
        config.surface.delta = delta;
    }
    if let Some(zoom) = args.zoom {
        config.view.zoom = zoom;
    }
    if let Some(angle) = args.angle {
        config.view.angle_degrees = angle;
    }
    Ok(config)
}

fn run(args: &ViewerArgs) -> xcap_core::Result<()> {
    let config = build_config(args)?;
    let mut scene = SurfaceScene::new(config)?;

    if let Some(keys) = &args.keys {
        for key in keys.chars() {
            if !scene.handle_key(key) {
                log::warn!("ignoring key '{key}'");
            }
        }
    }

    if let Some(path) = &args.html {
        export_html(&scene, path)?;
        eprintln!("Exported HTML viewer: {}", path.display());
    }
    if let Some(path) = &args.gltf {
        write_gltf(&scene, path)?;
        eprintln!("Exported glTF: {}", path.display());
    }
    if args.summary || (args.html.is_none() && args.gltf.is_none()) {
        println!("{}", summary(&scene));
    }
    Ok(())
}

fn write_gltf(scene: &SurfaceScene, path: &Path) -> xcap_core::Result<()> {
    let json = export_gltf_json(scene.mesh())?;
    std::fs::write(path, json)?;
    Ok(())
}

fn summary(scene: &SurfaceScene) -> String {
    let mesh = scene.mesh();
    let bounds = mesh.bounding_box();
    let surface = &scene.config().surface;
    format!(
        "Cross-cap r in [{:.2}, {:.2}], step {}, delta {}\n\
         Vertices: {}\n\
         Triangles: {}\n\
         Degenerate normals: {}\n\
         Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})\n\
         {}",
        surface.r_min,
        surface.r_max,
        surface.step,
        surface.delta,
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.degenerate_normals,
        bounds.min.x,
        bounds.min.y,
        bounds.min.z,
        bounds.max.x,
        bounds.max.y,
        bounds.max.z,
        scene.status(),
    )
}

/// Filter used when `RUST_LOG` is unset, empty or unparsable.
const DEFAULT_LOG_FILTER: &str = "warn,xcap=info";

/// `RUST_LOG` replaces the defaults entirely.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_usage();
            process::exit(1);
        }
    };

    if args.help {
        print_usage();
        process::exit(0);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse_args(&[]).unwrap();
        assert_eq!(args, ViewerArgs::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let args = parse_args(&strings(&[
            "--max-r", "1.5", "--step", "0.05", "--delta", "0.002", "--zoom", "2",
            "--angle", "30", "--keys", "wwd", "--html", "out.html", "--gltf", "out.gltf",
            "--summary",
        ]))
        .unwrap();
        assert_eq!(args.max_r, Some(1.5));
        assert_eq!(args.step, Some(0.05));
        assert_eq!(args.delta, Some(0.002));
        assert_eq!(args.zoom, Some(2.0));
        assert_eq!(args.angle, Some(30.0));
        assert_eq!(args.keys.as_deref(), Some("wwd"));
        assert_eq!(args.html, Some(PathBuf::from("out.html")));
        assert_eq!(args.gltf, Some(PathBuf::from("out.gltf")));
        assert!(args.summary);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&strings(&["--max-r"])).is_err());
        assert!(parse_args(&strings(&["--zoom", "near"])).is_err());
        assert!(parse_args(&strings(&["input.ifc"])).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = parse_args(&strings(&[
            "--max-r", "1.5", "--step", "0.1", "--zoom", "3", "--angle", "45",
        ]))
        .unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.surface.r_max, 1.5);
        assert_eq!(config.surface.step, 0.1);
        assert_eq!(config.view.zoom, 3.0);
        assert_eq!(config.view.angle_degrees, 45.0);
        assert_eq!(config.surface.delta, 0.001);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let args = parse_args(&strings(&["--step", "0.2"])).unwrap();
        let scene = SurfaceScene::new(build_config(&args).unwrap()).unwrap();
        let text = summary(&scene);
        assert!(text.contains(&format!("Triangles: {}", scene.mesh().triangle_count())));
        assert!(text.contains("maxR: 1.00"));
    }

    #[test]
    fn test_log_filter_defaults() {
        let filter = log_filter(None).to_string().to_lowercase();
        assert!(filter.contains("xcap=info"), "{filter}");
        assert!(filter.contains("warn"), "{filter}");
    }

    #[test]
    fn test_rust_log_overrides_defaults() {
        let filter = log_filter(Some("xcap=debug")).to_string().to_lowercase();
        assert!(filter.contains("xcap=debug"), "{filter}");
        assert!(!filter.contains("xcap=info"), "{filter}");

        let filter = log_filter(Some("debug")).to_string().to_lowercase();
        assert!(!filter.contains("warn"), "{filter}");

        let filter = log_filter(Some("  ")).to_string().to_lowercase();
        assert!(filter.contains("xcap=info"), "{filter}");
    }
}
