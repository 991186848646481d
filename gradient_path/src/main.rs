use gradient_path::{
    BezPathCurve, GradientPath, GradientPathConfig, RenderRequest, Result, SvgDocument,
};
use std::{env, fs, path::Path};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_PATH: &str = "M60,200 C60,80 220,40 300,120 S480,300 540,160";

/// Blend from orange to violet as progress goes from 0 to 1.
fn gradient_color(progress: f64) -> String {
    let from = [255.0, 140.0, 0.0];
    let to = [120.0, 40.0, 200.0];
    let channel = |i: usize| (from[i] + (to[i] - from[i]) * progress).round() as u8;
    format!("rgb({},{},{})", channel(0), channel(1), channel(2))
}

fn run(config_path: Option<&str>, output: &str) -> Result<()> {
    let config = match config_path {
        Some(path) => GradientPathConfig::from_file(Path::new(path))?,
        None => GradientPathConfig::new(24, 4),
    };
    info!(?config, "sampling demo path");

    let curve = BezPathCurve::from_svg(DEMO_PATH)?;
    let mut path = GradientPath::new(curve, config)?;
    let mut document = SvgDocument::new();

    path.render(&RenderRequest::fill(24.0, gradient_color), &mut document)?
        .render(&RenderRequest::stroke(1.0, |_: f64| "white"), &mut document)?
        .render(&RenderRequest::markers(3.0, gradient_color), &mut document)?;

    fs::write(output, document.finish(600.0, 320.0))?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Gradient Path Demo");

    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(String::as_str);
    let output = "gradient-path.svg";

    match run(config_path, output) {
        Ok(()) => println!("SVG file written to {}", output),
        Err(e) => println!("Error rendering gradient path: {}", e),
    }
}
