use argh::FromArgs;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use geowarp::image::{Image, ImageSize};
use geowarp::imgproc::interpolation::{remap_with, BorderMode, InterpolationMode, RemapParams};
use geowarp::imgproc::warp::{generate_control_point_map, generate_rotation_scale_map, ControlPoints};

#[derive(FromArgs)]
/// Warp a synthetic checkerboard by rotation/scale or by ground control points
struct Args {
    /// rotation in degrees, counter-clockwise
    #[argh(option, default = "30.0")]
    rotation: f64,

    /// scale factor along the columns
    #[argh(option, default = "1.0")]
    scale_x: f64,

    /// scale factor along the rows
    #[argh(option, default = "1.0")]
    scale_y: f64,

    /// interpolation: nearest, bilinear or bicubic
    #[argh(option, default = "InterpolationMode::Bilinear")]
    interpolation: InterpolationMode,

    /// border: constant, replicate, reflect, reflect101 or wrap
    #[argh(option, default = "BorderMode::Constant")]
    border: BorderMode,

    /// value of the constant border
    #[argh(option, default = "0.0")]
    border_value: f32,

    /// side of the checkerboard in pixels
    #[argh(option, default = "256")]
    size: usize,

    /// path to a GCP file; switches to the control point warp
    #[argh(option)]
    gcp: Option<PathBuf>,

    /// polynomial order of the control point warp
    #[argh(option, default = "1")]
    order: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // 8x8 checkerboard
    let size = ImageSize {
        width: args.size,
        height: args.size,
    };
    let cell = (args.size / 8).max(1);
    let src = Image::<u8, 3>::from_size_fn(size, |x, y, ch| {
        let on = (x / cell + y / cell) % 2 == 0;
        match (on, ch) {
            (true, _) => 255,
            (false, 0) => 40,
            (false, _) => 90,
        }
    })?;

    let start = Instant::now();
    let map = match &args.gcp {
        Some(path) => {
            let points = ControlPoints::from_gcp_reader(BufReader::new(File::open(path)?))?;
            log::info!("loaded {} control points from {}", points.len(), path.display());
            generate_control_point_map(size, &points, args.order)?
        }
        None => generate_rotation_scale_map(size, args.rotation, [args.scale_x, args.scale_y])?,
    };
    log::info!("map {} created in {:?}", map.size(), start.elapsed());

    let params = RemapParams {
        interpolation: args.interpolation,
        border_mode: args.border,
        border_value: args.border_value,
    };

    let start = Instant::now();
    let dst = remap_with(&src, &map, &params)?;
    log::info!("remap {:?} done in {:?}", params, start.elapsed());

    let mean = dst.as_slice().iter().map(|&v| v as f64).sum::<f64>() / dst.numel().max(1) as f64;
    println!("source:      {}", src.size());
    println!("destination: {}", dst.size());
    println!("mean sample: {mean:.2}");

    Ok(())
}
