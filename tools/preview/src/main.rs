//! Offline preview renderer — writes grayscale PNGs of a representative
//! generation pipeline to data/preview/, plus the parameter set used.
//! Not part of the core; no tests.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use relief_core::{
    erode, midpoint_displacement, smooth, synthesize_stack, BaseNoise, DisplacementParams,
    ErosionKind, ErosionParams, Grid, LayerStack, NoiseLayer, RandomSource,
};

const RESOLUTION: usize = 513;
const SEED: u64 = 42;

/// Height [min, max] → grayscale byte.
fn shade(h: f32, min: f32, max: f32) -> u8 {
    if max <= min {
        return 0;
    }
    (((h - min) / (max - min)).clamp(0.0, 1.0) * 255.0) as u8
}

fn save_png(grid: &Grid, path: &Path) -> Result<()> {
    let r = grid.resolution;
    let (min, max) = (grid.min_height(), grid.max_height());
    let mut pixels = Vec::with_capacity(r * r);
    for y in 0..r {
        for x in 0..r {
            pixels.push(shade(grid.get(x, y), min, max));
        }
    }
    let img = image::GrayImage::from_raw(r as u32, r as u32, pixels)
        .context("grayscale buffer size mismatch")?;
    img.save(path).with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out = Path::new("data/preview");
    fs::create_dir_all(out).context("creating data/preview")?;

    let mut rng = RandomSource::from_seed(SEED);
    let base = BaseNoise::new(SEED as u32);
    let mut grid = Grid::new(RESOLUTION);

    // Layered fBM base: broad rolling terrain plus a finer detail layer.
    let mut stack = LayerStack::default();
    stack.push(NoiseLayer {
        x_scale: 0.03,
        y_scale: 0.03,
        octaves: 4,
        persistence: 4.0,
        height_scale: 0.04,
        ..NoiseLayer::default()
    });
    synthesize_stack(&mut grid, &stack, &base)?;
    save_png(&grid, &out.join("01_fbm.png"))?;

    // Fractal relief on top.
    let displacement = DisplacementParams {
        height_min: -0.2,
        height_max: 0.2,
        ..DisplacementParams::default()
    };
    midpoint_displacement(&mut grid, &displacement, &mut rng)?;
    save_png(&grid, &out.join("02_displaced.png"))?;

    // Thermal pass then river carving.
    let thermal = ErosionParams {
        kind: ErosionKind::Thermal,
        strength: 0.01,
        amount: 0.05,
        ..ErosionParams::default()
    };
    erode(&mut grid, &thermal, &mut rng)?;

    let river = ErosionParams {
        kind: ErosionKind::River,
        droplets: 400,
        springs_per_river: 5,
        strength: 0.15,
        solubility: 0.01,
        ..ErosionParams::default()
    };
    erode(&mut grid, &river, &mut rng)?;
    save_png(&grid, &out.join("03_eroded.png"))?;

    smooth(&mut grid, 2);
    grid.clamp_heights();
    save_png(&grid, &out.join("04_final.png"))?;

    let params = serde_json::json!({
        "seed": SEED,
        "resolution": RESOLUTION,
        "layers": stack,
        "displacement": displacement,
        "thermal": thermal,
        "river": river,
        "smooth_passes": 2,
    });
    fs::write(out.join("params.json"), serde_json::to_string_pretty(&params)?)
        .context("writing params.json")?;
    println!("wrote {}", out.join("params.json").display());

    Ok(())
}
