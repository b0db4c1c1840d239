//! Interactive isometric tile viewer.
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- [--archive tiles.bin] [--palette pal.rgb]
//! ```
//!
//! Arrows scroll, `M` cycles wall masks, `L`/`K` brighten/darken,
//! `WASD` moves the highlight, `Esc` quits.

use anyhow::Context;
use clap::Parser;
use glam::{IVec2, ivec2};
use log::{debug, info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::{fs::File, path::PathBuf};

use isotile_rs::{
    archive::{ArchiveBuilder, TileArchive, encode},
    renderer::{Surface, TileRenderer, render_single_color_tile},
    world::{LevelCelBlock, LightTables, MaskType, Palette, PaletteTransparency, TileType},
};

#[derive(Parser, Debug)]
#[command(about = "Draw a patch of isometric dungeon tiles")]
struct Args {
    /// Tile archive to load instead of the generated one.
    #[arg(long)]
    archive: Option<PathBuf>,

    /// 768-byte RGB palette.
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Write the generated archive here and keep running.
    #[arg(long)]
    dump: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Initial light index (0 = fully lit).
    #[arg(long, default_value_t = 0)]
    light: usize,
}

/*──────────────────────────── Demo assets ───────────────────────────*/

/// 16 ramps × 16 shades; shade 15 is the brightest.
const SHADES: u8 = 16;
const MAP: usize = 12;

/// Frame numbers of the generated archive, in push order.
struct DemoFrames {
    floor_left: LevelCelBlock,
    floor_right: LevelCelBlock,
    wall_left: LevelCelBlock,
    wall_right: LevelCelBlock,
    pillar: LevelCelBlock,
    grate: LevelCelBlock,
}

fn ramp_palette() -> Palette {
    const BASE: [(u32, u32, u32); 16] = [
        (128, 128, 128), (160, 120, 80), (90, 110, 150), (150, 70, 60),
        (80, 140, 80), (170, 160, 110), (120, 90, 140), (70, 130, 130),
        (200, 180, 140), (110, 80, 60), (60, 60, 90), (180, 100, 40),
        (140, 160, 180), (100, 120, 70), (190, 70, 110), (230, 230, 230),
    ];
    let mut pal = Palette::default();
    for (ramp, &(r, g, b)) in BASE.iter().enumerate() {
        for shade in 0..SHADES as u32 {
            let s = |c: u32| c * shade / (SHADES as u32 - 1);
            pal[ramp * 16 + shade as usize] = s(r) << 16 | s(g) << 8 | s(b);
        }
    }
    pal
}

fn color(ramp: u8, shade: u8) -> u8 {
    ramp * SHADES + shade.min(SHADES - 1)
}

fn demo_tables() -> anyhow::Result<(LightTables, PaletteTransparency)> {
    let lights = LightTables::from_fn(SHADES as usize, |level, c| {
        color(c / SHADES, (c % SHADES).saturating_sub(level as u8))
    })?;
    // blend keeps the incoming ramp and averages the brightness
    let trn = PaletteTransparency::from_fn(|under, over| {
        color(over / SHADES, ((under % SHADES) + (over % SHADES)) / 2)
    });
    Ok((lights, trn))
}

fn image(f: impl Fn(usize, usize) -> u8) -> encode::TileImage {
    let mut img = [[0u8; 32]; 32];
    for (y, row) in img.iter_mut().enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            *px = f(x, y);
        }
    }
    img
}

fn demo_archive() -> (ArchiveBuilder, DemoFrames) {
    let flagstone = image(|x, y| color(0, 9 + ((x / 8 + y / 4) % 2) as u8 * 3 + (x == 0) as u8));
    let brick = image(|x, y| {
        let mortar = y % 8 == 0 || (x + (y / 8) * 8) % 16 == 0;
        if mortar { color(5, 6) } else { color(3, 11 + (x % 3) as u8) }
    });
    let stone = image(|x, y| color(2, 8 + ((x * 7 + y * 3) % 5) as u8));
    // bars with see-through gaps; 0 is the colour key
    let grate = image(|x, y| if x % 6 < 2 || y % 10 < 2 { color(11, 12) } else { 0 });

    let mut b = ArchiveBuilder::new();
    let mut push = |tile: TileType, img: &encode::TileImage| {
        LevelCelBlock::new(b.push(encode::encode(tile, img, 0)) as u16, tile)
    };
    let frames = DemoFrames {
        floor_left: push(TileType::LeftTriangle, &flagstone),
        floor_right: push(TileType::RightTriangle, &flagstone),
        wall_left: push(TileType::LeftTrapezoid, &brick),
        wall_right: push(TileType::RightTrapezoid, &brick),
        pillar: push(TileType::Square, &stone),
        grate: push(TileType::TransparentSquare, &grate),
    };
    (b, frames)
}

/*──────────────────────────── Scene ───────────────────────────*/

/// Bottom-left corner of map cell (`i`, `j`)'s floor diamond.
fn cell_origin(camera: IVec2, i: usize, j: usize) -> IVec2 {
    let (i, j) = (i as i32, j as i32);
    camera + ivec2((i - j) * 32, (i + j) * 16)
}

struct Scene {
    camera: IVec2,
    highlight: IVec2,
    light: usize,
    wall_mask: usize,
    grate_mask: usize,
}

const WALL_MASKS: [[MaskType; 2]; 3] = [
    [MaskType::Solid, MaskType::Solid],
    [MaskType::Transparent, MaskType::Transparent],
    [MaskType::Left, MaskType::Right],
];

fn draw_scene(
    out: &mut Surface<'_>,
    renderer: &TileRenderer<'_>,
    frames: &DemoFrames,
    scene: &Scene,
) {
    let light = scene.light;
    let report = |what: &str, res: Result<(), isotile_rs::renderer::RenderError>| {
        if let Err(e) = res {
            warn!("{what}: {e}");
        }
    };

    // back to front: increasing i + j
    for depth in 0..2 * MAP - 1 {
        for i in 0..MAP {
            let Some(j) = depth.checked_sub(i).filter(|&j| j < MAP) else {
                continue;
            };
            let o = cell_origin(scene.camera, i, j);
            report(
                "floor",
                renderer.render_opaque_tile(out, o, frames.floor_left, light),
            );
            report(
                "floor",
                renderer.render_opaque_tile(out, o + ivec2(32, 0), frames.floor_right, light),
            );

            let on_edge = i == 0 || j == 0;
            if on_edge {
                let [ml, mr] = WALL_MASKS[scene.wall_mask % WALL_MASKS.len()];
                let top = o - ivec2(0, 16);
                report("wall", renderer.render_tile(out, top, frames.wall_left, ml, light));
                report(
                    "wall",
                    renderer.render_tile(out, top + ivec2(32, 0), frames.wall_right, mr, light),
                );
                for level in 1..3 {
                    let p = top - ivec2(0, 32 * level);
                    report("pillar", renderer.render_opaque_tile(out, p, frames.pillar, light));
                    report(
                        "pillar",
                        renderer.render_opaque_tile(out, p + ivec2(32, 0), frames.pillar, light),
                    );
                }
            } else if (i + j) % 5 == 0 {
                let mask = MaskType::ALL[scene.grate_mask % MaskType::ALL.len()];
                let p = o - ivec2(-16, 16);
                report("grate", renderer.render_tile(out, p, frames.grate, mask, light));
            }
        }
    }

    let h = scene.highlight;
    let o = cell_origin(scene.camera, h.x.max(0) as usize, h.y.max(0) as usize);
    render_single_color_tile(out, o, color(15, 15));
}

/*──────────────────────────── Main ───────────────────────────*/

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let palette = match &args.palette {
        Some(path) => {
            let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            Palette::from_rgb(&bytes)?
        }
        None => ramp_palette(),
    };
    let (lights, trn) = demo_tables()?;

    let (builder, frames) = demo_archive();
    if let Some(path) = &args.dump {
        builder.write_to(File::create(path)?)?;
        info!("wrote {} frames to {}", builder.len(), path.display());
    }
    let archive = match &args.archive {
        // A foreign archive must follow the demo frame order.
        Some(path) => TileArchive::from_file(path)?,
        None => builder.finish()?,
    };
    debug!("{} frames loaded", archive.frame_count());

    let renderer = TileRenderer::new(&archive, &lights, &trn);

    let (w, h) = (args.width, args.height);
    let mut indexed = vec![0u8; w * h];
    let mut argb = vec![0u32; w * h];

    let mut win = Window::new("Isometric tile viewer", w, h, WindowOptions::default())?;
    win.set_target_fps(35);

    let mut scene = Scene {
        camera: ivec2(w as i32 / 2 - 32, 64),
        highlight: ivec2(3, 3),
        light: args.light,
        wall_mask: 0,
        grate_mask: 0,
    };

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* input ----------------------------------------------------------- */
        const SCROLL: i32 = 8;
        if win.is_key_down(Key::Left) {
            scene.camera.x += SCROLL;
        }
        if win.is_key_down(Key::Right) {
            scene.camera.x -= SCROLL;
        }
        if win.is_key_down(Key::Up) {
            scene.camera.y += SCROLL;
        }
        if win.is_key_down(Key::Down) {
            scene.camera.y -= SCROLL;
        }
        let max = MAP as i32 - 1;
        for (key, step) in [
            (Key::W, ivec2(0, -1)),
            (Key::S, ivec2(0, 1)),
            (Key::A, ivec2(-1, 0)),
            (Key::D, ivec2(1, 0)),
        ] {
            if win.is_key_pressed(key, KeyRepeat::Yes) {
                scene.highlight = (scene.highlight + step).clamp(IVec2::ZERO, IVec2::splat(max));
            }
        }
        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            scene.wall_mask += 1;
            scene.grate_mask += 1;
            debug!(
                "walls {:?}, grates {}",
                WALL_MASKS[scene.wall_mask % WALL_MASKS.len()],
                MaskType::ALL[scene.grate_mask % MaskType::ALL.len()]
            );
        }
        if win.is_key_pressed(Key::K, KeyRepeat::Yes) {
            scene.light = (scene.light + 1).min(lights.darkest());
        }
        if win.is_key_pressed(Key::L, KeyRepeat::Yes) {
            scene.light = scene.light.saturating_sub(1);
        }

        /* draw ------------------------------------------------------------ */
        let mut surface = Surface::packed(&mut indexed, w, h)?;
        surface.fill(0);
        draw_scene(&mut surface, &renderer, &frames, &scene);

        for (dst, &src) in argb.iter_mut().zip(&indexed) {
            *dst = palette[src as usize];
        }
        win.update_with_buffer(&argb, w, h)?;
    }
    Ok(())
}
