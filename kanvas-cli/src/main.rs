use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use kanvas::{
    Alignment, AnimationTiming, Camera, CpuSurface, LinearLayout, ManualClock, Orientation,
    Overview, PassId, Point, Rect, RectPass, RenderConfig, Rgba8Premul, Scene, Size,
    Surface as _, TransformContext, Vec2,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kanvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the demo scene at one point in time as a PNG.
    Frame(FrameArgs),
    /// Render a sequence of PNG frames while the layout animates.
    Frames(FramesArgs),
    /// Print the settled member positions of the demo group as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Render configuration JSON (KANVAS_* environment variables override it).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Number of rectangles in the group.
    #[arg(long, default_value_t = 12)]
    count: usize,

    /// Gap between neighbouring rectangles.
    #[arg(long, default_value_t = 10.0)]
    spacing: f64,

    /// Stack vertically instead of horizontally.
    #[arg(long, default_value_t = false)]
    vertical: bool,

    /// Cross-axis alignment.
    #[arg(long, value_enum, default_value_t = AlignArg::Center)]
    alignment: AlignArg,

    /// Wrap onto a new line once this primary extent is reached (0 disables).
    #[arg(long, default_value_t = 400.0)]
    break_point: f64,

    /// Wrap every rectangle in a cache decorator.
    #[arg(long, default_value_t = false)]
    cached: bool,

    /// Draw an overview of the group in the bottom-right corner.
    #[arg(long, default_value_t = false)]
    overview: bool,

    /// Press the overview at this HUD point ("x,y") before rendering.
    #[arg(long, value_parser = parse_point)]
    jump: Option<Point>,

    /// Layout animation duration in milliseconds.
    #[arg(long, default_value_t = 500)]
    duration_ms: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Time since the layout started, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    time_ms: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Frames per second of the sequence.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory; frames are written as frame_0000.png, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Left => Self::Left,
            AlignArg::Center => Self::Center,
            AlignArg::Right => Self::Right,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut demo = Demo::build(&args.scene)?;
    demo.render()?;
    demo.clock.advance(Duration::from_millis(args.time_ms));
    let frame = demo.render()?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "fps must be positive");
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut demo = Demo::build(&args.scene)?;
    let step = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    for i in 0..args.frames {
        if i > 0 {
            demo.clock.advance(step);
        }
        let frame = demo.render()?;
        let path = args.out_dir.join(format!("frame_{i:04}.png"));
        write_png(&path, &frame)?;
    }
    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let demo = Demo::build(&args.scene)?;
    let group = demo.scene.group(demo.group)?;
    let mut members = Vec::with_capacity(group.members().len());
    for &id in group.members() {
        let at = demo.scene.predicted_position(id)?;
        let bounds = predicted_bounds(&demo.scene, id)?;
        members.push(serde_json::json!({
            "ids": demo.scene.ids(id)?,
            "x": at.x,
            "y": at.y,
            "bounds": bounds.map(|r| [r.x0, r.y0, r.x1, r.y1]),
        }));
    }
    let out = serde_json::json!({ "members": members });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn write_png(path: &std::path::Path, raster: &kanvas::Raster) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &raster.to_straight_rgba8(),
        raster.width(),
        raster.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<RenderConfig> {
    let config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("read config '{}'", p.display()))?;
            RenderConfig::from_json_str(&text)
                .with_context(|| format!("parse config '{}'", p.display()))?
        }
        None => RenderConfig::default(),
    };
    let config = config.with_env_overrides();
    config.validate().context("validate config")?;
    Ok(config)
}

const BACKGROUND: Rgba8Premul = Rgba8Premul {
    r: 250,
    g: 250,
    b: 250,
    a: 255,
};

const PALETTE: [[u8; 3]; 5] = [
    [66, 133, 244],
    [219, 68, 55],
    [244, 180, 0],
    [15, 157, 88],
    [171, 71, 188],
];

struct Demo {
    scene: Scene,
    group: PassId,
    clock: ManualClock,
    camera: ViewCamera,
    overview: Option<Overview>,
    width: u32,
    height: u32,
}

impl Demo {
    fn build(args: &SceneArgs) -> anyhow::Result<Self> {
        let config = load_config(args.config.as_ref())?;
        let clock = ManualClock::new();
        let mut scene = Scene::with_clock(config, Arc::new(clock.clone()))?;

        let orientation = if args.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let layout = LinearLayout::new(
            orientation,
            args.spacing,
            Alignment::from(args.alignment).factor(),
            args.break_point,
        )?;
        let group = scene.add_linear_group(layout);
        scene.set_layout_timing(
            group,
            AnimationTiming::new(
                Duration::from_millis(args.duration_ms),
                AnimationTiming::SMOOTH.ease,
            ),
        )?;
        for i in 0..args.count {
            let member = demo_member(&mut scene, i, args.cached)?;
            scene.add_member(group, member)?;
        }
        scene.push_root(group)?;
        scene.ensure_layout(group)?;
        tracing::debug!(passes = scene.len(), "demo scene built");

        let component = Rect::new(0.0, 0.0, f64::from(args.width), f64::from(args.height));
        let mut camera = ViewCamera::new(component);
        let overview = if args.overview {
            let overview = Overview::new(group);
            overview.install(&scene, &mut camera, true)?;
            Some(overview)
        } else {
            if let Some(bounds) = predicted_bounds(&scene, group)? {
                camera.show_only(bounds.inflate(20.0, 20.0));
            }
            None
        };

        let mut demo = Self {
            scene,
            group,
            clock,
            camera,
            overview,
            width: args.width,
            height: args.height,
        };
        if let Some(p) = args.jump {
            demo.jump(p)?;
        }
        Ok(demo)
    }

    fn hud_context(&self) -> (Vec2, TransformContext) {
        let w = f64::from(self.width) * 0.25;
        let h = f64::from(self.height) * 0.25;
        let origin = Vec2::new(f64::from(self.width) - w - 10.0, f64::from(self.height) - h - 10.0);
        (origin, TransformContext::new(Rect::new(0.0, 0.0, w, h)))
    }

    fn jump(&mut self, p: Point) -> anyhow::Result<()> {
        let (_, hud) = self.hud_context();
        let Some(overview) = self.overview.as_mut() else {
            anyhow::bail!("--jump needs --overview");
        };
        if !overview.click(&self.scene, &mut self.camera, p, &hud)? {
            tracing::warn!(x = p.x, y = p.y, "jump point is outside the overview");
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<kanvas::Raster> {
        let mut surface = CpuSurface::new(self.width, self.height)?;
        surface.clear(BACKGROUND);
        let ctx = self.camera.context();
        surface.set_transform(ctx.transform());
        self.scene.draw(&mut surface, &ctx).context("draw scene")?;
        surface.set_transform(kanvas::Affine::IDENTITY);

        let (origin, hud) = self.hud_context();
        if let Some(overview) = &self.overview {
            surface.save();
            surface.translate(origin);
            surface.fill_rect(
                hud.visible_component(),
                Rgba8Premul::from_straight_rgba(255, 255, 255, 220),
            );
            overview
                .draw(&mut self.scene, &self.camera, &mut surface, &hud)
                .context("draw overview")?;
            surface.restore();
        }
        Ok(surface.into_raster()?)
    }
}

fn demo_member(scene: &mut Scene, i: usize, cached: bool) -> anyhow::Result<PassId> {
    let w = 40.0 + ((i * 37) % 60) as f64;
    let h = 30.0 + ((i * 53) % 50) as f64;
    let [r, g, b] = PALETTE[i % PALETTE.len()];
    let rect = RectPass::new(
        Rect::new(0.0, 0.0, w, h),
        Rgba8Premul::from_straight_rgba(r, g, b, 255),
    )
    .with_border(2.0, Rgba8Premul::from_straight_rgba(40, 40, 40, 255));
    let leaf = scene.add_leaf(rect);
    let member = if cached { scene.add_cached(leaf)? } else { leaf };
    scene.set_ids(member, &format!("rect rect-{i}"))?;
    Ok(member)
}

/// Bounds of `id` at its settled position.
fn predicted_bounds(scene: &Scene, id: PassId) -> anyhow::Result<Option<Rect>> {
    let offset = scene.predicted_position(id)?.to_vec2();
    Ok(scene.bounding_box(id)?.map(|r| r + offset))
}

/// Pan/zoom view onto the canvas.
#[derive(Debug)]
struct ViewCamera {
    component: Rect,
    offset: Vec2,
    zoom: f64,
    user_zoomable: bool,
}

impl ViewCamera {
    fn new(component: Rect) -> Self {
        Self {
            component,
            offset: Vec2::ZERO,
            zoom: 1.0,
            user_zoomable: true,
        }
    }

    fn context(&self) -> TransformContext {
        TransformContext::from_view(self.component, self.offset, self.zoom)
    }
}

impl Camera for ViewCamera {
    fn visible_rectangle(&self) -> Rect {
        self.context().visible_canvas()
    }

    fn viewport_size(&self) -> Size {
        self.component.size()
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        self.offset -= Vec2::new(dx, dy);
    }

    fn show_only(&mut self, rect: Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.zoom = (self.component.width() / rect.width())
            .min(self.component.height() / rect.height());
        self.offset = self.component.center().to_vec2() - rect.center().to_vec2() * self.zoom;
    }

    fn set_user_zoomable(&mut self, zoomable: bool) {
        self.user_zoomable = zoomable;
        tracing::debug!(zoomable, "user zoom toggled");
    }
}
