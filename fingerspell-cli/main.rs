use std::path::PathBuf;
use std::time::Instant;

use fingerspell_cli::{
    ConsoleDisplay, FingerspellError, FrameLoop, OverlayRenderer, Recognizer, RecognizerConfig,
    RecordedFrame, ReplaySource,
};
use fingerspell_core::init_thread_pool;

const USAGE: &str = "\
Usage: fingerspell <frames.json> [options]

Replays recorded pose-source frames through the recognizer.

Options:
  --config <file>        recognizer config (TOML, or JSON by extension)
  --templates <file>     template library instead of the built-in letters
  --interval-ms <ms>     tick interval
  --threshold <score>    minimum score to report a letter
  --batch                score every frame in parallel, no frame loop
  --overlay-dir <dir>    save a skeleton overlay PNG per tick
  --size <WxH>           overlay canvas size (default 640x480)";

#[derive(Debug, Default)]
struct Options {
    frames: PathBuf,
    config: Option<PathBuf>,
    templates: Option<PathBuf>,
    interval_ms: Option<u64>,
    threshold: Option<f32>,
    batch: bool,
    overlay_dir: Option<PathBuf>,
    size: Option<(u32, u32)>,
}

fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let (w, h) = (w.parse().ok()?, h.parse().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut frames = None;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--config" => opts.config = Some(value("--config")?.into()),
            "--templates" => opts.templates = Some(value("--templates")?.into()),
            "--interval-ms" => {
                let v = value("--interval-ms")?;
                opts.interval_ms = Some(v.parse().map_err(|_| format!("invalid interval '{}'", v))?);
            }
            "--threshold" => {
                let v = value("--threshold")?;
                opts.threshold = Some(v.parse().map_err(|_| format!("invalid threshold '{}'", v))?);
            }
            "--batch" => opts.batch = true,
            "--overlay-dir" => opts.overlay_dir = Some(value("--overlay-dir")?.into()),
            "--size" => {
                let v = value("--size")?;
                opts.size = Some(parse_size(&v).ok_or_else(|| format!("invalid size '{}'", v))?);
            }
            "-h" | "--help" => return Err(String::new()),
            other if other.starts_with("--") => return Err(format!("unknown option '{}'", other)),
            other => {
                if frames.replace(PathBuf::from(other)).is_some() {
                    return Err("only one frames file may be given".to_string());
                }
            }
        }
    }

    opts.frames = frames.ok_or_else(|| "missing frames file".to_string())?;
    Ok(opts)
}

fn run_batch(recognizer: &Recognizer, frames: Vec<RecordedFrame>) {
    let (indices, hands): (Vec<usize>, Vec<_>) = frames
        .into_iter()
        .enumerate()
        .filter(|(_, f)| f.ready && f.error.is_none())
        .map(|(i, f)| (i, f.hands))
        .unzip();

    let t0 = Instant::now();
    let states = recognizer.recognize_batch(&hands);
    log::info!("Scored {} frames in {:.2?}", states.len(), t0.elapsed());

    for (i, state) in indices.into_iter().zip(states) {
        println!("frame {:>5}: {}", i, state);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("error: {}\n", msg);
            }
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let mut cfg = match &opts.config {
        Some(path) => RecognizerConfig::load(path)?,
        None => RecognizerConfig::default(),
    };
    if let Some(path) = opts.templates {
        cfg.templates = Some(path);
    }
    if let Some(ms) = opts.interval_ms {
        cfg.tick_interval_ms = ms;
    }
    if let Some(threshold) = opts.threshold {
        cfg.threshold = threshold;
    }
    cfg.validate()?;
    log::info!("{}", cfg.summary());

    init_thread_pool(cfg.n_threads).map_err(FingerspellError::from)?;
    let library = cfg.library()?;
    log::info!("Templates: {}", library.names().join(", "));
    let recognizer = Recognizer::new(&cfg, library)?;

    if opts.batch {
        let content = std::fs::read_to_string(&opts.frames)?;
        let frames: Vec<RecordedFrame> = serde_json::from_str(&content)?;
        run_batch(&recognizer, frames);
        return Ok(());
    }

    let mut source = ReplaySource::load(&opts.frames)?;
    let exhausted = source.on_exhausted();

    let overlay = match opts.overlay_dir {
        Some(dir) => {
            let (w, h) = opts.size.unwrap_or((640, 480));
            Some(OverlayRenderer::new(dir, w, h).map_err(FingerspellError::from)?)
        }
        None => None,
    };

    let mut frame_loop = FrameLoop::new(
        source,
        (ConsoleDisplay::new(), overlay),
        recognizer,
        cfg.tick_interval(),
    );

    let shutdown = async {
        tokio::select! {
            _ = exhausted => log::info!("Recording finished"),
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => log::info!("Interrupted"),
                Err(e) => log::warn!("Failed to listen for Ctrl-C: {}", e),
            },
        }
    };

    let stats = frame_loop.run(shutdown).await;
    println!("{}", stats);
    Ok(())
}
