mod display;

use display::{Display, InputEvent, RenderTarget};
use smoking_snake::config::{GameConfig, DEFAULT_CONFIG_PATH, WINDOW_HEIGHT, WINDOW_WIDTH};
use smoking_snake::input::InputLatch;
use smoking_snake::raster::PixelBuffer;
use smoking_snake::util::FrameClock;
use smoking_snake::FrameDriver;
use tracing_subscriber::EnvFilter;

const TITLE: &str = "smoking snake";

struct Args {
    config_path: Option<String>,
    seed: Option<u64>,
    vsync: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config_path: None,
        seed: None,
        vsync: true,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => parsed.vsync = false,
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--seed" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<u64>() {
                        Ok(seed) => parsed.seed = Some(seed),
                        Err(_) => tracing::warn!(value = %args[i + 1], "ignoring bad --seed"),
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: smoking-snake [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --config PATH, -c PATH  Game config JSON (default: {} if present)",
                    DEFAULT_CONFIG_PATH
                );
                println!("  --seed N                Fixed random seed for food placement");
                println!("  --no-vsync              Disable VSync for uncapped framerate");
                println!("  --help                  Show this help message");
                println!();
                println!("Controls: arrows/WASD steer, P pauses, Escape quits");
                std::process::exit(0);
            },
            other => tracing::warn!(arg = other, "unknown argument"),
        }
        i += 1;
    }

    parsed
}

/// `RUST_LOG` directives when set and parseable, info otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();
}

fn main() -> Result<(), String> {
    init_logging();
    let args = parse_args();

    let mut config = match &args.config_path {
        Some(path) => GameConfig::load(path),
        None => GameConfig::load_or_default(DEFAULT_CONFIG_PATH),
    }
    .map_err(|e| e.to_string())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let (mut display, texture_creator) =
        Display::with_options(TITLE, WINDOW_WIDTH, WINDOW_HEIGHT, args.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut buffer = PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT);

    let mut input = InputLatch::new();
    let mut driver = FrameDriver::new(config);
    let mut clock = FrameClock::new();
    let mut shown_score = None;

    tracing::info!(
        width = WINDOW_WIDTH,
        height = WINDOW_HEIGHT,
        vsync = args.vsync,
        "starting"
    );

    'main: loop {
        let dt = clock.tick();

        let mut keys = Vec::new();
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::Key(key) => keys.push(key),
            }
        }
        input.latch(&keys);

        driver.tick(&mut buffer.pixmap(), &input, dt);

        let score = driver.game().score();
        if shown_score != Some(score) {
            display.set_title(&format!("{TITLE} | score {score}"))?;
            shown_score = Some(score);
        }

        display.present(&mut target, &buffer)?;
    }

    tracing::info!(
        frames = clock.frame_count(),
        score = driver.game().score(),
        "exiting"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_bare_level() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
