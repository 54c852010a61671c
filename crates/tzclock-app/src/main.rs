use std::{backtrace::Backtrace, num::NonZeroUsize, panic, path::PathBuf};

use clap::Parser;
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, Naming};
use iced::{Font, Size};
use log::{debug, error, info};
use masterror::AppError;
use tzclock_core::{config::get_config, event_bus::EventBus, modules::clock::Clock};
use tzclock_gui::App;

const EVENT_BUS_CAPACITY: usize = 64;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory("/tmp/tzclock"))
    .duplicate_to_stdout(flexi_logger::Duplicate::All)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    )
    .start()
    .map_err(|err| AppError::internal(format!("failed to start logger: {err}")))?;
    debug!("args: {args:?}");

    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    let (config, config_path) = get_config(args.config_path).inspect_err(|err| {
        error!("Failed to read config: {err}");
    })?;
    info!("Using config {config_path:?}");

    let clock = Clock::from_config(&config).inspect_err(|err| {
        error!("Failed to build clocks: {err}");
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("tzclock-worker")
        .build()
        .map_err(|err| AppError::internal(format!("failed to start runtime: {err}")))?;

    let capacity = NonZeroUsize::new(EVENT_BUS_CAPACITY)
        .ok_or_else(|| AppError::internal("event bus capacity must be non-zero"))?;
    let bus = EventBus::new(capacity);

    let font = match config.appearance.font_name {
        Some(ref font_name) => Font::with_name(Box::leak(font_name.clone().into_boxed_str())),
        None => Font::DEFAULT,
    };
    let window_width = config.appearance.face_size * config.clocks.len() as f32 + 160.0;
    let window_height = config.appearance.face_size + 320.0;

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .scale_factor(App::scale_factor)
        .default_font(font)
        .window_size(Size::new(window_width, window_height))
        .run_with(App::new((
            logger,
            config,
            clock,
            bus.sender(),
            runtime.handle().clone(),
            bus.receiver(),
        )))
        .map_err(|err| AppError::internal(format!("window loop failed: {err}")))
}
