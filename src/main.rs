// What you SEE:
// • Live (mirrored) camera with a blue QWERTY keyboard on top.
// • Pinch index + thumb over a key to type it; pinch middle + thumb to delete.
// • The typed text runs along the bottom. ESC quits.
// • Without a detector command (after `--`) the mouse plays the hand: left click = pinch, right click = delete.

mod camera;
mod config;
mod controller;
mod detector;
mod draw;
mod error;
mod gesture;
mod landmarks;
mod layout;
mod overlay;
mod types;

use camera::CameraCapture;
use clap::Parser;
use config::Config;
use controller::InputController;
use detector::{DetectorInput, HandDetector, PointerDetector, PointerState, SubprocessDetector};
use draw::Drawer;
use error::Error;
use layout::Keyboard;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::parse();
    if let Err(e) = run(&cfg) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn open_detector(cfg: &Config) -> Result<Box<dyn HandDetector>, Error> {
    if cfg.detector.is_empty() {
        warn!("no detector command given; the mouse stands in for the hand");
        return Ok(Box::new(PointerDetector::new()));
    }
    Ok(Box::new(SubprocessDetector::spawn(&cfg.detector)?))
}

fn run(cfg: &Config) -> Result<(), Error> {
    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let mut cam = CameraCapture::new(cfg.camera, cfg.width, cfg.height, cfg.mirror())?;
    let (w, h) = cam.resolution();
    let mut drawer = Drawer::new(&cfg.title, w as usize, h as usize)?;

    let mut detector = open_detector(cfg)?;
    info!(detector = detector.name(), "ready; ESC quits");

    let mut input = InputController::new(Keyboard::standard());

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Grab a fresh frame; this blocks until the camera delivers one.
        let mut screen = cam.next_frame()?;

        // 2) Find the hand (on the clean frame, before anything is drawn on it).
        let pointer = PointerState {
            pos: drawer.mouse_pos(),
            left: drawer.left_mouse_down(),
            right: drawer.right_mouse_down(),
        };
        let hand = detector.detect(&DetectorInput { frame: &screen, pointer })?;

        // 3) Keyboard underneath everything else.
        overlay::draw_keyboard(&mut screen, input.keyboard());

        // 4) Hand skeleton + gesture handling; no hand means nothing to do.
        if let Some(hand) = &hand {
            overlay::draw_hand(&mut screen, hand);
            if let Some(action) = input.handle_frame(hand) {
                overlay::draw_action(&mut screen, &action);
            }
        }

        // 5) Typed text on top, then show it.
        overlay::draw_typed(&mut screen, input.text());
        drawer.present(&screen)?;

        // 6) FPS once per second
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!(fps, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!(text = %input.text(), "exiting");
    Ok(())
}
