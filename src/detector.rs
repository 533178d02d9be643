//! Where hand landmarks come from.
//!
//! Two sources sit behind [`HandDetector`]:
//!
//! * [`SubprocessDetector`] pipes each frame to an external landmark model and
//!   reads back one JSON line per frame.
//! * [`PointerDetector`] fakes a hand from the mouse so the keyboard can be
//!   used without a model: left button pinches index+thumb (click), right
//!   button pinches middle+thumb (backspace).
//!
//! # Pipe protocol
//!
//! After spawning, the child prints `READY` on its own line. For every frame
//! the parent writes `width`, `height`, `channels` as little-endian `u32`
//! followed by `width * height * 3` RGB bytes, and the child answers with
//!
//! ```text
//! {"hands":[{"score":0.97,"landmarks":[{"x":0.51,"y":0.42,"z":-0.01}, ...]}],"error":null}
//! ```
//!
//! Coordinates are normalized to the frame; only the first hand is used.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::landmarks::{HAND_LANDMARKS, LandmarkSet, index};
use crate::types::{FrameBuffer, Point};

/// What a detector can look at for one frame.
pub struct DetectorInput<'a> {
    pub frame: &'a FrameBuffer,
    pub pointer: PointerState,
}

/// Mouse state sampled from the window this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub pos: Option<(f32, f32)>,
    pub left: bool,
    pub right: bool,
}

/// Anything that can turn a frame into zero or one hand.
pub trait HandDetector {
    fn name(&self) -> &'static str;
    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<LandmarkSet>, Error>;
}

// ════════════════════════════════════════════════════════════════════════════
// SubprocessDetector
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionReply {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode one reply line into pixel landmarks for a `width` x `height` frame.
pub fn parse_reply(line: &str, width: usize, height: usize) -> Result<Option<LandmarkSet>, Error> {
    let reply: DetectionReply = serde_json::from_str(line.trim())?;
    if let Some(error) = reply.error {
        warn!(%error, "detector reported an error");
        return Ok(None);
    }
    let Some(hand) = reply.hands.into_iter().next() else {
        return Ok(None);
    };
    if hand.landmarks.len() != HAND_LANDMARKS {
        debug!(got = hand.landmarks.len(), "partial hand");
    }
    debug!(score = hand.score, "hand detected");
    let coords = hand.landmarks.into_iter().map(|lm| (lm.x, lm.y));
    Ok(Some(LandmarkSet::from_normalized(coords, width, height)))
}

/// Write one frame in the pipe format.
pub fn write_frame<W: Write>(out: &mut W, frame: &FrameBuffer) -> Result<(), Error> {
    out.write_all(&(frame.width as u32).to_le_bytes())?;
    out.write_all(&(frame.height as u32).to_le_bytes())?;
    out.write_all(&3u32.to_le_bytes())?;
    out.write_all(&frame.to_rgb_bytes())?;
    out.flush()?;
    Ok(())
}

/// Landmark model running as a child process.
pub struct SubprocessDetector {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl SubprocessDetector {
    /// Spawn `command` (program followed by its arguments) and wait for its `READY` line.
    pub fn spawn<S: AsRef<str>>(command: &[S]) -> Result<Self, Error> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::DetectorSpawn("empty detector command".into()))?;
        let program = program.as_ref();
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        info!(program, ?args, "starting landmark detector");
        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::DetectorSpawn(format!("{program}: {e}")))?;

        match Self::handshake(&mut child) {
            Ok((stdin, stdout)) => {
                info!("landmark detector ready");
                Ok(Self { child, stdin, stdout })
            }
            Err(e) => {
                stop(&mut child);
                Err(e)
            }
        }
    }

    fn handshake(child: &mut Child) -> Result<(ChildStdin, BufReader<ChildStdout>), Error> {
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::DetectorSpawn("no stdin pipe".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::DetectorSpawn("no stdout pipe".into()))?;
        let mut stdout = BufReader::new(stdout);

        let mut ready = String::new();
        stdout.read_line(&mut ready)?;
        if ready.trim() != "READY" {
            return Err(Error::DetectorProtocol(format!(
                "expected READY, got {:?}",
                ready.trim()
            )));
        }
        Ok((stdin, stdout))
    }
}

/// Kill the child and reap it so no zombie is left behind.
fn stop(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(error = %e, "detector already exited");
    }
    if let Err(e) = child.wait() {
        warn!(error = %e, "could not reap detector process");
    }
}

impl HandDetector for SubprocessDetector {
    fn name(&self) -> &'static str {
        "subprocess"
    }

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<LandmarkSet>, Error> {
        write_frame(&mut self.stdin, input.frame)?;
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(Error::DetectorProtocol("detector closed its output".into()));
        }
        parse_reply(&line, input.frame.width, input.frame.height)
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        stop(&mut self.child);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PointerDetector
// ════════════════════════════════════════════════════════════════════════════

/// Resting hand pose relative to the index tip, in pixels (right hand, palm to camera).
const POSE: [(f32, f32); HAND_LANDMARKS] = [
    (-30.0, 170.0),                                            // wrist
    (-70.0, 150.0), (-95.0, 120.0), (-105.0, 90.0), (-110.0, 60.0), // thumb
    (-15.0, 90.0), (-8.0, 55.0), (-3.0, 25.0), (0.0, 0.0),      // index
    (15.0, 90.0), (25.0, 50.0), (32.0, 18.0), (40.0, -10.0),    // middle
    (40.0, 95.0), (52.0, 60.0), (58.0, 32.0), (62.0, 8.0),      // ring
    (60.0, 110.0), (75.0, 85.0), (83.0, 65.0), (88.0, 45.0),    // pinky
];

/// Synthesizes a hand under the mouse cursor.
#[derive(Default)]
pub struct PointerDetector;

impl PointerDetector {
    pub fn new() -> Self {
        Self
    }

    /// The hand the pointer state describes, or None when the cursor is outside the window.
    pub fn synthesize(pointer: PointerState) -> Option<LandmarkSet> {
        let (x, y) = pointer.pos?;
        let mut points: Vec<Point> = POSE.iter().map(|&(dx, dy)| Point::new(x + dx, y + dy)).collect();
        if pointer.left {
            points[index::THUMB_TIP] = points[index::INDEX_TIP];
        } else if pointer.right {
            points[index::THUMB_TIP] = points[index::MIDDLE_TIP];
        }
        Some(LandmarkSet::new(points))
    }
}

impl HandDetector for PointerDetector {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn detect(&mut self, input: &DetectorInput<'_>) -> Result<Option<LandmarkSet>, Error> {
        Ok(Self::synthesize(input.pointer))
    }
}
