use clap::Parser;

/// Type on a virtual keyboard by pinching your fingers in front of the webcam.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Camera device index (0 = default webcam).
    #[arg(short, long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width; the camera may pick the closest it supports.
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested capture height.
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Show the camera unflipped instead of as a mirror image.
    #[arg(long, default_value_t = false)]
    pub no_mirror: bool,

    /// Window title.
    #[arg(long, default_value = "Virtual Keyboard")]
    pub title: String,

    /// Landmark model command and its arguments, after `--`, speaking the
    /// frame pipe protocol. Without it the mouse stands in for the hand.
    #[arg(last = true, value_name = "DETECTOR")]
    pub detector: Vec<String>,
}

impl Config {
    pub fn mirror(&self) -> bool {
        !self.no_mirror
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_plain_webcam() {
        let cfg = Config::try_parse_from(["air-keys"]).unwrap();
        assert_eq!((cfg.camera, cfg.width, cfg.height), (0, 640, 480));
        assert!(cfg.mirror());
        assert_eq!(cfg.title, "Virtual Keyboard");
        assert!(cfg.detector.is_empty());
    }

    #[test]
    fn detector_and_camera_flags() {
        let cfg = Config::try_parse_from([
            "air-keys", "-c", "2", "--no-mirror", "--", "hand-landmarker", "--model", "my models/hand.task",
        ])
        .unwrap();
        assert_eq!(cfg.camera, 2);
        assert!(!cfg.mirror());
        assert_eq!(cfg.detector, vec!["hand-landmarker", "--model", "my models/hand.task"]);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(Config::try_parse_from(["air-keys", "--width", "wide"]).is_err());
    }
}
