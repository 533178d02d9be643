// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame to the window failed

    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed

    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed

    #[error("Detector spawn error: {0}")]
    DetectorSpawn(String), // Starting the landmark process failed

    #[error("Detector pipe error: {0}")]
    DetectorIo(#[from] std::io::Error),

    #[error("Detector protocol error: {0}")]
    DetectorProtocol(String),

    #[error("Detector JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
