use base64::{engine::general_purpose, Engine};
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera access denied: {0}")]
    AccessDenied(String),
    #[error("camera failed to start: {0}")]
    Unavailable(String),
    #[error("captured frame is not a usable JPEG: {0}")]
    InvalidFrame(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    Environment, // rear camera, pointed at the fridge
}

/// An acquired video stream. Holding one keeps the device busy.
#[async_trait::async_trait]
pub trait VideoStream: Send {
    async fn capture_jpeg(&mut self) -> Result<Vec<u8>, CameraError>;

    /// Stop all tracks and release the device.
    fn stop(&mut self);
}

#[async_trait::async_trait]
pub trait CameraDevice: Send + Sync {
    async fn open(&self, facing: FacingMode) -> Result<Box<dyn VideoStream>, CameraError>;
}

/// Scoped camera access: the stream is stopped exactly once when the
/// session goes away, whichever way the scan ended.
pub struct CameraSession {
    stream: Option<Box<dyn VideoStream>>,
}

impl CameraSession {
    pub async fn open(device: &dyn CameraDevice, facing: FacingMode) -> Result<Self, CameraError> {
        let stream = device.open(facing).await?;
        log::debug!("📷 Camera stream acquired ({:?})", facing);
        Ok(Self {
            stream: Some(stream),
        })
    }

    /// Grab one frame and return it base64-encoded.
    pub async fn capture_base64(&mut self) -> Result<String, CameraError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| CameraError::Unavailable("stream already released".to_string()))?;

        let frame = stream.capture_jpeg().await?;
        log::debug!("📸 Captured frame: {} bytes", frame.len());
        Ok(general_purpose::STANDARD.encode(&frame))
    }

    /// Release without capturing (user cancelled).
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            log::debug!("📷 Camera stream released");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

pub(crate) fn is_jpeg(data: &[u8]) -> bool {
    data.len() > 3 && data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF
}

/// Camera backed by a snapshot file that a webcam daemon keeps refreshing
/// (fswebcam, motion, ...). Each capture reads the latest frame.
pub struct SnapshotCamera {
    snapshot_path: PathBuf,
}

impl SnapshotCamera {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl CameraDevice for SnapshotCamera {
    async fn open(&self, _facing: FacingMode) -> Result<Box<dyn VideoStream>, CameraError> {
        match tokio::fs::metadata(&self.snapshot_path).await {
            Ok(metadata) if metadata.is_file() => Ok(Box::new(SnapshotStream {
                path: self.snapshot_path.clone(),
                stopped: false,
            })),
            Ok(_) => Err(CameraError::Unavailable(format!(
                "{} is not a file",
                self.snapshot_path.display()
            ))),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(CameraError::AccessDenied(
                format!("{}: {}", self.snapshot_path.display(), e),
            )),
            Err(e) => Err(CameraError::Unavailable(format!(
                "{}: {}",
                self.snapshot_path.display(),
                e
            ))),
        }
    }
}

struct SnapshotStream {
    path: PathBuf,
    stopped: bool,
}

#[async_trait::async_trait]
impl VideoStream for SnapshotStream {
    async fn capture_jpeg(&mut self) -> Result<Vec<u8>, CameraError> {
        if self.stopped {
            return Err(CameraError::Unavailable("stream stopped".to_string()));
        }

        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                CameraError::AccessDenied(e.to_string())
            } else {
                CameraError::Unavailable(e.to_string())
            }
        })?;

        if !is_jpeg(&data) {
            return Err(CameraError::InvalidFrame(format!(
                "{} does not start with a JPEG header",
                self.path.display()
            )));
        }

        Ok(data)
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
