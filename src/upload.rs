use std::path::PathBuf;

/// Which attachment slot an upload targets. Selects the upload endpoint
/// and the file-reference fields that a successful upload fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Pdf,
    Cover,
}

impl AttachmentKind {
    pub fn endpoint_suffix(&self) -> &'static str {
        match self {
            AttachmentKind::Pdf => "upload-pdf",
            AttachmentKind::Cover => "upload-cover",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttachmentKind::Pdf => "PDF",
            AttachmentKind::Cover => "cover image",
        }
    }
}

/// Where the bytes come from. Platforms with filesystem access hand us a
/// path; browser-like platforms only hand back an in-memory buffer.
/// Exactly one variant per upload.
#[derive(Debug, Clone)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// One attachment to send after the entity record exists.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub kind: AttachmentKind,
    pub source: UploadSource,
    pub filename: String,
}

impl AttachmentUpload {
    pub fn from_path(
        kind: AttachmentKind,
        path: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        AttachmentUpload {
            kind,
            source: UploadSource::Path(path.into()),
            filename: filename.into(),
        }
    }

    pub fn from_bytes(kind: AttachmentKind, bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        AttachmentUpload {
            kind,
            source: UploadSource::Bytes(bytes),
            filename: filename.into(),
        }
    }
}

/// Per-attachment outcome reported back from the create-then-upload flow.
/// The created record survives regardless; this tells the caller which
/// uploads still need a retry.
#[derive(Debug, Clone)]
pub struct AttachmentResult {
    pub kind: AttachmentKind,
    pub filename: String,
    pub outcome: Result<(), String>,
}

impl AttachmentResult {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}
