/// Upload size ceiling: 10 MiB.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Extensions the pipeline accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "ppt", "pptx",
];

/// A single uploaded document: a name, raw bytes, and an optional declared
/// MIME type. This is the whole file-input boundary of the pipeline.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    PlainText,
    WordProcessor,
    Image,
    /// Unknown; treated as plain text on a best-effort basis.
    Other,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes, mime: None }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn extension(&self) -> Option<String> {
        self.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
    }

    fn mime_lower(&self) -> String {
        self.mime.as_deref().unwrap_or("").to_lowercase()
    }

    /// Whether extension or MIME type lands in the allow-list.
    pub fn is_allowed_type(&self) -> bool {
        let mime = self.mime_lower();
        match self.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => true,
            _ => ALLOWED_EXTENSIONS.iter().any(|e| mime.contains(e)),
        }
    }

    pub fn kind(&self) -> FileKind {
        let mime = self.mime_lower();
        let ext = self.extension().unwrap_or_default();
        if mime.contains("pdf") || ext == "pdf" {
            FileKind::Pdf
        } else if mime.contains("text") || ext == "txt" {
            FileKind::PlainText
        } else if matches!(ext.as_str(), "doc" | "docx" | "ppt" | "pptx") {
            FileKind::WordProcessor
        } else if mime.contains("image")
            || matches!(ext.as_str(), "jpg" | "jpeg" | "png" | "gif" | "bmp")
        {
            FileKind::Image
        } else {
            FileKind::Other
        }
    }

    /// MIME type to declare when embedding the file as an inline image.
    pub fn image_mime(&self) -> String {
        if let Some(m) = &self.mime {
            if m.starts_with("image/") {
                return m.clone();
            }
        }
        match self.extension().as_deref() {
            Some("png") => "image/png".to_string(),
            Some("gif") => "image/gif".to_string(),
            Some("bmp") => "image/bmp".to_string(),
            _ => "image/jpeg".to_string(),
        }
    }
}
