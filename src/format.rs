//! File classification by extension
//!
//! Extensions compare case-insensitively. Only the final dot-separated part of a
//! name counts, so `book.fb2.zip` is an archive.

use serde::Serialize;

/// Document formats eligible for word counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Fb2,
    Rtf,
    Epub,
    Txt,
    Docx,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 5] = [
        DocumentFormat::Fb2,
        DocumentFormat::Rtf,
        DocumentFormat::Epub,
        DocumentFormat::Txt,
        DocumentFormat::Docx,
    ];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "fb2" => Some(DocumentFormat::Fb2),
            "rtf" => Some(DocumentFormat::Rtf),
            "epub" => Some(DocumentFormat::Epub),
            "txt" => Some(DocumentFormat::Txt),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Fb2 => "fb2",
            DocumentFormat::Rtf => "rtf",
            DocumentFormat::Epub => "epub",
            DocumentFormat::Txt => "txt",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// How a file participates in word counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "class", content = "format")]
pub enum FileClass {
    Document(DocumentFormat),
    Archive,
    Inert,
}

impl FileClass {
    pub fn of_name(name: &str) -> Self {
        let Some(ext) = extension_of(name) else {
            return FileClass::Inert;
        };
        if ext.eq_ignore_ascii_case("zip") {
            return FileClass::Archive;
        }
        DocumentFormat::from_extension(ext)
            .map(FileClass::Document)
            .unwrap_or(FileClass::Inert)
    }

    pub fn is_countable(&self) -> bool {
        !matches!(self, FileClass::Inert)
    }
}

/// Text after the last `.` of the final path segment, if any.
pub fn extension_of(name: &str) -> Option<&str> {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
