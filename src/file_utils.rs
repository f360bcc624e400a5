use anyhow::{Result, Context};
use std::fs;
use std::path::Path;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect whether a transcript is a JSON segment list or an SRT file
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            match ext.to_string_lossy().to_lowercase().as_str() {
                "json" => return Ok(FileType::Json),
                "srt" => return Ok(FileType::Subtitle),
                _ => {}
            }
        }

        // Fall back to examining file contents
        let content = Self::read_to_string(path)?;
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            return Ok(FileType::Json);
        }
        if content.contains("-->") {
            return Ok(FileType::Subtitle);
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// JSON document
    Json,
    /// Subtitle file (SRT)
    Subtitle,
    /// Unknown file type
    Unknown,
}
