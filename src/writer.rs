//! JSON writer for the static data export
//!
//! `bibliography.json` holds every item in internal form; the render step
//! reads it, and `bibshelf serve --data` can serve it without the source
//! files. A per-site file holds the redacted page data for one site.

use crate::model::{BibliographyItem, FrontendItem};
use crate::site::SiteId;
use crate::{Bibliography, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the internal-form export
pub const DATA_FILE: &str = "bibliography.json";

/// Configuration for writing JSON
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Indent output (default: true)
    pub pretty: bool,
    /// End output with a newline (default: true)
    pub trailing_newline: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            trailing_newline: true,
        }
    }
}

/// JSON writer
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    config: WriterConfig,
}

impl<W: Write> Writer<W> {
    /// Create a new writer with default configuration
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: WriterConfig::default(),
        }
    }

    /// Create a new writer with custom configuration
    pub const fn with_config(writer: W, config: WriterConfig) -> Self {
        Self { writer, config }
    }

    /// Write items in internal form
    pub fn write_items(&mut self, items: &[BibliographyItem]) -> Result<()> {
        self.write_json(items)
    }

    /// Write one site's redacted view
    pub fn write_site(&mut self, items: &[FrontendItem<'_>]) -> Result<()> {
        self.write_json(items)
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        if self.config.trailing_newline {
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Convenience function to write a bibliography to a string
pub fn to_string(bibliography: &Bibliography) -> Result<String> {
    let mut buf = Vec::new();
    Writer::new(&mut buf).write_items(bibliography.items())?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Convenience function to write a bibliography to a file
pub fn to_file(bibliography: &Bibliography, path: impl AsRef<Path>) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    Writer::new(file).write_items(bibliography.items())
}

/// Read an internal-form export back
pub fn from_file(path: impl AsRef<Path>) -> Result<Bibliography> {
    let content = fs::read_to_string(path)?;
    let items: Vec<BibliographyItem> = serde_json::from_str(&content)?;
    Ok(Bibliography::from_items(items))
}

/// Write the data export into `out_dir`: always `bibliography.json`, plus
/// `<site>.json` page data when `site` is given. Returns the written paths.
pub fn export(
    bibliography: &Bibliography,
    out_dir: impl AsRef<Path>,
    site: Option<&SiteId>,
    config: &WriterConfig,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    let data_path = out_dir.join(DATA_FILE);
    let file = BufWriter::new(File::create(&data_path)?);
    Writer::with_config(file, config.clone()).write_items(bibliography.items())?;
    info!(path = %data_path.display(), items = bibliography.len(), "wrote bibliography data");
    written.push(data_path);

    if let Some(site) = site {
        let page = bibliography.page(site);
        let page_path = out_dir.join(format!("{site}.json"));
        let file = BufWriter::new(File::create(&page_path)?);
        Writer::with_config(file, config.clone()).write_site(&page)?;
        info!(path = %page_path.display(), site = %site, items = page.len(), "wrote site page data");
        written.push(page_path);
    }

    Ok(written)
}
