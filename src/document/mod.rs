/*!
 * Structured document container.
 *
 * This module provides the typed document tree the translation pipeline works on,
 * its JSON load/save operations, and the fixed traversal order used to
 * enumerate translatable items:
 *
 * 1. body paragraphs
 * 2. body table cells (tables in order, row-major)
 * 3. per section: header paragraphs, header table cells,
 *    footer paragraphs, footer table cells
 *
 * The same order is used for extraction and for writing results back.
 */

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::DocumentError;

pub mod model;

pub use model::{Cell, Document, Paragraph, Rgb, Row, Run, RunFormat, Section, Story, Table};

/// Read-only view of one translatable item.
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Paragraph(&'a Paragraph),
    Cell(&'a Cell),
}

/// Mutable view of one translatable item.
#[derive(Debug)]
pub enum ItemMut<'a> {
    Paragraph(&'a mut Paragraph),
    Cell(&'a mut Cell),
}

impl ItemRef<'_> {
    /// Visible text of the item; cell paragraphs are separated by newlines.
    pub fn text(&self) -> String {
        match self {
            ItemRef::Paragraph(paragraph) => paragraph.text(),
            ItemRef::Cell(cell) => cell.text(),
        }
    }
}

impl Story {
    fn collect_items<'a>(&'a self, out: &mut Vec<ItemRef<'a>>) {
        out.extend(self.paragraphs.iter().map(ItemRef::Paragraph));
        for table in &self.tables {
            for row in &table.rows {
                out.extend(row.cells.iter().map(ItemRef::Cell));
            }
        }
    }

    fn collect_items_mut<'a>(&'a mut self, out: &mut Vec<ItemMut<'a>>) {
        out.extend(self.paragraphs.iter_mut().map(ItemMut::Paragraph));
        for table in self.tables.iter_mut() {
            for row in table.rows.iter_mut() {
                out.extend(row.cells.iter_mut().map(ItemMut::Cell));
            }
        }
    }
}

impl Document {
    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let file = File::open(path.as_ref())?;
        let document = serde_json::from_reader(BufReader::new(file))?;
        Ok(document)
    }

    /// Parse a document from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Save the document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize the document to any writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), DocumentError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Translatable items in traversal order.
    pub fn items(&self) -> Vec<ItemRef<'_>> {
        let mut items = Vec::new();
        self.body.collect_items(&mut items);
        for section in &self.sections {
            if let Some(header) = &section.header {
                header.collect_items(&mut items);
            }
            if let Some(footer) = &section.footer {
                footer.collect_items(&mut items);
            }
        }
        items
    }

    /// Mutable translatable items, in the same order as [`Document::items`].
    pub fn items_mut(&mut self) -> Vec<ItemMut<'_>> {
        let mut items = Vec::new();
        self.body.collect_items_mut(&mut items);
        for section in self.sections.iter_mut() {
            if let Some(header) = section.header.as_mut() {
                header.collect_items_mut(&mut items);
            }
            if let Some(footer) = section.footer.as_mut() {
                footer.collect_items_mut(&mut items);
            }
        }
        items
    }
}
