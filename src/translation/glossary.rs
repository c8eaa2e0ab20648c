/*!
 * Glossary protection.
 *
 * Glossary terms are substituted with their target form wrapped in guillemets
 * (`«target»`) before the text is sent for translation. Translation services
 * leave guillemet-quoted text alone, and the quotes are stripped again once the
 * translation comes back.
 *
 * Matching is plain substring replacement in glossary order, so an earlier
 * entry wins over a later one that overlaps it.
 */

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::errors::GlossaryError;

/// Opening quote placed around protected terms
pub const GUARD_OPEN: char = '«';

/// Closing quote placed around protected terms
pub const GUARD_CLOSE: char = '»';

/// Ordered source term to target term mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryMap {
    entries: Vec<(String, String)>,
}

impl GlossaryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A repeated source term replaces the earlier target but
    /// keeps the earlier position.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == source) {
            Some(entry) => entry.1 = target,
            None => self.entries.push((source, target)),
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == source)
            .map(|(_, target)| target.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in glossary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }

    /// Read a glossary from CSV: one `source,target` pair per row, no header.
    ///
    /// Cells are trimmed, rows with only empty cells are skipped and extra
    /// columns are ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, GlossaryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut glossary = Self::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }

            let source = record.get(0).unwrap_or_default();
            let target = record.get(1).unwrap_or_default();
            if source.is_empty() || target.is_empty() {
                let line = record.position().map(|position| position.line()).unwrap_or(0);
                return Err(GlossaryError::MalformedRow { line });
            }
            glossary.insert(source, target);
        }

        debug!("Loaded {} glossary entries", glossary.len());
        Ok(glossary)
    }

    /// Load a glossary CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GlossaryError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Replace every source term with its guarded target form.
    pub fn protect(&self, text: &str) -> String {
        let mut protected = text.to_string();
        for (source, target) in self.iter() {
            if protected.contains(source) {
                protected = protected.replace(source, &guard(target));
            }
        }
        protected
    }

    /// Strip the guards placed by [`GlossaryMap::protect`].
    pub fn restore(&self, text: &str) -> String {
        let mut restored = text.to_string();
        for (_, target) in self.iter() {
            let guarded = guard(target);
            if restored.contains(&guarded) {
                restored = restored.replace(&guarded, target);
            }
        }
        restored
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for GlossaryMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut glossary = Self::new();
        for (source, target) in iter {
            glossary.insert(source, target);
        }
        glossary
    }
}

/// Load a glossary CSV file; see [`GlossaryMap::from_csv_reader`] for the format.
pub fn load_glossary(path: impl AsRef<Path>) -> Result<GlossaryMap, GlossaryError> {
    GlossaryMap::load(path)
}

/// Wrap a term in the protection quotes.
pub fn guard(term: &str) -> String {
    format!("{}{}{}", GUARD_OPEN, term, GUARD_CLOSE)
}
