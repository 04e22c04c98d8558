// Guide pages: embedded Markdown with an optional on-disk override directory

mod markdown;

pub use markdown::{plain_text, Block, Document, Span};

use crate::error::ContentError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

macro_rules! include_page {
    ($name:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/src/content/pages/",
            $name,
            ".md"
        ))
    };
}

/// A static document of the guide
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    GeneralRequirement,
    RequiredLibrary,
    ForStudents,
    ForAdmins,
    AppInfo,
    Contact,
}

impl Page {
    #[cfg(test)]
    pub const ALL: [Page; 6] = [
        Page::GeneralRequirement,
        Page::RequiredLibrary,
        Page::ForStudents,
        Page::ForAdmins,
        Page::AppInfo,
        Page::Contact,
    ];

    /// File stem used both for the embedded page and for overrides
    pub fn file_stem(&self) -> &'static str {
        match self {
            Page::GeneralRequirement => "general-requirement",
            Page::RequiredLibrary => "required-library",
            Page::ForStudents => "for-students",
            Page::ForAdmins => "for-admins",
            Page::AppInfo => "app-info",
            Page::Contact => "contact",
        }
    }

    pub fn embedded(&self) -> &'static str {
        match self {
            Page::GeneralRequirement => include_page!("general-requirement"),
            Page::RequiredLibrary => include_page!("required-library"),
            Page::ForStudents => include_page!("for-students"),
            Page::ForAdmins => include_page!("for-admins"),
            Page::AppInfo => include_page!("app-info"),
            Page::Contact => include_page!("contact"),
        }
    }
}

/// Note shown under every page of the About category
pub fn about_footer() -> &'static str {
    include_page!("about-footer")
}

/// Where a loaded page came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Embedded,
    Override(PathBuf),
}

pub struct LoadedPage {
    pub document: Document,
    pub source: Source,
}

/// Parsed pages, cached until the next reload
pub struct ContentLibrary {
    override_dir: Option<PathBuf>,
    cache: HashMap<Page, Arc<LoadedPage>>,
    footer: Arc<Document>,
}

impl ContentLibrary {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self {
            override_dir,
            cache: HashMap::new(),
            footer: Arc::new(Document::parse(about_footer())),
        }
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Get a page, parsing it on first use.
    ///
    /// An override file that exists but can't be read falls back to the
    /// embedded page; the error is returned alongside so the caller can
    /// surface it.
    pub fn page(&mut self, page: Page) -> (Arc<LoadedPage>, Option<ContentError>) {
        if let Some(loaded) = self.cache.get(&page) {
            return (Arc::clone(loaded), None);
        }

        let (text, source, error) = match self.read_override(page) {
            Ok(Some((path, text))) => (text, Source::Override(path), None),
            Ok(None) => (page.embedded().to_string(), Source::Embedded, None),
            Err(e) => {
                warn!("{}; using built-in page", e);
                (page.embedded().to_string(), Source::Embedded, Some(e))
            }
        };

        let document = Document::parse(&text);
        debug!(
            page = page.file_stem(),
            source = ?source,
            images = document.image_sources().len(),
            "loaded page"
        );
        let loaded = Arc::new(LoadedPage { document, source });
        self.cache.insert(page, Arc::clone(&loaded));
        (loaded, error)
    }

    pub fn footer(&self) -> Arc<Document> {
        Arc::clone(&self.footer)
    }

    /// Drop all parsed pages so the next access re-reads them
    pub fn reload(&mut self) {
        self.cache.clear();
    }

    fn read_override(&self, page: Page) -> Result<Option<(PathBuf, String)>, ContentError> {
        let Some(dir) = &self.override_dir else {
            return Ok(None);
        };
        let path = dir.join(format!("{}.md", page.file_stem()));
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|source| ContentError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Some((path, text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(document: &Document) -> Vec<String> {
        document
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { spans, .. } => Some(plain_text(spans)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_every_embedded_page_has_content() {
        let mut library = ContentLibrary::new(None);
        for page in Page::ALL {
            let (loaded, error) = library.page(page);
            assert!(error.is_none());
            assert_eq!(loaded.source, Source::Embedded);
            assert!(!loaded.document.blocks.is_empty(), "{} is empty", page.file_stem());
        }
        assert_eq!(library.cache.len(), Page::ALL.len());
    }

    #[test]
    fn test_general_requirement_starts_with_prerequisites() {
        let mut library = ContentLibrary::new(None);
        let (loaded, _) = library.page(Page::GeneralRequirement);
        assert_eq!(headings(&loaded.document)[0], "1. Prerequisites");
    }

    #[test]
    fn test_admin_page_has_data_storage_table() {
        let mut library = ContentLibrary::new(None);
        let (loaded, _) = library.page(Page::ForAdmins);
        let table = loaded.document.blocks.iter().find_map(|b| match b {
            Block::Table { header, rows } => Some((header.clone(), rows.clone())),
            _ => None,
        });
        let (header, rows) = table.expect("admin page should contain a table");
        assert_eq!(plain_text(&header[0]), "Component");
        assert_eq!(plain_text(&header[1]), "Location");
        assert_eq!(rows.len(), 4);
        assert_eq!(plain_text(&rows[0][0]), "Registered Faces");
        assert_eq!(plain_text(&rows[3][1]), "Google Drive (per class folder)");
    }

    #[test]
    fn test_student_page_references_screenshots() {
        let mut library = ContentLibrary::new(None);
        let (loaded, _) = library.page(Page::ForStudents);
        let images = loaded.document.image_sources();
        assert!(images.contains(&"images/register face.jpg"));
        assert!(images.iter().all(|src| src.starts_with("images/")));
    }

    #[test]
    fn test_override_dir_replaces_page_and_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contact.md");
        fs::write(&path, "## Help desk\n\nCall extension 42.\n").unwrap();

        let mut library = ContentLibrary::new(Some(dir.path().to_path_buf()));
        let (loaded, error) = library.page(Page::Contact);
        assert!(error.is_none());
        assert_eq!(loaded.source, Source::Override(path.clone()));
        assert_eq!(headings(&loaded.document), vec!["Help desk"]);

        // pages without an override file still come from the binary
        let (other, _) = library.page(Page::AppInfo);
        assert_eq!(other.source, Source::Embedded);

        fs::write(&path, "## Service desk\n").unwrap();
        let (cached, _) = library.page(Page::Contact);
        assert_eq!(headings(&cached.document), vec!["Help desk"]);

        library.reload();
        assert_eq!(library.cache.len(), 0);
        let (fresh, _) = library.page(Page::Contact);
        assert_eq!(headings(&fresh.document), vec!["Service desk"]);
    }

    #[test]
    fn test_missing_override_dir_uses_embedded_pages() {
        let mut library = ContentLibrary::new(Some(PathBuf::from("/nonexistent/guide/pages")));
        let (loaded, error) = library.page(Page::ForStudents);
        assert!(error.is_none());
        assert_eq!(loaded.source, Source::Embedded);
    }

    #[test]
    fn test_footer_is_parsed() {
        let library = ContentLibrary::new(None);
        assert!(!library.footer().blocks.is_empty());
    }
}
