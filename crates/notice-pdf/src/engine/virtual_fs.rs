//! In-memory sources for one compilation
//!
//! A notice compiles from exactly two files: the rendered markup at
//! [`MAIN_PATH`] and the stylesheet it imports at [`STYLESHEET_PATH`].
//! Nothing is read from disk and no other path resolves.

use std::collections::HashMap;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

pub const MAIN_PATH: &str = "/main.typ";
pub const STYLESHEET_PATH: &str = "/styles.typ";

#[derive(Debug)]
pub struct VirtualFilesystem {
    sources: HashMap<FileId, Source>,
    main_id: FileId,
}

impl VirtualFilesystem {
    /// Mount the rendered markup and its stylesheet
    pub fn new(markup: String, stylesheet: String) -> Self {
        let main_id = file_id(MAIN_PATH);
        let stylesheet_id = file_id(STYLESHEET_PATH);

        let mut sources = HashMap::new();
        sources.insert(main_id, Source::new(main_id, markup));
        sources.insert(stylesheet_id, Source::new(stylesheet_id, stylesheet));

        Self { sources, main_id }
    }

    pub fn main_id(&self) -> FileId {
        self.main_id
    }

    pub fn source(&self, id: FileId) -> Option<Source> {
        self.sources.get(&id).cloned()
    }

    /// Raw bytes of a mounted file
    pub fn file(&self, id: FileId) -> Option<Bytes> {
        self.sources
            .get(&id)
            .map(|source| Bytes::from(source.text().as_bytes().to_vec()))
    }
}

fn file_id(path: &str) -> FileId {
    FileId::new(None, VirtualPath::new(path))
}
