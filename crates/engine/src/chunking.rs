//! Line chunking for presentation.

use std::num::NonZeroUsize;

use navlist_types::{LINE_WIDTH, NavigationEntry, NavigationModel, RenderLine};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("invalid chunk width {width}; width must be positive")]
    InvalidChunkWidth { width: usize },
}

/// Split entries into consecutive lines of `width`; the last line may be shorter.
pub fn chunk(entries: &[NavigationEntry], width: usize) -> Result<Vec<RenderLine>, ChunkError> {
    let width = NonZeroUsize::new(width).ok_or(ChunkError::InvalidChunkWidth { width })?;
    Ok(split_lines(entries, width))
}

fn split_lines(entries: &[NavigationEntry], width: NonZeroUsize) -> Vec<RenderLine> {
    entries
        .chunks(width.get())
        .map(|run| RenderLine { entries: run.to_vec() })
        .collect()
}

/// Lines of one section, or of the whole model when it is flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLines {
    /// Section heading; `None` for a flat model.
    pub key: Option<String>,
    pub lines: Vec<RenderLine>,
}

/// Chunk a model into display lines of [`LINE_WIDTH`] links.
///
/// Flat models produce a single block without a heading; grouped models
/// produce one block per section, in section order.
pub fn render_lines(model: &NavigationModel) -> Vec<SectionLines> {
    match model {
        NavigationModel::Flat(entries) if entries.is_empty() => Vec::new(),
        NavigationModel::Flat(entries) => vec![SectionLines {
            key: None,
            lines: split_lines(entries, LINE_WIDTH),
        }],
        NavigationModel::Grouped(sections) => sections
            .iter()
            .map(|section| SectionLines {
                key: Some(section.key.clone()),
                lines: split_lines(&section.entries, LINE_WIDTH),
            })
            .collect(),
    }
}
