//! Turns a device page into a [`RawRecord`].
//!
//! Spec tables are walked row by row with a single "current category" that
//! resets at the start of every table. Header rows switch the category,
//! field rows are filed under it. Categories that show up more than once
//! (in the same or a different table) are merged into one entry; on a label
//! collision the later value wins but the label keeps its first position.
//!
//! Field rows seen before any header in a table have no category to go
//! under and are dropped.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::models::{RawRecord, SpecSheet};
use crate::page::{DevicePage, SpecTable};

/// Build the nested category -> label -> value mapping from spec tables.
pub fn extract_specs(tables: &[SpecTable]) -> SpecSheet {
    let mut specs = SpecSheet::new();

    for (table_index, table) in tables.iter().enumerate() {
        let mut category: Option<String> = None;

        for row in &table.rows {
            if let Some(header) = &row.header {
                specs.entry(header.clone()).or_insert_with(IndexMap::new);
                category = Some(header.clone());
            }

            let Some(field) = &row.field else {
                continue;
            };

            match &category {
                Some(name) => {
                    if let Some(fields) = specs.get_mut(name) {
                        fields.insert(field.title.clone(), field.info.clone());
                    }
                }
                None => debug!(
                    table = table_index,
                    title = %field.title,
                    "dropping field row that precedes any category header"
                ),
            }
        }
    }

    specs
}

/// Extract a whole record from a page. Fails when the page has no device
/// heading or no specs container, since such a page is not a device page.
pub fn extract_record<P: DevicePage + ?Sized>(url: Option<&str>, page: &P) -> Result<RawRecord> {
    let name = page
        .heading()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(ScrapeError::MissingHeading)?;

    let tables = page.spec_tables().ok_or(ScrapeError::MissingSpecsList)?;

    let image = page.image_src().filter(|src| !src.is_empty());
    let highlights = page
        .highlights()
        .into_iter()
        .map(|item| item.trim().to_string())
        .collect();

    Ok(RawRecord {
        url: url.map(str::to_string),
        name,
        image,
        highlights,
        specs: extract_specs(&tables),
    })
}
