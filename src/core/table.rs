//! Locating the weekly menu grid inside the upstream page.
//!
//! The page has no id/class hooks on the grid, so the default locator is
//! positional: the grid is the second top-level `table` in document order, the
//! first one being layout/navigation. Tables nested in another table are not
//! counted. Any upstream layout change breaks this silently.

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

pub const DEFAULT_TABLE_INDEX: usize = 1;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("table selector is valid"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("row selector is valid"));

/// Finds the menu grid in a parsed document, or `None` when it is not there.
pub trait TableLocator: Send + Sync {
    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;
}

#[derive(Debug, Clone, Copy)]
pub struct PositionalTableLocator {
    index: usize,
}

impl PositionalTableLocator {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Default for PositionalTableLocator {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_INDEX)
    }
}

impl TableLocator for PositionalTableLocator {
    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        // 巢狀表格不算位置
        let table = document
            .select(&TABLE)
            .filter(|table| enclosing_table(*table).is_none())
            .nth(self.index)?;
        if own_rows(table).len() < 2 {
            tracing::debug!("Table #{} has fewer than 2 rows", self.index);
            return None;
        }
        Some(table)
    }
}

/// Cell texts of a located table, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGrid {
    rows: Vec<Vec<String>>,
}

impl MenuGrid {
    pub fn read(table: ElementRef<'_>) -> Self {
        let rows = own_rows(table)
            .into_iter()
            .map(|row| {
                row.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|cell| matches!(cell.value().name(), "th" | "td"))
                    .map(cell_text)
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }
}

/// Nearest `table` element above `element`.
fn enclosing_table(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

/// Rows belonging to `table` itself, skipping rows of nested tables.
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .select(&ROW)
        .filter(|row| enclosing_table(*row) == Some(table))
        .collect()
}

/// Text of a cell with `<br>`, `<li>`, `<p>` and `<div>` turned into line
/// breaks and source whitespace collapsed the way a browser renders it.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(text) => raw.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c })),
            Node::Element(element) if matches!(element.name(), "br" | "li" | "p" | "div") => {
                raw.push('\n')
            }
            _ => {}
        }
    }

    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
