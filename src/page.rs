//! The page surface the extractor reads from, and its HTML implementation.

use std::sync::LazyLock;

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1.specs-phone-name-title"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(".specs-photo-main img"));
static HIGHLIGHTS: LazyLock<Selector> =
    LazyLock::new(|| selector(".specs-spotlight-features li"));
static SPECS_LIST: LazyLock<Selector> = LazyLock::new(|| selector("#specs-list"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static TITLE_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.ttl"));
static INFO_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.nfo"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// A label/value pair from a `td.ttl` + `td.nfo` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecField {
    pub title: String,
    pub info: String,
}

/// One `tr` of a spec table. A row may carry a header, a field, both
/// (the first row of every GSMArena table does) or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecRow {
    pub header: Option<String>,
    pub field: Option<SpecField>,
}

impl SpecRow {
    pub fn header(name: &str) -> Self {
        Self {
            header: Some(name.to_string()),
            field: None,
        }
    }

    pub fn field(title: &str, info: &str) -> Self {
        Self {
            header: None,
            field: Some(SpecField {
                title: title.to_string(),
                info: info.to_string(),
            }),
        }
    }

    pub fn with_field(mut self, title: &str, info: &str) -> Self {
        self.field = Some(SpecField {
            title: title.to_string(),
            info: info.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecTable {
    pub rows: Vec<SpecRow>,
}

impl SpecTable {
    pub fn new(rows: Vec<SpecRow>) -> Self {
        Self { rows }
    }
}

/// Everything the extractor needs from a device page. Any source that can
/// answer these (a parsed HTML document, a fixture) can be extracted.
pub trait DevicePage {
    /// Trimmed text of the device heading, if the heading exists.
    fn heading(&self) -> Option<String>;

    /// `src` of the main device photo.
    fn image_src(&self) -> Option<String>;

    /// Spotlight bullet texts, in page order.
    fn highlights(&self) -> Vec<String>;

    /// `None` when the specs container is missing altogether.
    fn spec_tables(&self) -> Option<Vec<SpecTable>>;
}

/// A GSMArena device page parsed with `scraper`.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl DevicePage for HtmlPage {
    fn heading(&self) -> Option<String> {
        self.document.select(&HEADING).next().map(inner_text)
    }

    fn image_src(&self) -> Option<String> {
        self.document
            .select(&IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| src.trim().to_string())
    }

    fn highlights(&self) -> Vec<String> {
        self.document.select(&HIGHLIGHTS).map(inner_text).collect()
    }

    fn spec_tables(&self) -> Option<Vec<SpecTable>> {
        let container = self.document.select(&SPECS_LIST).next()?;
        let tables = container
            .select(&TABLE)
            .map(|table| SpecTable::new(table.select(&ROW).map(parse_row).collect()))
            .collect();
        Some(tables)
    }
}

fn parse_row(row: ElementRef<'_>) -> SpecRow {
    // The site styles category headers with `text-transform: uppercase`, and
    // the rendered form ("MAIN CAMERA") is what category names are keyed on.
    let header = row
        .select(&HEADER_CELL)
        .next()
        .map(|th| inner_text(th).to_uppercase());
    let title = row.select(&TITLE_CELL).next().map(inner_text);
    let info = row.select(&INFO_CELL).next().map(inner_text);

    let field = match (title, info) {
        (Some(title), Some(info)) => Some(SpecField { title, info }),
        _ => None,
    };

    SpecRow { header, field }
}

/// Text content of an element as a browser would render it: `<br>` becomes
/// a newline and the result is trimmed (including `&nbsp;`).
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out.trim().to_string()
}
