use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::model::Resource;

pub const DOCS_HOST: &str = "https://developers.google.com";

static FIELD_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table\b[^>]*\bid\s*=\s*["']field-table["'][^>]*>(.*?)</table>"#).unwrap()
});
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(td|th)\b[^>]*>(.*?)</(?:td|th)>").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").unwrap());
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));").unwrap());

/// Parse the overview page's resource table into base resources (no details).
pub fn scrape_resources(html: &str) -> Vec<Resource> {
    let table = FIELD_TABLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html);

    let mut seen = HashSet::new();
    let mut resources = Vec::new();

    for row in ROW_RE.captures_iter(table) {
        let Some(resource) = parse_row(&row[1]) else {
            continue;
        };
        if !seen.insert(resource.name.clone()) {
            debug!("Skipping duplicate resource row: {}", resource.name);
            continue;
        }
        resources.push(resource);
    }

    info!("Scraped {} resources from overview table", resources.len());
    resources
}

fn parse_row(row: &str) -> Option<Resource> {
    let cells: Vec<(bool, &str)> = CELL_RE
        .captures_iter(row)
        .map(|c| (c[1].eq_ignore_ascii_case("td"), c.get(2).map_or("", |m| m.as_str())))
        .collect();
    // Name and description come from the row's first and last cells, and both must be <td>.
    let (first, last) = match (cells.first()?, cells.last()?) {
        ((true, first), (true, last)) => (*first, *last),
        _ => return None,
    };

    let link = LINK_RE.captures(first)?;
    let name = cell_text(&link[2]);
    let href = HREF_RE
        .captures(&link[1])
        .and_then(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| decode_entities(m.as_str().trim()))
        .unwrap_or_default();
    let url = absolute_url(&href);
    let description = cell_text(last);

    if name.is_empty() || url.is_empty() || description.is_empty() {
        return None;
    }
    Some(Resource::new(name, url, description))
}

fn absolute_url(href: &str) -> String {
    if href.is_empty() {
        String::new()
    } else if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", DOCS_HOST, href)
    }
}

/// Visible text of a cell: tags stripped, entities decoded, whitespace collapsed.
fn cell_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    let decoded = decode_entities(&stripped);
    WS_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Decode numeric references directly and named ones through `html_escape`.
/// One pass, so "&amp;lt;" decodes to "&lt;" and no further.
fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
                (_, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
                _ => return html_escape::decode_html_entities(&caps[0]).into_owned(),
            };
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
