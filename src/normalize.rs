//! Reshape a [`RawRecord`] into the fixed [`FormattedRecord`] schema.
//!
//! The schema is the [`SCHEMA`] table: one [`FieldRule`] per output field,
//! in output order. Every section and field in it is always present in the
//! result; anything the raw specs lack comes out as an empty string.

use crate::models::{FormattedRecord, RawRecord};

/// Where an output field gets its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// First non-empty value among `labels` under `category`.
    Lookup {
        category: &'static str,
        labels: &'static [&'static str],
    },
    /// The whitespace token right before `marker` in the source value,
    /// e.g. `5000` out of `Li-Po 5000 mAh`.
    TokenBefore {
        category: &'static str,
        label: &'static str,
        marker: &'static str,
        occurrence: Occurrence,
    },
    /// `prefix` followed by the source value, or by `fallback` when the
    /// label is missing. A present but empty value is kept as is.
    Flag {
        category: &'static str,
        label: &'static str,
        prefix: &'static str,
        fallback: &'static str,
    },
    /// Not provided by the site; always empty.
    Placeholder,
}

/// Which occurrence of a marker a derived field reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    /// Storage strings list one variant per comma; the last one is the
    /// largest configuration.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub section: &'static str,
    pub field: &'static str,
    pub source: FieldSource,
}

const fn lookup(
    section: &'static str,
    field: &'static str,
    category: &'static str,
    labels: &'static [&'static str],
) -> FieldRule {
    FieldRule {
        section,
        field,
        source: FieldSource::Lookup { category, labels },
    }
}

const fn placeholder(section: &'static str, field: &'static str) -> FieldRule {
    FieldRule {
        section,
        field,
        source: FieldSource::Placeholder,
    }
}

pub const SCHEMA: &[FieldRule] = &[
    // Camera
    lookup(
        "Camera",
        "Main camera:",
        "MAIN CAMERA",
        &["Single", "Triple", "Dual", "Quad", "Penta"],
    ),
    lookup("Camera", "Flash:", "MAIN CAMERA", &["Features"]),
    lookup("Camera", "Front:", "SELFIE CAMERA", &["Single", "Dual"]),
    lookup("Camera", "Video recording:", "MAIN CAMERA", &["Video"]),
    // Design
    lookup("Design", "Dimensions:", "BODY", &["Dimensions"]),
    lookup("Design", "Weight:", "BODY", &["Weight"]),
    lookup("Design", "Colors:", "MISC", &["Colors"]),
    placeholder("Design", "Materials:"),
    placeholder("Design", "Biometrics:"),
    placeholder("Design", "Resistance:"),
    // Battery
    lookup("Battery", "Type:", "BATTERY", &["Type"]),
    FieldRule {
        section: "Battery",
        field: "Capacity:",
        source: FieldSource::TokenBefore {
            category: "BATTERY",
            label: "Type",
            marker: "mAh",
            occurrence: Occurrence::First,
        },
    },
    lookup("Battery", "Charging:", "BATTERY", &["Charging"]),
    // Display
    lookup("Display", "Size:", "DISPLAY", &["Size"]),
    lookup("Display", "Resolution:", "DISPLAY", &["Resolution"]),
    lookup("Display", "Technology:", "DISPLAY", &["Type"]),
    placeholder("Display", "Refresh rate:"),
    // Cellular
    lookup("Cellular", "5G:", "NETWORK", &["Technology"]),
    lookup("Cellular", "SIM type:", "BODY", &["SIM"]),
    // Hardware
    lookup("Hardware", "OS:", "PLATFORM", &["OS"]),
    lookup("Hardware", "Processor:", "PLATFORM", &["CPU"]),
    lookup("Hardware", "Internal storage:", "MEMORY", &["Internal"]),
    FieldRule {
        section: "Hardware",
        field: "RAM:",
        source: FieldSource::TokenBefore {
            category: "MEMORY",
            label: "Internal",
            marker: "RAM",
            occurrence: Occurrence::Last,
        },
    },
    placeholder("Hardware", "Device type:"),
    // Multimedia
    lookup("Multimedia", "Speakers:", "SOUND", &["Loudspeaker"]),
    lookup("Multimedia", "Headphones:", "SOUND", &["3.5mm jack"]),
    // Connectivity & Features
    lookup("Connectivity & Features", "USB:", "COMMS", &["USB"]),
    lookup("Connectivity & Features", "Wi-Fi:", "COMMS", &["WLAN"]),
    lookup("Connectivity & Features", "Bluetooth:", "COMMS", &["Bluetooth"]),
    lookup("Connectivity & Features", "Location:", "COMMS", &["Positioning"]),
    FieldRule {
        section: "Connectivity & Features",
        field: "Other:",
        source: FieldSource::Flag {
            category: "COMMS",
            label: "NFC",
            prefix: "NFC: ",
            fallback: "No",
        },
    },
    lookup("Connectivity & Features", "Sensors:", "FEATURES", &["Sensors"]),
];

/// Normalize one raw record. Pure: the same input always gives the same
/// output, and missing data never fails.
pub fn normalize(raw: &RawRecord) -> FormattedRecord {
    normalize_with(SCHEMA, raw)
}

/// Normalize against a caller-supplied schema.
pub fn normalize_with(schema: &[FieldRule], raw: &RawRecord) -> FormattedRecord {
    let mut formatted = FormattedRecord::default();
    for rule in schema {
        formatted.set(rule.section, rule.field, resolve(&rule.source, raw));
    }
    formatted
}

fn resolve(source: &FieldSource, raw: &RawRecord) -> String {
    let non_empty = |category: &str, label: &str| {
        raw.field(category, label).filter(|value| !value.is_empty())
    };

    match *source {
        FieldSource::Lookup { category, labels } => labels
            .iter()
            .find_map(|label| non_empty(category, *label))
            .unwrap_or_default()
            .to_string(),
        FieldSource::TokenBefore {
            category,
            label,
            marker,
            occurrence,
        } => non_empty(category, label)
            .and_then(|value| match occurrence {
                Occurrence::First => token_before(value, marker),
                Occurrence::Last => token_before_last(value, marker),
            })
            .unwrap_or_default()
            .to_string(),
        FieldSource::Flag {
            category,
            label,
            prefix,
            fallback,
        } => format!("{}{}", prefix, raw.field(category, label).unwrap_or(fallback)),
        FieldSource::Placeholder => String::new(),
    }
}

/// Find the first whitespace token equal to `marker` and return the token
/// before it. A number glued to the marker (`5000mAh`) counts too.
/// Surrounding `,;()` are ignored when comparing.
pub fn token_before<'a>(value: &'a str, marker: &str) -> Option<&'a str> {
    let tokens = marker_tokens(value);
    (0..tokens.len()).find_map(|index| value_at_marker(&tokens, index, marker))
}

/// Like [`token_before`], but reads the last occurrence of `marker`:
/// `128GB 8GB RAM, 256GB 12GB RAM` gives `12GB`.
pub fn token_before_last<'a>(value: &'a str, marker: &str) -> Option<&'a str> {
    let tokens = marker_tokens(value);
    (0..tokens.len())
        .rev()
        .find_map(|index| value_at_marker(&tokens, index, marker))
}

fn marker_tokens(value: &str) -> Vec<&str> {
    value
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| matches!(c, ',' | ';' | '(' | ')')))
        .collect()
}

fn value_at_marker<'a>(tokens: &[&'a str], index: usize, marker: &str) -> Option<&'a str> {
    let token = tokens[index];
    if token == marker {
        return index.checked_sub(1).map(|prev| tokens[prev]);
    }
    token
        .strip_suffix(marker)
        .filter(|number| {
            !number.is_empty() && number.chars().all(|c| c.is_ascii_digit() || c == '.')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpecSheet;
    use indexmap::IndexMap;

    fn record(specs: &[(&str, &[(&str, &str)])]) -> RawRecord {
        let mut sheet = SpecSheet::new();
        for (category, fields) in specs {
            let entry = sheet.entry(category.to_string()).or_insert_with(IndexMap::new);
            for (label, value) in *fields {
                entry.insert(label.to_string(), value.to_string());
            }
        }
        RawRecord {
            url: None,
            name: "Test".to_string(),
            image: None,
            highlights: vec![],
            specs: sheet,
        }
    }

    fn assert_full_shape(formatted: &FormattedRecord) {
        for rule in SCHEMA {
            assert!(
                formatted.get(rule.section, rule.field).is_some(),
                "missing {} / {}",
                rule.section,
                rule.field
            );
        }
    }

    #[test]
    fn test_empty_specs_keeps_full_shape() {
        let formatted = normalize(&record(&[]));
        assert_full_shape(&formatted);

        let sections: Vec<&str> = formatted.sections.keys().map(String::as_str).collect();
        assert_eq!(
            sections,
            [
                "Camera",
                "Design",
                "Battery",
                "Display",
                "Cellular",
                "Hardware",
                "Multimedia",
                "Connectivity & Features",
            ]
        );
        assert_eq!(formatted.get("Battery", "Capacity:"), Some(""));
        assert_eq!(formatted.get("Hardware", "RAM:"), Some(""));
        assert_eq!(formatted.get("Connectivity & Features", "Other:"), Some("NFC: No"));
    }

    #[test]
    fn test_schema_has_no_duplicate_fields() {
        let formatted = normalize(&record(&[]));
        let total: usize = formatted.sections.values().map(IndexMap::len).sum();
        assert_eq!(total, SCHEMA.len());
    }

    #[test]
    fn test_direct_lookups() {
        let raw = record(&[
            ("DISPLAY", &[("Type", "AMOLED"), ("Size", "6.7 inches"), ("Resolution", "1080 x 2400")]),
            ("BODY", &[("SIM", "Nano-SIM"), ("Weight", "190 g")]),
            ("MISC", &[("Colors", "Black, Blue")]),
        ]);
        let formatted = normalize(&raw);

        assert_eq!(formatted.get("Display", "Technology:"), Some("AMOLED"));
        assert_eq!(formatted.get("Display", "Size:"), Some("6.7 inches"));
        assert_eq!(formatted.get("Cellular", "SIM type:"), Some("Nano-SIM"));
        assert_eq!(formatted.get("Design", "Colors:"), Some("Black, Blue"));
        assert_eq!(formatted.get("Design", "Materials:"), Some(""));
        assert_full_shape(&formatted);
    }

    #[test]
    fn test_missing_category_gives_empty_fields() {
        let raw = record(&[("BATTERY", &[("Type", "Li-Po 5000 mAh")])]);
        let formatted = normalize(&raw);

        for field in ["Size:", "Resolution:", "Technology:", "Refresh rate:"] {
            assert_eq!(formatted.get("Display", field), Some(""));
        }
    }

    #[test]
    fn test_candidate_labels_first_non_empty_wins() {
        let raw = record(&[("MAIN CAMERA", &[("Single", ""), ("Triple", "50 MP, f/1.8"), ("Dual", "12 MP")])]);
        let formatted = normalize(&raw);
        assert_eq!(formatted.get("Camera", "Main camera:"), Some("50 MP, f/1.8"));

        let raw = record(&[("MAIN CAMERA", &[("Dual", "12 MP")])]);
        assert_eq!(normalize(&raw).get("Camera", "Main camera:"), Some("12 MP"));
    }

    #[test]
    fn test_battery_capacity() {
        let raw = record(&[("BATTERY", &[("Type", "Li-Po 5000 mAh")])]);
        assert_eq!(normalize(&raw).get("Battery", "Capacity:"), Some("5000"));

        let raw = record(&[("BATTERY", &[("Type", "Li-Po")])]);
        let formatted = normalize(&raw);
        assert_eq!(formatted.get("Battery", "Capacity:"), Some(""));
        assert_eq!(formatted.get("Battery", "Type:"), Some("Li-Po"));
    }

    #[test]
    fn test_ram_from_internal_storage() {
        let raw = record(&[("MEMORY", &[("Internal", "256GB 8GB RAM")])]);
        assert_eq!(normalize(&raw).get("Hardware", "RAM:"), Some("8GB"));

        let raw = record(&[("MEMORY", &[("Internal", "128GB 8GB RAM, 256GB 12GB RAM")])]);
        assert_eq!(normalize(&raw).get("Hardware", "RAM:"), Some("12GB"));

        let raw = record(&[("MEMORY", &[("Internal", "64GB")])]);
        assert_eq!(normalize(&raw).get("Hardware", "RAM:"), Some(""));
    }

    #[test]
    fn test_nfc_composite() {
        let raw = record(&[("COMMS", &[("NFC", "Yes")])]);
        assert_eq!(
            normalize(&raw).get("Connectivity & Features", "Other:"),
            Some("NFC: Yes")
        );

        let raw = record(&[("COMMS", &[("NFC", "")])]);
        assert_eq!(
            normalize(&raw).get("Connectivity & Features", "Other:"),
            Some("NFC: ")
        );

        let raw = record(&[("COMMS", &[("USB", "USB Type-C 2.0")])]);
        assert_eq!(
            normalize(&raw).get("Connectivity & Features", "Other:"),
            Some("NFC: No")
        );
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = record(&[
            ("NETWORK", &[("Technology", "GSM / LTE / 5G")]),
            ("COMMS", &[("WLAN", "Wi-Fi 802.11 a/b/g/n/ac"), ("USB", "USB Type-C 2.0")]),
        ]);
        let first = serde_json::to_string_pretty(&normalize(&raw)).unwrap();
        let second = serde_json::to_string_pretty(&normalize(&raw)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_schema() {
        let schema = [lookup("Only", "OS:", "PLATFORM", &["OS"])];
        let raw = record(&[("PLATFORM", &[("OS", "Android 15")])]);
        let formatted = normalize_with(&schema, &raw);
        assert_eq!(formatted.sections.len(), 1);
        assert_eq!(formatted.get("Only", "OS:"), Some("Android 15"));
    }

    #[test]
    fn test_token_before() {
        assert_eq!(token_before("Li-Po 5000 mAh", "mAh"), Some("5000"));
        assert_eq!(token_before("Li-Ion 4500 mAh, non-removable", "mAh"), Some("4500"));
        assert_eq!(token_before("Li-Po 5000mAh", "mAh"), Some("5000"));
        assert_eq!(token_before("Li-Po", "mAh"), None);
        assert_eq!(token_before("mAh only", "mAh"), None);
        assert_eq!(token_before("", "RAM"), None);
        // glued suffix only counts for numbers
        assert_eq!(token_before("NoRAM here", "RAM"), None);
    }

    #[test]
    fn test_token_before_last() {
        assert_eq!(
            token_before_last("128GB 8GB RAM, 256GB 8GB RAM, 256GB 12GB RAM", "RAM"),
            Some("12GB")
        );
        assert_eq!(token_before_last("256GB 8GB RAM", "RAM"), Some("8GB"));
        assert_eq!(token_before_last("64GB", "RAM"), None);
        assert_eq!(
            token_before("128GB 8GB RAM, 256GB 12GB RAM", "RAM"),
            Some("8GB")
        );
    }
}
