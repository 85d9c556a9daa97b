use serde::{Deserialize, Serialize};

/// Caller-supplied description of one output column.
///
/// A spec can come from a request form (see [`crate::form`]), a spec file, or
/// be defaulted from live [`Describe`] metadata. It is consumed per request
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Sort key fixing the column's position in the assembled row.
    #[serde(default)]
    pub order: i32,
    /// Column name; unique within one table request.
    pub name: String,
    /// Declared database type. Advisory only.
    #[serde(default)]
    pub column_type: String,
    /// Requested output length in characters or significant digits.
    #[serde(default)]
    pub length: Option<u32>,
    /// Digits after the decimal separator for numeric synthesis.
    #[serde(default)]
    pub precision: Option<u32>,
    /// Reserved; generation currently ignores nullability.
    #[serde(default)]
    pub nullable: bool,
    /// Excluded columns are skipped entirely.
    #[serde(default = "default_include")]
    pub include: bool,
    /// Generation tag (e.g. `@city`) or an explicit regex pattern.
    #[serde(default)]
    pub tag: Option<String>,
}

fn default_include() -> bool {
    true
}

impl ColumnSpec {
    /// Spec with only a name set; everything else defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            order: 0,
            name: name.into(),
            column_type: String::new(),
            length: None,
            precision: None,
            nullable: false,
            include: true,
            tag: None,
        }
    }

    /// Default a spec from live schema metadata.
    ///
    /// Length and precision carry over only when the database reports a
    /// positive value; no tag is assumed, so generation falls back to the
    /// column-name echo unless the caller sets one.
    pub fn from_describe(describe: &Describe, order: i32) -> Self {
        Self {
            order,
            name: describe.column_name.clone(),
            column_type: describe.column_type.clone(),
            length: u32::try_from(describe.column_length).ok().filter(|l| *l > 0),
            precision: u32::try_from(describe.column_precision)
                .ok()
                .filter(|p| *p > 0),
            nullable: describe.nullable,
            include: true,
            tag: None,
        }
    }
}

/// Live column metadata as reported by a provider's `describe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Describe {
    pub column_name: String,
    pub column_type: String,
    pub column_length: i32,
    pub column_precision: i32,
    pub nullable: bool,
}

/// Date and date-time layout strings owned by a provider dialect.
///
/// The generation engine treats these as opaque chrono format tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderFormats {
    pub date_format: String,
    pub date_time_format: String,
}

impl Default for ProviderFormats {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            date_time_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_describe_drops_non_positive_length_and_precision() {
        let describe = Describe {
            column_name: "price".to_string(),
            column_type: "numeric".to_string(),
            column_length: 12,
            column_precision: 0,
            nullable: true,
        };

        let spec = ColumnSpec::from_describe(&describe, 3);
        assert_eq!(spec.order, 3);
        assert_eq!(spec.name, "price");
        assert_eq!(spec.length, Some(12));
        assert_eq!(spec.precision, None);
        assert!(spec.nullable);
        assert!(spec.include);
        assert!(spec.tag.is_none());
    }

    #[test]
    fn column_spec_round_trips_through_toml_and_json() {
        let mut spec = ColumnSpec::named("city");
        spec.order = 2;
        spec.length = Some(32);
        spec.tag = Some("@city".to_string());

        let text = toml::to_string(&spec).expect("serialize to toml");
        let back: ColumnSpec = toml::from_str(&text).expect("parse toml");
        assert_eq!(back.name, "city");
        assert_eq!(back.order, 2);
        assert_eq!(back.length, Some(32));
        assert_eq!(back.tag.as_deref(), Some("@city"));

        let text = serde_json::to_string(&spec).expect("serialize to json");
        let back: ColumnSpec = serde_json::from_str(&text).expect("parse json");
        assert_eq!(back.name, "city");
        assert_eq!(back.precision, None);
    }

    #[test]
    fn spec_file_entry_defaults_omitted_fields() {
        let spec: ColumnSpec = toml::from_str(r#"name = "status""#).expect("parse toml");
        assert_eq!(spec.name, "status");
        assert_eq!(spec.order, 0);
        assert!(spec.include, "columns default to included");
        assert!(spec.tag.is_none());
    }
}
