use rowforge_core::ColumnSpec;
use rowforge_dict::Category;

/// Tag tokens recognized by the resolver.
pub const TAG_NAME: &str = "@name";
pub const TAG_SURNAME: &str = "@surname";
pub const TAG_INTEGER: &str = "@integer";
pub const TAG_DECIMAL: &str = "@decimal";
pub const TAG_STREET: &str = "@street";
pub const TAG_CITY: &str = "@city";
pub const TAG_STATE: &str = "@state";
pub const TAG_COUNTRY: &str = "@country";
pub const TAG_DATE: &str = "@date";
pub const TAG_DATETIME: &str = "@datetime";
pub const TAG_TIMESTAMP: &str = "@timestamp";
pub const TAG_YES_NO: &str = "@yn";
pub const TAG_BOOL: &str = "@bool";
pub const TAG_COLNAME: &str = "@colname";

/// Built-in validated patterns, each registered under a tag-like key.
pub const PATTERN_PHONE: &str = r"^(\d{9}|\+\d{11})$";
pub const PATTERN_EMAIL: &str = r"^[a-z]{5,10}@[a-z]{5,10}\.(com|net|org)$";
pub const PATTERN_POSTAL_CODE: &str = r"^(\d{2})-(\d{3})$";
pub const PATTERN_PESEL: &str = r"^(\d{11})$";
pub const PATTERN_NIP: &str = r"^(\d{10})$";
pub const PATTERN_REGON: &str = r"^(\d{9})$";
pub const PATTERN_IBAN: &str = r"^([a-zA-Z]{2}[0-9]{2}[a-zA-Z0-9]{4}[0-9]{7}([a-zA-Z0-9]?){0,16})$";
pub const PATTERN_WORD: &str = r"^([A-Z][a-z]+)(-[A-Z][a-z]+)?$";

/// Kind of date/time value to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Date,
    DateTime,
    Timestamp,
}

/// Token pair for boolean synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolKind {
    YesNo,
    TrueFalse,
}

/// Generation strategy derived from one column specification.
///
/// Computed per column per invocation; carries no identity beyond a single
/// resolution. `ColumnName` is a distinct success variant, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Dictionary(Category),
    Pattern(String),
    Numeric { precision: u32 },
    Date(DateKind),
    Boolean(BoolKind),
    ColumnName,
}

/// Classify a column specification into a generation strategy.
///
/// Recognized tags map through a fixed table; any other non-empty tag is
/// treated as an anchored regex to synthesize against. With no tag at all the
/// column name itself becomes a literal pattern, so the value echoes the
/// name. Pure classification, no I/O.
pub fn resolve(spec: &ColumnSpec) -> Strategy {
    let tag = match spec.tag.as_deref() {
        None | Some("") => return Strategy::Pattern(regex::escape(&spec.name)),
        Some(tag) => tag,
    };

    match tag {
        TAG_NAME => Strategy::Dictionary(Category::Name),
        TAG_SURNAME => Strategy::Dictionary(Category::Surname),
        TAG_STREET => Strategy::Dictionary(Category::Street),
        TAG_CITY => Strategy::Dictionary(Category::City),
        TAG_STATE => Strategy::Dictionary(Category::State),
        TAG_COUNTRY => Strategy::Dictionary(Category::Country),
        TAG_INTEGER => Strategy::Numeric { precision: 0 },
        TAG_DECIMAL => Strategy::Numeric {
            precision: spec.precision.unwrap_or(0),
        },
        TAG_DATE => Strategy::Date(DateKind::Date),
        TAG_DATETIME => Strategy::Date(DateKind::DateTime),
        TAG_TIMESTAMP => Strategy::Date(DateKind::Timestamp),
        TAG_YES_NO => Strategy::Boolean(BoolKind::YesNo),
        TAG_BOOL => Strategy::Boolean(BoolKind::TrueFalse),
        TAG_COLNAME => Strategy::ColumnName,
        other => Strategy::Pattern(
            builtin_pattern(other)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    }
}

/// Pattern registered under a built-in key, if any.
pub fn builtin_pattern(tag: &str) -> Option<&'static str> {
    match tag {
        "@phone" => Some(PATTERN_PHONE),
        "@mail" => Some(PATTERN_EMAIL),
        "@postcode" => Some(PATTERN_POSTAL_CODE),
        "@pesel" => Some(PATTERN_PESEL),
        "@nip" => Some(PATTERN_NIP),
        "@regon" => Some(PATTERN_REGON),
        "@iban" => Some(PATTERN_IBAN),
        "@word" => Some(PATTERN_WORD),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with_tag(tag: &str) -> ColumnSpec {
        let mut spec = ColumnSpec::named("col");
        spec.tag = Some(tag.to_string());
        spec
    }

    #[test]
    fn recognized_tags_map_to_fixed_strategies() {
        assert_eq!(
            resolve(&spec_with_tag(TAG_CITY)),
            Strategy::Dictionary(Category::City)
        );
        assert_eq!(
            resolve(&spec_with_tag(TAG_TIMESTAMP)),
            Strategy::Date(DateKind::Timestamp)
        );
        assert_eq!(
            resolve(&spec_with_tag(TAG_YES_NO)),
            Strategy::Boolean(BoolKind::YesNo)
        );
        assert_eq!(resolve(&spec_with_tag(TAG_COLNAME)), Strategy::ColumnName);
    }

    #[test]
    fn integer_tag_forces_zero_precision() {
        let mut spec = spec_with_tag(TAG_INTEGER);
        spec.precision = Some(4);
        assert_eq!(resolve(&spec), Strategy::Numeric { precision: 0 });
    }

    #[test]
    fn decimal_tag_uses_requested_precision() {
        let mut spec = spec_with_tag(TAG_DECIMAL);
        spec.precision = Some(2);
        assert_eq!(resolve(&spec), Strategy::Numeric { precision: 2 });
    }

    #[test]
    fn builtin_key_expands_to_registered_pattern() {
        assert_eq!(
            resolve(&spec_with_tag("@mail")),
            Strategy::Pattern(PATTERN_EMAIL.to_string())
        );
    }

    #[test]
    fn unrecognized_tag_is_a_user_pattern() {
        assert_eq!(
            resolve(&spec_with_tag(r"^\d{3}$")),
            Strategy::Pattern(r"^\d{3}$".to_string())
        );
    }

    #[test]
    fn missing_tag_falls_back_to_escaped_column_name() {
        let spec = ColumnSpec::named("unit_price");
        assert_eq!(resolve(&spec), Strategy::Pattern("unit_price".to_string()));
    }
}
