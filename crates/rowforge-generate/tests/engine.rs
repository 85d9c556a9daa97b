use std::collections::{BTreeMap, HashMap};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rowforge_core::{ColumnSpec, ProviderFormats};
use rowforge_dict::{Category, DictError, Dictionary};
use rowforge_generate::{
    GenerationError, Generator, Strategy, Synthesizer, Value, resolve, strategy,
};

fn dictionary() -> Dictionary {
    let mut entries = BTreeMap::new();
    entries.insert(
        Category::Name,
        vec!["Jan".to_string(), "Anna".to_string(), "Katarzyna".to_string()],
    );
    entries.insert(
        Category::Surname,
        vec!["Kowalski".to_string(), "O'Brien".to_string()],
    );
    entries.insert(Category::Street, vec!["Dluga".to_string()]);
    entries.insert(
        Category::City,
        vec!["Gdansk".to_string(), "Warszawa".to_string()],
    );
    entries.insert(Category::State, vec!["Pomorskie".to_string()]);
    entries.insert(Category::Country, vec!["Poland".to_string()]);
    Dictionary::new(entries).expect("valid dictionary")
}

fn spec(name: &str, tag: Option<&str>) -> ColumnSpec {
    let mut spec = ColumnSpec::named(name);
    spec.tag = tag.map(str::to_string);
    spec
}

fn synthesize_text(spec: &ColumnSpec, seed: u64) -> String {
    let dict = dictionary();
    let formats = ProviderFormats::default();
    let synthesizer = Synthesizer::new(&dict, &formats);
    let resolved = resolve(spec);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    match synthesizer
        .synthesize(spec, &resolved, &mut rng)
        .expect("synthesis succeeds")
    {
        Value::Text(value) => value,
        Value::Numeric(value) => value,
        Value::Keyword(value) => value.to_string(),
    }
}

#[test]
fn builtin_patterns_round_trip() {
    let builtins = [
        strategy::PATTERN_PHONE,
        strategy::PATTERN_EMAIL,
        strategy::PATTERN_POSTAL_CODE,
        strategy::PATTERN_PESEL,
        strategy::PATTERN_NIP,
        strategy::PATTERN_REGON,
        strategy::PATTERN_IBAN,
        strategy::PATTERN_WORD,
    ];

    for pattern in builtins {
        let verifier = regex::Regex::new(pattern).expect("pattern compiles");
        for seed in 0..20 {
            let value = synthesize_text(&spec("col", Some(pattern)), seed);
            assert!(
                verifier.is_match(&value),
                "'{value}' does not match {pattern}"
            );
        }
    }
}

#[test]
fn supported_pattern_constructs_round_trip() {
    let patterns = [
        r"^(foo|bar|baz)$",
        r"^[A-Fa-f0-9]{8}$",
        r"^a+b*c?$",
        r"^[a-z]{2,5}(-[0-9]{1,3})?$",
        r"literal-text",
        r"^x(yz){3}$",
    ];

    for pattern in patterns {
        let inner = pattern.trim_start_matches('^').trim_end_matches('$');
        let verifier = regex::Regex::new(&format!("^(?:{inner})$")).expect("pattern compiles");
        for seed in 0..20 {
            let value = synthesize_text(&spec("col", Some(pattern)), seed);
            assert!(
                verifier.is_match(&value),
                "'{value}' does not match {pattern}"
            );
        }
    }
}

#[test]
fn unsupported_pattern_construct_fails_with_pattern_error() {
    let dict = dictionary();
    let formats = ProviderFormats::default();
    let synthesizer = Synthesizer::new(&dict, &formats);
    let spec = spec("token", Some(r"^a(?=b)$"));
    let resolved = resolve(&spec);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let err = synthesizer
        .synthesize(&spec, &resolved, &mut rng)
        .expect_err("lookahead is not synthesizable");
    assert!(matches!(err, GenerationError::Pattern { ref column, .. } if column == "token"));
}

#[test]
fn numeric_synthesis_hits_exact_digit_budget() {
    let dict = dictionary();
    let formats = ProviderFormats::default();
    let synthesizer = Synthesizer::new(&dict, &formats);

    for length in 1..=20_u32 {
        for precision in 0..length {
            let mut spec = spec("amount", Some("@decimal"));
            spec.length = Some(length);
            spec.precision = Some(precision);
            let resolved = resolve(&spec);
            let mut rng = ChaCha8Rng::seed_from_u64(u64::from(length * 31 + precision));

            let value = synthesizer
                .synthesize(&spec, &resolved, &mut rng)
                .expect("synthesis succeeds");
            let Value::Numeric(text) = value else {
                panic!("numeric strategy must yield a numeric literal");
            };

            let digits = text.chars().filter(char::is_ascii_digit).count();
            assert_eq!(digits, length as usize, "total digits for '{text}'");
            let fraction = text
                .split_once('.')
                .map(|(_, frac)| frac.len())
                .unwrap_or(0);
            assert_eq!(fraction, precision as usize, "fraction digits for '{text}'");
            assert!(
                text.chars().all(|c| c.is_ascii_digit() || c == '.'),
                "'{text}' carries non-digit noise"
            );
            assert!(!text.starts_with('0'), "'{text}' wastes its digit budget");
        }
    }
}

#[test]
fn numeric_precision_must_stay_below_length() {
    let dict = dictionary();
    let formats = ProviderFormats::default();
    let synthesizer = Synthesizer::new(&dict, &formats);
    let mut spec = spec("amount", Some("@decimal"));
    spec.length = Some(3);
    spec.precision = Some(3);
    let resolved = resolve(&spec);
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let err = synthesizer
        .synthesize(&spec, &resolved, &mut rng)
        .expect_err("precision == length is unsatisfiable");
    assert!(matches!(err, GenerationError::Constraint { ref column, .. } if column == "amount"));
}

#[test]
fn dictionary_lookup_respects_length_limit() {
    let mut spec = spec("city", Some("@city"));
    spec.length = Some(3);
    for seed in 0..10 {
        let value = synthesize_text(&spec, seed);
        assert!(value.chars().count() <= 3, "'{value}' exceeds length 3");
    }
}

#[test]
fn missing_category_fails_with_category_not_found() {
    let mut entries = BTreeMap::new();
    entries.insert(Category::City, vec!["Gdansk".to_string()]);
    let dict = Dictionary::new(entries).expect("valid dictionary");
    let formats = ProviderFormats::default();
    let synthesizer = Synthesizer::new(&dict, &formats);
    let spec = spec("region", Some("@state"));
    let resolved = resolve(&spec);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let err = synthesizer
        .synthesize(&spec, &resolved, &mut rng)
        .expect_err("state category is absent");
    match err {
        GenerationError::Dictionary { column, source } => {
            assert_eq!(column, "region");
            assert!(matches!(source, DictError::CategoryNotFound(ref c) if c == "state"));
        }
        other => panic!("expected dictionary error, got {other:?}"),
    }
}

#[test]
fn boolean_synthesis_uses_fixed_token_pairs() {
    for seed in 0..10 {
        let yn = synthesize_text(&spec("active", Some("@yn")), seed);
        assert!(yn == "Y" || yn == "N", "unexpected yes/no token '{yn}'");

        let b = synthesize_text(&spec("active", Some("@bool")), seed);
        assert!(b == "true" || b == "false", "unexpected bool token '{b}'");
    }
}

#[test]
fn date_synthesis_uses_provider_layouts() {
    let date_re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("regex");
    let ts_re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("regex");

    for seed in 0..10 {
        let date = synthesize_text(&spec("created", Some("@date")), seed);
        assert!(date_re.is_match(&date), "'{date}' is not a date");

        let datetime = synthesize_text(&spec("created", Some("@datetime")), seed);
        assert!(ts_re.is_match(&datetime), "'{datetime}' is not a date-time");
        assert!(
            datetime.ends_with("00:00:00"),
            "'{datetime}' should pin midnight"
        );

        let timestamp = synthesize_text(&spec("created", Some("@timestamp")), seed);
        assert!(ts_re.is_match(&timestamp), "'{timestamp}' is not a timestamp");
    }
}

#[test]
fn colname_tag_echoes_the_column_name() {
    assert_eq!(resolve(&spec("id", Some("@colname"))), Strategy::ColumnName);
    assert_eq!(synthesize_text(&spec("id", Some("@colname")), 5), "id");
}

#[test]
fn integer_tag_with_length_three_yields_three_digits() {
    let mut spec = spec("age", Some("@integer"));
    spec.length = Some(3);
    for seed in 0..10 {
        let value = synthesize_text(&spec, seed);
        assert_eq!(value.len(), 3, "'{value}' is not three digits");
        assert!(value.chars().all(|c| c.is_ascii_digit()));
        assert!(!value.starts_with('0'));
    }
}

#[test]
fn ssn_pattern_yields_eleven_digits() {
    let spec = spec("ssn", Some(r"^(\d{11})$"));
    for seed in 0..10 {
        let value = synthesize_text(&spec, seed);
        assert_eq!(value.len(), 11);
        assert!(value.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn row_respects_order_and_inclusion() {
    let mut specs = HashMap::new();
    let mut city = spec("city", Some("@city"));
    city.order = 2;
    specs.insert("c2".to_string(), city);
    let mut id = spec("id", Some("@colname"));
    id.order = 1;
    specs.insert("c1".to_string(), id);
    let mut secret = spec("secret", Some("@name"));
    secret.order = 0;
    secret.include = false;
    specs.insert("c0".to_string(), secret);

    let generator = Generator::with_seed(dictionary(), ProviderFormats::default(), 42);
    let row = generator.query("customers", &specs).expect("row assembles");

    assert!(row.starts_with("INSERT INTO customers (id, city) VALUES ('id', "));
    assert!(!row.contains("secret"));
}

#[test]
fn row_quotes_text_and_leaves_numerics_bare() {
    let mut specs = HashMap::new();
    let mut surname = spec("surname", Some("@surname"));
    surname.order = 1;
    specs.insert("c1".to_string(), surname);
    let mut age = spec("age", Some("@integer"));
    age.order = 2;
    age.length = Some(2);
    specs.insert("c2".to_string(), age);
    let mut active = spec("active", Some("@bool"));
    active.order = 3;
    specs.insert("c3".to_string(), active);

    let generator = Generator::with_seed(dictionary(), ProviderFormats::default(), 7);
    let row = generator.query("people", &specs).expect("row assembles");

    let values = row
        .split_once("VALUES (")
        .map(|(_, rest)| rest.trim_end_matches(");"))
        .expect("statement has a VALUES list");
    let parts: Vec<&str> = values.split(", ").collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[0].starts_with('\'') && parts[0].ends_with('\''));
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert!(parts[2] == "true" || parts[2] == "false");
}

#[test]
fn embedded_quotes_are_doubled_in_sql_literals() {
    let mut entries = BTreeMap::new();
    entries.insert(Category::Surname, vec!["O'Brien".to_string()]);
    let dict = Dictionary::new(entries).expect("valid dictionary");
    let mut specs = HashMap::new();
    specs.insert("c1".to_string(), spec("surname", Some("@surname")));

    let generator = Generator::with_seed(dict, ProviderFormats::default(), 1);
    let row = generator.query("people", &specs).expect("row assembles");
    assert!(row.contains("'O''Brien'"));
}

#[test]
fn untagged_column_echoes_its_name() {
    let mut specs = HashMap::new();
    specs.insert("c1".to_string(), spec("status", None));

    let generator = Generator::with_seed(dictionary(), ProviderFormats::default(), 11);
    let row = generator.query("orders", &specs).expect("row assembles");
    assert_eq!(row, "INSERT INTO orders (status) VALUES ('status');");
}

#[test]
fn fixed_seed_reproduces_rows_across_facades() {
    let mut specs = HashMap::new();
    let mut city = spec("city", Some("@city"));
    city.order = 1;
    specs.insert("c1".to_string(), city);
    let mut amount = spec("amount", Some("@decimal"));
    amount.order = 2;
    amount.length = Some(6);
    amount.precision = Some(2);
    specs.insert("c2".to_string(), amount);

    let a = Generator::with_seed(dictionary(), ProviderFormats::default(), 99);
    let b = Generator::with_seed(dictionary(), ProviderFormats::default(), 99);

    for _ in 0..5 {
        assert_eq!(
            a.query("t", &specs).expect("row"),
            b.query("t", &specs).expect("row")
        );
    }
}
