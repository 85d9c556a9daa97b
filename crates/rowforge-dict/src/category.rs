use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of sample-value categories backed by the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Name,
    Surname,
    Street,
    City,
    State,
    Country,
}

impl Category {
    /// Every category, in interchange-document order.
    pub const ALL: [Category; 6] = [
        Category::Name,
        Category::Surname,
        Category::Street,
        Category::City,
        Category::State,
        Category::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Name => "name",
            Category::Surname => "surname",
            Category::Street => "street",
            Category::City => "city",
            Category::State => "state",
            Category::Country => "country",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
