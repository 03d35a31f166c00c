use serde::{Deserialize, Serialize};

use crate::constants::{METHOD_GET, METHOD_POST};

/// Semantic category of an entity, derived from its raw kind label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BinarySensor,
    Sensor,
    TextSensor,
    Switch,
    Button,
    Light,
    Fan,
    Cover,
    Climate,
    Number,
    Select,
    Lock,
    Time,
    Text,
    MediaPlayer,
    Camera,
    Other,
}

/// Matches a raw kind label
pub type KindPredicate = fn(&str) -> bool;

/// Ordered classification rules, most specific first.
///
/// "BinarySensor" and "TextSensor" kinds also contain "Sensor". A kind naming
/// "Binary" or "Text" together with "Sensor" is never a plain sensor, however
/// the two words are spelled apart.
pub const CLASSIFICATION_RULES: &[(KindPredicate, Category)] = &[
    (|k| k.contains("Binary") && k.contains("Sensor"), Category::BinarySensor),
    (|k| k.contains("Text") && k.contains("Sensor"), Category::TextSensor),
    (
        |k| k.contains("Sensor") && !k.contains("Binary") && !k.contains("Text"),
        Category::Sensor,
    ),
    (|k| k.contains("Switch"), Category::Switch),
    (|k| k.contains("Button"), Category::Button),
    (|k| k.contains("Light"), Category::Light),
    (|k| k.contains("Fan"), Category::Fan),
    (|k| k.contains("Cover"), Category::Cover),
    (|k| k.contains("Climate"), Category::Climate),
    (|k| k.contains("Number"), Category::Number),
    (|k| k.contains("Select"), Category::Select),
    (|k| k.contains("Lock"), Category::Lock),
    (|k| k.contains("Time"), Category::Time),
    (|k| k.contains("Text"), Category::Text),
    (|k| k.contains("MediaPlayer"), Category::MediaPlayer),
    (|k| k.contains("Camera"), Category::Camera),
];

/// Classifies a raw kind label such as `"BinarySensorInfo"`. First match wins.
pub fn classify(kind: &str) -> Category {
    CLASSIFICATION_RULES
        .iter()
        .find(|(matches, _)| matches(kind))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}

/// The REST contract of a category: path prefix, methods and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub slug: &'static str,
    pub methods: &'static [&'static str],
    pub actions: &'static [&'static str],
}

const READ_ONLY: &[&str] = &[METHOD_GET];
const READ_WRITE: &[&str] = &[METHOD_GET, METHOD_POST];
const ON_OFF: &[&str] = &["turn_on", "turn_off", "toggle"];

/// Category to contract table. The order of this table is also the display
/// order of the REST surface.
pub const CONTRACTS: &[(Category, Contract)] = &[
    (
        Category::BinarySensor,
        Contract {
            slug: "binary_sensor",
            methods: READ_ONLY,
            actions: &[],
        },
    ),
    (
        Category::Sensor,
        Contract {
            slug: "sensor",
            methods: READ_ONLY,
            actions: &[],
        },
    ),
    (
        Category::TextSensor,
        Contract {
            slug: "text_sensor",
            methods: READ_ONLY,
            actions: &[],
        },
    ),
    (
        Category::Switch,
        Contract {
            slug: "switch",
            methods: READ_WRITE,
            actions: ON_OFF,
        },
    ),
    (
        Category::Button,
        Contract {
            slug: "button",
            methods: READ_WRITE,
            actions: &["press"],
        },
    ),
    (
        Category::Light,
        Contract {
            slug: "light",
            methods: READ_WRITE,
            actions: ON_OFF,
        },
    ),
    (
        Category::Fan,
        Contract {
            slug: "fan",
            methods: READ_WRITE,
            actions: ON_OFF,
        },
    ),
    (
        Category::Cover,
        Contract {
            slug: "cover",
            methods: READ_WRITE,
            actions: &["open", "close", "stop"],
        },
    ),
    (
        Category::Climate,
        Contract {
            slug: "climate",
            methods: READ_WRITE,
            actions: &["set mode, temperature"],
        },
    ),
    (
        Category::Number,
        Contract {
            slug: "number",
            methods: READ_WRITE,
            actions: &["set value"],
        },
    ),
    (
        Category::Select,
        Contract {
            slug: "select",
            methods: READ_WRITE,
            actions: &["set option"],
        },
    ),
    (
        Category::Lock,
        Contract {
            slug: "lock",
            methods: READ_WRITE,
            actions: &["lock", "unlock"],
        },
    ),
    (
        Category::Time,
        Contract {
            slug: "time",
            methods: READ_WRITE,
            actions: &["set time"],
        },
    ),
    (
        Category::Text,
        Contract {
            slug: "text",
            methods: READ_WRITE,
            actions: &["set text"],
        },
    ),
];

/// Order of the groups in the entity listing, display-only categories included.
pub const LISTING_ORDER: &[Category] = &[
    Category::BinarySensor,
    Category::Sensor,
    Category::TextSensor,
    Category::Switch,
    Category::Button,
    Category::Light,
    Category::Fan,
    Category::Cover,
    Category::Climate,
    Category::Number,
    Category::Select,
    Category::Lock,
    Category::Time,
    Category::Text,
    Category::MediaPlayer,
    Category::Camera,
    Category::Other,
];

impl Category {
    /// Returns the REST contract, `None` for categories without a REST surface.
    pub fn contract(&self) -> Option<&'static Contract> {
        CONTRACTS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, contract)| contract)
    }

    /// Position in the REST display order, `None` without a contract.
    pub fn display_rank(&self) -> Option<usize> {
        CONTRACTS.iter().position(|(category, _)| category == self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::BinarySensor => "Binary Sensor",
            Category::Sensor => "Sensor",
            Category::TextSensor => "Text Sensor",
            Category::Switch => "Switch",
            Category::Button => "Button",
            Category::Light => "Light",
            Category::Fan => "Fan",
            Category::Cover => "Cover",
            Category::Climate => "Climate",
            Category::Number => "Number",
            Category::Select => "Select",
            Category::Lock => "Lock",
            Category::Time => "Time",
            Category::Text => "Text",
            Category::MediaPlayer => "Media Player",
            Category::Camera => "Camera",
            Category::Other => "Other",
        }
    }

    /// Heading used when entities are listed by group
    pub fn group_label(&self) -> &'static str {
        match self {
            Category::BinarySensor => "Binary Sensors",
            Category::Sensor => "Sensors",
            Category::TextSensor => "Text Sensors",
            Category::Switch => "Switches",
            Category::Button => "Buttons",
            Category::Light => "Lights",
            Category::Fan => "Fans",
            Category::Cover => "Covers",
            Category::Climate => "Climate",
            Category::Number => "Numbers",
            Category::Select => "Selects",
            Category::Lock => "Locks",
            Category::Time => "Times",
            Category::Text => "Texts",
            Category::MediaPlayer => "Media Players",
            Category::Camera => "Cameras",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
