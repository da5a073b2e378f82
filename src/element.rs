use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Classification used for tile colouring and the detail badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    DiatomicNonmetal,
    NobleGas,
    AlkaliMetal,
    AlkalineEarthMetal,
    Metalloid,
    PolyatomicNonmetal,
    PostTransitionMetal,
    TransitionMetal,
    Lanthanide,
    Actinide,
    Unknown,
}

impl ElementCategory {
    pub const ALL: [ElementCategory; 11] = [
        ElementCategory::DiatomicNonmetal,
        ElementCategory::NobleGas,
        ElementCategory::AlkaliMetal,
        ElementCategory::AlkalineEarthMetal,
        ElementCategory::Metalloid,
        ElementCategory::PolyatomicNonmetal,
        ElementCategory::PostTransitionMetal,
        ElementCategory::TransitionMetal,
        ElementCategory::Lanthanide,
        ElementCategory::Actinide,
        ElementCategory::Unknown,
    ];

    /// Kebab-case tag used in persisted records.
    pub fn tag(self) -> &'static str {
        match self {
            ElementCategory::DiatomicNonmetal => "diatomic-nonmetal",
            ElementCategory::NobleGas => "noble-gas",
            ElementCategory::AlkaliMetal => "alkali-metal",
            ElementCategory::AlkalineEarthMetal => "alkaline-earth-metal",
            ElementCategory::Metalloid => "metalloid",
            ElementCategory::PolyatomicNonmetal => "polyatomic-nonmetal",
            ElementCategory::PostTransitionMetal => "post-transition-metal",
            ElementCategory::TransitionMetal => "transition-metal",
            ElementCategory::Lanthanide => "lanthanide",
            ElementCategory::Actinide => "actinide",
            ElementCategory::Unknown => "unknown",
        }
    }

    /// Parses a tag, mapping anything unrecognised to [`ElementCategory::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.tag() == tag.trim())
            .unwrap_or(ElementCategory::Unknown)
    }
}

impl Serialize for ElementCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ElementCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single element as shown on the table, in the detail view and in the quiz.
///
/// The atomic number is the only identity; every other field may be replaced
/// by a user edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub number: u32,
    pub symbol: String,
    /// English name.
    pub name: String,
    /// Korean name, used as the quiz answer label.
    pub name_ko: String,
    pub category: ElementCategory,
    #[serde(default, deserialize_with = "lenient_number")]
    pub atomic_mass: Option<f64>,
    /// Phase at standard conditions ("Gas", "Liquid", "Solid").
    pub phase: String,
    /// g/cm³
    #[serde(default, deserialize_with = "lenient_number")]
    pub density: Option<f64>,
    /// Kelvin
    #[serde(default, deserialize_with = "lenient_number")]
    pub melt: Option<f64>,
    /// Kelvin
    #[serde(default, deserialize_with = "lenient_number")]
    pub boil: Option<f64>,
    #[serde(default)]
    pub discovered_by: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    pub electron_configuration: String,
    pub period: u32,
    /// IUPAC group, 0 for the f-block rows.
    pub group: u32,
    /// Grid column (1-based).
    pub xpos: u32,
    /// Grid row (1-based).
    pub ypos: u32,
    /// Reference URL.
    pub source: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub summary_ko: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

/// Accepts numbers, numeric strings, empty strings and null. Anything that is
/// not a number is read as absent.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value: Option<LenientNumber> = Option::deserialize(deserializer)?;

    Ok(match value {
        Some(LenientNumber::Number(number)) => Some(number),
        Some(LenientNumber::Text(text)) => parse_optional_number(&text),
        None => None,
    })
}

fn parse_optional_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown element field: {name}")]
    UnknownField { name: String },
    #[error("the atomic number identifies an element and cannot be edited")]
    IdentityField,
}

/// Fields that the detail view lets a user change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementField {
    Symbol,
    Name,
    NameKo,
    Category,
    AtomicMass,
    Phase,
    Density,
    Melt,
    Boil,
    DiscoveredBy,
    Appearance,
    ElectronConfiguration,
    Source,
    Summary,
    SummaryKo,
}

impl ElementField {
    pub const ALL: [ElementField; 15] = [
        ElementField::Symbol,
        ElementField::Name,
        ElementField::NameKo,
        ElementField::Category,
        ElementField::AtomicMass,
        ElementField::Phase,
        ElementField::Density,
        ElementField::Melt,
        ElementField::Boil,
        ElementField::DiscoveredBy,
        ElementField::Appearance,
        ElementField::ElectronConfiguration,
        ElementField::Source,
        ElementField::Summary,
        ElementField::SummaryKo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ElementField::Symbol => "symbol",
            ElementField::Name => "name",
            ElementField::NameKo => "name_ko",
            ElementField::Category => "category",
            ElementField::AtomicMass => "atomic_mass",
            ElementField::Phase => "phase",
            ElementField::Density => "density",
            ElementField::Melt => "melt",
            ElementField::Boil => "boil",
            ElementField::DiscoveredBy => "discovered_by",
            ElementField::Appearance => "appearance",
            ElementField::ElectronConfiguration => "electron_configuration",
            ElementField::Source => "source",
            ElementField::Summary => "summary",
            ElementField::SummaryKo => "summary_ko",
        }
    }

    pub fn parse(name: &str) -> Result<Self, EditError> {
        let name = name.trim();
        if name == "number" {
            return Err(EditError::IdentityField);
        }

        Self::ALL
            .into_iter()
            .find(|field| field.key() == name)
            .ok_or_else(|| EditError::UnknownField {
                name: name.to_string(),
            })
    }
}

impl ElementRecord {
    /// Returns a copy with `field` replaced by the raw user input.
    ///
    /// Every input is accepted. Numeric fields store text that does not parse
    /// as absent.
    pub fn with_field(&self, field: ElementField, raw: &str) -> ElementRecord {
        let mut edited = self.clone();

        match field {
            ElementField::Symbol => edited.symbol = raw.to_string(),
            ElementField::Name => edited.name = raw.to_string(),
            ElementField::NameKo => edited.name_ko = raw.to_string(),
            ElementField::Category => edited.category = ElementCategory::from_tag(raw),
            ElementField::AtomicMass => edited.atomic_mass = parse_optional_number(raw),
            ElementField::Phase => edited.phase = raw.to_string(),
            ElementField::Density => edited.density = parse_optional_number(raw),
            ElementField::Melt => edited.melt = parse_optional_number(raw),
            ElementField::Boil => edited.boil = parse_optional_number(raw),
            ElementField::DiscoveredBy => edited.discovered_by = optional_text(raw),
            ElementField::Appearance => edited.appearance = optional_text(raw),
            ElementField::ElectronConfiguration => edited.electron_configuration = raw.to_string(),
            ElementField::Source => edited.source = raw.to_string(),
            ElementField::Summary => edited.summary = raw.to_string(),
            ElementField::SummaryKo => edited.summary_ko = raw.to_string(),
        }

        edited
    }

    /// Current value of `field` as the text an edit form would pre-fill.
    pub fn field_text(&self, field: ElementField) -> String {
        fn number_text(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        match field {
            ElementField::Symbol => self.symbol.clone(),
            ElementField::Name => self.name.clone(),
            ElementField::NameKo => self.name_ko.clone(),
            ElementField::Category => self.category.tag().to_string(),
            ElementField::AtomicMass => number_text(self.atomic_mass),
            ElementField::Phase => self.phase.clone(),
            ElementField::Density => number_text(self.density),
            ElementField::Melt => number_text(self.melt),
            ElementField::Boil => number_text(self.boil),
            ElementField::DiscoveredBy => self.discovered_by.clone().unwrap_or_default(),
            ElementField::Appearance => self.appearance.clone().unwrap_or_default(),
            ElementField::ElectronConfiguration => self.electron_configuration.clone(),
            ElementField::Source => self.source.clone(),
            ElementField::Summary => self.summary.clone(),
            ElementField::SummaryKo => self.summary_ko.clone(),
        }
    }

    pub fn mass_label(&self) -> String {
        match self.atomic_mass {
            Some(mass) => format!("{:.3}", mass),
            None => "N/A".to_string(),
        }
    }

    pub fn density_label(&self) -> String {
        match self.density {
            Some(density) => format!("{} g/cm³", density),
            None => "N/A".to_string(),
        }
    }

    pub fn melt_label(&self) -> String {
        kelvin_label(self.melt)
    }

    pub fn boil_label(&self) -> String {
        kelvin_label(self.boil)
    }

    pub fn discoverer_label(&self) -> &str {
        self.discovered_by.as_deref().unwrap_or("알려지지 않음")
    }

    /// Localized summary, falling back to the English one when it is empty.
    pub fn summary_text(&self) -> &str {
        if self.summary_ko.trim().is_empty() {
            &self.summary
        } else {
            &self.summary_ko
        }
    }
}

fn kelvin_label(value: Option<f64>) -> String {
    match value {
        Some(kelvin) => format!("{} K", kelvin),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for ElementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} / {})", self.number, self.symbol, self.name, self.name_ko)
    }
}
