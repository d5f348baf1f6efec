use serde::{Deserialize, Serialize};

use crate::{generators::RandomSource, registry::ClassId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketEvent {
    pub text: &'static str,
    pub polarity: Polarity,
}

pub const POSITIVE_EVENTS: [&str; 5] = [
    "Governo amplia incentivos para energia limpa",
    "Safra recorde impulsiona exportações",
    "Alta global no preço dos minérios",
    "Queda dos juros aquece o crédito",
    "Nova parceria tecnológica anima investidores",
];

pub const NEGATIVE_EVENTS: [&str; 5] = [
    "Rompimento de barragem afeta mercado",
    "Estiagem prolongada impacta setores",
    "Vendaval causa danos estruturais",
    "Crise imobiliária abala confiança",
    "Falha em servidores de IA paralisa operações",
];

type ImpactTable = [(&'static str, &'static [&'static str])];

const NINE_A_IMPACTS: &ImpactTable = &[
    ("Governo amplia incentivos para energia limpa", &["ECOSOL", "SMARTAL"]),
    ("Safra recorde impulsiona exportações", &["AGROSOJA", "FUTUROBANK"]),
    ("Alta global no preço dos minérios", &["MAXXIMINÉRIOS"]),
    ("Queda dos juros aquece o crédito", &["FUTUROBANK", "AGROSOJA"]),
    ("Nova parceria tecnológica anima investidores", &["SMARTAL", "ECOSOL"]),
    ("Rompimento de barragem afeta mercado", &["MAXXIMINÉRIOS", "FUTUROBANK"]),
    ("Estiagem prolongada impacta setores", &["AGROSOJA", "ECOSOL"]),
    ("Vendaval causa danos estruturais", &["ECOSOL", "AGROSOJA"]),
    ("Crise imobiliária abala confiança", &["FUTUROBANK"]),
    ("Falha em servidores de IA paralisa operações", &["SMARTAL", "FUTUROBANK"]),
];

const NINE_B_IMPACTS: &ImpactTable = &[
    ("Governo amplia incentivos para energia limpa", &["EOLION"]),
    ("Safra recorde impulsiona exportações", &["GALINDOS'S COFFEE", "ALFABANK"]),
    ("Alta global no preço dos minérios", &["MINEX"]),
    ("Queda dos juros aquece o crédito", &["ALFABANK", "SANTOS TECNOVA"]),
    ("Nova parceria tecnológica anima investidores", &["SANTOS TECNOVA", "EOLION"]),
    ("Rompimento de barragem afeta mercado", &["MINEX", "ALFABANK"]),
    ("Estiagem prolongada impacta setores", &["GALINDOS'S COFFEE", "EOLION"]),
    ("Vendaval causa danos estruturais", &["EOLION", "GALINDOS'S COFFEE"]),
    ("Crise imobiliária abala confiança", &["ALFABANK"]),
    ("Falha em servidores de IA paralisa operações", &["SANTOS TECNOVA", "ALFABANK"]),
];

pub fn events_for(polarity: Polarity) -> &'static [&'static str] {
    match polarity {
        Polarity::Positive => &POSITIVE_EVENTS,
        Polarity::Negative => &NEGATIVE_EVENTS,
    }
}

/// Companies of `class` that an event with `text` moves. Unknown text moves nothing.
pub fn affected_companies(class: ClassId, text: &str) -> &'static [&'static str] {
    let table = match class {
        ClassId::NineA => NINE_A_IMPACTS,
        ClassId::NineB => NINE_B_IMPACTS,
    };

    table
        .iter()
        .find(|(event, _)| *event == text)
        .map(|(_, companies)| *companies)
        .unwrap_or(&[])
}

/// Draws polarity first, then a uniform event within that polarity's catalog.
pub fn draw_event(rng: &mut dyn RandomSource, negative_probability: f64) -> MarketEvent {
    let polarity = if rng.next_unit() < negative_probability {
        Polarity::Negative
    } else {
        Polarity::Positive
    };
    let catalog = events_for(polarity);
    let text = catalog[rng.pick_index(catalog.len())];

    MarketEvent { text, polarity }
}
