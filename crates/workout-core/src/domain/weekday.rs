//! Weekday labels
//!
//! Days are keyed by their Portuguese names, which is also how they travel
//! on the wire.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Domingo,
    Segunda,
    #[serde(rename = "Terça", alias = "Terca")]
    Terca,
    Quarta,
    Quinta,
    Sexta,
    #[serde(rename = "Sábado", alias = "Sabado")]
    Sabado,
}

impl Weekday {
    /// Sunday first, matching the routine table
    pub const ALL: [Weekday; 7] = [
        Weekday::Domingo,
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
        Weekday::Sabado,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Domingo => "Domingo",
            Weekday::Segunda => "Segunda",
            Weekday::Terca => "Terça",
            Weekday::Quarta => "Quarta",
            Weekday::Quinta => "Quinta",
            Weekday::Sexta => "Sexta",
            Weekday::Sabado => "Sábado",
        }
    }

    /// Parse a label, tolerating case, missing accents and a `-feira` suffix.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'ç' => 'c',
                'á' | 'à' | 'â' | 'ã' => 'a',
                _ => c,
            })
            .collect();
        let normalized = normalized.strip_suffix("-feira").unwrap_or(&normalized);
        match normalized {
            "domingo" => Some(Weekday::Domingo),
            "segunda" => Some(Weekday::Segunda),
            "terca" => Some(Weekday::Terca),
            "quarta" => Some(Weekday::Quarta),
            "quinta" => Some(Weekday::Quinta),
            "sexta" => Some(Weekday::Sexta),
            "sabado" => Some(Weekday::Sabado),
            _ => None,
        }
    }

    pub fn is_rest_day(&self) -> bool {
        *self == Weekday::Domingo
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        Weekday::ALL[day.num_days_from_sunday() as usize]
    }

    /// Current day on the local clock
    pub fn today() -> Self {
        Self::from_chrono(chrono::Local::now().weekday())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::from_label(s).ok_or_else(|| ValidationError::UnknownWeekday(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!(Weekday::from_label("Terça"), Some(Weekday::Terca));
        assert_eq!(Weekday::from_label("terca-feira"), Some(Weekday::Terca));
        assert_eq!(Weekday::from_label(" SÁBADO "), Some(Weekday::Sabado));
        assert_eq!("Funday".parse::<Weekday>(), Err(ValidationError::UnknownWeekday("Funday".into())));
    }

    #[test]
    fn test_labels_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_label(day.label()), Some(day));
        }
    }

    #[test]
    fn test_chrono_mapping() {
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Sun), Weekday::Domingo);
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Mon), Weekday::Segunda);
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Sat), Weekday::Sabado);
    }

    #[test]
    fn test_serde_uses_accented_label() {
        assert_eq!(serde_json::to_string(&Weekday::Sabado).unwrap(), "\"Sábado\"");
        let day: Weekday = serde_json::from_str("\"Terca\"").unwrap();
        assert_eq!(day, Weekday::Terca);
    }
}
