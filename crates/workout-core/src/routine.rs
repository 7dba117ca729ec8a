//! Routine suggestions
//!
//! A fixed weekly split: each weekday maps to the muscle groups worth
//! training that day. Sunday is the rest day.

use std::iter::FusedIterator;

use crate::domain::{ItemDraft, ValidationError, Weekday};

/// Weekly split, Sunday first
pub const ROUTINE: [(Weekday, &[&str]); 7] = [
    (Weekday::Domingo, &[]),
    (Weekday::Segunda, &["Peito", "Tríceps", "Ombros"]),
    (Weekday::Terca, &["Costas", "Bíceps", "Antebraço"]),
    (Weekday::Quarta, &["Quadríceps", "Posterior de coxa", "Panturrilha"]),
    (Weekday::Quinta, &["Ombros", "Trapézio", "Abdômen"]),
    (Weekday::Sexta, &["Peito", "Costas", "Braços"]),
    (Weekday::Sabado, &["Glúteos", "Cardio"]),
];

pub fn muscle_groups(day: Weekday) -> &'static [&'static str] {
    ROUTINE
        .iter()
        .find(|(entry, _)| *entry == day)
        .map(|(_, groups)| *groups)
        .unwrap_or(&[])
}

/// A suggestion that only exists until promoted to an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedItem {
    pub text: String,
    pub muscle_group: String,
    pub day: Weekday,
    pub suggested: bool,
}

impl SuggestedItem {
    fn new(day: Weekday, muscle_group: &str) -> Self {
        Self {
            text: format!("Treino de {}", muscle_group),
            muscle_group: muscle_group.to_string(),
            day,
            suggested: true,
        }
    }

    /// Drop the suggestion marker and turn it into a creatable draft.
    pub fn into_draft(self) -> ItemDraft {
        ItemDraft::new(self.text)
            .with_muscle_group(self.muscle_group)
            .with_day(Some(self.day))
    }
}

/// Lazy sequence of suggestions for one day; clone it to start over.
#[derive(Debug, Clone)]
pub struct Suggestions {
    day: Weekday,
    groups: &'static [&'static str],
    next: usize,
}

impl Suggestions {
    pub fn day(&self) -> Weekday {
        self.day
    }
}

impl Iterator for Suggestions {
    type Item = SuggestedItem;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.groups.get(self.next)?;
        self.next += 1;
        Some(SuggestedItem::new(self.day, group))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.groups.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Suggestions {}

impl FusedIterator for Suggestions {}

pub fn generate(day: Weekday) -> Suggestions {
    Suggestions {
        day,
        groups: muscle_groups(day),
        next: 0,
    }
}

/// Like [`generate`], starting from a day label such as "Segunda".
pub fn generate_for(label: &str) -> Result<Suggestions, ValidationError> {
    Ok(generate(label.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_day_is_empty() {
        let mut suggestions = generate_for("Domingo").unwrap();
        assert_eq!(suggestions.len(), 0);
        assert!(suggestions.next().is_none());
    }

    #[test]
    fn test_monday_yields_configured_order() {
        let groups: Vec<String> = generate_for("Segunda")
            .unwrap()
            .map(|s| s.muscle_group)
            .collect();
        assert_eq!(groups, vec!["Peito", "Tríceps", "Ombros"]);
    }

    #[test]
    fn test_suggestions_are_tagged() {
        for day in Weekday::ALL {
            for suggestion in generate(day) {
                assert!(suggestion.suggested);
                assert_eq!(suggestion.day, day);
            }
        }
    }

    #[test]
    fn test_sequence_is_restartable() {
        let original = generate(Weekday::Quarta);
        let mut partial = original.clone();
        partial.next();
        assert_eq!(partial.len(), 2);

        let first: Vec<_> = original.clone().collect();
        let second: Vec<_> = original.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_every_day_has_an_entry() {
        for day in Weekday::ALL {
            assert!(ROUTINE.iter().any(|(entry, _)| *entry == day));
        }
        assert!(muscle_groups(Weekday::Domingo).is_empty());
    }

    #[test]
    fn test_promotion_strips_marker() {
        let suggestion = generate(Weekday::Sexta).next().unwrap();
        let draft = suggestion.into_draft();
        assert_eq!(draft.text, "Treino de Peito");
        assert_eq!(draft.muscle_group.as_deref(), Some("Peito"));
        assert_eq!(draft.day, Some(Weekday::Sexta));
    }

    #[test]
    fn test_only_rest_days_have_no_suggestions() {
        for day in Weekday::ALL {
            let suggestions = generate(day);
            assert_eq!(suggestions.day(), day);
            assert_eq!(suggestions.len() == 0, day.is_rest_day(), "{}", day);
        }
    }

    #[test]
    fn test_unknown_label() {
        assert!(generate_for("Feriado").is_err());
    }
}
