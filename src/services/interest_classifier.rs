use crate::models::activity::ActivityCategory;

/// Keyword rules, checked in order. The first rule with a matching keyword wins.
const KEYWORD_RULES: &[(&[&str], ActivityCategory)] = &[
    (&["gastronom", "comida"], ActivityCategory::Gastronomy),
    (&["aventura", "deporte"], ActivityCategory::Adventure),
    (&["cultura", "historia", "museo"], ActivityCategory::Culture),
    (&["noche", "discoteca", "bar"], ActivityCategory::Nightlife),
    (&["relax", "spa", "descanso"], ActivityCategory::Relax),
];

/// Maps a free-text interest onto an activity category by case-insensitive
/// substring match.
pub fn classify(interest: &str) -> Option<ActivityCategory> {
    let interest = interest.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| interest.contains(k)))
        .map(|(_, category)| *category)
}
