//! English/Polish food names
//!
//! The search backend knows English names while the diary's own table is Polish.

/// (english, polish)
const FOOD_TRANSLATIONS: &[(&str, &str)] = &[
    ("egg", "jajko"),
    ("bread", "chleb"),
    ("chicken breast", "pierś z kurczaka"),
    ("pork", "wieprzowina"),
    ("beef", "wołowina"),
    ("rice", "ryż"),
    ("potato", "ziemniak"),
    ("milk", "mleko"),
    ("cheese", "ser"),
    ("yogurt", "jogurt"),
    ("apple", "jabłko"),
    ("banana", "banan"),
    ("tomato", "pomidor"),
    ("carrot", "marchewka"),
    ("salmon", "łosoś"),
    ("tuna", "tuńczyk"),
    ("oatmeal", "owsianka"),
    ("pasta", "makaron"),
    ("olive oil", "oliwa z oliwek"),
    ("butter", "masło"),
];

/// Polish name for an English one, or the input unchanged
pub fn translate_food(english_name: &str) -> String {
    let wanted = english_name.to_lowercase();
    FOOD_TRANSLATIONS
        .iter()
        .find(|(eng, _)| *eng == wanted)
        .map(|(_, pl)| pl.to_string())
        .unwrap_or_else(|| english_name.to_string())
}

/// English name for a Polish one
pub fn to_english(polish_name: &str) -> Option<&'static str> {
    let wanted = polish_name.trim().to_lowercase();
    FOOD_TRANSLATIONS
        .iter()
        .find(|(_, pl)| *pl == wanted)
        .map(|(eng, _)| *eng)
}

/// "polish (english)" hints for every pair matching `query` in either language
pub fn suggestions(query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    FOOD_TRANSLATIONS
        .iter()
        .filter(|(eng, pl)| eng.contains(&query) || pl.contains(&query))
        .map(|(eng, pl)| format!("{} ({})", pl, eng))
        .collect()
}
