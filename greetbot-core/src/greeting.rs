//! Greeting localization for the `/start` command.

/// Locale table for the greeting. First entry is the fallback.
const GREETINGS: &[(&str, &str)] = &[
    ("en", "Hello, {name}! I am up and running."),
    ("es", "¡Hola, {name}! Estoy en marcha."),
    ("ru", "Привет, {name}! Я запущен и работаю."),
];

/// Renders the greeting for the given locale with `{name}` interpolated.
/// Region-tagged codes (`es-MX`, `ru-RU`) match on the primary language
/// subtag. Unknown or absent locales fall back to English; an absent
/// username is rendered as the empty string by the caller.
pub fn greeting(locale: Option<&str>, name: &str) -> String {
    let lang = locale
        .and_then(|tag| tag.split(['-', '_']).next())
        .unwrap_or("en");
    let template = GREETINGS
        .iter()
        .find(|(code, _)| *code == lang)
        .map(|(_, template)| *template)
        .unwrap_or(GREETINGS[0].1);
    template.replace("{name}", name)
}
