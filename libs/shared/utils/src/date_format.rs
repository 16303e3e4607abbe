use chrono::{Locale, NaiveDate, Weekday};

/// `yyyy-mm-dd`, the key format used by every availability endpoint.
pub fn yyyy_mm_dd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long French date, e.g. `4 mars 2024`.
pub fn long_french_date(date: NaiveDate) -> String {
    date.format_localized("%-d %B %Y", Locale::fr_FR).to_string()
}

/// Short and full French labels for a weekday.
pub fn french_weekday(weekday: Weekday) -> (&'static str, &'static str) {
    match weekday {
        Weekday::Mon => ("Lun", "Lundi"),
        Weekday::Tue => ("Mar", "Mardi"),
        Weekday::Wed => ("Mer", "Mercredi"),
        Weekday::Thu => ("Jeu", "Jeudi"),
        Weekday::Fri => ("Ven", "Vendredi"),
        Weekday::Sat => ("Sam", "Samedi"),
        Weekday::Sun => ("Dim", "Dimanche"),
    }
}
