//! Reply text rendering. Presentation only, no state.

use cinescope_core::{FilmCounter, HistoryEntry, ResolvedLookup};

const MAX_DESCRIPTION_CHARS: usize = 500;

/// Welcome card for /start and /help.
pub fn welcome() -> String {
    "🎬 Привет, кинопутешественник! \n\
     Я — твой проводник в мире кинематографа, где каждый кадр дышит магией, а сюжеты оставляют след в душе.\n\
     Что я умею?\n \
     🔍 Найти любой фильм или сериал — от культовой классики до свежего релиза.\n\
     🎯 Подскажу, где его можно посмотреть онлайн\n\
     📜 /history — посмотреть историю запросов\n\
     📊 /stats — узнать статистику по фильмам\n\
     Просто напиши название — и погружайся в кино!"
        .to_string()
}

/// Shown when the provider returns zero candidates.
pub fn not_found() -> String {
    "Фильм не найден 😢 Проверь название и попробуй ещё раз.".to_string()
}

/// Shown when a lookup fails for any non-"no match" reason.
pub fn lookup_failed() -> String {
    "Что-то пошло не так 😢 Попробуй ещё раз чуть позже.".to_string()
}

fn optional_rating(rating: Option<f32>) -> String {
    match rating {
        Some(r) => r.to_string(),
        None => "—".to_string(),
    }
}

fn joined_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}

/// First line of the description, capped at 500 characters.
fn short_description(description: Option<&str>) -> String {
    let text = description.unwrap_or("нет описания");
    let first_line = text.lines().next().unwrap_or(text);
    if first_line.chars().count() > MAX_DESCRIPTION_CHARS {
        let truncated: String = first_line.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}

/// HTML film card used as message text or photo caption.
pub fn film_card(resolved: &ResolvedLookup) -> String {
    let details = &resolved.details;

    let mut card = format!(
        "🎥 <b>{}</b>\n\
         🌍 Оригинальное название: {}\n\
         📅 Год: {}\n\
         🏳️ Страна: {}\n\
         🎬 Жанры: {}\n\
         ⭐ Рейтинг Кинопоиск: {}\n\
         ⭐ Рейтинг IMDb: {}\n\
         📖 Описание: {}",
        details.display_name,
        details.original_name,
        details.year_label(),
        joined_or_dash(&details.countries),
        joined_or_dash(&details.genres),
        optional_rating(details.rating_kinopoisk),
        optional_rating(details.rating_imdb),
        short_description(details.description.as_deref()),
    );

    if let Some(ref link) = resolved.link {
        card.push_str(&format!("\nПосмотреть можно здесь: {}", link));
    }

    card
}

/// History projection rendering.
pub fn history_list(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "История запросов пуста.".to_string();
    }

    let mut text = "📜 История запросов:\n".to_string();
    for entry in entries {
        text.push_str(&format!(
            "Запрос: {}, Время: {}\n",
            entry.query_text,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    text
}

/// Stats projection rendering.
pub fn stats_list(counters: &[FilmCounter]) -> String {
    if counters.is_empty() {
        return "Статистика пуста.".to_string();
    }

    let mut text = "📊 Статистика:\n".to_string();
    for counter in counters {
        text.push_str(&format!(
            "Фильм: {}, Показов: {}\n",
            counter.film_name, counter.search_count
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cinescope_core::testing::fixtures;

    #[test]
    fn test_film_card_full() {
        let resolved = ResolvedLookup {
            details: fixtures::film_details(301, "Матрица", 1999),
            link: Some("https://example.com/watch".to_string()),
        };

        let card = film_card(&resolved);
        assert!(card.contains("🎥 <b>Матрица</b>"));
        assert!(card.contains("📅 Год: 1999"));
        assert!(card.contains("🏳️ Страна: США"));
        assert!(card.contains("🎬 Жанры: фантастика, боевик"));
        assert!(card.contains("Посмотреть можно здесь: https://example.com/watch"));
    }

    #[test]
    fn test_film_card_missing_fields_render_dashes() {
        let mut details = fixtures::film_details(1, "Без названия", 2000);
        details.year = None;
        details.countries.clear();
        details.genres.clear();
        details.rating_kinopoisk = None;
        details.rating_imdb = None;
        details.description = None;

        let card = film_card(&ResolvedLookup {
            details,
            link: None,
        });
        assert!(card.contains("📅 Год: —"));
        assert!(card.contains("🏳️ Страна: —"));
        assert!(card.contains("⭐ Рейтинг Кинопоиск: —"));
        assert!(card.contains("📖 Описание: нет описания"));
        assert!(!card.contains("Посмотреть можно здесь"));
    }

    #[test]
    fn test_description_first_line_only() {
        let mut details = fixtures::film_details(1, "Фильм", 2000);
        details.description = Some("Первая строка.\nВторая строка.".to_string());

        let card = film_card(&ResolvedLookup {
            details,
            link: None,
        });
        assert!(card.contains("📖 Описание: Первая строка."));
        assert!(!card.contains("Вторая строка"));
    }

    #[test]
    fn test_description_truncated_at_500_chars() {
        let mut details = fixtures::film_details(1, "Фильм", 2000);
        details.description = Some("ж".repeat(600));

        let card = film_card(&ResolvedLookup {
            details,
            link: None,
        });
        let description_line = card
            .lines()
            .find(|l| l.starts_with("📖"))
            .unwrap()
            .trim_start_matches("📖 Описание: ");
        assert_eq!(description_line.chars().count(), 500);
        assert!(description_line.ends_with("..."));
    }

    #[test]
    fn test_history_list_empty() {
        assert_eq!(history_list(&[]), "История запросов пуста.");
    }

    #[test]
    fn test_history_list_renders_entries() {
        let entries = vec![HistoryEntry {
            user_id: 42,
            query_text: "матрица".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }];

        let text = history_list(&entries);
        assert!(text.starts_with("📜 История запросов:"));
        assert!(text.contains("Запрос: матрица, Время: 2024-05-01 12:30:00"));
    }

    #[test]
    fn test_stats_list_empty() {
        assert_eq!(stats_list(&[]), "Статистика пуста.");
    }

    #[test]
    fn test_stats_list_renders_counters() {
        let counters = vec![
            FilmCounter {
                user_id: 42,
                film_name: "Матрица".to_string(),
                search_count: 3,
            },
            FilmCounter {
                user_id: 42,
                film_name: "Брат".to_string(),
                search_count: 1,
            },
        ];

        let text = stats_list(&counters);
        assert!(text.starts_with("📊 Статистика:"));
        assert!(text.contains("Фильм: Матрица, Показов: 3"));
        assert!(text.contains("Фильм: Брат, Показов: 1"));
    }
}
