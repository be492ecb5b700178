//! Нормализация строк входного файла и поисковых запросов.
//!
//! Слово: непрерывная последовательность латинских букв. Заглавные
//! `A-Z` переводятся в строчные, всё остальное (цифры, пунктуация, пробелы,
//! не-ASCII) считается разделителем.

/// Разбивает строку на нормализованные слова в порядке появления.
///
/// Повторы внутри строки сохраняются: каждое вхождение даёт отдельное слово.
pub fn normalize_line(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
}

/// Нормализует поисковый запрос: берёт буквенный префикс строки и переводит
/// его в нижний регистр.
///
/// Разбор останавливается на первом не-буквенном символе, поэтому
/// `"Hello world\n"` даёт `"hello"`, а `"42"` даёт пустую строку.
pub fn normalize_query(line: &str) -> String {
    line.chars()
        .take_while(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
