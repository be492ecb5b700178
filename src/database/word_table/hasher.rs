use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Стратегия хеширования ключа таблицы.
///
/// Таблица берёт `hash_bytes(key) % capacity`, поэтому реализации не обязаны
/// давать равномерное распределение: слабые хеши нужны как базовая линия
/// для замеров.
pub trait KeyHasher {
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64;

    fn name(&self) -> &'static str;
}

/// Хеш по первому байту ключа. Намеренно слабый.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TooSimpleHasher;

/// djb2 Дэна Бернштейна: `hash = hash * 33 + byte`, начальное значение 5381.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Djb2Hasher;

/// "lose lose": сумма байтов ключа в 32-битной арифметике.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoseLoseHasher;

/// Обёртка над произвольной функцией `&[u8] -> u64`.
#[derive(Clone, Copy)]
pub struct FnHasher<F> {
    func: F,
    name: &'static str,
}

/// Выбор одного из трёх встроенных хешей во время выполнения.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum HashKind {
    #[serde(alias = "too-simple")]
    #[value(alias = "too-simple")]
    Trivial,
    #[default]
    Djb2,
    #[serde(alias = "loselose")]
    #[value(alias = "loselose")]
    LoseLose,
}

/// Ошибка разбора [`HashKind`] из строки.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hash function '{0}', expected one of: trivial, djb2, lose-lose")]
pub struct ParseHashKindError(String);

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl<F> FnHasher<F>
where
    F: Fn(&[u8]) -> u64,
{
    pub fn new(
        name: &'static str,
        func: F,
    ) -> Self {
        Self { func, name }
    }
}

impl HashKind {
    /// Все встроенные хеши в порядке их номеров в отчёте замеров.
    pub const ALL: [HashKind; 3] = [HashKind::Trivial, HashKind::Djb2, HashKind::LoseLose];

    /// Номер хеша в отчёте замеров: 0, 1, 2.
    pub fn ordinal(self) -> usize {
        match self {
            HashKind::Trivial => 0,
            HashKind::Djb2 => 1,
            HashKind::LoseLose => 2,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl KeyHasher for TooSimpleHasher {
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        // Пустой ключ даёт 0.
        bytes.first().copied().map_or(0, u64::from)
    }

    fn name(&self) -> &'static str {
        "trivial"
    }
}

impl KeyHasher for Djb2Hasher {
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        bytes.iter().fold(5381u64, |hash, &b| {
            (hash << 5).wrapping_add(hash).wrapping_add(u64::from(b))
        })
    }

    fn name(&self) -> &'static str {
        "djb2"
    }
}

impl KeyHasher for LoseLoseHasher {
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        let sum = bytes
            .iter()
            .fold(0u32, |hash, &b| hash.wrapping_add(u32::from(b)));
        u64::from(sum)
    }

    fn name(&self) -> &'static str {
        "lose-lose"
    }
}

impl<F> KeyHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> u64,
{
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        (self.func)(bytes)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl KeyHasher for HashKind {
    #[inline]
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        match self {
            HashKind::Trivial => TooSimpleHasher.hash_bytes(bytes),
            HashKind::Djb2 => Djb2Hasher.hash_bytes(bytes),
            HashKind::LoseLose => LoseLoseHasher.hash_bytes(bytes),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            HashKind::Trivial => TooSimpleHasher.name(),
            HashKind::Djb2 => Djb2Hasher.name(),
            HashKind::LoseLose => LoseLoseHasher.name(),
        }
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        (**self).hash_bytes(bytes)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for Box<H> {
    fn hash_bytes(
        &self,
        bytes: &[u8],
    ) -> u64 {
        (**self).hash_bytes(bytes)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("FnHasher").field("name", &self.name).finish()
    }
}

impl fmt::Display for HashKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashKind {
    type Err = ParseHashKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trivial" | "too-simple" | "too_simple" | "simple" => Ok(HashKind::Trivial),
            "djb2" => Ok(HashKind::Djb2),
            "lose-lose" | "loselose" | "lose_lose" => Ok(HashKind::LoseLose),
            _ => Err(ParseHashKindError(s.to_string())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
