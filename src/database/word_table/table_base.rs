use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use wordex_error::{TableError, TableResult};

use super::hasher::{HashKind, KeyHasher};
use crate::database::IntArray;

/// Начальная ёмкость массива значений нового узла.
const NODE_VALUES_CAPACITY: usize = 2;

/// Наименьший `max_load`, допустимый при [`ResizePolicy::Grow`]: число
/// бакетов после роста не превышает `len / MIN_GROW_LOAD` более чем вдвое.
pub const MIN_GROW_LOAD: f64 = 0.1;

/// Один элемент в цепочке коллизий: ключ, его номера строк и хвост цепочки.
struct Node {
    key: Box<str>,
    values: IntArray,
    next: Option<Box<Node>>,
}

/// Поведение таблицы при превышении `max_load`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizePolicy {
    /// Число бакетов не меняется никогда, цепочки растут без ограничений.
    /// `max_load` только хранится.
    #[default]
    Fixed,
    /// После вставки нового ключа, если `len / capacity > max_load`, число
    /// бакетов удваивается и все узлы перевешиваются в новые бакеты.
    Grow,
}

/// Сводка по распределению цепочек.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub used_buckets: usize,
    pub empty_buckets: usize,
    pub longest_chain: usize,
}

/// Хеш-таблица с цепочками: строковый ключ -> [`IntArray`] номеров строк.
///
/// **ИНВАРИАНТЫ:**
///
/// - каждый ключ хранится ровно в одном узле, и этот узел лежит в бакете
///   `hasher.hash_bytes(key) % capacity`
/// - массив значений узла никогда не пуст
/// - `len()` равно числу узлов во всех цепочках
///
/// Новые ключи добавляются в конец цепочки, повторная вставка ключа
/// дописывает значение в его массив.
pub struct WordTable<H = HashKind> {
    buckets: Vec<Option<Box<Node>>>,
    hasher: H,
    max_load: f64,
    load: usize,
    policy: ResizePolicy,
}

/// Итератор по таблице: пары `(ключ, значения)` в порядке бакетов, внутри
/// бакета в порядке цепочки.
pub struct WordTableIter<'a> {
    buckets: std::slice::Iter<'a, Option<Box<Node>>>,
    current: Option<&'a Node>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Node {
    /// Копирует ключ и заводит массив значений с первым элементом.
    fn boxed(
        key: &str,
        value: i32,
    ) -> TableResult<Box<Self>> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|_| TableError::allocation("key copy", key.len()))?;
        owned.push_str(key);

        let mut values = IntArray::with_capacity(NODE_VALUES_CAPACITY)?;
        values.push(value)?;

        Ok(Box::new(Node {
            key: owned.into_boxed_str(),
            values,
            next: None,
        }))
    }
}

impl<H> WordTable<H>
where
    H: KeyHasher,
{
    /// Создаёт таблицу на `capacity` бакетов с фиксированным размером.
    pub fn new(
        capacity: usize,
        max_load: f64,
        hasher: H,
    ) -> TableResult<Self> {
        Self::with_policy(capacity, max_load, hasher, ResizePolicy::Fixed)
    }

    /// Создаёт таблицу с явной политикой роста.
    ///
    /// Для [`ResizePolicy::Grow`] порог не может быть меньше
    /// [`MIN_GROW_LOAD`].
    pub fn with_policy(
        capacity: usize,
        max_load: f64,
        hasher: H,
        policy: ResizePolicy,
    ) -> TableResult<Self> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        if !max_load.is_finite() || max_load <= 0.0 {
            return Err(TableError::InvalidLoadFactor { max_load });
        }
        if policy == ResizePolicy::Grow && max_load < MIN_GROW_LOAD {
            return Err(TableError::InvalidLoadFactor { max_load });
        }

        let buckets = Self::alloc_buckets(capacity)?;

        Ok(WordTable {
            buckets,
            hasher,
            max_load,
            load: 0,
            policy,
        })
    }

    /// Добавляет `value` к ключу `key`.
    ///
    /// Если ключ уже есть в цепочке, значение дописывается в его массив.
    /// Иначе в конец цепочки добавляется новый узел.
    pub fn insert(
        &mut self,
        key: &str,
        value: i32,
    ) -> TableResult<()> {
        let idx = self.index(key);

        let mut cur = &mut self.buckets[idx];
        while let Some(node) = cur {
            if *node.key == *key {
                return node.values.push(value);
            }
            cur = &mut node.next;
        }
        *cur = Some(Node::boxed(key, value)?);
        self.load += 1;

        if self.policy == ResizePolicy::Grow && self.load_factor() > self.max_load {
            self.grow();
        }

        Ok(())
    }

    /// Возвращает массив значений ключа или `None`.
    ///
    /// Это живой массив таблицы: он доступен только на чтение, пока жива
    /// заимствованная ссылка.
    pub fn lookup(
        &self,
        key: &str,
    ) -> Option<&IntArray> {
        self.find(key).map(|node| &node.values)
    }

    /// Проверяет, есть ли ключ в таблице.
    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.find(key).is_some()
    }

    /// Удаляет ключ вместе со всеми его значениями.
    ///
    /// Возвращает [`TableError::KeyNotFound`], если ключа нет; таблица при
    /// этом не меняется.
    pub fn remove(
        &mut self,
        key: &str,
    ) -> TableResult<()> {
        let idx = self.index(key);

        match Self::remove_from_chain(&mut self.buckets[idx], key) {
            Some(_removed) => {
                self.load -= 1;
                Ok(())
            }
            None => {
                trace!(key, "remove: key not present");
                Err(TableError::not_found(key))
            }
        }
    }

    /// Номер бакета для ключа.
    #[inline]
    fn index(
        &self,
        key: &str,
    ) -> usize {
        (self.hasher.hash_bytes(key.as_bytes()) % self.buckets.len() as u64) as usize
    }

    fn find(
        &self,
        key: &str,
    ) -> Option<&Node> {
        let mut cur = self.buckets[self.index(key)].as_deref();
        while let Some(node) = cur {
            if *node.key == *key {
                return Some(node);
            }
            cur = node.next.as_deref();
        }
        None
    }

    /// Вынимает из цепочки первый узел с ключом `key`, подставляя на его
    /// место хвост.
    fn remove_from_chain(
        head: &mut Option<Box<Node>>,
        key: &str,
    ) -> Option<Box<Node>> {
        let mut cur = head;
        loop {
            match cur {
                None => return None,
                Some(node) if *node.key == *key => {
                    let next = node.next.take();
                    return std::mem::replace(cur, next);
                }
                Some(node) => {
                    cur = &mut node.next;
                }
            }
        }
    }

    /// Удваивает число бакетов, пока заполненность не опустится до
    /// `max_load`, и перевешивает все узлы.
    ///
    /// Если память под новые бакеты не выделилась, таблица остаётся как есть:
    /// вставка уже выполнена, а длинные цепочки лишь замедляют поиск.
    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let mut new_capacity = old_capacity;
        while self.load as f64 / new_capacity as f64 > self.max_load {
            let Some(doubled) = new_capacity.checked_mul(2) else {
                break;
            };
            new_capacity = doubled;
        }
        if new_capacity == old_capacity {
            return;
        }

        match self.rehash(new_capacity) {
            Ok(()) => debug!(
                from = old_capacity,
                to = new_capacity,
                load = self.load,
                hasher = self.hasher.name(),
                "word table resized"
            ),
            Err(err) => warn!(
                error = %err,
                capacity = old_capacity,
                "word table resize skipped"
            ),
        }
    }

    fn rehash(
        &mut self,
        new_capacity: usize,
    ) -> TableResult<()> {
        let new_buckets = Self::alloc_buckets(new_capacity)?;
        let old_buckets = std::mem::replace(&mut self.buckets, new_buckets);

        for mut entry_opt in old_buckets {
            while let Some(mut node) = entry_opt {
                entry_opt = node.next.take();

                let slot = self.index(&node.key);
                node.next = self.buckets[slot].take();
                self.buckets[slot] = Some(node);
            }
        }

        Ok(())
    }

    fn alloc_buckets(capacity: usize) -> TableResult<Vec<Option<Box<Node>>>> {
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(capacity)
            .map_err(|_| TableError::allocation("buckets", capacity))?;
        buckets.resize_with(capacity, || None);
        Ok(buckets)
    }
}

impl<H> WordTable<H> {
    /// Число различных ключей.
    #[inline]
    pub fn len(&self) -> usize {
        self.load
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.load == 0
    }

    /// Число бакетов.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    /// Текущая заполненность: `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.load as f64 / self.buckets.len() as f64
    }

    #[inline]
    pub fn policy(&self) -> ResizePolicy {
        self.policy
    }

    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Удаляет все ключи, число бакетов сохраняется.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            // Разбираем цепочку итеративно: рекурсивный drop Box-цепочки
            // длиной в сотни тысяч узлов переполнит стек.
            let mut cur = bucket.take();
            while let Some(mut node) = cur {
                cur = node.next.take();
            }
        }
        self.load = 0;
    }

    /// Возвращает итератор по парам `(&str, &IntArray)`.
    pub fn iter(&self) -> WordTableIter<'_> {
        WordTableIter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Считает занятые и пустые бакеты и длину самой длинной цепочки.
    pub fn chain_stats(&self) -> ChainStats {
        let mut stats = ChainStats::default();

        for bucket in &self.buckets {
            let mut len = 0;
            let mut cur = bucket.as_deref();
            while let Some(node) = cur {
                len += 1;
                cur = node.next.as_deref();
            }

            if len == 0 {
                stats.empty_buckets += 1;
            } else {
                stats.used_buckets += 1;
                stats.longest_chain = stats.longest_chain.max(len);
            }
        }

        stats
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для WordTable, WordTableIter
////////////////////////////////////////////////////////////////////////////////

impl<'a> Iterator for WordTableIter<'a> {
    type Item = (&'a str, &'a IntArray);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Отдаём текущий элемент цепочки, если он есть.
            if let Some(node) = self.current.take() {
                self.current = node.next.as_deref();
                return Some((&node.key, &node.values));
            }

            // Берём следующий бакет; если бакеты кончились, итерация окончена.
            self.current = self.buckets.next()?.as_deref();
        }
    }
}

impl<'a, H> IntoIterator for &'a WordTable<H> {
    type Item = (&'a str, &'a IntArray);
    type IntoIter = WordTableIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H> Drop for WordTable<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<H: KeyHasher> fmt::Debug for WordTable<H> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("WordTable")
            .field("hasher", &self.hasher.name())
            .field("capacity", &self.capacity())
            .field("len", &self.load)
            .field("max_load", &self.max_load)
            .field("policy", &self.policy)
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::word_table::hasher::{Djb2Hasher, TooSimpleHasher};

    fn values(
        table: &WordTable<impl KeyHasher>,
        key: &str,
    ) -> Option<Vec<i32>> {
        table.lookup(key).map(|a| a.iter().collect())
    }

    /// Тест проверяет базовый сценарий: повторный ключ, промах и удаление.
    #[test]
    fn test_cat_dog_scenario() {
        let mut t = WordTable::new(4, 1.0, Djb2Hasher).unwrap();
        t.insert("cat", 1).unwrap();
        t.insert("dog", 2).unwrap();
        t.insert("cat", 3).unwrap();

        assert_eq!(values(&t, "cat"), Some(vec![1, 3]));
        assert_eq!(values(&t, "dog"), Some(vec![2]));
        assert_eq!(values(&t, "bird"), None);
        assert_eq!(t.len(), 2);

        assert!(t.remove("dog").is_ok());
        assert_eq!(values(&t, "dog"), None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_invalid_construction_params() {
        assert_eq!(
            WordTable::new(0, 1.0, Djb2Hasher).unwrap_err(),
            TableError::InvalidCapacity { capacity: 0 }
        );
        assert!(matches!(
            WordTable::new(4, 0.0, Djb2Hasher).unwrap_err(),
            TableError::InvalidLoadFactor { .. }
        ));
        assert!(WordTable::new(4, f64::NAN, Djb2Hasher).is_err());
        assert!(WordTable::new(4, f64::INFINITY, Djb2Hasher).is_err());
    }

    /// Тест проверяет, что ключи с общим бакетом живут в одной цепочке и не
    /// мешают друг другу.
    #[test]
    fn test_collisions_share_a_chain() {
        let mut t = WordTable::new(8, 1.0, TooSimpleHasher).unwrap();
        t.insert("cat", 1).unwrap();
        t.insert("cow", 2).unwrap();
        t.insert("cup", 3).unwrap();
        t.insert("cow", 4).unwrap();

        let stats = t.chain_stats();
        assert_eq!(stats.used_buckets, 1);
        assert_eq!(stats.longest_chain, 3);
        assert_eq!(stats.empty_buckets, 7);

        assert_eq!(values(&t, "cat"), Some(vec![1]));
        assert_eq!(values(&t, "cow"), Some(vec![2, 4]));
        assert_eq!(values(&t, "cup"), Some(vec![3]));
    }

    /// Тест проверяет, что новые ключи идут в конец цепочки.
    #[test]
    fn test_new_keys_append_to_chain_tail() {
        let mut t = WordTable::new(1, 1.0, Djb2Hasher).unwrap();
        for (i, w) in ["one", "two", "three"].iter().enumerate() {
            t.insert(w, i as i32).unwrap();
        }
        let keys: Vec<_> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["one", "two", "three"]);
    }

    /// Тест проверяет удаление из головы, середины и хвоста цепочки.
    #[test]
    fn test_remove_head_middle_tail() {
        for victim in ["cat", "cow", "cup"] {
            let mut t = WordTable::new(4, 1.0, TooSimpleHasher).unwrap();
            t.insert("cat", 1).unwrap();
            t.insert("cow", 2).unwrap();
            t.insert("cup", 3).unwrap();

            t.remove(victim).unwrap();
            assert!(!t.contains(victim));
            assert_eq!(t.len(), 2);
            for other in ["cat", "cow", "cup"].iter().filter(|k| **k != victim) {
                assert!(t.contains(other), "{other} lost after removing {victim}");
            }
        }
    }

    #[test]
    fn test_remove_missing_leaves_table_unchanged() {
        let mut t = WordTable::new(4, 1.0, Djb2Hasher).unwrap();
        t.insert("cat", 1).unwrap();

        let err = t.remove("dog").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(t.len(), 1);
        assert_eq!(values(&t, "cat"), Some(vec![1]));
    }

    /// Тест проверяет, что при политике Fixed число бакетов не меняется.
    #[test]
    fn test_fixed_policy_never_resizes() {
        let mut t = WordTable::new(2, 0.5, Djb2Hasher).unwrap();
        for i in 0..100 {
            t.insert(&format!("w{i}"), i).unwrap();
        }
        assert_eq!(t.capacity(), 2);
        assert_eq!(t.len(), 100);
        assert!(t.load_factor() > t.max_load());
    }

    /// Тест проверяет, что слишком низкий порог запрещён только для
    /// растущей таблицы, а на пороге `MIN_GROW_LOAD` число бакетов остаётся
    /// соразмерным числу ключей.
    #[test]
    fn test_grow_rejects_tiny_max_load() {
        assert!(matches!(
            WordTable::with_policy(1, 1e-9, Djb2Hasher, ResizePolicy::Grow),
            Err(TableError::InvalidLoadFactor { .. })
        ));
        assert!(WordTable::with_policy(1, 1e-9, Djb2Hasher, ResizePolicy::Fixed).is_ok());

        let mut t =
            WordTable::with_policy(1, MIN_GROW_LOAD, Djb2Hasher, ResizePolicy::Grow).unwrap();
        t.insert("cat", 1).unwrap();
        assert_eq!(t.capacity(), 16);
        assert!(t.load_factor() <= MIN_GROW_LOAD);
    }

    /// Тест проверяет рост таблицы и сохранность данных после перевешивания.
    #[test]
    fn test_grow_policy_rehashes() {
        let mut t = WordTable::with_policy(2, 1.0, Djb2Hasher, ResizePolicy::Grow).unwrap();
        for i in 0..64 {
            t.insert(&format!("w{i}"), i).unwrap();
            t.insert(&format!("w{i}"), -i).unwrap();
        }
        assert!(t.capacity() >= 64);
        assert!(t.load_factor() <= 1.0);
        for i in 0..64 {
            assert_eq!(values(&t, &format!("w{i}")), Some(vec![i, -i]));
        }
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut t = WordTable::new(4, 1.0, Djb2Hasher).unwrap();
        t.insert("a", 1).unwrap();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), 4);
        t.insert("a", 2).unwrap();
        assert_eq!(values(&t, "a"), Some(vec![2]));
    }

    #[test]
    fn test_empty_key_is_a_valid_key() {
        let mut t = WordTable::new(4, 1.0, TooSimpleHasher).unwrap();
        t.insert("", 9).unwrap();
        assert_eq!(values(&t, ""), Some(vec![9]));
    }

    #[test]
    fn test_iteration_visits_every_key_once() {
        let mut t = WordTable::new(3, 1.0, HashKind::LoseLose).unwrap();
        t.insert("x", 1).unwrap();
        t.insert("y", 2).unwrap();
        t.insert("z", 3).unwrap();
        t.insert("x", 4).unwrap();

        let mut seen: Vec<_> = t.iter().map(|(k, v)| (k, v.len())).collect();
        seen.sort();
        assert_eq!(seen, vec![("x", 2), ("y", 1), ("z", 1)]);
    }

    #[test]
    fn test_empty_iterator() {
        let t = WordTable::new(4, 1.0, Djb2Hasher).unwrap();
        assert_eq!(t.iter().next(), None);
    }

    #[test]
    fn test_debug_shows_hasher_name() {
        let t = WordTable::new(4, 1.0, HashKind::Trivial).unwrap();
        let s = format!("{t:?}");
        assert!(s.contains("trivial"));
        assert!(s.contains("capacity: 4"));
    }
}
