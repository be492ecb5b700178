//! Динамический массив целых чисел с геометрическим ростом.
//!
//! Используется как хранилище номеров строк для одного ключа
//! [`WordTable`](crate::database::WordTable). Ёмкость удваивается, когда
//! очередная вставка упирается в неё, поэтому амортизированная стоимость
//! `push` постоянна.

use wordex_error::{TableError, TableResult};

/// Растущая последовательность `i32`.
///
/// **ИНВАРИАНТЫ:**
///
/// - `len() <= capacity()`
/// - элементы занимают индексы `[0, len())` в порядке вставки
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntArray {
    data: Vec<i32>,
    capacity: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl IntArray {
    /// Пустой массив без резерва. Первый `push` выделит место под один
    /// элемент.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Создаёт пустой массив с зарезервированной ёмкостью `initial_capacity`.
    pub fn with_capacity(initial_capacity: usize) -> TableResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(initial_capacity)
            .map_err(|_| TableError::allocation("value array", initial_capacity))?;

        Ok(Self {
            data,
            capacity: initial_capacity,
        })
    }

    /// Возвращает элемент по индексу или `None`, если `index >= len()`.
    #[inline]
    pub fn get(
        &self,
        index: usize,
    ) -> Option<i32> {
        self.data.get(index).copied()
    }

    /// Добавляет значение в конец. При заполнении ёмкость удваивается.
    ///
    /// При ошибке выделения памяти массив остаётся неизменным.
    pub fn push(
        &mut self,
        value: i32,
    ) -> TableResult<()> {
        if self.data.len() >= self.capacity {
            self.grow()?;
        }
        self.data.push(value);
        Ok(())
    }

    /// Количество элементов.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Текущая логическая ёмкость (0, 1, 2, 4, ... или начальная, умноженная
    /// на степень двойки).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, i32>> {
        self.data.iter().copied()
    }

    fn grow(&mut self) -> TableResult<()> {
        let new_capacity = match self.capacity {
            0 => 1,
            cap => cap
                .checked_mul(2)
                .ok_or_else(|| TableError::allocation("value array", usize::MAX))?,
        };

        // Vec может уже держать больше места, чем логическая ёмкость
        // (например, после clone), поэтому резервируем относительно len.
        let additional = new_capacity - self.data.len();
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| TableError::allocation("value array", new_capacity))?;

        self.capacity = new_capacity;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для IntArray
////////////////////////////////////////////////////////////////////////////////

impl<'a> IntoIterator for &'a IntArray {
    type Item = i32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, i32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl AsRef<[i32]> for IntArray {
    fn as_ref(&self) -> &[i32] {
        self.as_slice()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
