use serde::{Serialize, Serializer};
use std::collections::HashSet;

use super::Movie;

/// 去重后的类型集合，保留首次出现的顺序
#[derive(Debug, Clone, Default)]
pub struct GenreSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl GenreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并所有电影的 genres 并去重
    pub fn from_movies(movies: &[Movie]) -> Self {
        let mut set = Self::new();
        for genre in movies.iter().flat_map(|m| m.genres.iter()) {
            set.insert(genre.clone());
        }
        set
    }

    pub fn insert(&mut self, genre: String) -> bool {
        if self.seen.contains(&genre) {
            return false;
        }
        self.seen.insert(genre.clone());
        self.ordered.push(genre);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

// 集合语义：顺序不参与比较
impl PartialEq for GenreSet {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for GenreSet {}

impl Serialize for GenreSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ordered.serialize(serializer)
    }
}

impl<S: Into<String>> FromIterator<S> for GenreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for genre in iter {
            set.insert(genre.into());
        }
        set
    }
}
